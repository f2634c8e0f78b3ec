use log::debug;
use std::sync::Arc;

use super::tasks_model::{NewTask, Task, TaskFilter, TaskMutation, TaskUpdate};
use super::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use crate::errors::Result;
use crate::events::{distinct_goal_ids, DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::utils::time_utils::Clock;
use async_trait::async_trait;

/// Service for managing tasks and, through them, goal progress.
pub struct TaskService {
    repository: Arc<dyn TaskRepositoryTrait>,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn emit_mutation(&self, mutation: &TaskMutation) {
        let goal_ids = distinct_goal_ids(
            std::iter::once(mutation.task.goal_id.as_deref()).chain(
                mutation
                    .goal_changes
                    .iter()
                    .map(|change| Some(change.goal_id.as_str())),
            ),
        );
        let mut events = vec![DomainEvent::tasks_changed(
            vec![mutation.task.id.clone()],
            goal_ids,
        )];
        events.extend(
            mutation
                .goal_changes
                .iter()
                .map(DomainEvent::goal_progress_changed),
        );
        self.event_sink.emit_batch(events);
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    fn get_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.repository.list(filter)
    }

    fn get_task(&self, task_id: &str) -> Result<Task> {
        self.repository.get_by_id(task_id)
    }

    async fn create_task(&self, new_task: NewTask) -> Result<TaskMutation> {
        new_task.validate()?;
        let mutation = self.repository.create(new_task, self.clock.now()).await?;
        debug!(
            "Created task {} ({} goal change(s))",
            mutation.task.id,
            mutation.goal_changes.len()
        );
        self.emit_mutation(&mutation);
        Ok(mutation)
    }

    async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<TaskMutation> {
        update.validate()?;
        let mutation = self
            .repository
            .update(task_id, update, self.clock.now())
            .await?;
        debug!(
            "Updated task {} to {} ({} goal change(s))",
            task_id,
            mutation.task.status,
            mutation.goal_changes.len()
        );
        self.emit_mutation(&mutation);
        Ok(mutation)
    }

    async fn delete_task(&self, task_id: &str) -> Result<TaskMutation> {
        let mutation = self.repository.delete(task_id, self.clock.now()).await?;
        debug!(
            "Deleted task {} ({} goal change(s))",
            task_id,
            mutation.goal_changes.len()
        );
        self.emit_mutation(&mutation);
        Ok(mutation)
    }
}
