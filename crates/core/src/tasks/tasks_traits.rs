use chrono::NaiveDateTime;

use crate::errors::Result;
use crate::tasks::tasks_model::{NewTask, Task, TaskFilter, TaskMutation, TaskUpdate};
use async_trait::async_trait;

/// Trait for task repository operations.
///
/// Every write applies the goal adjustments implied by the task transition
/// (see `goals::cascade`) in the same transaction as the task row itself.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
    fn get_by_id(&self, task_id: &str) -> Result<Task>;
    async fn create(&self, new_task: NewTask, now: NaiveDateTime) -> Result<TaskMutation>;
    async fn update(
        &self,
        task_id: &str,
        update: TaskUpdate,
        now: NaiveDateTime,
    ) -> Result<TaskMutation>;
    async fn delete(&self, task_id: &str, now: NaiveDateTime) -> Result<TaskMutation>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    fn get_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;
    fn get_task(&self, task_id: &str) -> Result<Task>;
    async fn create_task(&self, new_task: NewTask) -> Result<TaskMutation>;
    async fn update_task(&self, task_id: &str, update: TaskUpdate) -> Result<TaskMutation>;
    async fn delete_task(&self, task_id: &str) -> Result<TaskMutation>;
}
