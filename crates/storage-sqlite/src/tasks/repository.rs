use chrono::NaiveDateTime;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use lifeos_core::goals::cascade::task_adjustments;
use lifeos_core::tasks::{
    NewTask, Task, TaskFilter, TaskMutation, TaskRepositoryTrait, TaskUpdate,
};
use lifeos_core::{Error, Result};

use super::model::TaskDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::goals::apply_adjustments;
use crate::schema::tasks;
use crate::utils::new_id;

pub struct TaskRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn find_task(conn: &mut SqliteConnection, task_id: &str) -> Result<Task> {
    tasks::table
        .find(task_id)
        .select(TaskDB::as_select())
        .first::<TaskDB>(conn)
        .optional()
        .into_core()?
        .map(Task::from)
        .ok_or_else(|| Error::NotFound(format!("Task {}", task_id)))
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = tasks::table.select(TaskDB::as_select()).into_boxed();
        if let Some(goal_id) = &filter.goal_id {
            query = query.filter(tasks::goal_id.eq(goal_id.clone()));
        }
        if let Some(status) = filter.status {
            query = query.filter(tasks::status.eq(status.as_str()));
        }
        let rows = query
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .load::<TaskDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    fn get_by_id(&self, task_id: &str) -> Result<Task> {
        let mut conn = get_connection(&self.pool)?;
        find_task(&mut conn, task_id)
    }

    async fn create(&self, new_task: NewTask, now: NaiveDateTime) -> Result<TaskMutation> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TaskMutation> {
                let id = new_id(new_task.id.clone());
                let task = new_task.into_task(id, now);

                diesel::insert_into(tasks::table)
                    .values(TaskDB::from(task.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes =
                    apply_adjustments(conn, &task_adjustments(None, Some(&task)), now)?;
                Ok(TaskMutation { task, goal_changes })
            })
            .await
    }

    async fn update(
        &self,
        task_id: &str,
        update: TaskUpdate,
        now: NaiveDateTime,
    ) -> Result<TaskMutation> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TaskMutation> {
                let before = find_task(conn, &task_id)?;
                let task = update.apply_to(&before, now)?;

                diesel::update(tasks::table.find(&task_id))
                    .set(&TaskDB::from(task.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes = apply_adjustments(
                    conn,
                    &task_adjustments(Some(&before), Some(&task)),
                    now,
                )?;
                Ok(TaskMutation { task, goal_changes })
            })
            .await
    }

    async fn delete(&self, task_id: &str, now: NaiveDateTime) -> Result<TaskMutation> {
        let task_id = task_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TaskMutation> {
                let task = find_task(conn, &task_id)?;

                diesel::delete(tasks::table.find(&task_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let goal_changes =
                    apply_adjustments(conn, &task_adjustments(Some(&task), None), now)?;
                Ok(TaskMutation { task, goal_changes })
            })
            .await
    }
}
