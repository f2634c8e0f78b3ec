//! Database models for tasks.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;

use lifeos_core::tasks::{Task, TaskStatus};

#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TaskDB {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub goal_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TaskDB> for Task {
    fn from(db: TaskDB) -> Self {
        let status = db.status.parse::<TaskStatus>().unwrap_or_else(|_| {
            warn!("Task {} has unknown status '{}'", db.id, db.status);
            TaskStatus::default()
        });
        Self {
            id: db.id,
            title: db.title,
            description: db.description,
            status,
            goal_id: db.goal_id,
            scheduled_date: db.scheduled_date,
            completed_at: db.completed_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Task> for TaskDB {
    fn from(domain: Task) -> Self {
        Self {
            id: domain.id,
            title: domain.title,
            description: domain.description,
            status: domain.status.as_str().to_string(),
            goal_id: domain.goal_id,
            scheduled_date: domain.scheduled_date,
            completed_at: domain.completed_at,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
