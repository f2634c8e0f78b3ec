//! Tasks domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::goals::GoalProgressChange;
use crate::utils::{validate_goal_ref, validate_title};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Blocked => "BLOCKED",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "BLOCKED" => Ok(TaskStatus::Blocked),
            "DONE" => Ok(TaskStatus::Done),
            other => Err(Error::invalid_input(format!("Unknown task status '{}'", other))),
        }
    }
}

/// Domain model representing a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Weak reference: the goal may be deleted under the task.
    pub goal_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Input model for creating a new task
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub goal_id: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_goal_ref(self.goal_id.as_deref())
    }

    pub fn into_task(self, id: String, now: NaiveDateTime) -> Task {
        let completed_at = (self.status == TaskStatus::Done).then_some(now);
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            status: self.status,
            goal_id: self.goal_id,
            scheduled_date: self.scheduled_date,
            completed_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a task. Double options distinguish "absent" from `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub goal_id: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub scheduled_date: Option<Option<NaiveDate>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn goal(goal_id: Option<&str>) -> Self {
        Self {
            goal_id: Some(goal_id.map(str::to_string)),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(goal_id) = &self.goal_id {
            validate_goal_ref(goal_id.as_deref())?;
        }
        Ok(())
    }

    /// Merges the update into `task`. Entering DONE stamps `completed_at`,
    /// leaving DONE clears it.
    pub fn apply_to(&self, task: &Task, now: NaiveDateTime) -> Result<Task> {
        self.validate()?;
        let mut next = task.clone();

        if let Some(title) = &self.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(goal_id) = &self.goal_id {
            next.goal_id = goal_id.clone();
        }
        if let Some(scheduled_date) = self.scheduled_date {
            next.scheduled_date = scheduled_date;
        }
        if let Some(status) = self.status {
            next.status = status;
            match (task.is_done(), next.is_done()) {
                (false, true) => next.completed_at = Some(now),
                (true, false) => next.completed_at = None,
                _ => {}
            }
        }

        next.updated_at = now;
        Ok(next)
    }
}

/// Filter for listing tasks.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub goal_id: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.goal_id
            .as_deref()
            .map_or(true, |goal_id| task.goal_id.as_deref() == Some(goal_id))
            && self.status.map_or(true, |status| task.status == status)
    }
}

/// Result of a task write: the task (as stored, or as it was before deletion)
/// and every goal whose progress moved with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskMutation {
    pub task: Task,
    pub goal_changes: Vec<GoalProgressChange>,
}
