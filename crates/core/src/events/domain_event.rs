//! Domain event types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::goals::GoalProgressChange;

/// Domain events emitted by core services after successful mutations.
///
/// These events represent facts about domain data changes. Runtime adapters
/// decide what to do with them (logging, client notifications).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Goals were created or edited directly.
    GoalsChanged { goal_ids: Vec<String> },

    /// A goal was deleted. Its tasks and library items were unlinked.
    GoalDeleted { goal_id: String },

    /// A goal's progress moved, either through a cascade or a manual adjustment.
    GoalProgressChanged {
        goal_id: String,
        previous_value: i32,
        current_value: i32,
        completed_at: Option<NaiveDateTime>,
        /// True when this change set `completed_at`.
        completed: bool,
        /// True when this change cleared `completed_at`.
        reopened: bool,
    },

    /// Tasks were created, updated, or deleted.
    TasksChanged {
        task_ids: Vec<String>,
        goal_ids: Vec<String>,
    },

    /// Library items were created, updated, or deleted.
    LibraryItemsChanged {
        item_ids: Vec<String>,
        goal_ids: Vec<String>,
    },
}

impl DomainEvent {
    pub fn goals_changed(goal_ids: Vec<String>) -> Self {
        Self::GoalsChanged { goal_ids }
    }

    pub fn goal_deleted(goal_id: impl Into<String>) -> Self {
        Self::GoalDeleted {
            goal_id: goal_id.into(),
        }
    }

    pub fn goal_progress_changed(change: &GoalProgressChange) -> Self {
        Self::GoalProgressChanged {
            goal_id: change.goal_id.clone(),
            previous_value: change.previous_value,
            current_value: change.current_value,
            completed_at: change.completed_at,
            completed: change.completed(),
            reopened: change.reopened(),
        }
    }

    pub fn tasks_changed(task_ids: Vec<String>, goal_ids: Vec<String>) -> Self {
        Self::TasksChanged { task_ids, goal_ids }
    }

    pub fn library_items_changed(item_ids: Vec<String>, goal_ids: Vec<String>) -> Self {
        Self::LibraryItemsChanged { item_ids, goal_ids }
    }
}

/// Collects the distinct goal ids touched by a set of references, keeping order.
pub fn distinct_goal_ids<'a>(ids: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids.into_iter().flatten() {
        if !out.iter().any(|existing| existing == id) {
            out.push(id.to_string());
        }
    }
    out
}
