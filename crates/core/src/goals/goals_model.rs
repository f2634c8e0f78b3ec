//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::breakdown::{calculate_breakdown, Breakdown, BreakdownInput};
use crate::errors::{Error, Result};
use crate::utils::validate_title;

/// Cadence of a goal. Drives the fallback pacing window when a goal has no
/// explicit start/due dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Daily => "DAILY",
            GoalType::Weekly => "WEEKLY",
            GoalType::Monthly => "MONTHLY",
            GoalType::Yearly => "YEARLY",
        }
    }

    /// Length of the pacing window in days when no date range is set.
    pub fn window_days(&self) -> i64 {
        match self {
            GoalType::Daily => 1,
            GoalType::Weekly => 7,
            GoalType::Monthly => 30,
            GoalType::Yearly => 365,
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAILY" => Ok(GoalType::Daily),
            "WEEKLY" => Ok(GoalType::Weekly),
            "MONTHLY" => Ok(GoalType::Monthly),
            "YEARLY" => Ok(GoalType::Yearly),
            other => Err(Error::invalid_input(format!("Unknown goal type '{}'", other))),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: GoalType,
    /// `None` means a binary done/not-done goal.
    pub target_value: Option<i32>,
    pub current_value: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn progress(&self) -> GoalProgress {
        GoalProgress {
            current_value: self.current_value,
            target_value: self.target_value,
            completed_at: self.completed_at,
        }
    }

    pub fn breakdown_input(&self) -> BreakdownInput {
        BreakdownInput {
            goal_type: self.goal_type,
            target_value: self.target_value,
            current_value: self.current_value,
            start_date: self.start_date,
            due_date: self.due_date,
        }
    }

    /// Pace projection of this goal as seen at `now`.
    pub fn breakdown(&self, now: NaiveDateTime) -> Breakdown {
        calculate_breakdown(&self.breakdown_input(), now)
    }
}

/// The slice of a goal the cascade rules read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub current_value: i32,
    pub target_value: Option<i32>,
    pub completed_at: Option<NaiveDateTime>,
}

impl GoalProgress {
    /// True when a numeric target exists and has been reached.
    pub fn target_reached(&self) -> bool {
        matches!(self.target_value, Some(target) if self.current_value >= target)
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub goal_type: GoalType,
    pub target_value: Option<i32>,
    #[serde(default)]
    pub current_value: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_target(self.target_value)?;
        validate_current(self.current_value)?;
        validate_window(self.start_date, self.due_date)
    }

    /// Builds the stored goal. A goal created at or past its target starts completed.
    pub fn into_goal(self, id: String, now: NaiveDateTime) -> Goal {
        let reached = matches!(self.target_value, Some(t) if self.current_value >= t);
        Goal {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            goal_type: self.goal_type,
            target_value: self.target_value,
            current_value: self.current_value,
            start_date: self.start_date,
            due_date: self.due_date,
            completed_at: reached.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a goal.
///
/// Nullable fields use a double option: absent leaves the stored value alone,
/// `null` clears it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub target_value: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<i32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    /// Explicit completion toggle from the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl GoalUpdate {
    /// Applies the update to `goal`, returning the resulting row.
    ///
    /// A directly edited `current_value` that meets the effective target marks
    /// the goal completed. Lowering it never reopens the goal; only the
    /// explicit `completed: false` toggle does.
    pub fn apply_to(&self, goal: &Goal, now: NaiveDateTime) -> Result<Goal> {
        let mut next = goal.clone();

        if let Some(title) = &self.title {
            validate_title(title)?;
            next.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(goal_type) = self.goal_type {
            next.goal_type = goal_type;
        }
        if let Some(target_value) = self.target_value {
            validate_target(target_value)?;
            next.target_value = target_value;
        }
        if let Some(current_value) = self.current_value {
            validate_current(current_value)?;
            next.current_value = current_value;
        }
        if let Some(start_date) = self.start_date {
            next.start_date = start_date;
        }
        if let Some(due_date) = self.due_date {
            next.due_date = due_date;
        }
        validate_window(next.start_date, next.due_date)?;

        match self.completed {
            Some(true) => {
                if next.completed_at.is_none() {
                    next.completed_at = Some(now);
                }
            }
            Some(false) => next.completed_at = None,
            None => {
                if self.current_value.is_some()
                    && next.completed_at.is_none()
                    && next.progress().target_reached()
                {
                    next.completed_at = Some(now);
                }
            }
        }

        next.updated_at = now;
        Ok(next)
    }
}

/// Before/after view of a goal whose progress moved because of a cascade or
/// a manual adjustment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressChange {
    pub goal_id: String,
    pub previous_value: i32,
    pub current_value: i32,
    pub previous_completed_at: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
}

impl GoalProgressChange {
    pub fn completed(&self) -> bool {
        self.previous_completed_at.is_none() && self.completed_at.is_some()
    }

    pub fn reopened(&self) -> bool {
        self.previous_completed_at.is_some() && self.completed_at.is_none()
    }
}

fn validate_target(target_value: Option<i32>) -> Result<()> {
    match target_value {
        Some(target) if target <= 0 => Err(Error::invalid_input(format!(
            "targetValue must be a positive integer, got {}",
            target
        ))),
        _ => Ok(()),
    }
}

fn validate_current(current_value: i32) -> Result<()> {
    if current_value < 0 {
        return Err(Error::invalid_input(format!(
            "currentValue cannot be negative, got {}",
            current_value
        )));
    }
    Ok(())
}

fn validate_window(start_date: Option<NaiveDate>, due_date: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(due)) = (start_date, due_date) {
        if due < start {
            return Err(Error::invalid_input(format!(
                "dueDate {} is before startDate {}",
                due, start
            )));
        }
    }
    Ok(())
}
