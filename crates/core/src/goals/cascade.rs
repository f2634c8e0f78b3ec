//! Goal progress cascade rules.
//!
//! Linked tasks and library items feed a goal's `current_value`. The planners
//! in this module turn a before/after pair of a linked entity into the goal
//! adjustments it implies; storage applies those adjustments in the same
//! transaction as the triggering write.
//!
//! | Trigger                               | Adjustment                      |
//! |---------------------------------------|---------------------------------|
//! | task enters DONE (goal linked)        | +1, complete if target reached  |
//! | task leaves DONE                      | -1, reopen                      |
//! | task deleted while DONE               | -1, reopen                      |
//! | DONE task moved from goal A to B      | A: -1 reopen, B: +1 complete    |
//! | library item created with a goal      | +1, complete if target reached  |
//! | library item deleted                  | -1, reopen                      |
//! | library item moved from goal A to B   | A: -1 reopen, B: +1 complete    |
//! | manual +/- from the UI                | ±n, reconcile                   |
//!
//! Reopen is unconditional: a decrement clears `completed_at` even when the
//! goal is still at or over target.
//!
//! The "DONE task moved" row is not a status transition: a task that stays
//! DONE while its `goal_id` changes still moves its credit, like a library
//! item relink.

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use super::goals_model::GoalProgress;
use crate::library::LibraryItem;
use crate::tasks::Task;

/// What happens to `completed_at` once the delta has been applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionEffect {
    /// Set `completed_at` if the target is reached and it is not already set.
    CompleteIfReached,
    /// Clear `completed_at` if set.
    Reopen,
    /// Complete on reaching the target, reopen on dropping below it.
    Reconcile,
}

/// A single change to a goal's progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GoalAdjustment {
    pub goal_id: String,
    pub delta: i32,
    pub effect: CompletionEffect,
}

impl GoalAdjustment {
    pub fn increment(goal_id: impl Into<String>) -> Self {
        Self {
            goal_id: goal_id.into(),
            delta: 1,
            effect: CompletionEffect::CompleteIfReached,
        }
    }

    pub fn decrement(goal_id: impl Into<String>) -> Self {
        Self {
            goal_id: goal_id.into(),
            delta: -1,
            effect: CompletionEffect::Reopen,
        }
    }
}

/// Adjustments implied by a task transition.
///
/// `before` is `None` for a creation, `after` is `None` for a deletion.
/// Credit follows the goal a DONE task is linked to, so relinking a DONE task
/// moves it even though the status never changes.
pub fn task_adjustments(before: Option<&Task>, after: Option<&Task>) -> Vec<GoalAdjustment> {
    let credited_before = before
        .filter(|t| t.is_done())
        .and_then(|t| t.goal_id.as_deref());
    let credited_after = after
        .filter(|t| t.is_done())
        .and_then(|t| t.goal_id.as_deref());

    let adjustments = move_credit(credited_before, credited_after);
    if !adjustments.is_empty() {
        debug!(
            "Task {} changes goal progress: {:?}",
            after.or(before).map(|t| t.id.as_str()).unwrap_or_default(),
            adjustments
        );
    }
    adjustments
}

/// Adjustments implied by a library item transition.
///
/// Library items have no status: being linked is what counts.
pub fn library_item_adjustments(
    before: Option<&LibraryItem>,
    after: Option<&LibraryItem>,
) -> Vec<GoalAdjustment> {
    let adjustments = move_credit(
        before.and_then(|i| i.goal_id.as_deref()),
        after.and_then(|i| i.goal_id.as_deref()),
    );
    if !adjustments.is_empty() {
        debug!(
            "Library item {} changes goal progress: {:?}",
            after.or(before).map(|i| i.id.as_str()).unwrap_or_default(),
            adjustments
        );
    }
    adjustments
}

/// Manual `+n`/`-n` from the UI.
pub fn manual_adjustment(goal_id: impl Into<String>, delta: i32) -> GoalAdjustment {
    GoalAdjustment {
        goal_id: goal_id.into(),
        delta,
        effect: CompletionEffect::Reconcile,
    }
}

/// Credit held by one goal before and possibly another after. The removal
/// always comes first.
fn move_credit(from: Option<&str>, to: Option<&str>) -> Vec<GoalAdjustment> {
    if from == to {
        return Vec::new();
    }
    from.map(GoalAdjustment::decrement)
        .into_iter()
        .chain(to.map(GoalAdjustment::increment))
        .collect()
}

/// `current + delta`, clamped at zero and saturating at `i32::MAX`.
pub fn adjusted_value(current_value: i32, delta: i32) -> i32 {
    let next = i64::from(current_value) + i64::from(delta);
    next.clamp(0, i64::from(i32::MAX)) as i32
}

/// Resolves `completed_at` for a goal whose value has already been adjusted.
pub fn resolve_completion(
    effect: CompletionEffect,
    progress: &GoalProgress,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let complete_if_reached = || match progress.completed_at {
        None if progress.target_reached() => Some(now),
        existing => existing,
    };

    match effect {
        CompletionEffect::CompleteIfReached => complete_if_reached(),
        CompletionEffect::Reopen => None,
        CompletionEffect::Reconcile => match progress.target_value {
            Some(target) if progress.current_value < target => None,
            _ => complete_if_reached(),
        },
    }
}

/// Applies an adjustment to a progress snapshot.
pub fn apply_adjustment(
    progress: &GoalProgress,
    adjustment: &GoalAdjustment,
    now: NaiveDateTime,
) -> GoalProgress {
    let mut next = GoalProgress {
        current_value: adjusted_value(progress.current_value, adjustment.delta),
        ..*progress
    };
    next.completed_at = resolve_completion(adjustment.effect, &next, now);
    next
}
