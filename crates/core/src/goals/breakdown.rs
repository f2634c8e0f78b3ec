//! Expected-pace projection for goals.
//!
//! Read-only: nothing here touches storage, and "now" is always passed in.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::goals_model::GoalType;
use crate::utils::time_utils::{days_between, start_of_day};

/// The goal fields the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownInput {
    pub goal_type: GoalType,
    pub target_value: Option<i32>,
    pub current_value: i32,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub expected_per_week: Option<f64>,
    pub expected_per_day: Option<f64>,
    pub expected_by_now: Option<i32>,
    pub is_on_track: bool,
    /// Always within `0..=100`.
    pub progress_percent: u8,
}

impl Breakdown {
    fn without_target(current_value: i32) -> Self {
        Self {
            expected_per_week: None,
            expected_per_day: None,
            expected_by_now: None,
            is_on_track: current_value > 0,
            progress_percent: 0,
        }
    }
}

/// Computes the pace breakdown of a goal at `now`.
///
/// Binary goals (no positive target) have no pace; they are "on track" as soon
/// as anything has been logged against them.
pub fn calculate_breakdown(input: &BreakdownInput, now: NaiveDateTime) -> Breakdown {
    let target = match input.target_value {
        Some(target) if target > 0 => target,
        _ => return Breakdown::without_target(input.current_value),
    };

    let progress_percent = progress_percent(input.current_value, target);
    let total_days = total_days(input);

    let per_day = f64::from(target) / total_days as f64;
    let per_week = (total_days >= 7)
        .then(|| round_to_tenth(f64::from(target) / (total_days as f64 / 7.0)));

    let expected_by_now = input.start_date.map(|start| {
        let elapsed_days = days_between(start_of_day(start), now).round().max(0.0);
        let expected = (per_day * elapsed_days).round();
        expected.min(f64::from(target)) as i32
    });

    let is_on_track = match expected_by_now {
        Some(expected) => input.current_value >= expected,
        None => progress_percent >= 50,
    };

    Breakdown {
        expected_per_week: per_week,
        expected_per_day: Some(round_to_tenth(per_day)),
        expected_by_now,
        is_on_track,
        progress_percent,
    }
}

/// Length of the goal's full window in days, never less than one.
pub fn total_days(input: &BreakdownInput) -> i64 {
    match (input.start_date, input.due_date) {
        (Some(start), Some(due)) => (due - start).num_days().max(1),
        _ => input.goal_type.window_days(),
    }
}

fn progress_percent(current_value: i32, target: i32) -> u8 {
    let ratio = f64::from(current_value.max(0)) / f64::from(target);
    (ratio * 100.0).round().min(100.0) as u8
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        start_of_day(date(y, m, d))
    }

    fn input(goal_type: GoalType, target: Option<i32>, current: i32) -> BreakdownInput {
        BreakdownInput {
            goal_type,
            target_value: target,
            current_value: current,
            start_date: None,
            due_date: None,
        }
    }

    #[test]
    fn test_binary_goal_has_no_pace() {
        let now = midnight(2024, 3, 1);
        let b = calculate_breakdown(&input(GoalType::Weekly, None, 0), now);
        assert_eq!(b.expected_per_day, None);
        assert_eq!(b.expected_per_week, None);
        assert_eq!(b.expected_by_now, None);
        assert_eq!(b.progress_percent, 0);
        assert!(!b.is_on_track);

        let b = calculate_breakdown(&input(GoalType::Weekly, None, 1), now);
        assert!(b.is_on_track);
        assert_eq!(b.progress_percent, 0);
    }

    #[test]
    fn test_non_positive_target_is_treated_as_binary() {
        let now = midnight(2024, 3, 1);
        let b = calculate_breakdown(&input(GoalType::Monthly, Some(0), 4), now);
        assert_eq!(b.expected_per_day, None);
        assert!(b.is_on_track);
        assert_eq!(b.progress_percent, 0);
    }

    #[test]
    fn test_weekly_goal_three_days_in() {
        // Monday 2024-01-01 to Monday 2024-01-08, evaluated Thursday midnight.
        let goal = BreakdownInput {
            goal_type: GoalType::Weekly,
            target_value: Some(7),
            current_value: 2,
            start_date: Some(date(2024, 1, 1)),
            due_date: Some(date(2024, 1, 8)),
        };
        let b = calculate_breakdown(&goal, midnight(2024, 1, 4));

        assert_eq!(total_days(&goal), 7);
        assert_eq!(b.expected_per_day, Some(1.0));
        assert_eq!(b.expected_per_week, Some(7.0));
        assert_eq!(b.expected_by_now, Some(3));
        assert_eq!(b.progress_percent, 29);
        assert!(!b.is_on_track);
    }

    #[test]
    fn test_fallback_window_by_type() {
        for (goal_type, days) in [
            (GoalType::Daily, 1),
            (GoalType::Weekly, 7),
            (GoalType::Monthly, 30),
            (GoalType::Yearly, 365),
        ] {
            assert_eq!(total_days(&input(goal_type, Some(10), 0)), days);
        }
    }

    #[test]
    fn test_short_window_has_no_weekly_pace() {
        let b = calculate_breakdown(&input(GoalType::Daily, Some(3), 1), midnight(2024, 1, 1));
        assert_eq!(b.expected_per_week, None);
        assert_eq!(b.expected_per_day, Some(3.0));
        // No start date: on-track falls back to the 50% rule.
        assert_eq!(b.expected_by_now, None);
        assert_eq!(b.progress_percent, 33);
        assert!(!b.is_on_track);
    }

    #[test]
    fn test_same_day_window_is_floored_to_one_day() {
        let goal = BreakdownInput {
            goal_type: GoalType::Yearly,
            target_value: Some(5),
            current_value: 0,
            start_date: Some(date(2024, 6, 1)),
            due_date: Some(date(2024, 6, 1)),
        };
        assert_eq!(total_days(&goal), 1);
        let b = calculate_breakdown(&goal, midnight(2024, 6, 1));
        assert_eq!(b.expected_per_day, Some(5.0));
        assert_eq!(b.expected_by_now, Some(0));
        assert!(b.is_on_track);
    }

    #[test]
    fn test_expected_by_now_is_capped_at_target() {
        let goal = BreakdownInput {
            goal_type: GoalType::Monthly,
            target_value: Some(30),
            current_value: 10,
            start_date: Some(date(2024, 1, 1)),
            due_date: Some(date(2024, 1, 31)),
        };
        let b = calculate_breakdown(&goal, midnight(2024, 3, 1));
        assert_eq!(b.expected_by_now, Some(30));
        assert!(!b.is_on_track);
    }

    #[test]
    fn test_start_in_future_expects_nothing_yet() {
        let mut goal = input(GoalType::Monthly, Some(12), 0);
        goal.start_date = Some(date(2024, 5, 10));
        let b = calculate_breakdown(&goal, midnight(2024, 5, 1));
        assert_eq!(b.expected_by_now, Some(0));
        assert!(b.is_on_track);
        // Falls back to the 30 day window without a due date.
        assert_eq!(b.expected_per_day, Some(0.4));
        assert_eq!(b.expected_per_week, Some(2.8));
    }

    #[test]
    fn test_progress_percent_caps_at_100() {
        let b = calculate_breakdown(&input(GoalType::Weekly, Some(4), 9), midnight(2024, 1, 1));
        assert_eq!(b.progress_percent, 100);
        assert!(b.is_on_track);
    }

    #[test]
    fn test_serializes_camel_case() {
        let b = calculate_breakdown(&input(GoalType::Weekly, Some(14), 7), midnight(2024, 1, 1));
        let json = serde_json::to_value(b).unwrap();
        assert_eq!(json["expectedPerWeek"], 14.0);
        assert_eq!(json["expectedPerDay"], 2.0);
        assert!(json["expectedByNow"].is_null());
        assert_eq!(json["isOnTrack"], true);
        assert_eq!(json["progressPercent"], 50);
    }
}
