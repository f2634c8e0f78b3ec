//! Property-based tests for goal pacing and progress cascades.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lifeos_core::goals::cascade::{adjusted_value, apply_adjustment};
use lifeos_core::goals::{
    calculate_breakdown, BreakdownInput, GoalAdjustment, GoalProgress, GoalType,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_goal_type() -> impl Strategy<Value = GoalType> {
    prop_oneof![
        Just(GoalType::Daily),
        Just(GoalType::Weekly),
        Just(GoalType::Monthly),
        Just(GoalType::Yearly),
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// Goal windows with an optional start and a due date on or after it.
fn arb_input(target: impl Strategy<Value = Option<i32>>) -> impl Strategy<Value = BreakdownInput> {
    (
        arb_goal_type(),
        target,
        0i32..10_000,
        proptest::option::of(arb_date()),
        proptest::option::of(0i64..800),
    )
        .prop_map(|(goal_type, target_value, current_value, start_date, span)| {
            BreakdownInput {
                goal_type,
                target_value,
                current_value,
                start_date,
                due_date: start_date.zip(span).map(|(start, days)| start + Duration::days(days)),
            }
        })
}

fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
    (arb_date(), 0u32..24).prop_map(|(date, hour)| date.and_hms_opt(hour, 0, 0).unwrap())
}

fn at_noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Goals without a target never report a pace or a percentage.
    #[test]
    fn prop_binary_goals_have_no_pace(input in arb_input(Just(None)), now in arb_now()) {
        let b = calculate_breakdown(&input, now);
        prop_assert_eq!(b.expected_per_day, None);
        prop_assert_eq!(b.expected_per_week, None);
        prop_assert_eq!(b.expected_by_now, None);
        prop_assert_eq!(b.progress_percent, 0);
        prop_assert_eq!(b.is_on_track, input.current_value > 0);
    }

    /// Progress percent is the rounded ratio, capped at 100.
    #[test]
    fn prop_progress_percent_is_capped_ratio(
        input in arb_input((1i32..5_000).prop_map(Some)),
        now in arb_now(),
    ) {
        let b = calculate_breakdown(&input, now);
        let target = input.target_value.unwrap();
        let expected = (100.0 * f64::from(input.current_value) / f64::from(target))
            .round()
            .min(100.0) as u8;
        prop_assert_eq!(b.progress_percent, expected);
    }

    /// Expected-by-now stays within `0..=target` and exists only with a start date.
    #[test]
    fn prop_expected_by_now_bounded(
        input in arb_input((1i32..5_000).prop_map(Some)),
        now in arb_now(),
    ) {
        let b = calculate_breakdown(&input, now);
        match b.expected_by_now {
            Some(expected) => {
                prop_assert!(input.start_date.is_some());
                prop_assert!(expected >= 0);
                prop_assert!(expected <= input.target_value.unwrap());
                prop_assert_eq!(b.is_on_track, input.current_value >= expected);
            }
            None => {
                prop_assert!(input.start_date.is_none());
                prop_assert_eq!(b.is_on_track, b.progress_percent >= 50);
            }
        }
    }

    /// The daily pace spread over the whole window adds back up to the target.
    #[test]
    fn prop_daily_pace_covers_target(
        input in arb_input((1i32..5_000).prop_map(Some)),
        now in arb_now(),
    ) {
        let b = calculate_breakdown(&input, now);
        let days = lifeos_core::goals::breakdown::total_days(&input) as f64;
        let per_day = b.expected_per_day.unwrap();
        let target = f64::from(input.target_value.unwrap());
        // Rounding to one decimal moves each day by at most 0.05.
        prop_assert!((per_day * days - target).abs() <= 0.05 * days + 1e-9);
        prop_assert_eq!(b.expected_per_week.is_some(), days >= 7.0);
    }

    /// Cascaded values never drop below zero.
    #[test]
    fn prop_adjusted_value_never_negative(current in 0i32..1_000, delta in -2_000i32..2_000) {
        let next = adjusted_value(current, delta);
        prop_assert!(next >= 0);
        prop_assert_eq!(next, (current + delta).max(0));
    }

    /// Completing then reverting one unit restores the value and leaves the goal open.
    #[test]
    fn prop_increment_then_decrement_restores_value(
        current in 0i32..1_000,
        target in proptest::option::of(1i32..1_000),
    ) {
        let start = GoalProgress {
            current_value: current,
            target_value: target,
            completed_at: None,
        };
        let up = apply_adjustment(&start, &GoalAdjustment::increment("g"), at_noon());
        prop_assert_eq!(up.completed_at.is_some(), target.map_or(false, |t| current + 1 >= t));

        let down = apply_adjustment(&up, &GoalAdjustment::decrement("g"), at_noon());
        prop_assert_eq!(down.current_value, current);
        prop_assert_eq!(down.completed_at, None);
    }
}
