//! Unit tests for the goal service.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use crate::errors::{Error, ValidationError};
use crate::events::{DomainEvent, MockDomainEventSink};
use crate::goals::{GoalService, GoalServiceTrait, GoalType, GoalUpdate, NewGoal};
use crate::test_support::{at, InMemoryStore};
use crate::utils::time_utils::{Clock, FixedClock};

fn setup() -> (Arc<InMemoryStore>, FixedClock, MockDomainEventSink, GoalService) {
    let store = InMemoryStore::new();
    let clock = FixedClock::new(at(2024, 1, 4, 0));
    let sink = MockDomainEventSink::new();
    let service = GoalService::new(store.clone(), Arc::new(clock.clone()))
        .with_event_sink(Arc::new(sink.clone()));
    (store, clock, sink, service)
}

fn new_goal(target: Option<i32>, current: i32) -> NewGoal {
    NewGoal {
        id: None,
        title: "Read books".to_string(),
        description: None,
        goal_type: GoalType::Weekly,
        target_value: target,
        current_value: current,
        start_date: None,
        due_date: None,
    }
}

#[tokio::test]
async fn test_create_goal_validates_input() {
    let (_, _, sink, service) = setup();

    let err = service.create_goal(new_goal(Some(0), 0)).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));

    let err = service.create_goal(new_goal(Some(3), -1)).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let mut blank = new_goal(None, 0);
    blank.title = "  ".to_string();
    let err = service.create_goal(blank).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::MissingField(_))));

    let mut inverted = new_goal(Some(3), 0);
    inverted.start_date = NaiveDate::from_ymd_opt(2024, 2, 1);
    inverted.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    assert!(service.create_goal(inverted).await.is_err());

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_create_goal_starts_completed_when_target_already_met() {
    let (_, clock, sink, service) = setup();
    let goal = service.create_goal(new_goal(Some(2), 2)).await.unwrap();
    assert_eq!(goal.completed_at, Some(clock.now()));
    assert_eq!(
        sink.events(),
        vec![DomainEvent::goals_changed(vec![goal.id.clone()])]
    );
}

#[tokio::test]
async fn test_breakdown_uses_injected_clock() {
    let (_, clock, _, service) = setup();
    let mut input = new_goal(Some(7), 2);
    input.start_date = NaiveDate::from_ymd_opt(2024, 1, 1);
    input.due_date = NaiveDate::from_ymd_opt(2024, 1, 8);
    let goal = service.create_goal(input).await.unwrap();

    let breakdown = service.get_breakdown(&goal.id).unwrap();
    assert_eq!(breakdown.expected_by_now, Some(3));
    assert!(!breakdown.is_on_track);

    clock.advance(-Duration::days(2));
    let breakdown = service.breakdown_for(&service.get_goal(&goal.id).unwrap());
    assert_eq!(breakdown.expected_by_now, Some(1));
    assert!(breakdown.is_on_track);
}

#[tokio::test]
async fn test_direct_edit_reaching_target_completes() {
    let (_, clock, _, service) = setup();
    let goal = service.create_goal(new_goal(Some(5), 1)).await.unwrap();

    let update = GoalUpdate {
        current_value: Some(5),
        ..GoalUpdate::default()
    };
    let goal = service.update_goal(&goal.id, update).await.unwrap();
    assert_eq!(goal.current_value, 5);
    assert_eq!(goal.completed_at, Some(clock.now()));
}

#[tokio::test]
async fn test_direct_edit_uses_target_from_same_edit() {
    let (_, _, _, service) = setup();
    let goal = service.create_goal(new_goal(Some(10), 1)).await.unwrap();

    let update = GoalUpdate {
        current_value: Some(4),
        target_value: Some(Some(4)),
        ..GoalUpdate::default()
    };
    let goal = service.update_goal(&goal.id, update).await.unwrap();
    assert!(goal.is_completed());
}

#[tokio::test]
async fn test_direct_edit_below_target_does_not_reopen() {
    let (_, _, _, service) = setup();
    let goal = service.create_goal(new_goal(Some(3), 3)).await.unwrap();
    assert!(goal.is_completed());

    let update = GoalUpdate {
        current_value: Some(1),
        ..GoalUpdate::default()
    };
    let goal = service.update_goal(&goal.id, update).await.unwrap();
    assert_eq!(goal.current_value, 1);
    assert!(goal.is_completed());

    let reopen = GoalUpdate {
        completed: Some(false),
        ..GoalUpdate::default()
    };
    let goal = service.update_goal(&goal.id, reopen).await.unwrap();
    assert!(!goal.is_completed());
}

#[tokio::test]
async fn test_target_only_edit_does_not_complete() {
    let (_, _, _, service) = setup();
    let goal = service.create_goal(new_goal(Some(10), 4)).await.unwrap();
    let update = GoalUpdate {
        target_value: Some(Some(3)),
        ..GoalUpdate::default()
    };
    let goal = service.update_goal(&goal.id, update).await.unwrap();
    assert!(!goal.is_completed());
}

#[tokio::test]
async fn test_manual_adjust_round_trip() {
    let (_, clock, sink, service) = setup();
    let goal = service.create_goal(new_goal(Some(3), 2)).await.unwrap();
    sink.clear();

    let up = service.adjust_progress(&goal.id, 1).await.unwrap();
    assert_eq!(up.current_value, 3);
    assert_eq!(up.completed_at, Some(clock.now()));
    assert!(up.completed());

    let down = service.adjust_progress(&goal.id, -1).await.unwrap();
    assert_eq!(down.current_value, 2);
    assert!(down.reopened());

    assert_eq!(
        sink.progress_moves(),
        vec![(goal.id.clone(), 2, 3), (goal.id.clone(), 3, 2)]
    );
}

#[tokio::test]
async fn test_manual_adjust_clamps_and_rejects_zero() {
    let (_, _, _, service) = setup();
    let goal = service.create_goal(new_goal(None, 0)).await.unwrap();

    for _ in 0..3 {
        let change = service.adjust_progress(&goal.id, -1).await.unwrap();
        assert_eq!(change.current_value, 0);
    }
    assert!(matches!(
        service.adjust_progress(&goal.id, 0).await,
        Err(Error::Validation(_))
    ));
    assert!(service
        .adjust_progress("missing", 1)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_delete_goal() {
    let (_, _, sink, service) = setup();
    let goal = service.create_goal(new_goal(None, 0)).await.unwrap();
    sink.clear();

    assert_eq!(service.delete_goal(&goal.id).await.unwrap(), 1);
    assert_eq!(sink.events(), vec![DomainEvent::goal_deleted(goal.id.clone())]);
    assert!(service.get_goal(&goal.id).unwrap_err().is_not_found());
    assert!(service.delete_goal(&goal.id).await.unwrap_err().is_not_found());
}
