//! Per-task serialization and update strategy tests over a gated store.

use super::helpers::{column_ids, gated_board, task_id};
use std::time::Duration;
use taskboard::board::{
    domain::TaskStatus,
    ports::TaskStoreError,
    services::{BoardConfig, BoardError, InFlightPolicy, UpdateStrategy, ValidationError},
};

#[tokio::test(flavor = "multi_thread")]
async fn queued_updates_for_one_task_never_overlap() {
    let (coordinator, store, _notifier) = gated_board(BoardConfig::default()).await;
    let id = task_id("3");

    let (first, second, ()) = tokio::join!(
        coordinator.apply_status_change(&id, TaskStatus::Completed),
        coordinator.apply_status_change(&id, TaskStatus::Scheduled),
        async {
            store.wait_for_updates(1).await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert_eq!(store.update_calls(), 1, "second update must wait");
            store.release(2);
        }
    );

    first.expect("first update should succeed");
    second.expect("queued update should succeed");
    assert_eq!(store.update_calls(), 2);
    assert_eq!(store.max_in_flight(), 1);
    assert_eq!(store.stored_status(&id).await, Some(TaskStatus::Scheduled));
    assert_eq!(column_ids(&coordinator, TaskStatus::Scheduled), vec!["1", "2", "3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn reject_policy_refuses_a_concurrent_update() {
    let config = BoardConfig::default().with_in_flight_policy(InFlightPolicy::Reject);
    let (coordinator, store, notifier) = gated_board(config).await;
    let id = task_id("3");

    let (first, second, ()) = tokio::join!(
        coordinator.apply_status_change(&id, TaskStatus::Completed),
        coordinator.apply_status_change(&id, TaskStatus::Scheduled),
        async {
            store.wait_for_updates(1).await;
            store.release(1);
        }
    );

    first.expect("first update should succeed");
    assert!(matches!(
        second,
        Err(BoardError::Validation(ValidationError::UpdateInProgress(_)))
    ));
    assert_eq!(store.update_calls(), 1);
    let messages: Vec<String> = notifier
        .notifications()
        .iter()
        .map(|notification| notification.message().to_owned())
        .collect();
    assert!(messages.contains(&"Task 3: update already in progress for task 3".to_owned()));
}

#[tokio::test(flavor = "multi_thread")]
async fn pessimistic_update_keeps_task_in_place_until_confirmed() {
    let (coordinator, store, _notifier) = gated_board(BoardConfig::default()).await;
    let id = task_id("3");

    let (result, ()) = tokio::join!(
        coordinator.apply_status_change(&id, TaskStatus::Completed),
        async {
            store.wait_for_updates(1).await;
            assert_eq!(column_ids(&coordinator, TaskStatus::InProgress), vec!["3"]);
            assert_eq!(coordinator.pending_status(&id), None);
            store.release(1);
        }
    );

    result.expect("update should succeed");
    assert_eq!(column_ids(&coordinator, TaskStatus::Completed), vec!["3", "4"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn optimistic_update_shows_target_column_and_rolls_back_on_failure() {
    let config = BoardConfig::default().with_update_strategy(UpdateStrategy::Optimistic);
    let (coordinator, store, notifier) = gated_board(config).await;
    store.reject_with(TaskStoreError::ConstraintViolation(
        "status check failed".to_owned(),
    ));
    let id = task_id("3");
    let before = coordinator.board();

    let (result, ()) = tokio::join!(
        coordinator.apply_status_change(&id, TaskStatus::Completed),
        async {
            store.wait_for_updates(1).await;
            assert_eq!(coordinator.pending_status(&id), Some(TaskStatus::Completed));
            assert_eq!(column_ids(&coordinator, TaskStatus::Completed), vec!["3", "4"]);
            store.release(1);
        }
    );

    assert!(matches!(
        result,
        Err(BoardError::Store(TaskStoreError::ConstraintViolation(_)))
    ));
    assert_eq!(coordinator.board(), before);
    assert_eq!(coordinator.pending_status(&id), None);
    assert_eq!(store.stored_status(&id).await, Some(TaskStatus::InProgress));
    let notifications = notifier.notifications();
    let last = notifications.last().expect("failure notification");
    assert_eq!(
        last.message(),
        "Task 3: constraint violation: status check failed"
    );
}
