//! Mount, unmount and detached write tests.

use super::helpers::{column_ids, gated_board, task_id};
use std::time::Duration;
use taskboard::board::{
    domain::{NotificationLevel, TaskStatus},
    ports::TaskStoreError,
    services::{BoardConfig, UpdateStrategy},
};

#[tokio::test(flavor = "multi_thread")]
async fn write_completes_after_unmount_without_notifying() {
    let (coordinator, store, notifier) = gated_board(BoardConfig::default()).await;
    let id = task_id("3");

    let (result, ()) = tokio::join!(
        coordinator.apply_status_change(&id, TaskStatus::Completed),
        async {
            store.wait_for_updates(1).await;
            coordinator.unmount();
            store.release(1);
        }
    );

    result.expect("write should complete");
    assert!(notifier.notifications().is_empty());
    assert_eq!(store.stored_status(&id).await, Some(TaskStatus::Completed));

    coordinator.mount().await.expect("remount should succeed");
    assert_eq!(column_ids(&coordinator, TaskStatus::Completed), vec!["3", "4"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn dropped_caller_does_not_cancel_an_issued_write() {
    let (coordinator, store, _notifier) = gated_board(BoardConfig::default()).await;
    let id = task_id("3");

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        coordinator.apply_status_change(&id, TaskStatus::Completed),
    )
    .await;
    assert!(abandoned.is_err(), "write should still be waiting at the gate");

    store.release(1);
    tokio::time::timeout(Duration::from_secs(5), async {
        while store.stored_status(&id).await != Some(TaskStatus::Completed) {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("detached write should land");

    coordinator.refresh().await.expect("refresh should succeed");
    assert_eq!(column_ids(&coordinator, TaskStatus::Completed), vec!["3", "4"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_optimistic_move_rolls_back_after_the_caller_is_dropped() {
    let config = BoardConfig::default().with_update_strategy(UpdateStrategy::Optimistic);
    let (coordinator, store, notifier) = gated_board(config).await;
    let id = task_id("3");
    store.reject_with(TaskStoreError::ConstraintViolation("status locked".to_owned()));

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        coordinator.apply_status_change(&id, TaskStatus::Completed),
    )
    .await;
    assert!(abandoned.is_err(), "write should still be waiting at the gate");
    assert_eq!(coordinator.pending_status(&id), Some(TaskStatus::Completed));

    store.release(1);
    tokio::time::timeout(Duration::from_secs(5), async {
        while notifier.notifications().is_empty() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("rejection should be reported");

    assert_eq!(coordinator.pending_status(&id), None);
    assert_eq!(column_ids(&coordinator, TaskStatus::InProgress), vec!["3"]);
    let received = notifier.notifications();
    assert_eq!(received.len(), 1);
    let failure = received.first().expect("one notification");
    assert_eq!(failure.level(), NotificationLevel::Error);
    assert_eq!(failure.title(), "Could not update task");

    coordinator.refresh().await.expect("refresh should succeed");
    assert_eq!(column_ids(&coordinator, TaskStatus::InProgress), vec!["3"]);
    assert_eq!(store.stored_status(&id).await, Some(TaskStatus::InProgress));
}

#[tokio::test(flavor = "multi_thread")]
async fn remount_resets_filters_and_reloads() {
    let (coordinator, _store, _notifier) = gated_board(BoardConfig::default()).await;
    coordinator.set_assignee_filter("Ada".into());
    assert_eq!(coordinator.board().len(), 1);

    coordinator.unmount();
    assert!(!coordinator.is_mounted());
    coordinator.mount().await.expect("remount should succeed");

    assert!(coordinator.is_mounted());
    assert!(coordinator.filters().is_unfiltered());
    assert_eq!(coordinator.board().len(), 4);
}
