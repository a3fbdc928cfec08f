//! Comment thread tests through the coordinator.

use super::helpers::{mounted_board, task_id, user_id};
use taskboard::board::{
    domain::{NotificationLevel, TaskDomainError},
    services::{BoardConfig, BoardError, ValidationError},
};

#[tokio::test(flavor = "multi_thread")]
async fn comments_are_listed_newest_first() {
    let harness = mounted_board(BoardConfig::default()).await;
    let task = task_id("1");
    let author = user_id("user-ada");

    for text in ["Kick-off booked", "Agenda shared"] {
        harness
            .coordinator
            .add_comment(&task, &author, text)
            .await
            .expect("comment should be added");
    }

    let comments = harness
        .coordinator
        .list_comments(&task)
        .await
        .expect("comments should load");
    let texts: Vec<&str> = comments.iter().map(|comment| comment.text()).collect();
    assert_eq!(texts, vec!["Agenda shared", "Kick-off booked"]);
    assert!(comments.iter().all(|comment| comment.author() == &author));
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_comment_is_rejected_before_the_thread() {
    let harness = mounted_board(BoardConfig::default()).await;
    let task = task_id("1");

    let result = harness
        .coordinator
        .add_comment(&task, &user_id("user-ada"), "   ")
        .await;

    assert!(matches!(
        result,
        Err(BoardError::Validation(ValidationError::Domain(
            TaskDomainError::EmptyCommentText
        )))
    ));
    let comments = harness
        .coordinator
        .list_comments(&task)
        .await
        .expect("comments should load");
    assert!(comments.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_comment_twice_reports_an_error() {
    let harness = mounted_board(BoardConfig::default()).await;
    let comment = harness
        .coordinator
        .add_comment(&task_id("2"), &user_id("user-grace"), "Venue confirmed")
        .await
        .expect("comment should be added");

    harness
        .coordinator
        .delete_comment(comment.id())
        .await
        .expect("first delete should succeed");
    let again = harness.coordinator.delete_comment(comment.id()).await;

    assert!(matches!(again, Err(BoardError::Comment(_))));
    let notifications = harness.notifier.notifications();
    let levels: Vec<NotificationLevel> = notifications
        .iter()
        .map(|notification| notification.level())
        .collect();
    assert_eq!(
        levels,
        vec![
            NotificationLevel::Success,
            NotificationLevel::Success,
            NotificationLevel::Error
        ]
    );
}
