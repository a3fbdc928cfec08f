//! In-memory comment thread.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::cmp::Reverse;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::board::{
    domain::{Comment, CommentId, CommentText, TaskId, UserId},
    ports::{CommentThread, CommentThreadError, CommentThreadResult},
};

/// Thread-safe in-memory comment thread.
pub struct InMemoryCommentThread<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    comments: Arc<RwLock<Vec<Comment>>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryCommentThread<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl Default for InMemoryCommentThread<DefaultClock> {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl<C> InMemoryCommentThread<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty thread stamping comments from `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            comments: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }
}

fn poisoned(err: impl ToString) -> CommentThreadError {
    CommentThreadError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> CommentThread for InMemoryCommentThread<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, task_id: &TaskId) -> CommentThreadResult<Vec<Comment>> {
        let comments = self.comments.read().map_err(poisoned)?;
        // Insertion order breaks ties between comments stamped in the same instant.
        let mut found: Vec<(usize, &Comment)> = comments
            .iter()
            .enumerate()
            .filter(|(_, comment)| comment.task_id() == task_id)
            .collect();
        found.sort_by_key(|(index, comment)| Reverse((comment.created_at(), *index)));
        Ok(found.into_iter().map(|(_, comment)| comment.clone()).collect())
    }

    async fn add(
        &self,
        task_id: &TaskId,
        author: &UserId,
        text: &CommentText,
    ) -> CommentThreadResult<Comment> {
        let id = CommentId::new(Uuid::new_v4().to_string())
            .map_err(CommentThreadError::persistence)?;
        let comment = Comment::new(
            id,
            task_id.clone(),
            author.clone(),
            text.clone(),
            self.clock.utc(),
        );
        self.comments.write().map_err(poisoned)?.push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: &CommentId) -> CommentThreadResult<()> {
        let mut comments = self.comments.write().map_err(poisoned)?;
        let index = comments
            .iter()
            .position(|comment| comment.id() == id)
            .ok_or_else(|| CommentThreadError::NotFound(id.clone()))?;
        comments.remove(index);
        Ok(())
    }
}
