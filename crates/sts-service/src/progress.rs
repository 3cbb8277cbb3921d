use sts_db::models::NewAttempt;
use sts_progress::{ProgressSummary, summarize_progress};
use uuid::Uuid;

use crate::{error::ServiceError, metrics, store::AttemptStore};

/// Computes progress summaries from the stored answer history.
#[derive(Debug, Clone)]
pub struct ProgressService<S> {
    store: S,
}

impl<S: AttemptStore> ProgressService<S> {
    /// Build a service over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Summary of every attempt of `user_id` in `collection_id`.
    pub async fn summary(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
    ) -> Result<ProgressSummary, ServiceError> {
        let attempts = self.store.fetch_attempts(user_id, collection_id).await?;
        let summary = summarize_progress(&attempts);

        metrics::record_summary(attempts.len());
        tracing::debug!(
            %user_id,
            %collection_id,
            total = summary.total,
            completed = summary.completed,
            accuracy_percent = summary.accuracy_percent,
            "Progress summary computed"
        );

        Ok(summary)
    }

    /// Store an answered (or opened) question.
    pub async fn record_answer(&self, attempt: NewAttempt) -> Result<Uuid, ServiceError> {
        attempt.stored_response_time().inspect_err(|err| {
            tracing::warn!(question_id = %attempt.question_id, "Rejected answer: {err}");
        })?;

        let attempt_id = self.store.record_attempt(&attempt).await?;

        metrics::record_answer(attempt.result.is_some());
        tracing::debug!(
            %attempt_id,
            user_id = %attempt.user_id,
            question_id = %attempt.question_id,
            is_correct = attempt.result.map(|r| r.is_correct),
            "Answer recorded"
        );

        Ok(attempt_id)
    }
}
