//! Storage seams used by the services, and their Postgres implementation.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sts_db::{
    models::NewAttempt,
    repositories::{attempt, memorization},
};
use sts_progress::GradedAttempt;
use sts_srs::MemorizationItem;
use uuid::Uuid;

use crate::error::ServiceError;

/// Persistence of memorization items.
pub trait ItemStore: Send + Sync {
    /// Create a fresh item, due at `now`.
    fn create_item(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<MemorizationItem, ServiceError>> + Send;

    /// Load an item, let `apply` change its scheduling state and persist the
    /// result as one atomic step.
    ///
    /// No other review of the same item may interleave between the read and
    /// the write. Returns `None` without calling `apply` if the item does not
    /// exist, or without persisting anything if it disappears before the write.
    fn review_item<F, T>(
        &self,
        item_id: Uuid,
        apply: F,
    ) -> impl Future<Output = Result<Option<T>, ServiceError>> + Send
    where
        F: FnOnce(&mut MemorizationItem) -> T + Send,
        T: Send;

    /// Items of a user due at `now`, earliest first.
    fn due_items(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<MemorizationItem>, ServiceError>> + Send;
}

/// Persistence of question attempts.
pub trait AttemptStore: Send + Sync {
    /// All attempts of a user within a collection.
    fn fetch_attempts(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
    ) -> impl Future<Output = Result<Vec<GradedAttempt>, ServiceError>> + Send;

    /// Store one attempt and return its id.
    fn record_attempt(
        &self,
        attempt: &NewAttempt,
    ) -> impl Future<Output = Result<Uuid, ServiceError>> + Send;
}

/// Store backed by the `sts-db` repositories.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl ItemStore for PgStore {
    async fn create_item(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<MemorizationItem, ServiceError> {
        let row = memorization::insert_item(&self.pool, user_id, collection_id, now).await?;
        Ok(MemorizationItem::try_from(row)?)
    }

    async fn review_item<F, T>(&self, item_id: Uuid, apply: F) -> Result<Option<T>, ServiceError>
    where
        F: FnOnce(&mut MemorizationItem) -> T + Send,
        T: Send,
    {
        // The row stays locked until commit, so concurrent reviews of one item serialize
        let mut tx = self.pool.begin().await?;

        let Some(row) = memorization::get_item_for_update(&mut *tx, item_id).await? else {
            return Ok(None);
        };
        let mut item = MemorizationItem::try_from(row)?;
        let output = apply(&mut item);

        // Intervals beyond i32::MAX days are unreachable in practice; cap them
        let interval_days = i32::try_from(item.interval_days).unwrap_or(i32::MAX);

        let updated = memorization::update_schedule(
            &mut *tx,
            item.id,
            interval_days,
            item.easiness,
            item.next_review_at,
            item.last_reviewed_at,
        )
        .await?;
        if !updated {
            // Dropping the transaction rolls it back
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(output))
    }

    async fn due_items(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MemorizationItem>, ServiceError> {
        memorization::list_due_items(&self.pool, user_id, now, limit)
            .await?
            .into_iter()
            .map(|row| MemorizationItem::try_from(row).map_err(ServiceError::from))
            .collect()
    }
}

impl AttemptStore for PgStore {
    async fn fetch_attempts(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
    ) -> Result<Vec<GradedAttempt>, ServiceError> {
        attempt::list_attempts(&self.pool, user_id, collection_id)
            .await?
            .into_iter()
            .map(|row| GradedAttempt::try_from(row).map_err(ServiceError::from))
            .collect()
    }

    async fn record_attempt(&self, new_attempt: &NewAttempt) -> Result<Uuid, ServiceError> {
        Ok(attempt::insert_attempt(&self.pool, new_attempt).await?)
    }
}
