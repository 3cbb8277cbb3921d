use sts_srs::{Clock, MemorizationItem, ReviewQuality, SystemClock};
use uuid::Uuid;

use crate::{error::ServiceError, metrics, store::ItemStore};

/// Records reviews of memorization items and serves the due queue.
#[derive(Debug, Clone)]
pub struct ReviewService<S, C = SystemClock> {
    store: S,
    clock: C,
    due_items_limit: i64,
}

impl<S, C> ReviewService<S, C>
where
    S: ItemStore,
    C: Clock,
{
    /// Build a service over `store`, reading time from `clock`.
    pub const fn new(store: S, clock: C, due_items_limit: i64) -> Self {
        Self {
            store,
            clock,
            due_items_limit,
        }
    }

    /// Create a new item for `user_id` in `collection_id`. The item is due immediately.
    pub async fn create_item(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
    ) -> Result<MemorizationItem, ServiceError> {
        let item = self
            .store
            .create_item(user_id, collection_id, self.clock.now())
            .await?;

        tracing::info!(
            item_id = %item.id,
            %user_id,
            %collection_id,
            "Memorization item created"
        );
        Ok(item)
    }

    /// Apply a review rated `raw_quality` (0..=3) to an item and persist the new schedule.
    ///
    /// Reviews of the same item are applied one after another, never from a shared snapshot.
    pub async fn submit_review(
        &self,
        item_id: Uuid,
        raw_quality: i32,
    ) -> Result<MemorizationItem, ServiceError> {
        let quality = ReviewQuality::try_from(raw_quality).inspect_err(|err| {
            metrics::record_rejected_review("invalid_quality");
            tracing::warn!(%item_id, raw_quality, "Rejected review: {err}");
        })?;

        let now = self.clock.now();
        let reviewed = self
            .store
            .review_item(item_id, |item| {
                let previous_interval = item.interval_days;
                let scheduled = item.apply_review(quality, now);
                (item.clone(), previous_interval, scheduled)
            })
            .await?;

        let Some((item, previous_interval, scheduled)) = reviewed else {
            metrics::record_rejected_review("item_not_found");
            tracing::warn!(%item_id, "Review submitted for unknown item");
            return Err(ServiceError::ItemNotFound(item_id));
        };

        metrics::record_review(quality, scheduled.interval_days);
        tracing::info!(
            %item_id,
            quality = quality.as_str(),
            previous_interval,
            interval_days = scheduled.interval_days,
            easiness = scheduled.easiness,
            next_review_at = %scheduled.next_review_at,
            "Review recorded"
        );

        Ok(item)
    }

    /// Items of `user_id` due now, earliest first, capped at the configured limit.
    pub async fn due_items(&self, user_id: Uuid) -> Result<Vec<MemorizationItem>, ServiceError> {
        let items = self
            .store
            .due_items(user_id, self.clock.now(), self.due_items_limit)
            .await?;

        tracing::debug!(%user_id, count = items.len(), "Loaded due items");
        Ok(items)
    }
}
