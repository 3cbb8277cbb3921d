use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use chrono::{DateTime, TimeZone, Utc};
use sts_db::models::NewAttempt;
use sts_progress::GradedAttempt;
use sts_service::{AttemptStore, ItemStore, ServiceError};
use sts_srs::MemorizationItem;
use uuid::Uuid;

/// Fixed review time used across tests: 2025-03-10 15:20:00 UTC
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 15, 20, 0).unwrap()
}

#[derive(Debug, Clone)]
struct StoredItem {
    user_id: Uuid,
    item: MemorizationItem,
}

#[derive(Debug, Clone)]
struct StoredAttempt {
    user_id: Uuid,
    collection_id: Uuid,
    attempt: GradedAttempt,
}

/// In-memory store implementing both store traits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<HashMap<Uuid, StoredItem>>>,
    attempts: Arc<Mutex<Vec<StoredAttempt>>>,
    /// Delete the item after it was read but before the review is written
    vanish_during_review: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item with an arbitrary scheduling state
    pub fn insert(&self, user_id: Uuid, item: MemorizationItem) {
        self.items
            .lock()
            .unwrap()
            .insert(item.id, StoredItem { user_id, item });
    }

    pub fn item(&self, item_id: Uuid) -> Option<MemorizationItem> {
        self.items
            .lock()
            .unwrap()
            .get(&item_id)
            .map(|stored| stored.item.clone())
    }

    pub fn remove(&self, item_id: Uuid) {
        self.items.lock().unwrap().remove(&item_id);
    }

    pub fn vanish_during_review(&self) {
        self.vanish_during_review.store(true, Ordering::SeqCst);
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

impl ItemStore for MemoryStore {
    async fn create_item(
        &self,
        user_id: Uuid,
        _collection_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<MemorizationItem, ServiceError> {
        let item = MemorizationItem::new(Uuid::new_v4(), now);
        self.insert(user_id, item.clone());
        Ok(item)
    }

    async fn review_item<F, T>(&self, item_id: Uuid, apply: F) -> Result<Option<T>, ServiceError>
    where
        F: FnOnce(&mut MemorizationItem) -> T + Send,
        T: Send,
    {
        let mut items = self.items.lock().unwrap();
        let Some(stored) = items.get_mut(&item_id) else {
            return Ok(None);
        };

        let mut item = stored.item.clone();
        let output = apply(&mut item);

        if self.vanish_during_review.load(Ordering::SeqCst) {
            items.remove(&item_id);
            return Ok(None);
        }

        stored.item = item;
        Ok(Some(output))
    }

    async fn due_items(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MemorizationItem>, ServiceError> {
        let mut due: Vec<MemorizationItem> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|stored| stored.user_id == user_id && stored.item.is_due(now))
            .map(|stored| stored.item.clone())
            .collect();
        due.sort_by(|a, b| (a.next_review_at, a.id).cmp(&(b.next_review_at, b.id)));
        due.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(due)
    }
}

impl AttemptStore for MemoryStore {
    async fn fetch_attempts(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
    ) -> Result<Vec<GradedAttempt>, ServiceError> {
        Ok(self
            .attempts
            .lock()
            .unwrap()
            .iter()
            .filter(|stored| stored.user_id == user_id && stored.collection_id == collection_id)
            .map(|stored| stored.attempt.clone())
            .collect())
    }

    async fn record_attempt(&self, new_attempt: &NewAttempt) -> Result<Uuid, ServiceError> {
        let group = new_attempt.group_key.clone();
        let attempt = match new_attempt.result {
            Some(result) => {
                let attempt = GradedAttempt::completed(
                    new_attempt.question_id,
                    group,
                    result.is_correct,
                    result.answered_at,
                );
                GradedAttempt {
                    response_time_seconds: result.response_time_seconds,
                    ..attempt
                }
            }
            None => GradedAttempt::pending(new_attempt.question_id, group),
        };

        self.attempts.lock().unwrap().push(StoredAttempt {
            user_id: new_attempt.user_id,
            collection_id: new_attempt.collection_id,
            attempt,
        });
        Ok(Uuid::new_v4())
    }
}
