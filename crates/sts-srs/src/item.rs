use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    INITIAL_EASINESS, INITIAL_INTERVAL_DAYS, ReviewQuality, ScheduledReview, schedule_next_review,
};

/// Scheduling state of a single memorization item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorizationItem {
    /// Store-owned identifier
    pub id: Uuid,
    /// Days until the next scheduled review (always >= 1)
    pub interval_days: u32,
    /// Easiness factor, kept within [`MIN_EASINESS`](crate::MIN_EASINESS)..=[`MAX_EASINESS`](crate::MAX_EASINESS)
    pub easiness: f64,
    /// When the item becomes due
    pub next_review_at: DateTime<Utc>,
    /// Last completed review, `None` for a fresh item
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl MemorizationItem {
    /// A fresh item, due immediately.
    pub const fn new(id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            interval_days: INITIAL_INTERVAL_DAYS,
            easiness: INITIAL_EASINESS,
            next_review_at: now,
            last_reviewed_at: None,
        }
    }

    /// Whether the item should be shown for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Apply a completed review and return the computed schedule.
    pub fn apply_review(&mut self, quality: ReviewQuality, now: DateTime<Utc>) -> ScheduledReview {
        let scheduled = schedule_next_review(self.interval_days, self.easiness, quality, now);

        self.interval_days = scheduled.interval_days;
        self.easiness = scheduled.easiness;
        self.next_review_at = scheduled.next_review_at;
        self.last_reviewed_at = Some(now);

        scheduled
    }
}
