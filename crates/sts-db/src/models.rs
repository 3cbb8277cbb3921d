use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sts_progress::{GradedAttempt, GroupKey};
use sts_srs::{MAX_EASINESS, MIN_EASINESS, MemorizationItem};
use uuid::Uuid;

use crate::RecordError;

/// Memorization item row - scheduling state of one item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemorizationItemRow {
    /// Unique item identifier
    pub id: Uuid,
    /// Owner of the item
    pub user_id: Uuid,
    /// Collection the item belongs to
    pub collection_id: Uuid,
    /// Days until next review (CHECK >= 1)
    pub interval_days: i32,
    /// Easiness factor (CHECK between 1.3 and 2.5)
    pub easiness: f64,
    /// When the item becomes due (indexed with user_id)
    pub next_review_at: DateTime<Utc>,
    /// Last completed review, NULL for new items
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// When the item was last updated
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MemorizationItemRow> for MemorizationItem {
    type Error = RecordError;

    fn try_from(row: MemorizationItemRow) -> Result<Self, Self::Error> {
        let interval_days = u32::try_from(row.interval_days)
            .ok()
            .filter(|days| *days >= 1)
            .ok_or(RecordError::InvalidInterval {
                id: row.id,
                interval_days: row.interval_days,
            })?;

        if !(MIN_EASINESS..=MAX_EASINESS).contains(&row.easiness) {
            return Err(RecordError::InvalidEasiness {
                id: row.id,
                easiness: row.easiness,
            });
        }

        Ok(Self {
            id: row.id,
            interval_days,
            easiness: row.easiness,
            next_review_at: row.next_review_at,
            last_reviewed_at: row.last_reviewed_at,
        })
    }
}

/// Question attempt row - one answer (or open question) in a collection
/// High-volume table, read per (user_id, collection_id)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttemptRow {
    /// Unique attempt identifier
    pub id: Uuid,
    /// User who made the attempt
    pub user_id: Uuid,
    /// Collection the question belongs to
    pub collection_id: Uuid,
    /// Question that was attempted
    pub question_id: Uuid,
    /// Optional subject/category label
    pub group_key: Option<String>,
    /// Whether the answer was right, NULL while not attempted
    pub is_correct: Option<bool>,
    /// When the answer was given, NULL while not attempted
    pub answered_at: Option<DateTime<Utc>>,
    /// Seconds spent answering
    pub response_time_seconds: Option<i32>,
}

impl TryFrom<AttemptRow> for GradedAttempt {
    type Error = RecordError;

    fn try_from(row: AttemptRow) -> Result<Self, Self::Error> {
        let response_time_seconds = row
            .response_time_seconds
            .map(|seconds| {
                u32::try_from(seconds).map_err(|_| RecordError::NegativeResponseTime {
                    id: row.id,
                    seconds,
                })
            })
            .transpose()?;

        let group = GroupKey::from(row.group_key);
        let attempt = match (row.is_correct, row.answered_at) {
            (Some(is_correct), Some(answered_at)) => {
                Self::completed(row.question_id, group, is_correct, answered_at)
            }
            (None, None) => Self::pending(row.question_id, group),
            _ => return Err(RecordError::PartialCompletion { id: row.id }),
        };

        Ok(Self {
            response_time_seconds,
            ..attempt
        })
    }
}

/// Insert struct for question attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttempt {
    /// User who made the attempt
    pub user_id: Uuid,
    /// Collection the question belongs to
    pub collection_id: Uuid,
    /// Question that was attempted
    pub question_id: Uuid,
    /// Optional subject/category label, `None` for the ungrouped bucket
    pub group_key: Option<String>,
    /// `None` records an open (not yet answered) question
    pub result: Option<AttemptResult>,
}

impl NewAttempt {
    /// Response time as stored in the `INTEGER` column.
    ///
    /// Values beyond `i32::MAX` seconds are rejected rather than truncated.
    pub fn stored_response_time(&self) -> Result<Option<i32>, RecordError> {
        self.result
            .and_then(|result| result.response_time_seconds)
            .map(|seconds| {
                i32::try_from(seconds).map_err(|_| RecordError::ResponseTimeOutOfRange {
                    question_id: self.question_id,
                    seconds,
                })
            })
            .transpose()
    }
}

/// Result of an answered question
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttemptResult {
    /// Whether the answer was right
    pub is_correct: bool,
    /// When the answer was given
    pub answered_at: DateTime<Utc>,
    /// Seconds spent answering, if measured
    pub response_time_seconds: Option<u32>,
}
