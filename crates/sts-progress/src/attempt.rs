use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grouping label of an attempt (subject, category, ...).
///
/// Attempts without a label share the [`GroupKey::Ungrouped`] bucket, which
/// never collides with a user-defined name. Named keys sort before it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    /// A user-defined group name
    Named(String),
    /// Attempts that carry no group
    Ungrouped,
}

impl GroupKey {
    /// The group name, `None` for the ungrouped bucket.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Ungrouped => None,
        }
    }
}

impl From<Option<String>> for GroupKey {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Ungrouped, Self::Named)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::Named(value.to_owned())
    }
}

/// Completion state of an attempt.
///
/// Correctness and answer time only exist together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Not answered yet
    Pending,
    /// Answered and graded
    Completed {
        /// Whether the answer was right
        is_correct: bool,
        /// When the answer was given
        answered_at: DateTime<Utc>,
    },
}

/// One graded question attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedAttempt {
    /// Question/item the attempt belongs to
    pub item_id: Uuid,
    /// Group the attempt is reported under
    pub group: GroupKey,
    /// Whether (and how) the attempt was completed
    pub outcome: AttemptOutcome,
    /// Time spent answering, if recorded
    pub response_time_seconds: Option<u32>,
}

impl GradedAttempt {
    /// An attempt that has not been answered.
    pub fn pending(item_id: Uuid, group: impl Into<GroupKey>) -> Self {
        Self {
            item_id,
            group: group.into(),
            outcome: AttemptOutcome::Pending,
            response_time_seconds: None,
        }
    }

    /// An answered attempt.
    pub fn completed(
        item_id: Uuid,
        group: impl Into<GroupKey>,
        is_correct: bool,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            group: group.into(),
            outcome: AttemptOutcome::Completed {
                is_correct,
                answered_at,
            },
            response_time_seconds: None,
        }
    }

    /// Attach a response time.
    #[must_use]
    pub fn with_response_time(mut self, seconds: u32) -> Self {
        self.response_time_seconds = Some(seconds);
        self
    }

    /// Correctness of a completed attempt, `None` while pending.
    pub fn is_correct(&self) -> Option<bool> {
        match self.outcome {
            AttemptOutcome::Pending => None,
            AttemptOutcome::Completed { is_correct, .. } => Some(is_correct),
        }
    }

    /// Answer time of a completed attempt, `None` while pending.
    pub fn answered_at(&self) -> Option<DateTime<Utc>> {
        match self.outcome {
            AttemptOutcome::Pending => None,
            AttemptOutcome::Completed { answered_at, .. } => Some(answered_at),
        }
    }

    /// Whether the attempt has been answered.
    pub const fn is_completed(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Completed { .. })
    }
}
