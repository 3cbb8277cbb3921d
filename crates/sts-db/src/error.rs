use thiserror::Error;
use uuid::Uuid;

/// A row that does not satisfy the domain invariants, either read from the
/// store or about to be written to it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Stored interval is below one day
    #[error("memorization item {id} has invalid interval {interval_days}")]
    InvalidInterval { id: Uuid, interval_days: i32 },
    /// Stored easiness lies outside the scheduler's clamp range
    #[error("memorization item {id} has easiness {easiness} outside 1.3..=2.5")]
    InvalidEasiness { id: Uuid, easiness: f64 },
    /// Only one of correctness and answer time is set
    #[error("attempt {id} records correctness and answer time inconsistently")]
    PartialCompletion { id: Uuid },
    /// Stored response time is negative
    #[error("attempt {id} has negative response time {seconds}")]
    NegativeResponseTime { id: Uuid, seconds: i32 },
    /// Response time does not fit the `INTEGER` column
    #[error("attempt on question {question_id} has response time {seconds}s beyond i32::MAX")]
    ResponseTimeOutOfRange { question_id: Uuid, seconds: u32 },
}
