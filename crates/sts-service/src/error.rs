use sts_db::RecordError;
use sts_srs::InvalidQuality;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid stored record: {0}")]
    Record(#[from] RecordError),
    #[error("Invalid review: {0}")]
    InvalidQuality(#[from] InvalidQuality),
    #[error("Memorization item {0} not found")]
    ItemNotFound(Uuid),
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
}
