//! Composition layer of the study tracker core.
//!
//! Wires the pure scheduler (`sts-srs`) and progress aggregator
//! (`sts-progress`) to the Postgres store (`sts-db`), and carries the
//! configuration, logging and metrics setup shared by host applications.

pub mod config;
pub mod error;
pub mod metrics;
pub mod progress;
pub mod review;
pub mod state;
pub mod store;
pub mod tracing;

pub use config::{Environment, ServiceConfig};
pub use error::ServiceError;
pub use progress::ProgressService;
pub use review::ReviewService;
pub use state::ServiceState;
pub use store::{AttemptStore, ItemStore, PgStore};
