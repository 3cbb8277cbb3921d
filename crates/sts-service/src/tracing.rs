//! Tracing and logging configuration
//!
//! Development builds get human-readable logs, production builds get
//! flattened JSON events for log aggregation. `RUST_LOG` overrides the
//! default filter in both cases.

use tracing_subscriber::{
    EnvFilter, Layer,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,sqlx=warn";
const PRODUCTION_FILTER: &str = "info,sqlx=warn";

/// Install the global subscriber for `env`.
///
/// Fails if a subscriber is already installed, which lets tests and
/// embedding applications call this more than once.
pub fn init_tracing(env: &Environment) -> Result<(), TryInitError> {
    let default_filter = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .with_filter(env_filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::info!(environment = ?env, "Tracing initialized");
    Ok(())
}
