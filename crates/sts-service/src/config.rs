use serde::Deserialize;

use crate::error::ServiceError;

/// Deployment environment, selects the logging format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (pretty logs)
    #[default]
    Development,
    /// Production (JSON logs)
    Production,
}

impl Environment {
    /// Whether this is a development environment.
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Service configuration, read from `STS_`-prefixed environment variables.
///
/// | Variable | Default |
/// |----------|---------|
/// | `STS_DATABASE_URL` | required |
/// | `STS_DATABASE_MAX_CONNECTIONS` | `10` |
/// | `STS_ENV` | `development` |
/// | `STS_DUE_ITEMS_LIMIT` | `50` |
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    /// Postgres connection string
    pub database_url: String,
    /// Size of the connection pool
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    /// Deployment environment
    #[serde(default)]
    pub env: Environment,
    /// Maximum number of items returned by one due-queue query
    #[serde(default = "default_due_items_limit")]
    pub due_items_limit: i64,
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_due_items_limit() -> i64 {
    50
}

const ENV_PREFIX: &str = "STS_";

impl ServiceConfig {
    /// Load the configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Load the configuration from explicit key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }
}
