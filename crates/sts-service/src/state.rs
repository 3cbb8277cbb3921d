use sts_srs::SystemClock;

use crate::{
    ServiceConfig, config::Environment, progress::ProgressService, review::ReviewService,
    store::PgStore,
};

/// Shared state of the surrounding application: the store plus settings.
#[derive(Clone, Debug)]
pub struct ServiceState {
    pub store: PgStore,
    pub environment: Environment,
    pub due_items_limit: i64,
}

impl ServiceState {
    /// Connect to the database, apply migrations and build the state.
    pub async fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let pool =
            sts_db::create_pool(&config.database_url, config.database_max_connections).await?;
        sts_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "Database ready"
        );

        Ok(Self {
            store: PgStore::new(pool),
            environment: config.env,
            due_items_limit: config.due_items_limit,
        })
    }

    /// Review scheduling on the wall clock.
    pub fn review_service(&self) -> ReviewService<PgStore> {
        ReviewService::new(self.store.clone(), SystemClock, self.due_items_limit)
    }

    /// Progress aggregation over the stored answer history.
    pub fn progress_service(&self) -> ProgressService<PgStore> {
        ProgressService::new(self.store.clone())
    }
}
