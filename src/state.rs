use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared per-request context: the Postgres pool plus the startup config.
/// Cloned into every handler via `Extension`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
