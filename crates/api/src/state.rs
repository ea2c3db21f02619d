use std::sync::Arc;

use rental_db::repositories::PgVehicleStateStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rental_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: rental_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Store used by the vehicle patch flow.
    pub fn vehicle_store(&self) -> PgVehicleStateStore {
        PgVehicleStateStore::new(self.pool.clone())
    }
}
