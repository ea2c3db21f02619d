//! Postgres implementation of the vehicle patch store.

use async_trait::async_trait;
use rental_core::types::DbId;
use rental_core::vehicle::VehicleState;
use rental_core::vehicle_patch::VehicleStateStore;
use sqlx::PgPool;

use crate::repositories::VehicleRepo;

/// Reads and writes vehicle patch state through [`VehicleRepo`].
#[derive(Debug, Clone)]
pub struct PgVehicleStateStore {
    pool: PgPool,
}

impl PgVehicleStateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStateStore for PgVehicleStateStore {
    type Error = sqlx::Error;

    async fn load_state(&self, id: DbId) -> Result<Option<VehicleState>, sqlx::Error> {
        Ok(VehicleRepo::find_by_id(&self.pool, id)
            .await?
            .map(|v| v.state()))
    }

    async fn save_state(&self, id: DbId, state: &VehicleState) -> Result<(), sqlx::Error> {
        if !VehicleRepo::update_state(&self.pool, id, state).await? {
            // Deleted between load and save.
            return Err(sqlx::Error::RowNotFound);
        }
        tracing::debug!(vehicle_id = id, status = %state.status, "Vehicle state saved");
        Ok(())
    }
}
