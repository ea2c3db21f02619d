//! Repository for the `maintenance_record` table.
//!
//! Every lookup is scoped to the owning vehicle.

use rental_core::pagination::{Page, PageRequest};
use rental_core::types::DbId;
use sqlx::PgPool;

use crate::models::maintenance_record::{
    MaintenanceRecord, MaintenanceRecordFilter, MaintenanceRecordInput,
};

const COLUMNS: &str = "id, vehicle_id, maintenance_date, type, description, cost";

/// Predicates shared by the list and count queries. Binds `$1..=$4`.
const FILTER: &str = "vehicle_id = $1
    AND ($2::TEXT IS NULL OR type = $2)
    AND ($3::TIMESTAMPTZ IS NULL OR maintenance_date >= $3)
    AND ($4::TIMESTAMPTZ IS NULL OR maintenance_date <= $4)";

/// Provides CRUD and filtered listing for maintenance records.
pub struct MaintenanceRecordRepo;

impl MaintenanceRecordRepo {
    /// Insert a record for `vehicle_id`. A missing date becomes `NOW()`.
    pub async fn create(
        pool: &PgPool,
        vehicle_id: DbId,
        input: &MaintenanceRecordInput,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_record (vehicle_id, maintenance_date, type, description, cost)
             VALUES ($1, COALESCE($2, NOW()), $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(vehicle_id)
            .bind(input.maintenance_date)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.cost)
            .fetch_one(pool)
            .await
    }

    /// Find a record by ID, only if it belongs to `vehicle_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        vehicle_id: DbId,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM maintenance_record WHERE id = $1 AND vehicle_id = $2");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(vehicle_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a vehicle's records, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        vehicle_id: DbId,
        filter: &MaintenanceRecordFilter,
        page: PageRequest,
    ) -> Result<Page<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_record
             WHERE {FILTER}
             ORDER BY maintenance_date DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        let content = sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(vehicle_id)
            .bind(&filter.maintenance_type)
            .bind(filter.from)
            .bind(filter.to)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM maintenance_record WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(vehicle_id)
            .bind(&filter.maintenance_type)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_one(pool)
            .await?;

        Ok(Page::new(content, total, page))
    }

    /// Replace a record. A missing date resets it to `NOW()`.
    ///
    /// Returns `None` if the record does not exist under `vehicle_id`.
    pub async fn update(
        pool: &PgPool,
        vehicle_id: DbId,
        id: DbId,
        input: &MaintenanceRecordInput,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_record SET
                maintenance_date = COALESCE($3, NOW()),
                type = $4,
                description = $5,
                cost = $6
             WHERE id = $1 AND vehicle_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(vehicle_id)
            .bind(input.maintenance_date)
            .bind(&input.maintenance_type)
            .bind(&input.description)
            .bind(input.cost)
            .fetch_optional(pool)
            .await
    }

    /// Delete a record under `vehicle_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, vehicle_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_record WHERE id = $1 AND vehicle_id = $2")
            .bind(id)
            .bind(vehicle_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
