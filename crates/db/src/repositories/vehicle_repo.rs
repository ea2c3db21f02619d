//! Repository for the `vehicle` table.
//!
//! Reads go through [`VIEW_SELECT`], which joins the owning car model so a
//! single query yields the full [`VehicleView`].

use rental_core::pagination::{Page, PageRequest};
use rental_core::types::DbId;
use rental_core::vehicle::VehicleState;
use sqlx::PgPool;

use crate::models::vehicle::{Vehicle, VehicleFilter, VehicleInput, VehicleView};

/// Column list for plain `vehicle` rows.
const COLUMNS: &str = "id, car_model_id, license_plate, vin, status, kilometers_travelled, \
    pending_cleaning, pending_repairs";

/// Vehicle joined with its car model; car model columns carry a `cm_` prefix.
const VIEW_SELECT: &str = "SELECT v.id, v.license_plate, v.vin, v.status, \
        v.kilometers_travelled, v.pending_cleaning, v.pending_repairs, \
        m.id AS cm_id, m.brand AS cm_brand, m.model AS cm_model, \
        m.model_year AS cm_model_year, m.segment AS cm_segment, m.doors AS cm_doors, \
        m.seating_capacity AS cm_seating_capacity, m.luggage_capacity AS cm_luggage_capacity, \
        m.category AS cm_category, m.engine_type AS cm_engine_type, \
        m.transmission_type AS cm_transmission_type, m.drivetrain AS cm_drivetrain, \
        m.motor_displacement AS cm_motor_displacement, \
        m.air_conditioning AS cm_air_conditioning, \
        m.infotainment_options AS cm_infotainment_options, \
        m.safety_features AS cm_safety_features, \
        m.rental_price_per_day AS cm_rental_price_per_day \
    FROM vehicle v \
    JOIN car_model m ON m.id = v.car_model_id";

/// Predicates shared by the list and count queries. Binds `$1..=$2`.
const FILTER: &str = "($1::TEXT IS NULL OR v.status = $1)
    AND ($2::BIGINT IS NULL OR v.car_model_id = $2)";

/// Provides CRUD, filtered listing and patch-state access for vehicles.
pub struct VehicleRepo;

impl VehicleRepo {
    /// Insert a new vehicle, returning the created row.
    ///
    /// The status must already have been validated by the caller; it is
    /// stored in its canonical upper-case form.
    pub async fn create(pool: &PgPool, input: &VehicleInput) -> Result<Vehicle, sqlx::Error> {
        let status = input
            .parsed_status()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "INSERT INTO vehicle
                (car_model_id, license_plate, vin, status, kilometers_travelled,
                 pending_cleaning, pending_repairs)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(input.car_model_id)
            .bind(&input.license_plate)
            .bind(&input.vin)
            .bind(status.as_str())
            .bind(input.kilometers_travelled)
            .bind(input.pending_cleaning)
            .bind(input.pending_repairs)
            .fetch_one(pool)
            .await
    }

    /// Find a plain vehicle row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a vehicle with its car model embedded.
    pub async fn find_view(pool: &PgPool, id: DbId) -> Result<Option<VehicleView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE v.id = $1");
        sqlx::query_as::<_, VehicleView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a vehicle with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vehicle WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether a vehicle already uses this license plate.
    pub async fn exists_by_license_plate(
        pool: &PgPool,
        license_plate: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM vehicle WHERE license_plate = $1)")
            .bind(license_plate)
            .fetch_one(pool)
            .await
    }

    /// One page of vehicles matching `filter`, ordered by ID.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &VehicleFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleView>, sqlx::Error> {
        let status = filter.status.map(|s| s.as_str());

        let query = format!(
            "{VIEW_SELECT}
             WHERE {FILTER}
             ORDER BY v.id ASC
             LIMIT $3 OFFSET $4"
        );
        let content = sqlx::query_as::<_, VehicleView>(&query)
            .bind(status)
            .bind(filter.car_model_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM vehicle v WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(status)
            .bind(filter.car_model_id)
            .fetch_one(pool)
            .await?;

        Ok(Page::new(content, total, page))
    }

    /// Replace every column of a vehicle.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &VehicleInput,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let status = input
            .parsed_status()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let query = format!(
            "UPDATE vehicle SET
                car_model_id = $2,
                license_plate = $3,
                vin = $4,
                status = $5,
                kilometers_travelled = $6,
                pending_cleaning = $7,
                pending_repairs = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(input.car_model_id)
            .bind(&input.license_plate)
            .bind(&input.vin)
            .bind(status.as_str())
            .bind(input.kilometers_travelled)
            .bind(input.pending_cleaning)
            .bind(input.pending_repairs)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite only the patchable columns. Returns `true` if a row was updated.
    pub async fn update_state(
        pool: &PgPool,
        id: DbId,
        state: &VehicleState,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE vehicle SET
                status = $2,
                kilometers_travelled = $3,
                pending_cleaning = $4,
                pending_repairs = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(state.status.as_str())
        .bind(state.kilometers_travelled)
        .bind(state.pending_cleaning)
        .bind(state.pending_repairs)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a vehicle by ID, cascading to its maintenance records and
    /// notes. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicle WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
