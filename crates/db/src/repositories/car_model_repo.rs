//! Repository for the `car_model` table.

use rental_core::pagination::{Page, PageRequest};
use rental_core::types::DbId;
use sqlx::PgPool;

use crate::models::car_model::{CarModel, CarModelFilter, CarModelInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand, model, model_year, segment, doors, seating_capacity, \
    luggage_capacity, category, engine_type, transmission_type, drivetrain, \
    motor_displacement, air_conditioning, infotainment_options, safety_features, \
    rental_price_per_day";

/// Predicates shared by the list and count queries. Binds `$1..=$8`.
const FILTER: &str = "($1::TEXT IS NULL OR brand = $1)
    AND ($2::TEXT IS NULL OR model = $2)
    AND ($3::TEXT IS NULL OR segment = $3)
    AND ($4::TEXT IS NULL OR engine_type = $4)
    AND ($5::TEXT IS NULL OR transmission_type = $5)
    AND ($6::INTEGER IS NULL OR model_year = $6)
    AND ($7::NUMERIC IS NULL OR rental_price_per_day >= $7)
    AND ($8::NUMERIC IS NULL OR rental_price_per_day <= $8)";

/// Provides CRUD and filtered listing for car models.
pub struct CarModelRepo;

impl CarModelRepo {
    /// Insert a new car model, returning the created row.
    pub async fn create(pool: &PgPool, input: &CarModelInput) -> Result<CarModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO car_model
                (brand, model, model_year, segment, doors, seating_capacity, luggage_capacity,
                 category, engine_type, transmission_type, drivetrain, motor_displacement,
                 air_conditioning, infotainment_options, safety_features, rental_price_per_day)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarModel>(&query)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.model_year)
            .bind(&input.segment)
            .bind(input.doors)
            .bind(input.seating_capacity)
            .bind(input.luggage_capacity)
            .bind(&input.category)
            .bind(&input.engine_type)
            .bind(&input.transmission_type)
            .bind(&input.drivetrain)
            .bind(input.motor_displacement)
            .bind(input.air_conditioning)
            .bind(&input.infotainment_options)
            .bind(&input.safety_features)
            .bind(input.rental_price_per_day)
            .fetch_one(pool)
            .await
    }

    /// Find a car model by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CarModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM car_model WHERE id = $1");
        sqlx::query_as::<_, CarModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a car model with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM car_model WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether the brand/model/year combination is already catalogued.
    pub async fn exists_by_brand_model_year(
        pool: &PgPool,
        brand: &str,
        model: &str,
        model_year: i32,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM car_model WHERE brand = $1 AND model = $2 AND model_year = $3
             )",
        )
        .bind(brand)
        .bind(model)
        .bind(model_year)
        .fetch_one(pool)
        .await
    }

    /// One page of car models matching `filter`, ordered by ID.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &CarModelFilter,
        page: PageRequest,
    ) -> Result<Page<CarModel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM car_model
             WHERE {FILTER}
             ORDER BY id ASC
             LIMIT $9 OFFSET $10"
        );
        let content = sqlx::query_as::<_, CarModel>(&query)
            .bind(&filter.brand)
            .bind(&filter.model)
            .bind(&filter.segment)
            .bind(&filter.engine_type)
            .bind(&filter.transmission_type)
            .bind(filter.model_year)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM car_model WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.brand)
            .bind(&filter.model)
            .bind(&filter.segment)
            .bind(&filter.engine_type)
            .bind(&filter.transmission_type)
            .bind(filter.model_year)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(pool)
            .await?;

        Ok(Page::new(content, total, page))
    }

    /// Replace every column of a car model.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CarModelInput,
    ) -> Result<Option<CarModel>, sqlx::Error> {
        let query = format!(
            "UPDATE car_model SET
                brand = $2,
                model = $3,
                model_year = $4,
                segment = $5,
                doors = $6,
                seating_capacity = $7,
                luggage_capacity = $8,
                category = $9,
                engine_type = $10,
                transmission_type = $11,
                drivetrain = $12,
                motor_displacement = $13,
                air_conditioning = $14,
                infotainment_options = $15,
                safety_features = $16,
                rental_price_per_day = $17
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarModel>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.model_year)
            .bind(&input.segment)
            .bind(input.doors)
            .bind(input.seating_capacity)
            .bind(input.luggage_capacity)
            .bind(&input.category)
            .bind(&input.engine_type)
            .bind(&input.transmission_type)
            .bind(&input.drivetrain)
            .bind(input.motor_displacement)
            .bind(input.air_conditioning)
            .bind(&input.infotainment_options)
            .bind(&input.safety_features)
            .bind(input.rental_price_per_day)
            .fetch_optional(pool)
            .await
    }

    /// Delete a car model by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while vehicles still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM car_model WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
