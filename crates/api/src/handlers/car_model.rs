//! Handlers for the `/models` resource.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::Json;
use rental_core::error::CoreError;
use rental_core::pagination::Page;
use rental_core::types::DbId;
use rental_db::models::car_model::{CarModel, CarModelFilter, CarModelInput};
use rental_db::repositories::CarModelRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, ValidatedJson};
use crate::query::PaginationParams;
use crate::state::AppState;

const ENTITY: &str = "CarModel";

/// POST /api/v1/models
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CarModelInput>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<CarModel>)> {
    if CarModelRepo::exists_by_brand_model_year(
        &state.pool,
        &input.brand,
        &input.model,
        input.model_year,
    )
    .await?
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Car model {} {} ({}) already exists",
            input.brand, input.model, input.model_year
        ))));
    }

    let model = CarModelRepo::create(&state.pool, &input).await?;
    tracing::info!(car_model_id = model.id, brand = %model.brand, model = %model.model, "Car model created");

    let location = format!("/api/v1/models/{}", model.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(model)))
}

/// GET /api/v1/models
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<CarModelFilter>,
    AppQuery(paging): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<CarModel>>> {
    let page = CarModelRepo::list_filtered(&state.pool, &filter, paging.page_request()).await?;
    Ok(Json(page))
}

/// GET /api/v1/models/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CarModel>> {
    let model = CarModelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(model))
}

/// PUT /api/v1/models/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CarModelInput>,
) -> AppResult<Json<CarModel>> {
    let model = CarModelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    tracing::info!(car_model_id = id, "Car model updated");
    Ok(Json(model))
}

/// DELETE /api/v1/models/{id}
///
/// Rejected with 409 while any vehicle still references the model.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = CarModelRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(car_model_id = id, "Car model deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}
