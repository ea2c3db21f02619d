//! Handlers for `/vehicles/{vehicle_id}/maintenances`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rental_core::error::CoreError;
use rental_core::pagination::Page;
use rental_core::types::DbId;
use rental_db::models::maintenance_record::{
    MaintenanceRecord, MaintenanceRecordFilter, MaintenanceRecordInput,
};
use rental_db::repositories::MaintenanceRecordRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, ValidatedJson};
use crate::handlers::vehicle::ensure_vehicle;
use crate::query::PaginationParams;
use crate::state::AppState;

const ENTITY: &str = "MaintenanceRecord";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// POST /api/v1/vehicles/{vehicle_id}/maintenances
pub async fn create(
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<MaintenanceRecordInput>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    ensure_vehicle(&state, vehicle_id).await?;
    let record = MaintenanceRecordRepo::create(&state.pool, vehicle_id, &input).await?;
    tracing::info!(vehicle_id, maintenance_id = record.id, kind = %record.maintenance_type, "Maintenance recorded");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/vehicles/{vehicle_id}/maintenances
pub async fn list(
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    AppQuery(filter): AppQuery<MaintenanceRecordFilter>,
    AppQuery(paging): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<MaintenanceRecord>>> {
    ensure_vehicle(&state, vehicle_id).await?;
    let page = MaintenanceRecordRepo::list_filtered(
        &state.pool,
        vehicle_id,
        &filter,
        paging.page_request(),
    )
    .await?;
    Ok(Json(page))
}

/// GET /api/v1/vehicles/{vehicle_id}/maintenances/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MaintenanceRecord>> {
    let record = MaintenanceRecordRepo::find_by_id(&state.pool, vehicle_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record))
}

/// PUT /api/v1/vehicles/{vehicle_id}/maintenances/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<MaintenanceRecordInput>,
) -> AppResult<Json<MaintenanceRecord>> {
    let record = MaintenanceRecordRepo::update(&state.pool, vehicle_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(vehicle_id, maintenance_id = id, "Maintenance record updated");
    Ok(Json(record))
}

/// DELETE /api/v1/vehicles/{vehicle_id}/maintenances/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if MaintenanceRecordRepo::delete(&state.pool, vehicle_id, id).await? {
        tracing::info!(vehicle_id, maintenance_id = id, "Maintenance record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
