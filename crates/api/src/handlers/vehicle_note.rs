//! Handlers for `/vehicles/{vehicle_id}/notes`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rental_core::error::CoreError;
use rental_core::pagination::Page;
use rental_core::types::DbId;
use rental_db::models::vehicle_note::{VehicleNote, VehicleNoteFilter, VehicleNoteInput};
use rental_db::repositories::VehicleNoteRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, ValidatedJson};
use crate::handlers::vehicle::ensure_vehicle;
use crate::query::PaginationParams;
use crate::state::AppState;

const ENTITY: &str = "VehicleNote";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// POST /api/v1/vehicles/{vehicle_id}/notes
pub async fn create(
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<VehicleNoteInput>,
) -> AppResult<(StatusCode, Json<VehicleNote>)> {
    ensure_vehicle(&state, vehicle_id).await?;
    let note = VehicleNoteRepo::create(&state.pool, vehicle_id, &input).await?;
    tracing::info!(vehicle_id, note_id = note.id, author = %note.author, "Vehicle note added");
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/v1/vehicles/{vehicle_id}/notes
pub async fn list(
    State(state): State<AppState>,
    Path(vehicle_id): Path<DbId>,
    AppQuery(filter): AppQuery<VehicleNoteFilter>,
    AppQuery(paging): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<VehicleNote>>> {
    ensure_vehicle(&state, vehicle_id).await?;
    let page =
        VehicleNoteRepo::list_filtered(&state.pool, vehicle_id, &filter, paging.page_request())
            .await?;
    Ok(Json(page))
}

/// GET /api/v1/vehicles/{vehicle_id}/notes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<VehicleNote>> {
    let note = VehicleNoteRepo::find_by_id(&state.pool, vehicle_id, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(note))
}

/// PUT /api/v1/vehicles/{vehicle_id}/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<VehicleNoteInput>,
) -> AppResult<Json<VehicleNote>> {
    let note = VehicleNoteRepo::update(&state.pool, vehicle_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(vehicle_id, note_id = id, "Vehicle note updated");
    Ok(Json(note))
}

/// DELETE /api/v1/vehicles/{vehicle_id}/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path((vehicle_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if VehicleNoteRepo::delete(&state.pool, vehicle_id, id).await? {
        tracing::info!(vehicle_id, note_id = id, "Vehicle note deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
