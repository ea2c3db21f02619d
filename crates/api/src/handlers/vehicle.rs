//! Handlers for the `/vehicles` resource, including the partial update
//! workflow.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use rental_core::error::CoreError;
use rental_core::pagination::Page;
use rental_core::types::DbId;
use rental_core::vehicle::VehiclePatch;
use rental_core::vehicle_patch::{self, JsonPatch, PatchOutcome, VEHICLE_ENTITY};
use rental_db::models::vehicle::{VehicleFilter, VehicleInput, VehicleView};
use rental_db::repositories::{CarModelRepo, VehicleRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, ValidatedJson};
use crate::query::PaginationParams;
use crate::state::AppState;

/// Media type of an RFC 6902 patch document.
pub const JSON_PATCH_MEDIA_TYPE: &str = "application/json-patch+json";

/// POST /api/v1/vehicles
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VehicleInput>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<VehicleView>)> {
    input.parsed_status()?;
    ensure_car_model(&state, input.car_model_id).await?;

    if VehicleRepo::exists_by_license_plate(&state.pool, &input.license_plate).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Vehicle with license plate '{}' already exists",
            input.license_plate
        ))));
    }

    let vehicle = VehicleRepo::create(&state.pool, &input).await?;
    tracing::info!(vehicle_id = vehicle.id, license_plate = %vehicle.license_plate, "Vehicle created");

    let view = load_view(&state, vehicle.id).await?;
    let location = format!("/api/v1/vehicles/{}", vehicle.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(view)))
}

/// GET /api/v1/vehicles
pub async fn list(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<VehicleFilter>,
    AppQuery(paging): AppQuery<PaginationParams>,
) -> AppResult<Json<Page<VehicleView>>> {
    let page = VehicleRepo::list_filtered(&state.pool, &filter, paging.page_request()).await?;
    Ok(Json(page))
}

/// GET /api/v1/vehicles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<VehicleView>> {
    Ok(Json(load_view(&state, id).await?))
}

/// PUT /api/v1/vehicles/{id}
///
/// Replaces every column. Uniqueness is left to the database constraints.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<VehicleInput>,
) -> AppResult<Json<VehicleView>> {
    input.parsed_status()?;
    ensure_car_model(&state, input.car_model_id).await?;

    VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: VEHICLE_ENTITY,
            id,
        }))?;
    tracing::info!(vehicle_id = id, "Vehicle replaced");

    Ok(Json(load_view(&state, id).await?))
}

/// PATCH /api/v1/vehicles/{id}
///
/// The body format is chosen by `Content-Type`:
///
/// ```text
/// application/json-patch+json  -> RFC 6902 document over the allow-listed fields
/// application/json             -> flat object with snake_case keys
/// ```
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<VehicleView>> {
    let store = state.vehicle_store();

    // The body is parsed before the vehicle is looked up, so a malformed
    // document is a 400 even for an unknown id.
    let result = match media_type(&headers).as_deref() {
        Some(JSON_PATCH_MEDIA_TYPE) => {
            let document: JsonPatch = serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON Patch document: {e}")))?;
            vehicle_patch::apply_json_patch(&store, id, &document).await
        }
        Some("application/json") => {
            let fields: VehiclePatch = serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("Invalid patch body: {e}")))?;
            vehicle_patch::apply_flat_patch(&store, id, &fields).await
        }
        other => {
            return Err(AppError::UnsupportedMediaType(format!(
                "PATCH expects `{JSON_PATCH_MEDIA_TYPE}` or `application/json`, got `{}`",
                other.unwrap_or("none")
            )));
        }
    };

    match &result {
        Ok(outcome) => log_outcome(id, outcome),
        Err(vehicle_patch::PatchFailure::Rejected(CoreError::Forbidden(msg))) => {
            tracing::warn!(vehicle_id = id, reason = %msg, "Rejected patch on protected field");
        }
        Err(_) => {}
    }
    result?;

    Ok(Json(load_view(&state, id).await?))
}

/// DELETE /api/v1/vehicles/{id}
///
/// Maintenance records and notes are removed with the vehicle.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = VehicleRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(vehicle_id = id, "Vehicle deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: VEHICLE_ENTITY,
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_view(state: &AppState, id: DbId) -> AppResult<VehicleView> {
    VehicleRepo::find_view(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: VEHICLE_ENTITY,
            id,
        }))
}

/// 404 unless the parent vehicle of a nested resource exists.
pub(crate) async fn ensure_vehicle(state: &AppState, vehicle_id: DbId) -> AppResult<()> {
    if !VehicleRepo::exists(&state.pool, vehicle_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: VEHICLE_ENTITY,
            id: vehicle_id,
        }));
    }
    Ok(())
}

async fn ensure_car_model(state: &AppState, car_model_id: DbId) -> AppResult<()> {
    if !CarModelRepo::exists(&state.pool, car_model_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CarModel",
            id: car_model_id,
        }));
    }
    Ok(())
}

/// Lower-cased media type without parameters (`; charset=...`).
fn media_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::CONTENT_TYPE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(|s| s.trim().to_ascii_lowercase())
}

fn log_outcome(id: DbId, outcome: &PatchOutcome) {
    if !outcome.persisted {
        tracing::info!(vehicle_id = id, "No changes detected for vehicle");
        return;
    }
    for change in &outcome.changes {
        tracing::info!(
            vehicle_id = id,
            field = change.field.name(),
            from = %change.from,
            to = %change.to,
            "Vehicle field updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(content_type: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        h
    }

    #[test]
    fn media_type_strips_parameters_and_case() {
        assert_eq!(
            media_type(&headers("Application/JSON; charset=utf-8")).as_deref(),
            Some("application/json")
        );
        assert_eq!(
            media_type(&headers("application/json-patch+json")).as_deref(),
            Some(JSON_PATCH_MEDIA_TYPE)
        );
    }

    #[test]
    fn media_type_absent() {
        assert!(media_type(&HeaderMap::new()).is_none());
    }
}
