//! Route definitions for the `/vehicles` resource.
//!
//! Also nests maintenance and note routes under `/vehicles/{vehicle_id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{maintenance, vehicle, vehicle_note};
use crate::state::AppState;

/// Routes mounted at `/vehicles`.
///
/// ```text
/// GET    /                                   -> list
/// POST   /                                   -> create
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// PATCH  /{id}                               -> patch
/// DELETE /{id}                               -> delete
///
/// GET    /{vehicle_id}/maintenances          -> list
/// POST   /{vehicle_id}/maintenances          -> create
/// GET    /{vehicle_id}/maintenances/{id}     -> get_by_id
/// PUT    /{vehicle_id}/maintenances/{id}     -> update
/// DELETE /{vehicle_id}/maintenances/{id}     -> delete
///
/// GET    /{vehicle_id}/notes                 -> list
/// POST   /{vehicle_id}/notes                 -> create
/// GET    /{vehicle_id}/notes/{id}            -> get_by_id
/// PUT    /{vehicle_id}/notes/{id}            -> update
/// DELETE /{vehicle_id}/notes/{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    let maintenance_routes = Router::new()
        .route("/", get(maintenance::list).post(maintenance::create))
        .route(
            "/{id}",
            get(maintenance::get_by_id)
                .put(maintenance::update)
                .delete(maintenance::delete),
        );

    let note_routes = Router::new()
        .route("/", get(vehicle_note::list).post(vehicle_note::create))
        .route(
            "/{id}",
            get(vehicle_note::get_by_id)
                .put(vehicle_note::update)
                .delete(vehicle_note::delete),
        );

    Router::new()
        .route("/", get(vehicle::list).post(vehicle::create))
        .route(
            "/{id}",
            get(vehicle::get_by_id)
                .put(vehicle::update)
                .patch(vehicle::patch)
                .delete(vehicle::delete),
        )
        .nest("/{vehicle_id}/maintenances", maintenance_routes)
        .nest("/{vehicle_id}/notes", note_routes)
}
