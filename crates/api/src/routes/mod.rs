pub mod car_model;
pub mod health;
pub mod vehicle;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /models                                         car model catalogue
/// /vehicles                                       fleet (PATCH for partial updates)
///     /{vehicle_id}/maintenances                  maintenance history
///     /{vehicle_id}/notes                         free-text notes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/models", car_model::router())
        .nest("/vehicles", vehicle::router())
}
