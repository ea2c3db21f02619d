//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    /// `ok` or `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

/// GET /health
///
/// 200 when the database answers, 503 with `status: degraded` otherwise.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    let database = rental_db::health_check(&state.pool).await.is_ok();
    let (code, status) = if database {
        (StatusCode::OK, "ok")
    } else {
        tracing::warn!("Health check could not reach the database");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(Health {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
