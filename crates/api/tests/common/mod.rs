//! Shared helpers for HTTP integration tests.
//!
//! Requests are sent straight into the router with `tower::ServiceExt`,
//! without a TCP listener.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use rental_api::config::ServerConfig;
use rental_api::router::build_app_router;
use rental_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn with_body(method: Method, uri: &str, content_type: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::delete(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, with_body(Method::POST, uri, "application/json", body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, with_body(Method::PUT, uri, "application/json", body.to_string())).await
}

/// PATCH with an explicit content type, so both patch formats can be tested.
pub async fn patch_with(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    send(app, with_body(Method::PATCH, uri, content_type, body.to_string())).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn car_model_body(brand: &str, model: &str, year: i32, price: f64) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "modelYear": year,
        "segment": "C",
        "doors": 5,
        "seatingCapacity": 5,
        "luggageCapacity": 380,
        "category": "Compact",
        "engineType": "Hybrid",
        "transmissionType": "Automatic",
        "drivetrain": "FWD",
        "motorDisplacement": 1.8,
        "airConditioning": true,
        "infotainmentOptions": "CarPlay",
        "safetyFeatures": "ABS",
        "rentalPricePerDay": price
    })
}

pub fn vehicle_body(car_model_id: i64, plate: &str, vin: &str) -> Value {
    json!({
        "carModelId": car_model_id,
        "licensePlate": plate,
        "vin": vin,
        "status": "AVAILABLE",
        "kilometersTravelled": 1000,
        "pendingCleaning": false,
        "pendingRepairs": false
    })
}

/// Create a car model through the API and return its id.
pub async fn create_car_model(pool: &PgPool) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/models",
        car_model_body("Toyota", "Corolla", 2023, 48.0),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a car model and a vehicle (AVAILABLE, 1000 km) and return the
/// vehicle id.
pub async fn create_vehicle(pool: &PgPool) -> i64 {
    let model_id = create_car_model(pool).await;
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/vehicles",
        vehicle_body(model_id, "1234ABC", "JTDKB20U093000001"),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
