//! Tests for the root-level health endpoint and static UI wiring.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_ok(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_is_not_under_api_prefix(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_root_is_not_routed_without_ui_dir(pool: PgPool) {
    let response = get(build_test_app(pool), "/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cors_preflight_allows_patch_from_ui_origin(pool: PgPool) {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/vehicles/1")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "PATCH")
        .body(Body::empty())
        .unwrap();
    let response = build_test_app(pool).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap();
    assert!(methods.contains("PATCH"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ui_dir_is_served_and_root_redirects(pool: PgPool) {
    use axum::http::header::LOCATION;
    use http_body_util::BodyExt;
    use rental_api::router::build_app_router;
    use rental_api::state::AppState;

    let dir = std::env::temp_dir().join(format!("rental-ui-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>fleet</h1>").unwrap();

    let config = rental_api::config::ServerConfig {
        ui_dir: Some(dir.clone()),
        ..common::test_config()
    };
    let app = build_app_router(AppState::new(pool, config.clone()), &config);

    let response = get(app.clone(), "/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[LOCATION], "/ui/");

    let response = get(app, "/ui/index.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>fleet</h1>");

    std::fs::remove_dir_all(&dir).ok();
}
