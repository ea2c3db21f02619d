//! HTTP-level tests for `/api/v1/vehicles/{vehicle_id}/notes`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_vehicle, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn add_note(pool: &PgPool, vehicle_id: i64, author: &str, created_at: Option<&str>) -> i64 {
    let mut body = json!({ "author": author, "note": format!("note by {author}") });
    if let Some(at) = created_at {
        body["createdAt"] = json!(at);
    }
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/vehicles/{vehicle_id}/notes"),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_get_note(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;
    let id = add_note(&pool, vehicle_id, "Front desk", None).await;

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/vehicles/{vehicle_id}/notes/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["author"], "Front desk");
    assert_eq!(json["vehicleId"], vehicle_id);
    assert!(json["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_note_returns_400(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;

    let response = post_json(
        build_test_app(pool),
        &format!("/api/v1/vehicles/{vehicle_id}/notes"),
        json!({ "author": "desk", "note": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_notes_for_missing_vehicle_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/vehicles/8080/notes").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_notes_filters_by_author_and_date(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;
    add_note(&pool, vehicle_id, "Maria", Some("2024-04-01T10:00:00Z")).await;
    add_note(&pool, vehicle_id, "MARIO", Some("2024-05-01T10:00:00Z")).await;
    add_note(&pool, vehicle_id, "Lucas", Some("2024-05-02T10:00:00Z")).await;
    let uri = format!("/api/v1/vehicles/{vehicle_id}/notes");

    let response = get(build_test_app(pool.clone()), &uri).await;
    let json = body_json(response).await;
    assert_eq!(json["totalElements"], 3);
    assert_eq!(json["content"][0]["author"], "Lucas");

    let response = get(build_test_app(pool.clone()), &format!("{uri}?author=mari")).await;
    assert_eq!(body_json(response).await["totalElements"], 2);

    let response = get(
        build_test_app(pool),
        &format!("{uri}?author=mari&from=2024-04-15T00:00"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["totalElements"], 1);
    assert_eq!(json["content"][0]["author"], "MARIO");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_note_keeps_timestamp(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;
    let id = add_note(&pool, vehicle_id, "desk", Some("2024-01-15T09:30:00Z")).await;
    let uri = format!("/api/v1/vehicles/{vehicle_id}/notes/{id}");

    let response = put_json(
        build_test_app(pool),
        &uri,
        json!({ "author": "desk", "note": "windscreen chip repaired" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["note"], "windscreen chip repaired");
    assert_eq!(json["createdAt"], "2024-01-15T09:30:00Z");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_is_scoped_to_vehicle_and_deletable(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;
    let id = add_note(&pool, vehicle_id, "desk", None).await;

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/vehicles/{}/notes/{id}", vehicle_id + 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/vehicles/{vehicle_id}/notes/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/vehicles/{vehicle_id}/notes/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_vehicle_removes_notes(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool).await;
    add_note(&pool, vehicle_id, "desk", None).await;

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/vehicles/{vehicle_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicle_notes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
