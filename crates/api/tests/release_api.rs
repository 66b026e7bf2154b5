//! HTTP-level integration tests for the `/releases` API endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

fn release_body(version: &str, is_latest: bool) -> serde_json::Value {
    json!({
        "version": version,
        "download_url": format!("https://downloads.example.com/{version}"),
        "release_notes": format!("Release {version}"),
        "whats_new": ["Faster sync", "Bug fixes"],
        "is_latest": is_latest
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_201_then_409_on_duplicate_version(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/releases", release_body("1.0.0", true)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["is_latest"], true);
    assert_eq!(body["platform"], "all");

    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/releases", release_body("1.0.0", false)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_check_on_empty_catalog_reports_unavailable(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/releases/latest?current_version=1.0.0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["available"], false);
    assert_eq!(body["version"], "1.0.0");

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/releases/latest").await;
    let body = body_json(response).await;
    assert_eq!(body["version"], "unknown");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_check_compares_against_current_version(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/api/v1/releases", release_body("1.10.0", true)).await;

    // Older client: update available. Numeric compare, not lexicographic.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/releases/latest?current_version=1.9.0").await;
    let body = body_json(response).await;
    assert_eq!(body["available"], true);
    assert_eq!(body["version"], "1.10.0");
    assert!(body["download_url"].is_string());

    // Up-to-date client.
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/v1/releases/latest?current_version=1.10.0").await;
    let body = body_json(response).await;
    assert_eq!(body["available"], false);

    // No current_version supplied: just the latest info, not an update offer.
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/releases/latest").await;
    let body = body_json(response).await;
    assert_eq!(body["available"], false);
    assert_eq!(body["version"], "1.10.0");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_releases_newest_first(pool: PgPool) {
    let app = build_test_app(pool.clone());
    post_json(app, "/api/v1/releases", release_body("1.0.0", false)).await;
    let app = build_test_app(pool.clone());
    post_json(app, "/api/v1/releases", release_body("1.1.0", true)).await;

    let app = build_test_app(pool);
    let response = get(app, "/api/v1/releases").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let releases = body["data"].as_array().unwrap();
    assert_eq!(releases.len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_empty_version(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/api/v1/releases", release_body("  ", false)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
