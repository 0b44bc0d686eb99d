//! HTTP-level integration tests for share links and public resolution.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, delete_auth, get, get_auth, post_json_auth, seed_user,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn layout_payload(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "gridX": 4,
        "gridY": 4,
        "widthMm": 168.0,
        "depthMm": 168.0,
        "placedItems": [
            { "itemId": "default:bin-1x1", "x": 0, "y": 0, "width": 1, "height": 1 }
        ]
    })
}

async fn create_layout(app: axum::Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(app, "/api/v1/layouts", token, layout_payload(name)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: create and resolve
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_resolve_share(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "sharer", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &token, "Public Bench").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &token,
        json!({ "expiresInDays": 7 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let slug = json["data"]["slug"].as_str().unwrap().to_string();
    assert_eq!(slug.len(), 12);
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(json["data"]["expiresAt"].is_string());

    // Public resolution needs no token and bumps the view counter.
    let response = get(app.clone(), &format!("/api/v1/shared/{slug}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], slug.as_str());
    assert_eq!(json["data"]["creatorUsername"], "sharer");
    assert_eq!(json["data"]["viewCount"], 1);
    assert_eq!(json["data"]["layout"]["name"], "Public Bench");
    assert_eq!(
        json["data"]["layout"]["placedItems"].as_array().unwrap().len(),
        1
    );

    let response = get(app, &format!("/api/v1/shared/{slug}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["viewCount"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_without_expiry(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "forever", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &token, "Evergreen").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["expiresAt"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_rejects_nonpositive_expiry(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "hasty", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &token, "Hasty").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &token,
        json!({ "expiresInDays": 0 }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_rejects_absurd_expiry(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "optimist", "user").await;
    let app = build_test_app(pool);

    // i64::MAX days would overflow the expiry arithmetic; it must come back
    // as a validation error, not a 500.
    let layout_id = create_layout(app.clone(), &token, "Optimist").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &token,
        json!({ "expiresInDays": i64::MAX }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Test: expired links resolve like missing ones
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_share_is_not_found(pool: PgPool) {
    let (_user, token) = seed_user(&pool, "expired", "user").await;
    let app = build_test_app(pool.clone());

    let layout_id = create_layout(app.clone(), &token, "Stale").await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &token,
        json!({ "expiresInDays": 1 }),
    )
    .await;
    let slug = body_json(response).await["data"]["slug"]
        .as_str()
        .unwrap()
        .to_string();

    // Push the expiry into the past directly.
    sqlx::query("UPDATE shared_projects SET expires_at = NOW() - INTERVAL '1 hour' WHERE slug = $1")
        .bind(&slug)
        .execute(&pool)
        .await
        .unwrap();

    let response = get(app.clone(), &format!("/api/v1/shared/{slug}")).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    // Indistinguishable from a slug that never existed.
    let response = get(app, "/api/v1/shared/neverexisted").await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: ownership rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_share_creation_is_owner_only(pool: PgPool) {
    let (_owner, owner_token) = seed_user(&pool, "owner", "user").await;
    let (_other, other_token) = seed_user(&pool, "other", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &owner_token, "Mine").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &other_token,
        json!({}),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_share_creator_only(pool: PgPool) {
    let (_owner, owner_token) = seed_user(&pool, "owner", "user").await;
    let (_other, other_token) = seed_user(&pool, "other", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &owner_token, "Linked").await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/layouts/{layout_id}/shares"),
        &owner_token,
        json!({}),
    )
    .await;
    let json = body_json(response).await;
    let share_id = json["data"]["id"].as_i64().unwrap();
    let slug = json["data"]["slug"].as_str().unwrap().to_string();

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/shares/{share_id}"),
        &other_token,
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/shares/{share_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The slug stops resolving once the link is gone.
    let response = get(app, &format!("/api/v1/shared/{slug}")).await;
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_shares_for_layout(pool: PgPool) {
    let (_owner, token) = seed_user(&pool, "lister", "user").await;
    let app = build_test_app(pool);

    let layout_id = create_layout(app.clone(), &token, "Multi").await;
    for _ in 0..2 {
        post_json_auth(
            app.clone(),
            &format!("/api/v1/layouts/{layout_id}/shares"),
            &token,
            json!({}),
        )
        .await;
    }

    let response = get_auth(app, &format!("/api/v1/layouts/{layout_id}/shares"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}
