//! Integration tests for the `/admin/tools` moderation lifecycle:
//! role gating, approve/reject transitions, and the terminal approved
//! state.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_json, put_empty, put_json, seed_admin, token_for,
};
use serde_json::json;
use sqlx::PgPool;

async fn submit_tool(app: &axum::Router, token: &str, name: &str, website: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/tools",
        Some(token),
        json!({
            "name": name,
            "website": website,
            "short_description": "A tool",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_reject_non_admins(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("plain_user");

    let response = get_auth(&app, "/api/v1/admin/tools", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approve_moves_pending_to_approved(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    let response = put_empty(&app, &format!("/api/v1/admin/tools/{id}/approve"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert!(json["data"]["rejection_comment"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reject_stores_comment_and_default(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;
    let response = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/reject"),
        Some(&admin),
        json!({ "comment": "spam listing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_comment"], "spam listing");
    assert_eq!(json["data"]["rejected_by"], "admin_1");

    // Blank comment falls back to the default reason.
    let id2 = submit_tool(&app, &token_for("user_1"), "Bar", "https://bar.com").await;
    let response = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id2}/reject"),
        Some(&admin),
        json!({ "comment": "   " }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["rejection_comment"], "No reason provided");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rejected_tool_can_be_reapproved_and_metadata_clears(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/reject"),
        Some(&admin),
        json!({ "comment": "needs work" }),
    )
    .await;

    let response = put_empty(&app, &format!("/api/v1/admin/tools/{id}/approve"), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert!(json["data"]["rejection_comment"].is_null());
    assert!(json["data"]["rejected_at"].is_null());
    assert!(json["data"]["rejected_by"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn approved_is_terminal(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    put_empty(&app, &format!("/api/v1/admin/tools/{id}/approve"), Some(&admin)).await;

    let again = put_empty(&app, &format!("/api/v1/admin/tools/{id}/approve"), Some(&admin)).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let reject = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/reject"),
        Some(&admin),
        json!({ "comment": "too late" }),
    )
    .await;
    assert_eq!(reject.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_and_trending_flags_are_idempotent_sets(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    for _ in 0..2 {
        let response = put_json(
            &app,
            &format!("/api/v1/admin/tools/{id}/featured"),
            Some(&admin),
            json!({ "value": true }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["featured"], true);
    }

    let response = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/trending"),
        Some(&admin),
        json!({ "value": false }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["trending"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_applies_only_provided_fields(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    let response = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/edit"),
        Some(&admin),
        json!({ "pricing": "Paid", "website": "https://www.foo.dev/home" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["pricing"], "Paid");
    assert_eq!(json["data"]["name"], "Foo");
    // New website recomputes the dedup domain.
    assert_eq!(json["data"]["website_domain"], "foo.dev");
    assert_eq!(json["data"]["updated_by"], "admin_1");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_rejects_unknown_status_and_pricing(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");
    let id = submit_tool(&app, &token_for("user_1"), "Foo", "https://foo.com").await;

    let bad_status = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/edit"),
        Some(&admin),
        json!({ "status": "published" }),
    )
    .await;
    assert_eq!(bad_status.status(), StatusCode::BAD_REQUEST);

    let bad_pricing = put_json(
        &app,
        &format!("/api/v1/admin/tools/{id}/edit"),
        Some(&admin),
        json!({ "pricing": "free" }),
    )
    .await;
    assert_eq!(bad_pricing.status(), StatusCode::BAD_REQUEST);
}
