//! HTTP-level integration tests for the public `/tools` endpoints:
//! submission, duplicate-domain rejection, listing, and slug lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, get_auth, post_json, seed_admin, token_for};
use serde_json::json;
use sqlx::PgPool;

fn submission(name: &str, website: &str) -> serde_json::Value {
    json!({
        "name": name,
        "website": website,
        "short_description": "A tool",
        "description": "A longer description of the tool.",
    })
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_requires_auth(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(&app, "/api/v1/tools", None, submission("Foo", "https://foo.com")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submit_creates_pending_tool(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("user_1");

    let response = post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Dall E 2", "https://openai.com/dall-e-2"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let tool = &json["data"];
    assert_eq!(tool["status"], "pending");
    assert_eq!(tool["slug"], "dall-e-2");
    assert_eq!(tool["submitted_by"], "user_1");
    assert_eq!(tool["website_domain"], "openai.com");
    assert_eq!(tool["votes"], 0);
    assert_eq!(tool["featured"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_domain_is_conflict_with_existing_identity(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("user_1");

    let first = post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Foo", "https://Foo.com"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same product behind a www-prefixed URL from a different user.
    let other = token_for("user_2");
    let second = post_json(
        &app,
        "/api/v1/tools",
        Some(&other),
        submission("Foo Again", "https://www.foo.com"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let json = body_json(second).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["existing_tool"]["name"], "Foo");
    assert_eq!(json["existing_tool"]["slug"], "foo");
    assert_eq!(json["existing_tool"]["status"], "pending");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn name_collision_gets_suffixed_slug(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("user_1");

    post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Foo", "https://foo.com"),
    )
    .await;
    let second = post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Foo", "https://foo.io"),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let json = body_json(second).await;
    assert_eq!(json["data"]["slug"], "foo-2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_website_url_is_bad_request(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("user_1");

    let response = post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Foo", "not a url"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing and lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_defaults_to_approved_only(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = token_for("user_1");
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    for (name, site) in [("Alpha", "https://alpha.ai"), ("Beta", "https://beta.ai")] {
        post_json(&app, "/api/v1/tools", Some(&token), submission(name, site)).await;
    }

    // Nothing is approved yet.
    let response = get(&app, "/api/v1/tools").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
    assert!(json["tools"].as_array().unwrap().is_empty());

    // Approve Alpha via the moderation queue.
    let queue = get_auth(&app, "/api/v1/admin/tools?status=pending", &admin).await;
    let queue_json = body_json(queue).await;
    let alpha_id = queue_json["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == "Alpha")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let approve = common::put_empty(
        &app,
        &format!("/api/v1/admin/tools/{alpha_id}/approve"),
        Some(&admin),
    )
    .await;
    assert_eq!(approve.status(), StatusCode::OK);

    let response = get(&app, "/api/v1/tools").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["tools"][0]["name"], "Alpha");
    assert_eq!(json["page"], 1);
    assert_eq!(json["total_pages"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_paginates(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = token_for("user_1");
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    for i in 0..5 {
        let created = post_json(
            &app,
            "/api/v1/tools",
            Some(&token),
            submission(&format!("Tool {i}"), &format!("https://tool{i}.ai")),
        )
        .await;
        let id = body_json(created).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string();
        common::put_empty(&app, &format!("/api/v1/admin/tools/{id}/approve"), Some(&admin)).await;
    }

    let response = get(&app, "/api/v1/tools?page=2&limit=2&sort=newest").await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 5);
    assert_eq!(json["page"], 2);
    assert_eq!(json["total_pages"], 3);
    assert_eq!(json["tools"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn slug_lookup_and_missing_slug(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("user_1");

    post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("WriteGenius", "https://writegenius.ai"),
    )
    .await;

    let response = get(&app, "/api/v1/tools/writegenius").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "WriteGenius");

    let missing = get(&app, "/api/v1/tools/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn mine_returns_only_own_submissions(pool: PgPool) {
    let app = build_test_app(pool);
    let alice = token_for("alice");
    let bob = token_for("bob");

    post_json(&app, "/api/v1/tools", Some(&alice), submission("A", "https://a.ai")).await;
    post_json(&app, "/api/v1/tools", Some(&bob), submission("B", "https://b.ai")).await;

    let response = get_auth(&app, "/api/v1/tools/mine", &alice).await;
    let json = body_json(response).await;
    let mine = json["data"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["name"], "A");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_is_admin_only(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = token_for("user_1");
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let created = post_json(
        &app,
        "/api/v1/tools",
        Some(&token),
        submission("Doomed", "https://doomed.ai"),
    )
    .await;
    let id = body_json(created).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let forbidden = delete(&app, &format!("/api/v1/tools/{id}"), Some(&token)).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let ok = delete(&app, &format!("/api/v1/tools/{id}"), Some(&admin)).await;
    assert_eq!(ok.status(), StatusCode::OK);

    let gone = delete(&app, &format!("/api/v1/tools/{id}"), Some(&admin)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
