//! Integration tests for the bulk import pipeline: JSON and CSV inputs,
//! domain deduplication, the audit log, and exactly-once undo.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, get_auth, post_json, seed_admin, token_for};
use serde_json::json;
use sqlx::PgPool;

fn two_tool_batch() -> serde_json::Value {
    json!({
        "tools": [
            { "Name": "Foo", "Website": "https://foo.com", "Description": "Foo does foo." },
            { "Name": "Bar", "Website": "https://bar.io", "Category": "Chat, Writing",
              "featured": true, "rating": 4.1, "votes": 12 },
        ]
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bulk_import_requires_admin(pool: PgPool) {
    let app = build_test_app(pool);
    let token = token_for("plain_user");
    let response = post_json(&app, "/api/v1/admin/bulk-tools", Some(&token), two_tool_batch()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn import_counts_sum_and_tools_go_live_approved(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let response = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success_count"], 2);
    assert_eq!(json["skipped_count"], 0);
    assert_eq!(json["failed_count"], 0);
    assert_eq!(json["tool_ids"].as_array().unwrap().len(), 2);
    assert!(json["log_id"].is_string());

    // Imported tools bypass moderation, so they appear publicly at once.
    let listing = get(&app, "/api/v1/tools?sort=popular").await;
    let listing = body_json(listing).await;
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["tools"][0]["name"], "Bar");
    assert_eq!(listing["tools"][0]["featured"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rerunning_a_batch_skips_everything(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let second = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let json = body_json(second).await;
    assert_eq!(json["success_count"], 0);
    assert_eq!(json["skipped_count"], 2);
    assert_eq!(json["errors"].as_array().unwrap().len(), 2);
    assert!(json["errors"][0].as_str().unwrap().starts_with("Duplicate skipped:"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn intra_batch_duplicates_and_bad_rows_are_classified(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let batch = json!({
        "tools": [
            { "Name": "Foo", "Website": "https://foo.com" },
            { "Name": "Foo Mirror", "Website": "https://www.foo.com/landing" },
            { "Description": "row with no name or site" },
        ]
    });
    let response = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), batch).await;
    let json = body_json(response).await;
    assert_eq!(json["success_count"], 1);
    assert_eq!(json["skipped_count"], 1);
    assert_eq!(json["failed_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csv_body_is_parsed_server_side(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let csv = "Name,Website (Original),Description\n\
               \"Acme, Inc\",https://acme.ai,\"Does \"\"everything\"\", fast\"\n\
               Solo,https://solo.dev,Tiny tool\n";
    let response = post_json(
        &app,
        "/api/v1/admin/bulk-tools",
        Some(&admin),
        json!({ "csv": csv }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success_count"], 2);

    // The quoted comma stays inside the name.
    let tool = get(&app, "/api/v1/tools/acme-inc").await;
    assert_eq!(body_json(tool).await["data"]["name"], "Acme, Inc");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_body_variants_are_bad_request(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let response = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Logs and undo
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn logs_list_newest_first_and_expose_batch_tools(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let import = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let log_id = body_json(import).await["log_id"].as_str().unwrap().to_string();

    let logs = get_auth(&app, "/api/v1/admin/bulk-logs", &admin).await;
    let logs = body_json(logs).await;
    assert_eq!(logs["data"][0]["id"], log_id.as_str());
    assert_eq!(logs["data"][0]["undone"], false);
    assert_eq!(logs["data"][0]["uploaded_by"], "admin_1");

    let tools = get_auth(&app, &format!("/api/v1/admin/bulk-logs/{log_id}/tools"), &admin).await;
    let tools = body_json(tools).await;
    assert_eq!(tools["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_deletes_batch_and_is_exactly_once(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let import = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let log_id = body_json(import).await["log_id"].as_str().unwrap().to_string();

    let undo = delete(&app, &format!("/api/v1/admin/bulk-logs/{log_id}/undo"), Some(&admin)).await;
    assert_eq!(undo.status(), StatusCode::OK);
    let json = body_json(undo).await;
    assert_eq!(json["deleted_count"], 2);

    // The imported tools are gone from the public directory.
    let listing = body_json(get(&app, "/api/v1/tools").await).await;
    assert_eq!(listing["total"], 0);

    // A second undo is refused with the dedicated code.
    let again = delete(&app, &format!("/api/v1/admin/bulk-logs/{log_id}/undo"), Some(&admin)).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
    let json = body_json(again).await;
    assert_eq!(json["code"], "ALREADY_UNDONE");

    // The log survives with its tool_ids intact for audit.
    let logs = body_json(get_auth(&app, "/api/v1/admin/bulk-logs", &admin).await).await;
    assert_eq!(logs["data"][0]["undone"], true);
    assert_eq!(logs["data"][0]["tool_ids"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_of_unknown_log_is_not_found(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let response = delete(
        &app,
        "/api/v1/admin/bulk-logs/00000000-0000-0000-0000-000000000000/undo",
        Some(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn undo_after_import_allows_reimport(pool: PgPool) {
    let app = build_test_app(pool.clone());
    seed_admin(&pool, "admin_1").await;
    let admin = token_for("admin_1");

    let import = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let log_id = body_json(import).await["log_id"].as_str().unwrap().to_string();
    delete(&app, &format!("/api/v1/admin/bulk-logs/{log_id}/undo"), Some(&admin)).await;

    // Domains freed by the undo can be imported again.
    let reimport = post_json(&app, "/api/v1/admin/bulk-tools", Some(&admin), two_tool_batch()).await;
    let json = body_json(reimport).await;
    assert_eq!(json["success_count"], 2);
    assert_eq!(json["skipped_count"], 0);
}
