//! Handlers for admin bulk tool import and its audit log.
//!
//! An import accepts either pre-parsed rows (`{ "tools": [...] }`) or raw
//! CSV text (`{ "csv": "..." }`). Planning is pure (`aidex_core::importer`);
//! this module owns the transactional part: the inserts and the audit log
//! row commit together, and undo deletes the created tools and consumes
//! the log in one transaction as well.

use std::collections::HashSet;

use aidex_core::csv::{parse_csv, RawRecord};
use aidex_core::error::CoreError;
use aidex_core::importer::plan_import;
use aidex_core::moderation::STATUS_APPROVED;
use aidex_core::types::DbId;
use aidex_db::models::bulk_upload_log::{BulkUploadLog, NewBulkUploadLog};
use aidex_db::models::tool::{NewTool, ToolSummary};
use aidex_db::repositories::{BulkUploadLogRepo, ToolRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Import request body: exactly one of `tools` or `csv`.
#[derive(Debug, Deserialize)]
pub struct BulkImportRequest {
    pub tools: Option<Vec<serde_json::Map<String, serde_json::Value>>>,
    pub csv: Option<String>,
}

/// Import outcome returned to the admin UI.
#[derive(Debug, Serialize)]
pub struct BulkImportResponse {
    pub success_count: i32,
    pub skipped_count: i32,
    pub failed_count: i32,
    pub errors: Vec<String>,
    pub log_id: DbId,
    pub tool_ids: Vec<DbId>,
}

/// Undo outcome.
#[derive(Debug, Serialize)]
pub struct UndoResponse {
    pub message: String,
    pub deleted_count: usize,
}

/// POST /api/v1/admin/bulk-tools
///
/// Imported tools skip moderation and go live as `approved`. Rows are
/// deduplicated by normalized website domain against both the store and
/// the batch itself; per-row failures never abort the batch.
pub async fn import(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<BulkImportRequest>,
) -> AppResult<Json<BulkImportResponse>> {
    let rows = match (body.tools, body.csv) {
        (Some(tools), _) => rows_from_json(tools),
        (None, Some(csv)) => parse_csv(&csv),
        (None, None) => {
            return Err(AppError::BadRequest(
                "Provide either 'tools' or 'csv'".to_string(),
            ));
        }
    };

    let mut existing_domains: HashSet<String> =
        ToolRepo::list_domains(&state.pool).await?.into_iter().collect();
    let plan = plan_import(&rows, &mut existing_domains);

    // Inserts and the audit row commit together; a failure mid-batch
    // leaves no orphaned tools and no log claiming they exist.
    let mut tx = state.pool.begin().await?;
    let mut tool_ids = Vec::with_capacity(plan.drafts.len());

    for draft in &plan.drafts {
        let slug = ToolRepo::ensure_unique_slug(&mut tx, &draft.slug).await?;
        let tool = ToolRepo::insert_in(
            &mut tx,
            &NewTool {
                name: draft.name.clone(),
                slug,
                short_description: draft.short_description.clone(),
                description: draft.description.clone(),
                logo: draft.logo.clone(),
                website: draft.website.clone(),
                website_domain: draft.website_domain.clone(),
                categories: draft.categories.clone(),
                tags: draft.tags.clone(),
                pricing: draft.pricing.clone(),
                status: STATUS_APPROVED.to_string(),
                featured: draft.featured,
                trending: false,
                sponsored: false,
                rating: draft.rating,
                votes: draft.votes,
                submitted_by: admin.user_id.clone(),
            },
        )
        .await?;
        tool_ids.push(tool.id);
    }

    let summary = &plan.summary;
    let log = BulkUploadLogRepo::create_in(
        &mut tx,
        &NewBulkUploadLog {
            success_count: summary.success_count,
            skipped_count: summary.skipped_count,
            failed_count: summary.failed_count,
            errors: &summary.errors,
            tool_ids: &tool_ids,
            uploaded_by: &admin.user_id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        log_id = %log.id,
        success = summary.success_count,
        skipped = summary.skipped_count,
        failed = summary.failed_count,
        admin = %admin.user_id,
        "Bulk import committed"
    );

    Ok(Json(BulkImportResponse {
        success_count: summary.success_count,
        skipped_count: summary.skipped_count,
        failed_count: summary.failed_count,
        errors: summary.errors.clone(),
        log_id: log.id,
        tool_ids,
    }))
}

/// GET /api/v1/admin/bulk-logs -- all import logs, newest first.
pub async fn logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<BulkUploadLog>>>> {
    let logs = BulkUploadLogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /api/v1/admin/bulk-logs/{id}/tools
///
/// The tools a log created. Tools deleted since (by undo or by hand)
/// are silently absent.
pub async fn log_tools(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ToolSummary>>>> {
    let log = require_log(&state, id).await?;
    let tools = ToolRepo::list_by_ids(&state.pool, &log.tool_ids).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// DELETE /api/v1/admin/bulk-logs/{id}/undo
///
/// Deletes every tool the batch created and consumes the log, exactly
/// once: a second undo (or the loser of a concurrent race) gets 409
/// with code `ALREADY_UNDONE`.
pub async fn undo(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UndoResponse>> {
    require_log(&state, id).await?;

    let mut tx = state.pool.begin().await?;
    let log = BulkUploadLogRepo::mark_undone_in(&mut tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::AlreadyUndone { id }))?;

    let mut deleted_count = 0;
    for tool_id in &log.tool_ids {
        // Individually-missing tools are tolerated; the batch may have
        // been partially cleaned up by hand.
        if ToolRepo::delete_in(&mut tx, *tool_id).await? {
            deleted_count += 1;
        }
    }
    tx.commit().await?;

    tracing::info!(log_id = %id, deleted_count, admin = %admin.user_id, "Bulk import undone");

    Ok(Json(UndoResponse {
        message: "Bulk upload undone".to_string(),
        deleted_count,
    }))
}

/// Flatten JSON rows into string records. Non-string scalars are
/// stringified (the original client sent booleans for `featured`);
/// nested values are dropped.
fn rows_from_json(tools: Vec<serde_json::Map<String, serde_json::Value>>) -> Vec<RawRecord> {
    tools
        .into_iter()
        .map(|map| {
            map.into_iter()
                .filter_map(|(key, value)| {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Bool(b) => b.to_string(),
                        serde_json::Value::Number(n) => n.to_string(),
                        _ => return None,
                    };
                    Some((key, value))
                })
                .collect()
        })
        .collect()
}

async fn require_log(state: &AppState, id: DbId) -> AppResult<BulkUploadLog> {
    BulkUploadLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BulkUploadLog",
            id,
        }))
}
