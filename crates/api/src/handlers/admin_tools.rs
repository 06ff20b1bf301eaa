//! Handlers for the `/admin/tools` moderation queue.
//!
//! All routes require the admin role. Status transitions are validated by
//! `aidex_core::moderation` before any row is touched, so an approved
//! tool can never be re-moderated.

use aidex_core::error::CoreError;
use aidex_core::moderation::{
    self, validate_pricing, validate_tool_status, STATUS_APPROVED, STATUS_REJECTED,
};
use aidex_core::types::DbId;
use aidex_core::website::normalize_domain;
use aidex_db::models::tool::{Tool, UpdateTool};
use aidex_db::repositories::ToolRepo;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the review queue listing.
#[derive(Debug, Deserialize)]
pub struct AdminToolQuery {
    pub status: Option<String>,
}

/// Body for the reject endpoint.
#[derive(Debug, Deserialize)]
pub struct RejectBody {
    pub comment: Option<String>,
}

/// Body for the featured/trending flag endpoints.
#[derive(Debug, Deserialize)]
pub struct FlagBody {
    pub value: bool,
}

/// GET /api/v1/admin/tools -- review queue, optionally status-filtered.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminToolQuery>,
) -> AppResult<Json<DataResponse<Vec<Tool>>>> {
    if let Some(ref status) = params.status {
        validate_tool_status(status)?;
    }
    let tools = ToolRepo::list_for_admin(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// PUT /api/v1/admin/tools/{id}/approve
///
/// Approving also clears any stale rejection metadata, so a previously
/// rejected tool goes live without its old rejection comment attached.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tool>>> {
    let current = require_tool(&state, id).await?;
    moderation::check_transition(&current.status, STATUS_APPROVED)?;

    let tool = ToolRepo::approve(&state.pool, id, &admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))?;

    tracing::info!(tool_id = %id, admin = %admin.user_id, "Tool approved");
    Ok(Json(DataResponse { data: tool }))
}

/// PUT /api/v1/admin/tools/{id}/reject
///
/// A blank or missing comment is stored as the default reason so the
/// submitter always sees something.
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<RejectBody>,
) -> AppResult<Json<DataResponse<Tool>>> {
    let current = require_tool(&state, id).await?;
    moderation::check_transition(&current.status, STATUS_REJECTED)?;

    let comment = moderation::rejection_comment(body.comment.as_deref());
    let tool = ToolRepo::reject(&state.pool, id, &comment, &admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))?;

    tracing::info!(tool_id = %id, admin = %admin.user_id, "Tool rejected");
    Ok(Json(DataResponse { data: tool }))
}

/// PUT /api/v1/admin/tools/{id}/featured -- idempotent flag set.
pub async fn set_featured(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<FlagBody>,
) -> AppResult<Json<DataResponse<Tool>>> {
    let tool = ToolRepo::set_featured(&state.pool, id, body.value, &admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))?;
    Ok(Json(DataResponse { data: tool }))
}

/// PUT /api/v1/admin/tools/{id}/trending -- idempotent flag set.
pub async fn set_trending(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<FlagBody>,
) -> AppResult<Json<DataResponse<Tool>>> {
    let tool = ToolRepo::set_trending(&state.pool, id, body.value, &admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))?;
    Ok(Json(DataResponse { data: tool }))
}

/// PUT /api/v1/admin/tools/{id}/edit
///
/// Partial-field merge: only provided fields are applied. Changing the
/// website recomputes the stored dedup domain.
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateTool>,
) -> AppResult<Json<DataResponse<Tool>>> {
    if let Some(ref status) = body.status {
        validate_tool_status(status)?;
    }
    if let Some(ref pricing) = body.pricing {
        validate_pricing(pricing)?;
    }

    let website_domain = body.website.as_deref().and_then(normalize_domain);
    let tool = ToolRepo::update_fields(&state.pool, id, &body, website_domain, &admin.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))?;

    Ok(Json(DataResponse { data: tool }))
}

async fn require_tool(state: &AppState, id: DbId) -> AppResult<Tool> {
    ToolRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tool", id }))
}
