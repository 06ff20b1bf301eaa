//! Handlers for the `/admin/blogs` review queue.

use aidex_core::error::CoreError;
use aidex_core::moderation::{self, BLOG_STATUS_PUBLISHED, BLOG_STATUS_REJECTED};
use aidex_core::types::DbId;
use aidex_db::models::blog::Blog;
use aidex_db::repositories::BlogRepo;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::admin_tools::FlagBody;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminBlogQuery {
    pub status: Option<String>,
}

/// GET /api/v1/admin/blogs -- review queue, optionally status-filtered.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AdminBlogQuery>,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = BlogRepo::list_for_admin(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// PUT /api/v1/admin/blogs/{id}/approve
///
/// Publishes the post, stamping `published_at` on first publication.
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let current = require_blog(&state, id).await?;
    moderation::check_blog_transition(&current.status, BLOG_STATUS_PUBLISHED)?;

    let blog = BlogRepo::publish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    tracing::info!(blog_id = %id, admin = %admin.user_id, "Blog published");
    Ok(Json(DataResponse { data: blog }))
}

/// PUT /api/v1/admin/blogs/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let current = require_blog(&state, id).await?;
    moderation::check_blog_transition(&current.status, BLOG_STATUS_REJECTED)?;

    let blog = BlogRepo::reject(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    tracing::info!(blog_id = %id, admin = %admin.user_id, "Blog rejected");
    Ok(Json(DataResponse { data: blog }))
}

/// PUT /api/v1/admin/blogs/{id}/featured -- idempotent flag set.
pub async fn set_featured(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<FlagBody>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let blog = BlogRepo::set_featured(&state.pool, id, body.value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;
    Ok(Json(DataResponse { data: blog }))
}

/// DELETE /api/v1/admin/blogs/{id} -- hard delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = BlogRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Blog", id }));
    }
    Ok(Json(MessageResponse {
        message: "Blog deleted".to_string(),
    }))
}

async fn require_blog(state: &AppState, id: DbId) -> AppResult<Blog> {
    BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))
}
