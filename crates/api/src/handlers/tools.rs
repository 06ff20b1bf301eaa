//! Handlers for the public `/tools` resource.
//!
//! Listing, featured/trending shelves, slug lookup, authenticated
//! submission with duplicate-domain detection, and the submitter's own
//! queue. Deletion is admin-only and lives here because it shares the
//! `/tools/{id}` path.

use aidex_core::error::CoreError;
use aidex_core::moderation::{validate_pricing, validate_tool_status, PRICING_FREE, STATUS_PENDING};
use aidex_core::slug::slugify;
use aidex_core::types::DbId;
use aidex_core::website::{favicon_url, normalize_domain, PLACEHOLDER_LOGO};
use aidex_db::models::tool::{
    CreateToolSubmission, NewTool, Tool, ToolFilter, ToolSort, ToolSummary,
};
use aidex_db::repositories::ToolRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::Pagination;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const FEATURED_LIMIT: i64 = 6;
const TRENDING_LIMIT: i64 = 10;

/// Query parameters for the public tool listing.
#[derive(Debug, Deserialize)]
pub struct ToolListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    // Flattening Pagination here trips serde_urlencoded's flatten
    // limitation with integer fields, so the params stay inline.
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated listing envelope for the public directory.
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: Vec<ToolSummary>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// GET /api/v1/tools
///
/// Public directory listing. Defaults to approved tools, trending-first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ToolListQuery>,
) -> AppResult<Json<ToolListResponse>> {
    let status = params.status.unwrap_or_else(|| "approved".to_string());
    validate_tool_status(&status)?;

    let filter = ToolFilter {
        status: Some(status),
        category: params.category,
        search: params.search,
    };
    let sort = ToolSort::from_query(params.sort.as_deref());
    let page = Pagination {
        page: params.page,
        limit: params.limit,
    };

    let tools = ToolRepo::list(&state.pool, &filter, sort, page.limit(), page.offset()).await?;
    let total = ToolRepo::count(&state.pool, &filter).await?;

    Ok(Json(ToolListResponse {
        tools,
        total,
        page: page.page(),
        total_pages: page.total_pages(total),
    }))
}

/// GET /api/v1/tools/featured -- approved + featured, most voted first.
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ToolSummary>>>> {
    let tools = ToolRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// GET /api/v1/tools/trending -- approved + trending, most voted first.
pub async fn trending(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ToolSummary>>>> {
    let tools = ToolRepo::list_trending(&state.pool, TRENDING_LIMIT).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// GET /api/v1/tools/{slug} -- full tool detail.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Tool>>> {
    let tool = ToolRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tool '{slug}'")))?;
    Ok(Json(DataResponse { data: tool }))
}

/// POST /api/v1/tools
///
/// Authenticated submission. Enters the moderation queue as `pending`.
/// A second submission with the same normalized website domain is
/// refused with 409 and the identity of the existing tool, so the
/// submitter can tell a resubmission from a genuinely new product.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateToolSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<Tool>>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let pricing = match body.pricing {
        Some(p) => {
            validate_pricing(&p)?;
            p
        }
        None => PRICING_FREE.to_string(),
    };

    let website_domain = normalize_domain(&body.website);
    if let Some(ref domain) = website_domain {
        if let Some(existing) = ToolRepo::find_by_domain(&state.pool, domain).await? {
            return Err(AppError::DuplicateTool {
                existing_name: existing.name,
                existing_slug: existing.slug,
                existing_status: existing.status,
            });
        }
    }

    let logo = if body.logo.trim().is_empty() {
        website_domain
            .as_deref()
            .map(favicon_url)
            .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string())
    } else {
        body.logo
    };

    let mut conn = state.pool.acquire().await?;
    let slug = ToolRepo::ensure_unique_slug(&mut conn, &slugify(&body.name)).await?;

    // The unique domain index backstops the duplicate check above: a
    // concurrent submission of the same domain loses with a 409 here.
    let tool = ToolRepo::insert_in(
        &mut conn,
        &NewTool {
            name: body.name,
            slug,
            short_description: body.short_description,
            description: body.description,
            logo,
            website: body.website,
            website_domain,
            categories: body.categories,
            tags: body.tags,
            pricing,
            status: STATUS_PENDING.to_string(),
            featured: false,
            trending: false,
            sponsored: false,
            rating: 0.0,
            votes: 0,
            submitted_by: user.user_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: tool })))
}

/// GET /api/v1/tools/mine -- the caller's own submissions, newest first.
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Tool>>>> {
    let tools = ToolRepo::list_by_submitter(&state.pool, &user.user_id).await?;
    Ok(Json(DataResponse { data: tools }))
}

/// DELETE /api/v1/tools/{id} -- hard delete (admin only).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ToolRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tool", id }));
    }
    Ok(Json(MessageResponse {
        message: "Tool deleted".to_string(),
    }))
}
