//! Global search across approved tools and published blogs.

use aidex_db::models::blog::BlogSummary;
use aidex_db::models::tool::ToolSummary;
use aidex_db::repositories::{BlogRepo, ToolRepo};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_QUERY_LEN: usize = 2;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    /// One of `all` (default), `tools`, `blogs`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub tools: Vec<ToolSummary>,
    pub blogs: Vec<BlogSummary>,
    pub total_results: usize,
}

/// GET /api/v1/search?q=...&type=all&limit=10
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let term = params.q.trim();
    if term.chars().count() < MIN_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Search query must be at least {MIN_QUERY_LEN} characters"
        )));
    }

    let kind = params.kind.as_deref().unwrap_or("all");
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let tools = match kind {
        "all" | "tools" => ToolRepo::search(&state.pool, term, limit).await?,
        _ => Vec::new(),
    };
    let blogs = match kind {
        "all" | "blogs" => BlogRepo::search(&state.pool, term, limit).await?,
        _ => Vec::new(),
    };

    let total_results = tools.len() + blogs.len();
    Ok(Json(SearchResponse {
        query: term.to_string(),
        tools,
        blogs,
        total_results,
    }))
}
