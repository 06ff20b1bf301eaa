//! Handlers for the public `/blogs` resource.

use aidex_core::moderation::BLOG_STATUS_PUBLISHED;
use aidex_core::slug::slugify;
use aidex_db::models::blog::{read_time_minutes, Blog, BlogFilter, BlogSummary, CreateBlogSubmission};
use aidex_db::repositories::blog_repo::NewBlog;
use aidex_db::repositories::BlogRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::Pagination;
use crate::response::DataResponse;
use crate::state::AppState;

const FEATURED_LIMIT: i64 = 3;

/// Author name shown when a submission does not carry one.
const DEFAULT_AUTHOR: &str = "User";

/// Query parameters for the public blog listing.
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Paginated listing envelope.
#[derive(Debug, Serialize)]
pub struct BlogListResponse {
    pub blogs: Vec<BlogSummary>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

/// GET /api/v1/blogs -- published posts, most recently published first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BlogListQuery>,
) -> AppResult<Json<BlogListResponse>> {
    let filter = BlogFilter {
        status: Some(
            params
                .status
                .unwrap_or_else(|| BLOG_STATUS_PUBLISHED.to_string()),
        ),
        category: params.category,
        search: params.search,
    };
    let page = Pagination {
        page: params.page,
        limit: params.limit,
    };

    let blogs = BlogRepo::list(&state.pool, &filter, page.limit(), page.offset()).await?;
    let total = BlogRepo::count(&state.pool, &filter).await?;

    Ok(Json(BlogListResponse {
        blogs,
        total,
        page: page.page(),
        total_pages: page.total_pages(total),
    }))
}

/// GET /api/v1/blogs/featured -- published + featured posts.
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BlogSummary>>>> {
    let blogs = BlogRepo::list_featured(&state.pool, FEATURED_LIMIT).await?;
    Ok(Json(DataResponse { data: blogs }))
}

/// GET /api/v1/blogs/{slug}
///
/// Fetch a post and bump its view counter. The returned body reflects
/// the incremented count.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Blog>>> {
    let mut blog = BlogRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog '{slug}'")))?;

    BlogRepo::increment_views(&state.pool, blog.id).await?;
    blog.views += 1;

    Ok(Json(DataResponse { data: blog }))
}

/// POST /api/v1/blogs -- authenticated submission, enters review as pending.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CreateBlogSubmission>,
) -> AppResult<(StatusCode, Json<DataResponse<Blog>>)> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let read_time = read_time_minutes(&body.content);
    let author = body
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let mut conn = state.pool.acquire().await?;
    let slug = BlogRepo::ensure_unique_slug(&mut conn, &slugify(&body.title)).await?;

    let blog = BlogRepo::insert_in(
        &mut conn,
        &NewBlog {
            title: body.title,
            slug,
            excerpt: body.excerpt,
            content: body.content,
            cover_image: body.cover_image,
            category: body.category,
            tags: body.tags,
            author,
            author_id: user.user_id,
            read_time,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: blog })))
}

/// GET /api/v1/blogs/mine -- the caller's own posts, newest first.
pub async fn mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Blog>>>> {
    let blogs = BlogRepo::list_by_author(&state.pool, &user.user_id).await?;
    Ok(Json(DataResponse { data: blogs }))
}
