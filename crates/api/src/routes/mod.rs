pub mod admin;
pub mod blogs;
pub mod health;
pub mod search;
pub mod shop;
pub mod tools;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tools                    public directory + authenticated submission
/// /blogs                    published posts + authenticated submission
/// /shop                     product catalog (writes admin-only)
/// /search                   global search over tools and blogs
/// /admin                    moderation, roles, bulk import (admin-only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tools", tools::router())
        .nest("/blogs", blogs::router())
        .nest("/shop", shop::router())
        .nest("/search", search::router())
        .nest("/admin", admin::router())
}
