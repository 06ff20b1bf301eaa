//! Route definitions for the `/shop` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::shop;
use crate::state::AppState;

/// Routes mounted at `/shop`.
///
/// ```text
/// GET    /           -> list
/// POST   /           -> create      (admin)
/// GET    /{slug}     -> get_by_slug
/// PUT    /{id}       -> update      (admin)
/// DELETE /{id}       -> delete      (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shop::list).post(shop::create))
        .route(
            "/{slug}",
            get(shop::get_by_slug).put(shop::update).delete(shop::delete),
        )
}
