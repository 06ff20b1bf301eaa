//! Route definitions for the public `/blogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET    /           -> list        (?status=&category=&search=&page=&limit=)
/// POST   /           -> submit      (auth)
/// GET    /featured   -> featured
/// GET    /mine       -> mine        (auth)
/// GET    /{slug}     -> get_by_slug (increments views)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list).post(blogs::submit))
        .route("/featured", get(blogs::featured))
        .route("/mine", get(blogs::mine))
        .route("/{slug}", get(blogs::get_by_slug))
}
