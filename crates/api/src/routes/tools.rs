//! Route definitions for the public `/tools` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::tools;
use crate::state::AppState;

/// Routes mounted at `/tools`.
///
/// ```text
/// GET    /               -> list       (?status=&category=&search=&sort=&page=&limit=)
/// POST   /               -> submit     (auth)
/// GET    /featured       -> featured
/// GET    /trending       -> trending
/// GET    /mine           -> mine       (auth)
/// GET    /{slug}         -> get_by_slug
/// DELETE /{id}           -> delete     (admin; same segment, id is a uuid)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tools::list).post(tools::submit))
        .route("/featured", get(tools::featured))
        .route("/trending", get(tools::trending))
        .route("/mine", get(tools::mine))
        .route("/{slug}", get(tools::get_by_slug).delete(tools::delete))
}
