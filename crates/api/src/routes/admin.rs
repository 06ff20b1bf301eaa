//! Route definitions for the `/admin` tree.
//!
//! Every handler behind these routes takes [`RequireAdmin`] except
//! `/check`, which any signed-in user may call.
//!
//! [`RequireAdmin`]: crate::middleware::rbac::RequireAdmin

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{admin_blogs, admin_tools, bulk, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /check                          -> users::admin_check (any auth)
/// GET    /users                          -> users::list
/// PUT    /users/{user_id}/make-admin     -> users::make_admin
/// PUT    /users/{user_id}/remove-admin   -> users::remove_admin
///
/// GET    /tools                          -> admin_tools::list  (?status=)
/// PUT    /tools/{id}/approve             -> admin_tools::approve
/// PUT    /tools/{id}/reject              -> admin_tools::reject
/// PUT    /tools/{id}/featured            -> admin_tools::set_featured
/// PUT    /tools/{id}/trending            -> admin_tools::set_trending
/// PUT    /tools/{id}/edit                -> admin_tools::edit
///
/// GET    /blogs                          -> admin_blogs::list  (?status=)
/// PUT    /blogs/{id}/approve             -> admin_blogs::approve
/// PUT    /blogs/{id}/reject              -> admin_blogs::reject
/// PUT    /blogs/{id}/featured            -> admin_blogs::set_featured
/// DELETE /blogs/{id}                     -> admin_blogs::delete
///
/// POST   /bulk-tools                     -> bulk::import
/// GET    /bulk-logs                      -> bulk::logs
/// GET    /bulk-logs/{id}/tools           -> bulk::log_tools
/// DELETE /bulk-logs/{id}/undo            -> bulk::undo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check", get(users::admin_check))
        .route("/users", get(users::list))
        .route("/users/{user_id}/make-admin", put(users::make_admin))
        .route("/users/{user_id}/remove-admin", put(users::remove_admin))
        .route("/tools", get(admin_tools::list))
        .route("/tools/{id}/approve", put(admin_tools::approve))
        .route("/tools/{id}/reject", put(admin_tools::reject))
        .route("/tools/{id}/featured", put(admin_tools::set_featured))
        .route("/tools/{id}/trending", put(admin_tools::set_trending))
        .route("/tools/{id}/edit", put(admin_tools::edit))
        .route("/blogs", get(admin_blogs::list))
        .route("/blogs/{id}/approve", put(admin_blogs::approve))
        .route("/blogs/{id}/reject", put(admin_blogs::reject))
        .route("/blogs/{id}/featured", put(admin_blogs::set_featured))
        .route("/blogs/{id}", delete(admin_blogs::delete))
        .route("/bulk-tools", axum::routing::post(bulk::import))
        .route("/bulk-logs", get(bulk::logs))
        .route("/bulk-logs/{id}/tools", get(bulk::log_tools))
        .route("/bulk-logs/{id}/undo", delete(bulk::undo))
}
