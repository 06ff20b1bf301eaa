//! Handlers for role administration under `/admin`.
//!
//! User profiles live with the external identity provider; this server
//! only keeps a role overlay keyed by the provider's user id.

use aidex_db::models::user_role::UserRole;
use aidex_db::repositories::UserRoleRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

/// GET /api/v1/admin/check
///
/// Tells a signed-in user whether they hold the admin role. Never errors
/// for a non-admin; the frontend uses this to show or hide admin UI.
pub async fn admin_check(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<AdminCheckResponse>> {
    let is_admin = UserRoleRepo::is_admin(&state.pool, &user.user_id).await?;
    Ok(Json(AdminCheckResponse { is_admin }))
}

/// GET /api/v1/admin/users -- the role overlay listing.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserRole>>>> {
    let roles = UserRoleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roles }))
}

/// PUT /api/v1/admin/users/{user_id}/make-admin
pub async fn make_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> AppResult<Json<DataResponse<UserRole>>> {
    let role = UserRoleRepo::grant_admin(&state.pool, &user_id).await?;
    tracing::info!(user_id = %user_id, granted_by = %admin.user_id, "Admin role granted");
    Ok(Json(DataResponse { data: role }))
}

/// PUT /api/v1/admin/users/{user_id}/remove-admin
pub async fn remove_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    UserRoleRepo::revoke_admin(&state.pool, &user_id).await?;
    tracing::info!(user_id = %user_id, revoked_by = %admin.user_id, "Admin role revoked");
    Ok(Json(MessageResponse {
        message: "Admin role removed".to_string(),
    }))
}
