//! Role-based access control (RBAC) extractors.
//!
//! Roles live in the `user_roles` table rather than inside the token, so a
//! grant or revocation takes effect on the next request without reissuing
//! tokens. [`RequireAdmin`] performs the lookup and rejects with 403 when
//! the caller does not hold the `admin` role.

use aidex_core::error::CoreError;
use aidex_db::repositories::UserRoleRepo;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        let is_admin = UserRoleRepo::is_admin(&state.pool, &user.user_id).await?;
        if !is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
