//! Repository for the `user_roles` table.

use aidex_core::roles::{ROLE_ADMIN, ROLE_USER};
use sqlx::PgPool;

use crate::models::user_role::UserRole;

const COLUMNS: &str = "id, user_id, role, created_at, updated_at";

/// Provides role lookup and mutation for external user identities.
pub struct UserRoleRepo;

impl UserRoleRepo {
    /// Find the role record for an external user id.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1");
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the user holds the admin role. Users with no role record
    /// are plain users.
    pub async fn is_admin(pool: &PgPool, user_id: &str) -> Result<bool, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE user_id = $1 AND role = $2")
                .bind(user_id)
                .bind(ROLE_ADMIN)
                .fetch_one(pool)
                .await?;
        Ok(count > 0)
    }

    /// All role records, newest first (admin user listing overlay).
    pub async fn list(pool: &PgPool) -> Result<Vec<UserRole>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_roles ORDER BY created_at DESC");
        sqlx::query_as::<_, UserRole>(&query).fetch_all(pool).await
    }

    /// Grant the admin role, creating the record if the user has none.
    pub async fn grant_admin(pool: &PgPool, user_id: &str) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) \
             ON CONFLICT (user_id) \
             DO UPDATE SET role = EXCLUDED.role, updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await
    }

    /// Demote a user back to the plain role. A no-op when the user has no
    /// role record, since absent means plain user already.
    pub async fn revoke_admin(pool: &PgPool, user_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE user_roles SET role = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id)
            .bind(ROLE_USER)
            .execute(pool)
            .await?;
        Ok(())
    }
}
