//! Role overlay for externally-managed user identities.

use aidex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_roles` table.
///
/// `user_id` is the identity provider's id; the authoritative profile
/// (name, email, avatar) lives there, not here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
