//! Well-known role name constants.
//!
//! These must match the CHECK constraint on the `user_roles` table.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
