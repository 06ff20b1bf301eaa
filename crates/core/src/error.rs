use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A bulk upload log has already been undone. Undo is exactly-once;
    /// a second attempt is reported explicitly rather than silently
    /// succeeding.
    #[error("Bulk upload log {id} has already been undone")]
    AlreadyUndone { id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}
