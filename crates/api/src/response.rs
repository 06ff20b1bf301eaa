//! Shared response envelope types for API handlers.
//!
//! Single-entity responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety
//! and consistent serialization. List endpoints with pagination return
//! resource-named envelopes (`{ "tools": [...], "total": ... }`) defined
//! next to their handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: tool }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ... }` body for operations whose only payload is an
/// acknowledgement (deletes, role changes).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
