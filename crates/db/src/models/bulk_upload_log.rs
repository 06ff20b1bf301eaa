//! Audit log for bulk tool imports.

use aidex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bulk_upload_logs` table.
///
/// Created once at the end of an import batch (in the same transaction as
/// the inserts) and mutated exactly once, when undo flips `undone`.
/// `tool_ids` survive the undo so the audit trail stays complete.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BulkUploadLog {
    pub id: DbId,
    pub success_count: i32,
    pub skipped_count: i32,
    pub failed_count: i32,
    pub errors: Vec<String>,
    pub tool_ids: Vec<DbId>,
    pub uploaded_by: String,
    pub undone: bool,
    pub undone_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a new log row.
#[derive(Debug)]
pub struct NewBulkUploadLog<'a> {
    pub success_count: i32,
    pub skipped_count: i32,
    pub failed_count: i32,
    pub errors: &'a [String],
    pub tool_ids: &'a [DbId],
    pub uploaded_by: &'a str,
}
