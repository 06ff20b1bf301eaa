//! Repository for the `bulk_upload_logs` table.

use aidex_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::bulk_upload_log::{BulkUploadLog, NewBulkUploadLog};

const COLUMNS: &str = "id, success_count, skipped_count, failed_count, errors, tool_ids, \
    uploaded_by, undone, undone_at, created_at";

/// Provides audit-log operations for bulk imports.
pub struct BulkUploadLogRepo;

impl BulkUploadLogRepo {
    /// Insert the audit row for a completed batch. Runs on the same
    /// connection (transaction) as the batch inserts so the log and the
    /// tools it references commit together.
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &NewBulkUploadLog<'_>,
    ) -> Result<BulkUploadLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO bulk_upload_logs \
                (success_count, skipped_count, failed_count, errors, tool_ids, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BulkUploadLog>(&query)
            .bind(input.success_count)
            .bind(input.skipped_count)
            .bind(input.failed_count)
            .bind(input.errors)
            .bind(input.tool_ids)
            .bind(input.uploaded_by)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BulkUploadLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bulk_upload_logs WHERE id = $1");
        sqlx::query_as::<_, BulkUploadLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All logs, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BulkUploadLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bulk_upload_logs ORDER BY created_at DESC");
        sqlx::query_as::<_, BulkUploadLog>(&query)
            .fetch_all(pool)
            .await
    }

    /// Flag a log consumed by undo. The `AND undone = FALSE` guard makes
    /// undo exactly-once even under concurrent requests: the loser of the
    /// race sees `None` here and reports the log as already undone.
    pub async fn mark_undone_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<BulkUploadLog>, sqlx::Error> {
        let query = format!(
            "UPDATE bulk_upload_logs SET undone = TRUE, undone_at = now() \
             WHERE id = $1 AND undone = FALSE \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BulkUploadLog>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
