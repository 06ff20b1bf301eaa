/// All entity primary keys are UUIDv4, matching the document ids the
/// directory has always used.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
