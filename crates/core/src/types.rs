/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Sentinel `client_id` marking the baseline template layer shared by
/// every client without an override of its own.
pub const DEFAULT_CLIENT_ID: &str = "default";
