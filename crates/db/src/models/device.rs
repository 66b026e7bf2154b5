//! Device registry model and DTOs.
//!
//! Each desktop installation registers itself once per session; the
//! `advanced_logs` flag is an operator-controlled toggle the app polls to
//! decide whether to emit debug-level analytics events.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use notesync_core::types::{DbId, Timestamp};

/// A row from the `devices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub user_id: String,
    pub platform: String,
    pub architecture: String,
    pub app_version: String,
    pub os_version: String,
    pub sessions_count: i32,
    pub advanced_logs: bool,
    pub advanced_logs_toggled_at: Option<Timestamp>,
    pub first_seen: Timestamp,
    pub last_seen: Timestamp,
}

/// DTO for device registration (upsert keyed by `user_id`).
///
/// Environment fields default to `'unknown'` when omitted so partial
/// client payloads still register.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterDevice {
    pub user_id: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub architecture: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub os_version: Option<String>,
}

/// DTO for the advanced-logs toggle (`PATCH /devices/advanced-logs`).
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleAdvancedLogs {
    pub user_id: String,
    pub enabled: bool,
}
