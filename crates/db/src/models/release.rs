//! Release catalog model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use notesync_core::types::{DbId, Timestamp};

/// A row from the `releases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Release {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub version: String,
    pub release_date: Timestamp,
    pub download_url: Option<String>,
    pub release_notes: Option<String>,
    pub whats_new: Option<Json<Vec<String>>>,
    pub is_latest: bool,
    pub min_version: Option<String>,
    pub platform: String,
    pub created_at: Timestamp,
}

/// DTO for publishing a new release.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRelease {
    pub version: String,
    #[serde(default)]
    pub release_date: Option<Timestamp>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub whats_new: Option<Vec<String>>,
    #[serde(default)]
    pub is_latest: bool,
    #[serde(default)]
    pub min_version: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}
