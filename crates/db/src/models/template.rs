//! Template model and DTOs.
//!
//! A template is a named, versioned meeting-note format owned by a
//! `(template_id, client_id)` pair. Sections are embedded documents with
//! no identity of their own; their order dictates rendering order
//! downstream and is preserved exactly as stored.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use notesync_core::types::{DbId, Timestamp, DEFAULT_CLIENT_ID};

/// One instructed segment of a template (embedded in `sections`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub title: String,
    pub instruction: String,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_item_format: Option<String>,
}

/// A row from the `templates` table.
///
/// The surrogate `id` is a storage detail and never serialized to callers;
/// the public identity is the `(template_id, client_id)` pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub template_id: String,
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub sections: Json<Vec<TemplateSection>>,
    pub global_instruction: Option<String>,
    pub clinical_safety_rules: Option<Json<Vec<String>>>,
    pub version: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

fn default_version() -> i32 {
    1
}

fn default_is_active() -> bool {
    true
}

/// DTO for creating a new template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplate {
    pub template_id: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub sections: Vec<TemplateSection>,
    #[serde(default)]
    pub global_instruction: Option<String>,
    #[serde(default)]
    pub clinical_safety_rules: Option<Vec<String>>,
    #[serde(default = "default_version")]
    pub version: i32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// DTO for the full-document replace (`PUT /templates/{template_id}`).
///
/// Carries its own `client_id` to select which layer is being replaced.
/// Every field except `created_at` is overwritten; `version` is persisted
/// as supplied, with no server-side increment.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceTemplate {
    #[serde(default = "default_client_id")]
    pub client_id: String,
    pub name: String,
    pub description: String,
    pub sections: Vec<TemplateSection>,
    #[serde(default)]
    pub global_instruction: Option<String>,
    #[serde(default)]
    pub clinical_safety_rules: Option<Vec<String>>,
    #[serde(default = "default_version")]
    pub version: i32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}
