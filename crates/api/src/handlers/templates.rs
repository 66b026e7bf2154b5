//! Handlers for the `/templates` resource.
//!
//! Reads go through the resolver (client overrides merged onto the
//! `'default'` layer); writes are plain CRUD keyed by the
//! `(template_id, client_id)` pair.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use notesync_core::error::CoreError;
use notesync_core::types::{Timestamp, DEFAULT_CLIENT_ID};
use notesync_db::models::template::{CreateTemplate, ReplaceTemplate, Template, TemplateSection};
use notesync_db::repositories::TemplateRepo;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::state::AppState;

/// Query parameters selecting the requesting client layer.
#[derive(Debug, Deserialize)]
pub struct ClientParams {
    pub client_id: Option<String>,
}

/// Response for the sync endpoint consumed by the desktop app.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub templates: Vec<Template>,
    pub sync_timestamp: Timestamp,
}

/// GET /api/v1/templates?client_id=
///
/// Resolved template list for the client (overrides merged onto defaults,
/// sorted by name), wrapped with the sync timestamp.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClientParams>,
) -> AppResult<Json<SyncResponse>> {
    let client_id = params
        .client_id
        .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

    let templates = TemplateRepo::resolve_for_client(&state.pool, &client_id).await?;

    tracing::info!(
        client_id = %client_id,
        count = templates.len(),
        "Resolved template list",
    );

    Ok(Json(SyncResponse {
        templates,
        sync_timestamp: chrono::Utc::now(),
    }))
}

/// GET /api/v1/templates/{template_id}?client_id=
///
/// Single resolved template: an active client override takes precedence,
/// otherwise the active default.
pub async fn get_one(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
    Query(params): Query<ClientParams>,
) -> AppResult<Json<Template>> {
    let client_id = params
        .client_id
        .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());

    let template = TemplateRepo::resolve_one(&state.pool, &template_id, &client_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", &template_id))?;

    Ok(Json(template))
}

/// POST /api/v1/templates
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<(StatusCode, Json<Template>)> {
    validate_identity(&input.template_id, &input.client_id)?;
    validate_body(&input.name, input.version, &input.sections)?;

    let template = TemplateRepo::insert(&state.pool, &input)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Core(CoreError::Conflict(format!(
                    "Template '{}' already exists for client '{}'",
                    input.template_id, input.client_id
                )))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        template_id = %template.template_id,
        client_id = %template.client_id,
        "Created template",
    );

    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/templates/{template_id}
///
/// Full-document replace; the body carries the `client_id` selecting which
/// layer is replaced. Fails with 404 when the identity pair does not exist.
pub async fn replace(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
    Json(input): Json<ReplaceTemplate>,
) -> AppResult<Json<Template>> {
    validate_identity(&template_id, &input.client_id)?;
    validate_body(&input.name, input.version, &input.sections)?;

    let template = TemplateRepo::replace(&state.pool, &template_id, &input.client_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Template", &template_id))?;

    tracing::info!(
        template_id = %template.template_id,
        client_id = %template.client_id,
        version = template.version,
        "Replaced template",
    );

    Ok(Json(template))
}

fn validate_identity(template_id: &str, client_id: &str) -> AppResult<()> {
    if template_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "template_id must not be empty".into(),
        )));
    }
    if client_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "client_id must not be empty".into(),
        )));
    }
    Ok(())
}

fn validate_body(name: &str, version: i32, sections: &[TemplateSection]) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    if version < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "version must be >= 1".into(),
        )));
    }
    for (i, section) in sections.iter().enumerate() {
        if section.title.trim().is_empty()
            || section.instruction.trim().is_empty()
            || section.format.trim().is_empty()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "section {i} must have non-empty title, instruction, and format"
            ))));
        }
    }
    Ok(())
}
