//! Handlers for the `/releases` resource.
//!
//! Serves the app release catalog and the update-check endpoint the
//! desktop client polls at startup.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use notesync_core::error::CoreError;
use notesync_core::semver;
use notesync_core::types::Timestamp;
use notesync_db::models::release::{CreateRelease, Release};
use notesync_db::repositories::ReleaseRepo;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct UpdateCheckParams {
    pub current_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Response for the update-check endpoint.
///
/// `available` is only true when the caller supplied a `current_version`
/// strictly older than the latest release.
#[derive(Debug, Serialize)]
pub struct UpdateCheckResponse {
    pub available: bool,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whats_new: Option<Vec<String>>,
}

/// GET /api/v1/releases/latest?current_version=
pub async fn latest(
    State(state): State<AppState>,
    Query(params): Query<UpdateCheckParams>,
) -> AppResult<Json<UpdateCheckResponse>> {
    let Some(release) = ReleaseRepo::find_latest(&state.pool).await? else {
        return Ok(Json(UpdateCheckResponse {
            available: false,
            version: params.current_version.unwrap_or_else(|| "unknown".into()),
            release_date: None,
            download_url: None,
            release_notes: None,
            whats_new: None,
        }));
    };

    let available = params
        .current_version
        .as_deref()
        .map(|current| semver::is_newer(&release.version, current))
        .unwrap_or(false);

    tracing::info!(
        latest = %release.version,
        current = params.current_version.as_deref().unwrap_or("-"),
        available,
        "Update check",
    );

    Ok(Json(UpdateCheckResponse {
        available,
        version: release.version,
        release_date: Some(release.release_date),
        download_url: release.download_url,
        release_notes: release.release_notes,
        whats_new: release.whats_new.map(|w| w.0),
    }))
}

/// GET /api/v1/releases?limit=
///
/// Recent releases, newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Release>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 100);
    let releases = ReleaseRepo::list(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: releases }))
}

/// POST /api/v1/releases
///
/// Publish a release; when marked latest, the previous latest is unmarked.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRelease>,
) -> AppResult<(StatusCode, Json<Release>)> {
    if input.version.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "version must not be empty".into(),
        )));
    }

    let release = ReleaseRepo::create(&state.pool, &input)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Core(CoreError::Conflict(format!(
                    "Release '{}' already exists",
                    input.version
                )))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        version = %release.version,
        is_latest = release.is_latest,
        "Created release",
    );

    Ok((StatusCode::CREATED, Json(release)))
}
