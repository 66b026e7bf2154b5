//! Handlers for the `/devices` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use notesync_core::error::CoreError;
use notesync_db::models::device::{Device, RegisterDevice, ToggleAdvancedLogs};
use notesync_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Response for the advanced-logs toggle.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub user_id: String,
    pub advanced_logs: bool,
}

/// POST /api/v1/devices/register
///
/// Upsert keyed by `user_id`: refreshes environment info and bumps the
/// session counter on repeat registrations.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterDevice>,
) -> AppResult<Json<Device>> {
    if input.user_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "user_id must not be empty".into(),
        )));
    }

    let device = DeviceRepo::register(&state.pool, &input).await?;

    tracing::info!(
        user_id = %device.user_id,
        sessions_count = device.sessions_count,
        "Registered device",
    );

    Ok(Json(device))
}

/// GET /api/v1/devices?limit=
///
/// Registered devices, most recently seen first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Device>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 500);
    let devices = DeviceRepo::list(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: devices }))
}

/// GET /api/v1/devices/{user_id}
///
/// Used by the desktop app to poll its `advanced_logs` flag.
pub async fn get_by_user_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Device>> {
    let device = DeviceRepo::find_by_user_id(&state.pool, &user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Device", &user_id))?;
    Ok(Json(device))
}

/// PATCH /api/v1/devices/advanced-logs
///
/// Enable or disable debug-level analytics for a specific installation.
pub async fn toggle_advanced_logs(
    State(state): State<AppState>,
    Json(input): Json<ToggleAdvancedLogs>,
) -> AppResult<Json<ToggleResponse>> {
    let device = DeviceRepo::set_advanced_logs(&state.pool, &input.user_id, input.enabled)
        .await?
        .ok_or_else(|| CoreError::not_found("Device", &input.user_id))?;

    tracing::info!(
        user_id = %device.user_id,
        advanced_logs = device.advanced_logs,
        "Toggled advanced logs",
    );

    Ok(Json(ToggleResponse {
        user_id: device.user_id,
        advanced_logs: device.advanced_logs,
    }))
}
