pub mod devices;
pub mod health;
pub mod releases;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /templates                       resolved list (GET), create (POST)
/// /templates/{template_id}         resolved lookup (GET), replace (PUT)
///
/// /devices                         list (GET)
/// /devices/register                register / session bump (POST)
/// /devices/advanced-logs           toggle debug analytics flag (PATCH)
/// /devices/{user_id}               flag poll (GET)
///
/// /releases                        list (GET), publish (POST)
/// /releases/latest                 update check (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/templates", templates::router())
        .nest("/devices", devices::router())
        .nest("/releases", releases::router())
}
