//! Route definitions for the device registry, mounted at `/devices`.
//!
//! ```text
//! GET   /               -> list
//! POST  /register       -> register
//! PATCH /advanced-logs  -> toggle_advanced_logs
//! GET   /{user_id}      -> get_by_user_id
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(devices::list))
        .route("/register", post(devices::register))
        .route("/advanced-logs", patch(devices::toggle_advanced_logs))
        .route("/{user_id}", get(devices::get_by_user_id))
}
