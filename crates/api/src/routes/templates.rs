//! Route definitions for the template resource, mounted at `/templates`.
//!
//! ```text
//! GET  /                -> list (resolved, with sync timestamp)
//! POST /                -> create
//! GET  /{template_id}   -> get_one (resolved)
//! PUT  /{template_id}   -> replace
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list).post(templates::create))
        .route(
            "/{template_id}",
            get(templates::get_one).put(templates::replace),
        )
}
