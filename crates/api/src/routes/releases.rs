//! Route definitions for the release catalog, mounted at `/releases`.
//!
//! ```text
//! GET  /        -> list
//! POST /        -> create
//! GET  /latest  -> latest (update check)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::releases;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(releases::list).post(releases::create))
        .route("/latest", get(releases::latest))
}
