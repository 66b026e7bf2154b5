//! Shared response envelope types for API handlers.
//!
//! Collection endpoints use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization. Endpoints
//! with a domain-defined shape (the template sync response, the update
//! check response) return that shape directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
