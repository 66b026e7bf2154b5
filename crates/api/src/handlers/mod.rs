//! HTTP handler functions, grouped by resource.

pub mod devices;
pub mod releases;
pub mod templates;
