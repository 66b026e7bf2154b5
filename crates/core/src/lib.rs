//! Shared domain types and pure logic for the notesync backend.
//!
//! No I/O lives here: the error taxonomy, common type aliases, and the
//! semantic version comparison used by the update-check endpoint.

pub mod error;
pub mod semver;
pub mod types;
