//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod device_repo;
pub mod release_repo;
pub mod template_repo;

pub use device_repo::DeviceRepo;
pub use release_repo::ReleaseRepo;
pub use template_repo::TemplateRepo;
