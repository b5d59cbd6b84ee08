/// Shared application layer patterns
///
/// Application services reused by every entity module.
pub mod crud_service;
pub mod references;

pub use crud_service::CrudService;
