/// Shared infrastructure concerns
///
/// Storage backends and side-channel sinks used by every module.
pub mod database;
pub mod memory_repository;
pub mod pg_repository;
pub mod request_log;

// Re-exports for convenience
pub use database::Database;
pub use memory_repository::MemoryRepository;
pub use pg_repository::PgDocumentRepository;
pub use request_log::{
    LogRequestLogSink, MemoryRequestLogSink, PgRequestLogSink, RequestLogEntry, RequestLogSink,
};
