// Shared Kernel
// Everything the entity modules have in common

pub mod application; // Generic CRUD service, reference resolution
pub mod config; // Runtime configuration
pub mod domain; // Record trait, documents, filters, repository contract
pub mod errors; // Shared error types
pub mod http; // Generic handlers and request logging
pub mod infrastructure; // Storage backends and log sinks
pub mod utils; // Logging and validation

// Re-exports for convenience
pub use infrastructure::database::Database;
