pub mod filter;
pub mod record;
pub mod repository;

pub use filter::DocumentFilter;
pub use record::{Document, EntityRef, Record};
pub use repository::DocumentRepository;
