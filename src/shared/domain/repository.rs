/// Repository contract shared by every entity collection
///
/// Implemented once per storage backend and parameterized by the entity
/// type, so each collection gets the same find/create/update/delete
/// behaviour keyed on its business key.
use crate::shared::domain::{Document, DocumentFilter, Record};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait DocumentRepository<T: Record>: Send + Sync {
    /// All records, in storage order
    async fn find_all(&self) -> AppResult<Vec<Document<T>>>;

    /// Record with the given business key, if any
    async fn find_by_key(&self, key: &str) -> AppResult<Option<Document<T>>>;

    /// Records containing the filter fragment, in storage order
    async fn find_matching(&self, filter: &DocumentFilter) -> AppResult<Vec<Document<T>>>;

    /// Persist a new record. Fails with `Conflict` when the business key or a
    /// secondary unique field is already taken.
    async fn create(&self, record: T) -> AppResult<Document<T>>;

    /// Replace the record stored under `key`. Fails with `NotFound` when no
    /// record has that key.
    async fn update(&self, key: &str, record: T) -> AppResult<Document<T>>;

    /// Remove the record stored under `key`. Fails with `NotFound` when no
    /// record has that key.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
