/// In-process document store
///
/// Backs the `memory` store backend and the test suites. Applies the same
/// unique-key and filter semantics as the PostgreSQL store.
use crate::shared::domain::{Document, DocumentFilter, DocumentRepository, Record};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

pub struct MemoryRepository<T: Record> {
    // Sequence number keeps insertion order for listings
    documents: DashMap<String, (u64, Document<T>)>,
    sequence: AtomicU64,
    // Held across unique check and insert so secondary keys cannot race
    writes: Mutex<()>,
}

impl<T: Record> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            sequence: AtomicU64::new(0),
            writes: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn ordered(&self, mut entries: Vec<(u64, Document<T>)>) -> Vec<Document<T>> {
        entries.sort_by_key(|(seq, _)| *seq);
        entries.into_iter().map(|(_, doc)| doc).collect()
    }

    /// Secondary unique fields must not collide with any other record.
    /// Callers hold `writes`, never a map guard.
    fn check_unique(&self, record: &T, except_key: Option<&str>) -> AppResult<()> {
        for (field, value) in record.unique_fields() {
            let taken = self.documents.iter().any(|entry| {
                let (_, doc) = entry.value();
                Some(entry.key().as_str()) != except_key
                    && doc
                        .record
                        .unique_fields()
                        .iter()
                        .any(|(f, v)| *f == field && *v == value)
            });
            if taken {
                return Err(T::duplicate(field, &value));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Record> DocumentRepository<T> for MemoryRepository<T> {
    async fn find_all(&self) -> AppResult<Vec<Document<T>>> {
        let entries = self
            .documents
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Ok(self.ordered(entries))
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Document<T>>> {
        Ok(self.documents.get(key).map(|entry| entry.value().1.clone()))
    }

    async fn find_matching(&self, filter: &DocumentFilter) -> AppResult<Vec<Document<T>>> {
        let mut matched = Vec::new();
        for entry in self.documents.iter() {
            let (seq, doc) = entry.value();
            let value = serde_json::to_value(&doc.record)?;
            if filter.matches(&value) {
                matched.push((*seq, doc.clone()));
            }
        }
        Ok(self.ordered(matched))
    }

    async fn create(&self, record: T) -> AppResult<Document<T>> {
        let _writes = self.writes.lock().await;
        self.check_unique(&record, None)?;

        let key = record.key().to_string();
        match self.documents.entry(key) {
            Entry::Occupied(slot) => Err(T::duplicate(T::KEY_FIELD, slot.key())),
            Entry::Vacant(slot) => {
                let document = Document::new(record);
                let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
                slot.insert((seq, document.clone()));
                Ok(document)
            }
        }
    }

    async fn update(&self, key: &str, record: T) -> AppResult<Document<T>> {
        if record.key() != key {
            return Err(AppError::ValidationError(format!(
                "{} cannot be changed",
                T::KEY_FIELD
            )));
        }
        let _writes = self.writes.lock().await;
        self.check_unique(&record, Some(key))?;

        match self.documents.get_mut(key) {
            Some(mut entry) => {
                let (_, document) = entry.value_mut();
                document.record = record;
                document.updated_at = Utc::now();
                Ok(document.clone())
            }
            None => Err(T::not_found(key)),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.documents
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| T::not_found(key))
    }
}
