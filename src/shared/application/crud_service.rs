use crate::shared::domain::{Document, DocumentRepository, Record};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use std::sync::Arc;

/// Find/create/update/delete by business key for one collection
pub struct CrudService<T: Record> {
    repo: Arc<dyn DocumentRepository<T>>,
}

impl<T: Record> CrudService<T> {
    pub fn new(repo: Arc<dyn DocumentRepository<T>>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> AppResult<Vec<Document<T>>> {
        let documents = self.repo.find_all().await?;
        log_debug!("Listed {} {} record(s)", documents.len(), T::COLLECTION);
        Ok(documents)
    }

    pub async fn get(&self, key: &str) -> AppResult<Document<T>> {
        self.repo
            .find_by_key(key)
            .await?
            .ok_or_else(|| T::not_found(key))
    }

    pub async fn create(&self, record: T) -> AppResult<Document<T>> {
        record.validate()?;

        let created = self.repo.create(record).await?;
        log_info!("Created {} '{}'", T::LABEL, created.key());
        Ok(created)
    }

    /// Replace the record stored under `key`; the key itself is immutable
    pub async fn update(&self, key: &str, record: T) -> AppResult<Document<T>> {
        Validator::validate_key(T::KEY_FIELD, key)?;
        if record.key() != key {
            return Err(AppError::ValidationError(format!(
                "{} in body ('{}') does not match {} in path ('{}')",
                T::KEY_FIELD,
                record.key(),
                T::KEY_FIELD,
                key
            )));
        }
        record.validate()?;

        let updated = self.repo.update(key, record).await?;
        log_info!("Updated {} '{}'", T::LABEL, key);
        Ok(updated)
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.repo.delete(key).await?;
        log_info!("Deleted {} '{}'", T::LABEL, key);
        Ok(())
    }
}
