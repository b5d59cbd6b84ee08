/// Resolution of embedded `{id}` references
///
/// A reference whose target does not exist resolves to `None` and is logged;
/// storage failures still propagate.
use crate::shared::domain::{Document, DocumentRepository, EntityRef, Record};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::LogContext;

pub async fn resolve<T: Record>(
    repo: &dyn DocumentRepository<T>,
    key: &str,
    referenced_from: &str,
) -> AppResult<Option<Document<T>>> {
    let found = repo.find_by_key(key).await?;
    if found.is_none() {
        LogContext::dangling_reference(T::COLLECTION, key, referenced_from);
    }
    Ok(found)
}

/// Resolve an optional reference; an absent reference resolves to `None`
pub async fn resolve_optional<T: Record>(
    repo: &dyn DocumentRepository<T>,
    reference: Option<&EntityRef>,
    referenced_from: &str,
) -> AppResult<Option<Document<T>>> {
    match reference {
        Some(reference) => resolve(repo, &reference.id, referenced_from).await,
        None => Ok(None),
    }
}

/// Resolve a list of references in order, dropping the dangling ones
pub async fn resolve_all<T: Record>(
    repo: &dyn DocumentRepository<T>,
    references: &[EntityRef],
    referenced_from: &str,
) -> AppResult<Vec<Document<T>>> {
    let mut resolved = Vec::with_capacity(references.len());
    for reference in references {
        if let Some(document) = resolve(repo, &reference.id, referenced_from).await? {
            resolved.push(document);
        }
    }
    Ok(resolved)
}
