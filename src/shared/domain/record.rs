/// Building blocks shared by every entity collection
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// Weak reference to another entity: a copy of its business key.
/// The target may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An entity stored in its own collection, addressed by a natural business key.
pub trait Record:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Collection (table) name
    const COLLECTION: &'static str;
    /// Name of the business key field on the wire
    const KEY_FIELD: &'static str;
    /// Human-readable entity name used in messages
    const LABEL: &'static str;

    fn key(&self) -> &str;

    /// Secondary fields that must be unique across the collection, as
    /// `(field, value)` pairs.
    fn unique_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Validate the body before it is written
    fn validate(&self) -> AppResult<()> {
        Validator::validate_key(Self::KEY_FIELD, self.key())
    }

    fn not_found(key: &str) -> AppError {
        AppError::NotFound(format!(
            "{} with {} '{}' not found",
            Self::LABEL,
            Self::KEY_FIELD,
            key
        ))
    }

    fn duplicate(field: &str, value: &str) -> AppError {
        AppError::Conflict(format!(
            "{} with {} '{}' already exists",
            Self::LABEL,
            field,
            value
        ))
    }
}

/// A record as persisted, with server-generated timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    #[serde(flatten)]
    pub record: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Document<T> {
    pub fn new(record: T) -> Self {
        let now = Utc::now();
        Self {
            record,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_record(self) -> T {
        self.record
    }
}

impl<T: Record> Document<T> {
    pub fn key(&self) -> &str {
        self.record.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        nombre: Option<String>,
    }

    #[test]
    fn document_flattens_record_fields() {
        let doc = Document::new(Sample {
            id: "ISC01".to_string(),
            nombre: Some("Algoritmos".to_string()),
        });

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], json!("ISC01"));
        assert_eq!(value["nombre"], json!("Algoritmos"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("record").is_none());

        let back: Document<Sample> = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
