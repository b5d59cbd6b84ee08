/// PostgreSQL-backed document store
///
/// Every collection is a table of `(key, document, created_at, updated_at)`
/// rows where `document` holds the entity as JSONB. Table names come from
/// `Record::COLLECTION` and are never taken from request input.
use crate::shared::domain::{Document, DocumentFilter, DocumentRepository, Record};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::utils::logger::LogContext;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Jsonb, Text, Timestamptz};
use serde_json::Value as JsonValue;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::task;

#[derive(QueryableByName, Debug)]
struct DocumentRow {
    #[diesel(sql_type = Text)]
    key: String,
    #[diesel(sql_type = Jsonb)]
    document: JsonValue,
    #[diesel(sql_type = Timestamptz)]
    created_at: DateTime<Utc>,
    #[diesel(sql_type = Timestamptz)]
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_document<T: Record>(self) -> AppResult<Document<T>> {
        let record: T = serde_json::from_value(self.document).map_err(|e| {
            AppError::SerializationError(format!(
                "Stored {} '{}' is not readable: {}",
                T::LABEL,
                self.key,
                e
            ))
        })?;
        Ok(Document {
            record,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub struct PgDocumentRepository<T: Record> {
    db: Arc<Database>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> PgDocumentRepository<T> {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    fn select_sql(where_clause: &str) -> String {
        format!(
            "SELECT key, document, created_at, updated_at FROM {} {} ORDER BY created_at ASC, key ASC",
            T::COLLECTION,
            where_clause
        )
    }

    fn map_write_error(err: diesel::result::Error, record: &T) -> AppError {
        match err {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => {
                // Primary key violations name the pkey constraint; anything
                // else is a secondary unique index.
                let field = match info.constraint_name() {
                    Some(name) if name.ends_with("_pkey") => T::KEY_FIELD.to_string(),
                    Some(name) => name
                        .strip_prefix(&format!("{}_", T::COLLECTION))
                        .and_then(|rest| rest.strip_suffix("_unique"))
                        .unwrap_or(name)
                        .to_string(),
                    None => T::KEY_FIELD.to_string(),
                };
                let value = record
                    .unique_fields()
                    .into_iter()
                    .find(|(f, _)| *f == field)
                    .map(|(_, v)| v)
                    .unwrap_or_else(|| record.key().to_string());
                T::duplicate(&field, &value)
            }
            other => AppError::from(other),
        }
    }
}

#[async_trait]
impl<T: Record> DocumentRepository<T> for PgDocumentRepository<T> {
    async fn find_all(&self) -> AppResult<Vec<Document<T>>> {
        let db = Arc::clone(&self.db);
        let start = std::time::Instant::now();

        let rows = task::spawn_blocking(move || -> AppResult<Vec<DocumentRow>> {
            let mut conn = db.get_connection()?;
            let rows = diesel::sql_query(Self::select_sql("")).load::<DocumentRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;

        LogContext::db_operation(
            "find_all",
            T::COLLECTION,
            Some(start.elapsed().as_millis() as u64),
        );
        rows.into_iter()
            .map(|row| row.into_document::<T>())
            .collect()
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<Document<T>>> {
        let db = Arc::clone(&self.db);
        let key = key.to_string();

        let row = task::spawn_blocking(move || -> AppResult<Option<DocumentRow>> {
            let mut conn = db.get_connection()?;
            let row = diesel::sql_query(Self::select_sql("WHERE key = $1"))
                .bind::<Text, _>(key)
                .get_result::<DocumentRow>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        row.map(|row| row.into_document::<T>()).transpose()
    }

    async fn find_matching(&self, filter: &DocumentFilter) -> AppResult<Vec<Document<T>>> {
        let db = Arc::clone(&self.db);
        let fragment = filter.as_json().clone();
        let start = std::time::Instant::now();

        let rows = task::spawn_blocking(move || -> AppResult<Vec<DocumentRow>> {
            let mut conn = db.get_connection()?;
            let rows = diesel::sql_query(Self::select_sql("WHERE document @> $1"))
                .bind::<Jsonb, _>(fragment)
                .load::<DocumentRow>(&mut conn)?;
            Ok(rows)
        })
        .await??;

        LogContext::db_operation(
            "find_matching",
            T::COLLECTION,
            Some(start.elapsed().as_millis() as u64),
        );
        rows.into_iter()
            .map(|row| row.into_document::<T>())
            .collect()
    }

    async fn create(&self, record: T) -> AppResult<Document<T>> {
        let db = Arc::clone(&self.db);
        let document = serde_json::to_value(&record)?;
        let key = record.key().to_string();

        let result = task::spawn_blocking(
            move || -> AppResult<Result<DocumentRow, diesel::result::Error>> {
                let mut conn = db.get_connection()?;
                Ok(diesel::sql_query(format!(
                    "INSERT INTO {} (key, document) VALUES ($1, $2) \
                     RETURNING key, document, created_at, updated_at",
                    T::COLLECTION
                ))
                .bind::<Text, _>(key)
                .bind::<Jsonb, _>(document)
                .get_result::<DocumentRow>(&mut conn))
            },
        )
        .await??;

        match result {
            Ok(row) => row.into_document::<T>(),
            Err(e) => Err(Self::map_write_error(e, &record)),
        }
    }

    async fn update(&self, key: &str, record: T) -> AppResult<Document<T>> {
        if record.key() != key {
            return Err(AppError::ValidationError(format!(
                "{} cannot be changed",
                T::KEY_FIELD
            )));
        }

        let db = Arc::clone(&self.db);
        let document = serde_json::to_value(&record)?;
        let key_owned = key.to_string();

        let result = task::spawn_blocking(
            move || -> AppResult<Result<Option<DocumentRow>, diesel::result::Error>> {
                let mut conn = db.get_connection()?;
                Ok(diesel::sql_query(format!(
                    "UPDATE {} SET document = $2, updated_at = NOW() WHERE key = $1 \
                     RETURNING key, document, created_at, updated_at",
                    T::COLLECTION
                ))
                .bind::<Text, _>(key_owned)
                .bind::<Jsonb, _>(document)
                .get_result::<DocumentRow>(&mut conn)
                .optional())
            },
        )
        .await??;

        match result {
            Ok(Some(row)) => row.into_document::<T>(),
            Ok(None) => Err(T::not_found(key)),
            Err(e) => Err(Self::map_write_error(e, &record)),
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let key_owned = key.to_string();

        let deleted = task::spawn_blocking(move || -> AppResult<usize> {
            let mut conn = db.get_connection()?;
            let deleted = diesel::sql_query(format!(
                "DELETE FROM {} WHERE key = $1",
                T::COLLECTION
            ))
            .bind::<Text, _>(key_owned)
            .execute(&mut conn)?;
            Ok(deleted)
        })
        .await??;

        if deleted == 0 {
            return Err(T::not_found(key));
        }
        Ok(())
    }
}
