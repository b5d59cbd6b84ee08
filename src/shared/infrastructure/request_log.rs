/// Side-log of request/response pairs
///
/// Entries are handed over after the response has been produced; sinks run
/// on their own task and their failures are only logged.
use crate::schema::api_logs;
use crate::shared::errors::AppResult;
use crate::shared::infrastructure::database::Database;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex};
use tokio::task;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLogEntry {
    pub method: String,
    pub endpoint: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    pub request_data: Option<JsonValue>,
    pub response_data: Option<JsonValue>,
}

#[async_trait]
pub trait RequestLogSink: Send + Sync {
    async fn record(&self, entry: RequestLogEntry) -> AppResult<()>;
}

/// Writes entries to the application log
pub struct LogRequestLogSink;

#[async_trait]
impl RequestLogSink for LogRequestLogSink {
    async fn record(&self, entry: RequestLogEntry) -> AppResult<()> {
        let line = serde_json::to_string(&entry)?;
        log::info!(target: "tecapp::api_logs", "{}", line);
        Ok(())
    }
}

/// Keeps entries in memory; used by tests
#[derive(Default)]
pub struct MemoryRequestLogSink {
    entries: Mutex<Vec<RequestLogEntry>>,
}

impl MemoryRequestLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RequestLogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RequestLogSink for MemoryRequestLogSink {
    async fn record(&self, entry: RequestLogEntry) -> AppResult<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
        Ok(())
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = api_logs)]
struct NewApiLog {
    id: Uuid,
    method: String,
    endpoint: String,
    status: i16,
    request_data: Option<JsonValue>,
    response_data: Option<JsonValue>,
    logged_at: DateTime<Utc>,
}

/// Appends entries to the `api_logs` table
pub struct PgRequestLogSink {
    db: Arc<Database>,
}

impl PgRequestLogSink {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RequestLogSink for PgRequestLogSink {
    async fn record(&self, entry: RequestLogEntry) -> AppResult<()> {
        let db = Arc::clone(&self.db);
        let row = NewApiLog {
            id: Uuid::new_v4(),
            method: entry.method,
            endpoint: entry.endpoint,
            status: entry.status as i16,
            request_data: entry.request_data,
            response_data: entry.response_data,
            logged_at: entry.timestamp,
        };

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            diesel::insert_into(api_logs::table)
                .values(&row)
                .execute(&mut conn)?;
            Ok(())
        })
        .await??;

        Ok(())
    }
}
