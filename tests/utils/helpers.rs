/// Test server harness
///
/// Starts the full router on an ephemeral port with the in-memory store and
/// an in-memory request log, and talks to it over HTTP.
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tecapp::server::{self, build_router, AppState, Stores};
use tecapp::shared::config::StoreBackend;
use tecapp::shared::infrastructure::{MemoryRequestLogSink, RequestLogEntry, RequestLogSink};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub request_log: Arc<MemoryRequestLogSink>,
    shutdown: CancellationToken,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = AppState::new(Stores::memory(), StoreBackend::Memory);
        let request_log = Arc::new(MemoryRequestLogSink::new());
        let sink: Arc<dyn RequestLogSink> = request_log.clone();
        let router = build_router(state, Some(sink));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        tokio::spawn(async move {
            server::serve(listener, router, token)
                .await
                .expect("serve app")
        });

        Self {
            base_url: format!("http://{}", addr),
            client: reqwest::Client::new(),
            request_log,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request");
        read(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request");
        read(response).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> (u16, Value) {
        let response = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("POST request");
        read(response).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT request");
        read(response).await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request");
        read(response).await
    }

    /// Create a record and assert it was accepted
    pub async fn seed(&self, collection: &str, body: Value) -> Value {
        let (status, created) = self.post(&format!("/{}", collection), &body).await;
        assert_eq!(status, 201, "seeding {}: {}", collection, created);
        created
    }

    /// Wait for the request log to hold at least `count` entries
    pub async fn logged_entries(&self, count: usize) -> Vec<RequestLogEntry> {
        for _ in 0..50 {
            let entries = self.request_log.entries();
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.request_log.entries()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn read(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

/// Strip server-generated timestamps for field-for-field comparison
pub fn without_timestamps(mut value: Value) -> Value {
    if let Some(object) = value.as_object_mut() {
        object.remove("createdAt");
        object.remove("updatedAt");
    }
    value
}
