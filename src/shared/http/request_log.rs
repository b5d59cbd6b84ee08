/// Request side-log middleware
///
/// Captures method, endpoint, status and both JSON bodies, then hands the
/// entry to the configured sink on a spawned task after the response is
/// ready.
use crate::log_warn;
use crate::shared::errors::AppError;
use crate::shared::http::body::body_as_json;
use crate::shared::infrastructure::{RequestLogEntry, RequestLogSink};
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use std::sync::Arc;

/// Largest request body buffered for logging
pub const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

pub async fn log_requests(
    State(sink): State<Arc<dyn RequestLogSink>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let endpoint = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let (parts, body) = request.into_parts();
    let request_bytes = match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return AppError::ValidationError("Request body too large".to_string())
                .into_response()
        }
    };
    let request_data = body_as_json(&request_bytes);
    let request = Request::from_parts(parts, Body::from(request_bytes));

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let (parts, body) = response.into_parts();
    let response_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::InternalError(format!("Failed to buffer response: {}", e))
                .into_response()
        }
    };
    let response_data = body_as_json(&response_bytes);
    let response = Response::from_parts(parts, Body::from(response_bytes));

    let entry = RequestLogEntry {
        method,
        endpoint,
        status,
        timestamp: Utc::now(),
        request_data,
        response_data,
    };
    tokio::spawn(async move {
        if let Err(e) = sink.record(entry).await {
            log_warn!("Failed to record request log entry: {}", e);
        }
    });

    response
}
