//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level with the
/// value of the `Authorization` header redacted.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Request bodies are buffered up to axum's default body limit, larger bodies
/// are rejected with 413 Payload Too Large. The handlers receive the body
/// bytes unchanged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match Bytes::from_request(Request::new(body), &()).await {
        Ok(bytes) => bytes,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("Rejected request body over the size limit: {rejection}");
            return Error::PayloadTooLarge.into_response();
        }
        Err(rejection) => {
            tracing::warn!("Could not read request body: {rejection}");
            return Error::InvalidRequest("could not read request body".to_owned())
                .into_response();
        }
    };

    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return Response::from_parts(parts, Body::empty());
        }
    };

    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn redact_authorization(headers: &HeaderMap) -> HeaderMap {
    let mut headers = headers.clone();

    if headers.contains_key(AUTHORIZATION) {
        headers.insert(AUTHORIZATION, HeaderValue::from_static("********"));
    }

    headers
}

/// The number of characters of a request or response body logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(LOG_BODY_LENGTH_LIMIT) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    let headers = redact_authorization(&parts.headers);
    let truncated = truncate(body);

    if truncated.len() < body.len() {
        tracing::info!(
            "Received request: {} {} {headers:#?}\nbody: {truncated}...",
            parts.method,
            parts.uri
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {} {headers:#?}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    let truncated = truncate(body);

    if truncated.len() < body.len() {
        tracing::info!(
            "Sending response: {} {:#?}\nbody: {truncated}...",
            parts.status,
            parts.headers
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!(
            "Sending response: {} {:#?}\nbody: {body:?}",
            parts.status,
            parts.headers
        );
    }
}
