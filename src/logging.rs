//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// The number of bytes of a request or response body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated and the full body is
/// logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::warn!("could not read request body: {error}");
            return Error::validation("could not read request body").into_response();
        }
    };
    log_request(&parts, &String::from_utf8_lossy(&body));

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let body: Bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return Error::UnexpectedFailure.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, Body::from(body))
}

fn log_request(parts: &request::Parts, body: &str) {
    let (method, uri) = (&parts.method, &parts.uri);

    match truncate(body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!(%method, %uri, "Received request, body: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!(%method, %uri, "Received request, body: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    let status = parts.status;

    match truncate(body, LOG_BODY_LENGTH_LIMIT) {
        Some(truncated) => {
            tracing::info!(%status, "Sending response, body: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!(%status, "Sending response, body: {body:?}"),
    }
}

/// Cut `text` down to at most `limit` bytes without splitting a character.
///
/// Returns `None` if `text` already fits.
fn truncate(text: &str, limit: usize) -> Option<&str> {
    if text.len() <= limit {
        return None;
    }

    let end = (0..=limit)
        .rev()
        .find(|&index| text.is_char_boundary(index))
        .unwrap_or(0);

    Some(&text[..end])
}
