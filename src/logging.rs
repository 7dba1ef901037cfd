//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header::CONTENT_TYPE, request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{Error, FieldError};

/// Bodies longer than this many characters are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
/// The value of any `password` key in a JSON request body is redacted.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_bytes) = match read_request(request).await {
        Ok(request) => request,
        Err(error) => {
            tracing::debug!("Could not read request body: {error}");
            return Error::Validation(vec![FieldError::new("body", "Could not read request body")])
                .into_response();
        }
    };

    let body_text = String::from_utf8_lossy(&body_bytes);
    if is_json(&parts) {
        log_request(&parts, &redact_password(&body_text));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body_bytes) = match read_response(response).await {
        Ok(response) => response,
        Err(error) => return Error::ResponseBody(error.to_string()).into_response(),
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

fn is_json(parts: &request::Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"))
}

/// Replace the value of every `password` key in `body_text` with asterisks.
///
/// Text that is not a JSON object is returned unchanged.
fn redact_password(body_text: &str) -> String {
    let Ok(mut json) = serde_json::from_str::<Value>(body_text) else {
        return body_text.to_owned();
    };

    match json.as_object_mut() {
        Some(object) if object.contains_key("password") => {
            object.insert("password".to_owned(), Value::from(REDACTED));
            json.to_string()
        }
        _ => body_text.to_owned(),
    }
}

async fn read_request(request: Request) -> Result<(request::Parts, Bytes), axum::Error> {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok((parts, body_bytes))
}

async fn read_response(response: Response) -> Result<(response::Parts, Bytes), axum::Error> {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok((parts, body_bytes))
}

fn truncate(body: &str) -> Option<String> {
    if body.chars().count() > LOG_BODY_LENGTH_LIMIT {
        Some(body.chars().take(LOG_BODY_LENGTH_LIMIT).collect())
    } else {
        None
    }
}

fn log_request(parts: &request::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Received request: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {parts:#?}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    match truncate(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {parts:#?}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {parts:#?}\nbody: {body:?}"),
    }
}
