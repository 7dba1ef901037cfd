//! The JSON response for routes that do not exist.

use axum::response::{IntoResponse, Response};

use crate::Error;

/// Fallback handler that responds with a 404 `NOT_FOUND` envelope.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
