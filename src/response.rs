//! The JSON envelope shared by every response of the API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::FieldError;

/// Whether a request succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request succeeded and `data` holds the result.
    Success,
    /// The request failed and `code` describes why.
    Failed,
}

/// A machine readable reason for a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// One or more request fields were invalid, see `errors`.
    ValidationError,
    /// The email is already used by another user.
    EmailExists,
    /// The credentials or token were not accepted.
    Unauthorized,
    /// The requested user or route does not exist.
    NotFound,
    /// Something went wrong on the server.
    InternalError,
}

/// The response body for all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub status: Status,
    /// Why the request failed, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    /// A human readable summary.
    pub message: String,
    /// The result of a successful request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The fields that failed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: Status::Success,
            code: None,
            message: message.to_owned(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<()> {
    /// A failed response without data.
    pub fn failure(code: ErrorCode, message: &str) -> Self {
        Self {
            status: Status::Failed,
            code: Some(code),
            message: message.to_owned(),
            data: None,
            errors: None,
        }
    }

    /// Attach the fields that failed validation.
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Serialize `body` as JSON with the given status code.
pub(crate) fn render<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response {
    (status, Json(body)).into_response()
}
