//! A small user directory served over a JSON REST API.
//!
//! Users register with their name, email, password and date of birth, log in
//! to receive a signed token, and can be listed or fetched by ID. Users are
//! held in memory behind the [UserStore] trait, so all data is lost when the
//! process exits.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod endpoints;
mod log_in;
mod logging;
mod not_found;
mod password;
mod register_user;
mod response;
mod routing;
mod stores;
mod user;
mod users;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{Claims, DEFAULT_TOKEN_DURATION, TokenKeys};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordError, PasswordHash, ValidatedPassword};
pub use response::{ApiResponse, ErrorCode, Status};
pub use routing::build_router;
pub use stores::{InMemoryUserStore, UserError, UserStore};
pub use user::{NewUser, User, UserID, UserView};
pub use validation::FieldError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields in the request failed validation.
    ///
    /// Every violated field is listed, not just the first one.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The email used to register is already in use.
    #[error("the email is already registered")]
    EmailExists,

    /// No registered user has the email used to log in.
    #[error("no user is registered with the given email")]
    EmailNotFound,

    /// The password used to log in does not match the stored hash.
    #[error("incorrect password")]
    IncorrectPassword,

    /// The bearer token is missing, malformed, signed with another key or has
    /// expired.
    #[error("the token is missing, invalid or expired")]
    InvalidToken,

    /// The user ID in the request path does not start with an integer.
    #[error("\"{0}\" is not a valid user ID")]
    InvalidUserId(String),

    /// No user has the requested ID.
    #[error("the user could not be found")]
    UserNotFound,

    /// The requested route does not exist.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The log-in token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// Could not acquire the user store lock
    #[error("could not acquire the user store lock")]
    StoreLockError,

    /// A response body could not be buffered for logging.
    #[error("could not read response body: {0}")]
    ResponseBody(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(ErrorCode::ValidationError, "Validation error")
                    .with_errors(errors),
            ),
            Error::InvalidUserId(_) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(ErrorCode::ValidationError, "Validation error").with_errors(
                    vec![FieldError::new("userId", "User ID must be an integer")],
                ),
            ),
            Error::EmailExists => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(ErrorCode::EmailExists, "Email is already registered"),
            ),
            Error::EmailNotFound => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure(ErrorCode::Unauthorized, "Email not found"),
            ),
            Error::IncorrectPassword => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure(ErrorCode::Unauthorized, "Incorrect password"),
            ),
            Error::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure(ErrorCode::Unauthorized, "Invalid or expired token"),
            ),
            Error::UserNotFound => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure(ErrorCode::NotFound, "User not found"),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure(ErrorCode::NotFound, "Not found"),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(ErrorCode::InternalError, "Internal server error"),
                )
            }
        };

        response::render(status, body)
    }
}
