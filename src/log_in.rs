//! The endpoint for logging in a user with their email and password.
//! The auth module handles the lower level token logic.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, ApiResponse, Claims, Error, UserError, ValidatedPassword,
    auth::encode_token,
    password::verify_password,
    response::render,
    validation::{FieldErrors, reject_body, validate_email},
};

/// The request body for logging in.
#[derive(Debug, Default, Deserialize)]
pub struct LogInForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The data returned by a successful log-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogInResponse {
    /// A signed token to send as `Authorization: Bearer <token>`.
    pub token: String,
}

impl LogInForm {
    fn validate(self) -> Result<(EmailAddress, ValidatedPassword), Error> {
        let mut errors = FieldErrors::default();

        let email = errors.check("email", validate_email(self.email.as_deref()));
        let password = errors.check(
            "password",
            ValidatedPassword::new(self.password.as_deref().unwrap_or_default()),
        );

        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors.into_error()),
        }
    }
}

/// Handler for log-in requests.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The body is not valid JSON, or the email or password fail validation.
/// - The email does not belong to a registered user.
/// - The password is not correct, or could not be checked.
/// - The token could not be signed.
pub async fn post_log_in(
    State(state): State<AppState>,
    payload: Result<Json<LogInForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = payload.map_err(reject_body)?;
    let (email, password) = form.validate()?;

    let user = match state.user_store.get_by_email(email.as_str()) {
        Ok(user) => user,
        Err(UserError::NotFound) => {
            tracing::debug!("Log-in attempt for unregistered email");
            return Err(Error::EmailNotFound);
        }
        Err(error) => return Err(error.into()),
    };

    let is_password_valid =
        match verify_password(user.password_hash.clone(), password.as_str().to_owned()).await {
            Ok(is_password_valid) => is_password_valid,
            Err(error) => {
                tracing::error!("Unhandled error while verifying credentials: {error}");
                false
            }
        };

    if !is_password_valid {
        tracing::debug!("Incorrect password for user {}", user.id);
        return Err(Error::IncorrectPassword);
    }

    let claims = Claims::new(&user, OffsetDateTime::now_utc(), state.token_duration);
    let token = encode_token(&claims, &state.token_keys)?;

    tracing::info!("User {} logged in", user.id);

    Ok(render(
        StatusCode::OK,
        ApiResponse::success("Logged in successfully", LogInResponse { token }),
    ))
}

#[cfg(test)]
mod log_in_tests {
    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, PasswordHash, UserID, endpoints,
        auth::decode_token,
        log_in::post_log_in,
        test_utils::{insert_test_user, test_app_state, test_new_user},
    };

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::LOG_IN, post(post_log_in))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let state = test_app_state();
        let user = insert_test_user(&state, "Ada", "ada@x.com", "Secr3t!99");
        let server = get_test_server(state.clone());

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "ada@x.com",
                "password": "Secr3t!99",
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "success");
        let token = body["data"]["token"]
            .as_str()
            .expect("token should be a string");
        let claims = decode_token(token, &state.token_keys).unwrap();
        assert_eq!(claims.user_id(), Ok(user.id));
        assert_eq!(claims.email, "ada@x.com");
        assert_eq!(claims.exp - claims.iat, state.token_duration.whole_seconds());
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let state = test_app_state();
        insert_test_user(&state, "Ada", "ada@x.com", "Secr3t!99");
        let server = get_test_server(state);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "ada@x.com",
                "password": "Wr0ng!pass",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Incorrect password");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let server = get_test_server(test_app_state());

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "wrongemail@gmail.com",
                "password": "definitely!NotTheCorrectPassword",
            }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], "Email not found");
    }

    #[tokio::test]
    async fn log_in_fails_when_stored_hash_is_corrupt() {
        let state = test_app_state();
        state
            .user_store
            .create(test_new_user(
                "Ada",
                "ada@x.com",
                PasswordHash::new_unchecked("corrupt"),
            ))
            .unwrap();
        let server = get_test_server(state);

        server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "ada@x.com",
                "password": "Secr3t!99",
            }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_in_validates_fields() {
        let server = get_test_server(test_app_state());

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": "not-an-email",
                "password": "short",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["errors"],
            json!([
                {"field": "email", "message": "Email is not valid"},
                {"field": "password", "message": "Password must be at least 8 characters"},
            ])
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let server = get_test_server(test_app_state());

        server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn store_is_unchanged_by_log_in() {
        let state = test_app_state();
        insert_test_user(&state, "Ada", "ada@x.com", "Secr3t!99");
        let server = get_test_server(state.clone());

        server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "ada@x.com", "password": "Secr3t!99"}))
            .await
            .assert_status_ok();

        assert_eq!(state.user_store.count(), Ok(1));
        assert!(state.user_store.get(UserID::new(1)).is_ok());
    }
}
