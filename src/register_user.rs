//! The endpoint for registering a new user.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use email_address::EmailAddress;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, ApiResponse, Error, NewUser, UserError, UserView, ValidatedPassword,
    password::hash_password,
    response::render,
    validation::{FieldErrors, reject_body, validate_dob, validate_email, validate_full_name},
};

/// The request body for registering a user.
///
/// Every field is optional so that missing fields are reported as validation
/// errors rather than as a malformed body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub bio: Option<String>,
    pub dob: Option<String>,
}

/// A registration request that passed validation.
struct Registration {
    full_name: String,
    email: EmailAddress,
    password: ValidatedPassword,
    bio: Option<String>,
    dob: Date,
}

impl RegisterForm {
    fn validate(self) -> Result<Registration, Error> {
        let mut errors = FieldErrors::default();

        let full_name = errors.check("fullName", validate_full_name(self.full_name.as_deref()));
        let email = errors.check("email", validate_email(self.email.as_deref()));
        let password = errors.check(
            "password",
            ValidatedPassword::new(self.password.as_deref().unwrap_or_default()),
        );
        let dob = errors.check("dob", validate_dob(self.dob.as_deref()));

        match (full_name, email, password, dob) {
            (Some(full_name), Some(email), Some(password), Some(dob)) => Ok(Registration {
                full_name,
                email,
                password,
                bio: self.bio,
                dob,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

/// Register a new user and respond with their public details.
///
/// # Errors
///
/// This function will return an error if:
/// - the body is not valid JSON or any field fails validation,
/// - the email is already registered,
/// - the password could not be hashed.
pub async fn register_user(
    State(state): State<AppState>,
    payload: Result<Json<RegisterForm>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(form) = payload.map_err(reject_body)?;
    let registration = form.validate()?;

    // Fail fast before paying for the hash; `create` checks again under the lock.
    match state.user_store.get_by_email(registration.email.as_str()) {
        Ok(_) => return Err(Error::EmailExists),
        Err(UserError::NotFound) => {}
        Err(error) => return Err(error.into()),
    }

    let password_hash = hash_password(registration.password, state.hash_cost)
        .await
        .inspect_err(|error| {
            tracing::error!("an error occurred while hashing a password: {error}")
        })?;

    let user = state.user_store.create(NewUser {
        full_name: registration.full_name,
        email: registration.email,
        password_hash,
        bio: registration.bio,
        dob: registration.dob,
    })?;

    tracing::info!("Registered user {}", user.id);

    Ok(render(
        StatusCode::CREATED,
        ApiResponse::success("Registered successfully", UserView::from(&user)),
    ))
}
