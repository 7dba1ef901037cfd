//! Field level validation for request bodies.
//!
//! Each rule returns the parsed value or the reason it was rejected.
//! [FieldErrors] collects the rejections for every field so that clients see
//! all problems with a request at once.

use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::Date;

use crate::{Error, user::date_format::DATE_FORMAT};

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The name of the field as it appears in the request.
    pub field: String,
    /// Why the field was rejected.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// The reasons a non-password field can be rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldRuleError {
    /// The full name was missing or empty.
    #[error("Full name is required")]
    FullNameRequired,

    /// The email was missing or empty.
    #[error("Email is required")]
    EmailRequired,

    /// The email is not a syntactically valid address.
    #[error("Email is not valid")]
    EmailInvalid,

    /// The date of birth was missing or empty.
    #[error("Date of birth is required")]
    DobRequired,

    /// The date of birth is not a calendar date in the form YYYY-MM-DD.
    #[error("Invalid date of birth format. Use the format YYYY-MM-DD.")]
    DobInvalid,
}

/// Collects the errors for every field in a request.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record the error in `result`, if any, against `field`.
    pub(crate) fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(FieldError::new(field, &error.to_string()));
                None
            }
        }
    }

    /// Turn the collected field errors into an [Error::Validation].
    pub(crate) fn into_error(self) -> Error {
        Error::Validation(self.0)
    }
}

pub(crate) fn validate_full_name(raw: Option<&str>) -> Result<String, FieldRuleError> {
    match raw {
        Some(full_name) if !full_name.is_empty() => Ok(full_name.to_owned()),
        _ => Err(FieldRuleError::FullNameRequired),
    }
}

/// Bare addresses with a dotted domain only, e.g. "ada@x.com".
///
/// Display names and domain literals are rejected so that the stored string is
/// always the mailbox itself.
const EMAIL_OPTIONS: Options = Options {
    minimum_sub_domains: 2,
    allow_domain_literal: false,
    allow_display_text: false,
};

pub(crate) fn validate_email(raw: Option<&str>) -> Result<EmailAddress, FieldRuleError> {
    match raw {
        None | Some("") => Err(FieldRuleError::EmailRequired),
        Some(email) => EmailAddress::parse_with_options(email, EMAIL_OPTIONS)
            .map_err(|_| FieldRuleError::EmailInvalid),
    }
}

pub(crate) fn validate_dob(raw: Option<&str>) -> Result<Date, FieldRuleError> {
    match raw {
        None | Some("") => Err(FieldRuleError::DobRequired),
        Some(dob) => Date::parse(dob, DATE_FORMAT).map_err(|_| FieldRuleError::DobInvalid),
    }
}

/// Report a body that could not be parsed as JSON as a validation error on the
/// field `body`.
pub(crate) fn reject_body(rejection: JsonRejection) -> Error {
    tracing::debug!("Rejected request body: {rejection}");
    Error::Validation(vec![FieldError::new("body", &rejection.body_text())])
}
