//! This file defines types that handle password validation and hashing.
//! `ValidatedPassword` wraps a string and ensures it follows the password rules.
//! `PasswordHash` converts a `ValidatedPassword` into a salted and hashed password.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Error;

/// The minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The reasons a password can be rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    /// The password was missing or empty.
    #[error("Password is required")]
    Empty,

    /// The password has fewer than [MIN_PASSWORD_LENGTH] characters.
    #[error("Password must be at least {min} characters", min = MIN_PASSWORD_LENGTH)]
    TooShort,

    /// The password has no symbol, i.e. only letters, digits and underscores.
    #[error("Password must contain at least 1 symbol")]
    MissingSymbol,
}

/// A password that has been validated, but not yet hashed.
///
/// This struct can be used to construct a [PasswordHash].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create and validate a new password from a string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password is empty, shorter than
    /// [MIN_PASSWORD_LENGTH] characters or does not contain a symbol.
    pub fn new(raw_password_string: &str) -> Result<Self, PasswordError> {
        if raw_password_string.is_empty() {
            return Err(PasswordError::Empty);
        }

        if raw_password_string.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }

        if !raw_password_string.chars().any(is_symbol) {
            return Err(PasswordError::MissingSymbol);
        }

        Ok(Self(raw_password_string.to_string()))
    }

    /// Create a new `ValidatedPassword` without any validation.
    ///
    /// The caller should ensure that `raw_password_string` is a valid password.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid password is provided it may cause incorrect behaviour but will not affect memory safety.
    pub fn new_unchecked(raw_password_string: &str) -> Self {
        Self(raw_password_string.to_string())
    }

    /// The password as entered by the user.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Anything outside `[A-Za-z0-9_]` counts as a symbol.
fn is_symbol(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The default bcrypt cost for hashing passwords.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a hashed password from a validated password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// Pass in [PasswordHash::DEFAULT_COST] to use the default cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        match hash(&password.0, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid hash is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash `password` on the blocking thread pool so request handling tasks are
/// not stalled by bcrypt.
///
/// # Errors
///
/// Returns [Error::HashingError] if hashing fails or the blocking task panics.
pub(crate) async fn hash_password(
    password: ValidatedPassword,
    cost: u32,
) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || PasswordHash::new(password, cost))
        .await
        .map_err(|error| Error::HashingError(error.to_string()))?
}

/// Check `raw_password` against `password_hash` on the blocking thread pool.
///
/// # Errors
///
/// Returns [Error::HashingError] if the hash is malformed or the blocking task panics.
pub(crate) async fn verify_password(
    password_hash: PasswordHash,
    raw_password: String,
) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || password_hash.verify(&raw_password))
        .await
        .map_err(|error| Error::HashingError(error.to_string()))?
        .map_err(|error| Error::HashingError(error.to_string()))
}
