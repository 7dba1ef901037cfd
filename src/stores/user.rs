//! Defines the user store trait and the errors it can return.

use thiserror::Error;

use crate::{Error, NewUser, User, UserID};

/// Handles the creation and retrieval of User objects.
///
/// Implementations are shared between request handlers, so they must handle
/// their own synchronisation.
pub trait UserStore: Send + Sync {
    /// Create a new user with the next sequential ID.
    ///
    /// The email check and the insert happen atomically, so concurrent calls
    /// with the same email cannot both succeed.
    ///
    /// Returns [UserError::DuplicateEmail] if a user with the same email exists.
    fn create(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Get a user by their ID.
    ///
    /// Returns [UserError::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, UserError>;

    /// Get a user by their email.
    ///
    /// Returns [UserError::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Get every user in the order they were created.
    fn list(&self) -> Result<Vec<User>, UserError>;

    /// Get the number of users.
    fn count(&self) -> Result<usize, UserError>;
}

/// Errors that can occur during the creation or retrieval of a user.
#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    /// The email used to create the user is already in use. The client should try again with a
    /// different email address.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// There was no user in the store that matched the given details. The client can try again
    /// with different details.
    #[error("no user found with the given details")]
    NotFound,

    /// The lock guarding the store was poisoned by a panicking thread.
    #[error("could not acquire the user store lock")]
    LockError,
}

impl From<UserError> for Error {
    fn from(value: UserError) -> Self {
        match value {
            UserError::DuplicateEmail => Error::EmailExists,
            UserError::NotFound => Error::UserNotFound,
            UserError::LockError => Error::StoreLockError,
        }
    }
}
