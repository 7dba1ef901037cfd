//! The user record kept in the directory and the view of it that is safe to
//! send to clients.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::PasswordHash;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other integers, leading to better compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered user.
///
/// The caller should ensure that `id` and `email` are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID, assigned sequentially from 1.
    pub id: UserID,
    /// The user's full name.
    pub full_name: String,
    /// The email the user logs in with.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// An optional free-text description.
    pub bio: Option<String>,
    /// The user's date of birth.
    pub dob: Date,
}

/// The validated details needed to add a user to a [crate::UserStore].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The user's full name.
    pub full_name: String,
    /// The email the user logs in with.
    pub email: EmailAddress,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// An optional free-text description.
    pub bio: Option<String>,
    /// The user's date of birth.
    pub dob: Date,
}

impl NewUser {
    /// Turn the new user into a [User] with the given `id`.
    pub fn with_id(self, id: UserID) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            bio: self.bio,
            dob: self.dob,
        }
    }
}

/// The public view of a [User], which never includes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// The user's ID.
    pub id: UserID,
    /// The user's full name.
    pub full_name: String,
    /// The user's email.
    pub email: String,
    /// The user's bio, `null` if they did not provide one.
    pub bio: Option<String>,
    /// The user's date of birth as "YYYY-MM-DD".
    #[serde(with = "date_format")]
    pub dob: Date,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.to_string(),
            bio: user.bio.clone(),
            dob: user.dob,
        }
    }
}

pub(crate) mod date_format {
    //! Serializes a [time::Date] as an ISO 8601 calendar date, e.g. "1990-01-31".
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    /// The extended ISO 8601 calendar date format.
    pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(DATE_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
