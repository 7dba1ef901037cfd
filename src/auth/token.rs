//! Signed, expiring log-in tokens.
//!
//! Tokens are JSON Web Tokens signed with HMAC-SHA256 using the server secret.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, User, UserID};

/// The default lifetime of a log-in token.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::minutes(15);

/// The keys used to sign and verify tokens, derived from the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenKeys {
    /// Create the signing and verification keys from a `secret` string.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// The contents of a log-in token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub sub: String,
    /// The email of the user the token was issued to.
    pub email: String,
    /// When the token was issued, as a unix timestamp in seconds.
    pub iat: i64,
    /// When the token expires, as a unix timestamp in seconds.
    pub exp: i64,
}

impl Claims {
    /// Create the claims for `user` that are valid for `duration` from `issued_at`.
    pub fn new(user: &User, issued_at: OffsetDateTime, duration: Duration) -> Self {
        Self {
            sub: user.id.to_string(),
            email: user.email.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + duration).unix_timestamp(),
        }
    }

    /// The ID of the user the token was issued to.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidToken] if the subject is not a user ID.
    pub fn user_id(&self) -> Result<UserID, Error> {
        self.sub
            .parse()
            .map(UserID::new)
            .map_err(|_| Error::InvalidToken)
    }
}

/// Sign `claims` into a token string.
///
/// # Errors
///
/// Returns [Error::TokenCreation] if the claims could not be signed.
pub fn encode_token(claims: &Claims, keys: &TokenKeys) -> Result<String, Error> {
    encode(&Header::default(), claims, &keys.encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
///
/// Returns [Error::InvalidToken] if the token is malformed, signed with a different key or has
/// expired.
pub fn decode_token(token: &str, keys: &TokenKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &keys.decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("Rejected token: {error}");
            Error::InvalidToken
        })
}
