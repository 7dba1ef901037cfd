//! Extracts and verifies the bearer token on protected routes.

use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{
    Error,
    auth::token::{Claims, TokenKeys, decode_token},
};

/// Handlers can take [Claims] as an argument to require a valid
/// `Authorization: Bearer <token>` header.
///
/// The request is rejected with [Error::InvalidToken] if the header is missing or the token does
/// not verify.
impl<S> FromRequestParts<S> for Claims
where
    TokenKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| Error::InvalidToken)?;

        let keys = TokenKeys::from_ref(state);

        decode_token(bearer.token(), &keys)
    }
}
