//! Issues log-in tokens and verifies them on protected routes.

mod bearer;
mod token;

pub use token::{Claims, DEFAULT_TOKEN_DURATION, TokenKeys, decode_token, encode_token};
