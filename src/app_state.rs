//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use axum::extract::FromRef;
use time::Duration;

use crate::{TokenKeys, UserStore};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store holding all registered users.
    pub user_store: Arc<dyn UserStore>,

    /// The keys for signing and verifying log-in tokens.
    pub token_keys: TokenKeys,

    /// The duration for which log-in tokens are valid.
    pub token_duration: Duration,

    /// The bcrypt cost used when hashing new passwords.
    pub hash_cost: u32,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `token_secret` is used to sign log-in tokens, which are valid for `token_duration`.
    /// `hash_cost` should be between 4 and 31, see [crate::PasswordHash::DEFAULT_COST].
    pub fn new(
        token_secret: &str,
        user_store: Arc<dyn UserStore>,
        token_duration: Duration,
        hash_cost: u32,
    ) -> Self {
        Self {
            user_store,
            token_keys: TokenKeys::from_secret(token_secret),
            token_duration,
            hash_cost,
        }
    }
}

// this impl tells the `Claims` extractor how to access the keys from our state
impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        state.token_keys.clone()
    }
}
