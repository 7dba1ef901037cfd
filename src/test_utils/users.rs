use std::{str::FromStr, sync::Arc};

use email_address::EmailAddress;
use time::macros::date;

use crate::{
    AppState, InMemoryUserStore, NewUser, PasswordHash, User, ValidatedPassword,
    auth::DEFAULT_TOKEN_DURATION,
};

/// The lowest cost bcrypt accepts, which keeps tests fast.
pub(crate) const TEST_HASH_COST: u32 = 4;

pub(crate) fn test_app_state() -> AppState {
    AppState::new(
        "foobar",
        Arc::new(InMemoryUserStore::new()),
        DEFAULT_TOKEN_DURATION,
        TEST_HASH_COST,
    )
}

pub(crate) fn test_password_hash(raw_password: &str) -> PasswordHash {
    PasswordHash::new(ValidatedPassword::new_unchecked(raw_password), TEST_HASH_COST)
        .expect("Could not hash password")
}

pub(crate) fn test_new_user(full_name: &str, email: &str, password_hash: PasswordHash) -> NewUser {
    NewUser {
        full_name: full_name.to_owned(),
        email: EmailAddress::from_str(email).expect("Invalid test email"),
        password_hash,
        bio: None,
        dob: date!(1990 - 01 - 01),
    }
}

pub(crate) fn insert_test_user(
    state: &AppState,
    full_name: &str,
    email: &str,
    raw_password: &str,
) -> User {
    state
        .user_store
        .create(test_new_user(
            full_name,
            email,
            test_password_hash(raw_password),
        ))
        .expect("Could not create test user")
}
