#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod users;

pub(crate) use http::{assert_content_type, response_json};
pub(crate) use users::{insert_test_user, test_app_state, test_new_user, test_password_hash};
