//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/{user_id}', use `format_endpoint` in tests.

/// The route for listing all registered users.
pub const USERS: &str = "/";
/// The route for getting a single user by their ID.
pub const USER: &str = "/{user_id}";
/// The route for registering a new user.
pub const REGISTER: &str = "/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/auth/login";
/// The route for getting the user that owns the bearer token.
pub const CURRENT_USER: &str = "/auth/me";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Assumes `endpoint_path` has a single parameter wrapped in braces, e.g. '/{user_id}'.
/// If there is no parameter, `endpoint_path` is returned unchanged.
#[cfg(test)]
pub(crate) fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{}{}",
            &endpoint_path[..start],
            id,
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}
