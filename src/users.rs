//! Endpoints for reading registered users.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

use crate::{
    AppState, ApiResponse, Claims, Error, UserID, UserView, response::render,
};

/// List the public details of every registered user in registration order.
pub async fn list_users(State(state): State<AppState>) -> Result<Response, Error> {
    let users: Vec<UserView> = state
        .user_store
        .list()?
        .iter()
        .map(UserView::from)
        .collect();

    Ok(render(
        StatusCode::OK,
        ApiResponse::success("Retrieved registered users", users),
    ))
}

/// Get the public details of the user with the ID in the path.
///
/// # Errors
///
/// Returns [Error::InvalidUserId] if the ID is not an integer and
/// [Error::UserNotFound] if no user has the ID.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, Error> {
    let user_id = parse_user_id(&user_id)?;
    let user = state.user_store.get(user_id)?;

    Ok(render(
        StatusCode::OK,
        ApiResponse::success("Retrieved user", UserView::from(&user)),
    ))
}

/// Get the public details of the user that owns the bearer token.
pub async fn get_current_user(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<Response, Error> {
    let user = state.user_store.get(claims.user_id()?)?;

    Ok(render(
        StatusCode::OK,
        ApiResponse::success("Retrieved current user", UserView::from(&user)),
    ))
}

/// Read the integer at the start of `raw`, e.g. " 12abc" is 12.
///
/// Leading whitespace and a sign are allowed and anything after the digits is
/// ignored. Digits too large for a user ID cannot match a user, so they give
/// [Error::UserNotFound] rather than a validation error.
fn parse_user_id(raw: &str) -> Result<UserID, Error> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_length = trimmed.len() - unsigned.len();
    if sign_length > 1 {
        return Err(Error::InvalidUserId(raw.to_owned()));
    }

    let digit_count = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digit_count == 0 {
        return Err(Error::InvalidUserId(raw.to_owned()));
    }

    trimmed[..sign_length + digit_count]
        .parse()
        .map(UserID::new)
        .map_err(|_| Error::UserNotFound)
}

#[cfg(test)]
mod list_users_tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, endpoints,
        test_utils::{insert_test_user, test_app_state},
        users::list_users,
    };

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::USERS, get(list_users))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let server = get_test_server(test_app_state());

        let response = server.get(endpoints::USERS).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], json!([]));
    }

    #[tokio::test]
    async fn lists_users_in_registration_order() {
        let state = test_app_state();
        insert_test_user(&state, "Ada", "ada@x.com", "Secr3t!99");
        insert_test_user(&state, "Grace", "grace@x.com", "Secr3t!99");
        let server = get_test_server(state);

        let response = server.get(endpoints::USERS).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "success");
        assert_eq!(
            body["data"],
            json!([
                {"id": 1, "fullName": "Ada", "email": "ada@x.com", "bio": null, "dob": "1990-01-01"},
                {"id": 2, "fullName": "Grace", "email": "grace@x.com", "bio": null, "dob": "1990-01-01"},
            ])
        );
    }
}
