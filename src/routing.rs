//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState, endpoints,
    log_in::post_log_in,
    not_found::get_404_not_found,
    register_user::register_user,
    users::{get_current_user, get_user, list_users},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::USERS, get(list_users))
        .route(endpoints::USER, get(get_user))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::CURRENT_USER, get(get_current_user))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::test_app_state,
    };

    fn get_test_server() -> TestServer {
        TestServer::new(build_router(test_app_state())).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/no/such/route").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "failed");
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn register_then_fetch_round_trip() {
        let server = get_test_server();

        let registered = server
            .post(endpoints::REGISTER)
            .json(&json!({
                "fullName": "Ada",
                "email": "ada@x.com",
                "password": "Secr3t!99",
                "bio": "Analyst",
                "dob": "1990-01-01",
            }))
            .await;
        registered.assert_status(StatusCode::CREATED);
        let registered = registered.json::<Value>()["data"].clone();

        let fetched = server
            .get(&format_endpoint(endpoints::USER, 1))
            .await
            .json::<Value>()["data"]
            .clone();
        let listed = server.get(endpoints::USERS).await.json::<Value>()["data"].clone();

        assert_eq!(fetched, registered);
        assert_eq!(listed, json!([registered]));
        for field in ["fullName", "email", "bio", "dob"] {
            assert_eq!(fetched[field], registered[field], "{field} should round trip");
        }
        assert!(!listed.to_string().contains("Secr3t!99"));
    }

    #[tokio::test]
    async fn register_log_in_and_fetch_current_user() {
        let server = get_test_server();
        server
            .post(endpoints::REGISTER)
            .json(&json!({
                "fullName": "Ada",
                "email": "ada@x.com",
                "password": "Secr3t!99",
                "dob": "1990-01-01",
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let log_in = server
            .post(endpoints::LOG_IN)
            .json(&json!({"email": "ada@x.com", "password": "Secr3t!99"}))
            .await;
        log_in.assert_status_ok();
        let token = log_in.json::<Value>()["data"]["token"]
            .as_str()
            .expect("token should be a string")
            .to_owned();

        let me = server
            .get(endpoints::CURRENT_USER)
            .authorization_bearer(token)
            .await;

        me.assert_status_ok();
        assert_eq!(me.json::<Value>()["data"]["email"], "ada@x.com");
    }

    #[tokio::test]
    async fn second_registration_with_same_email_conflicts() {
        let server = get_test_server();
        let body = json!({
            "fullName": "Ada",
            "email": "ada@x.com",
            "password": "Secr3t!99",
            "dob": "1990-01-01",
        });

        server
            .post(endpoints::REGISTER)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post(endpoints::REGISTER)
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let listed = server.get(endpoints::USERS).await.json::<Value>();
        assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
    }
}
