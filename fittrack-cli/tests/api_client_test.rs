mod common;

use common::harness;
use fittrack_cli::api::{ApiError, FALLBACK_MESSAGE};
use fittrack_cli::routing::Route;
use fittrack_cli::storage::TokenStore;
use mockito::Matcher;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn test_success_body_is_returned_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({"total_workouts": 4, "nested": {"list": [1, 2, 3]}});
    let mock = server
        .mock("GET", "/api/stats")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let h = harness(&server.url(), Some("tok"));
    let value = h
        .client
        .request_json::<Value>(Method::GET, "/api/stats", None)
        .await
        .unwrap();

    assert_eq!(value, body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_stored() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/exercises")
        .match_header("authorization", "Bearer secret-token")
        .with_body("[]")
        .create_async()
        .await;

    let h = harness(&server.url(), Some("secret-token"));
    let exercises = h.client.exercises().await.unwrap();

    assert!(exercises.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/exercises")
        .match_header("authorization", Matcher::Missing)
        .with_body(r#"[{"id": 7, "name": "Squat", "muscle_group": "Legs"}]"#)
        .create_async()
        .await;

    let h = harness(&server.url(), None);
    let exercises = h.client.exercises().await.unwrap();

    assert_eq!(exercises[0].id, "7");
    assert_eq!(exercises[0].to_string(), "Squat (Legs)");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_navigates_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/profile")
        .with_status(401)
        .with_body(r#"{"detail": "Token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Some("stale"));
    let err = h.client.profile().await.unwrap_err();

    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(err.to_string(), "Session expired. Please log in again.");
    assert_eq!(h.tokens.get(), None);
    assert_eq!(h.tracker.history(), vec![Route::Login]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_ignores_body_content() {
    let mut server = mockito::Server::new_async().await;
    let empty = server
        .mock("GET", "/api/exercises")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let html = server
        .mock("GET", "/api/stats")
        .with_status(401)
        .with_body("<html>Unauthorized</html>")
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), Some("stale"));
    let err = h.client.exercises().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(h.tokens.get(), None);
    assert_eq!(h.tracker.history(), vec![Route::Login]);

    h.tokens.set("stale-again").unwrap();
    let err = h.client.stats().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(h.tokens.get(), None);
    assert_eq!(h.tracker.history(), vec![Route::Login, Route::Login]);

    empty.assert_async().await;
    html.assert_async().await;
}

#[tokio::test]
async fn test_error_detail_becomes_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(400)
        .with_body(r#"{"detail": "Invalid credentials"}"#)
        .create_async()
        .await;

    let h = harness(&server.url(), None);
    let err = h
        .client
        .post::<_, Value>("/api/auth/login", &json!({"email": "a@b.c", "password": "x"}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert!(h.tracker.history().is_empty());
}

#[tokio::test]
async fn test_error_without_detail_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/stats")
        .with_status(500)
        .with_body("<html>oops</html>")
        .create_async()
        .await;
    server
        .mock("GET", "/api/exercises")
        .with_status(503)
        .create_async()
        .await;

    let h = harness(&server.url(), Some("tok"));

    let err = h.client.stats().await.unwrap_err();
    assert_eq!(err.to_string(), FALLBACK_MESSAGE);

    let err = h.client.exercises().await.unwrap_err();
    assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));

    // Only a 401 touches the session
    assert_eq!(h.tokens.get().as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_network_failure_is_reported() {
    // Nothing listens on port 9 of localhost
    let h = harness("http://127.0.0.1:9", None);
    let err = h.client.exercises().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
