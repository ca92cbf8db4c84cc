//! Login, logout and session handling.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_PASSWORD, TestApp, VIEWER_PASSWORD};

#[tokio::test]
async fn test_api_login_returns_token_and_identity() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "imam", "password": VIEWER_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.session_cookie().is_some());
    let body = response.json();
    assert!(body["data"]["token"].as_str().is_some());
    assert_eq!(body["data"]["user"]["name"], "Imam Yusuf");
    assert_eq!(body["data"]["user"]["role"], "viewer");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::new().await;
    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "admin", "password": "nope" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "ghost", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json()["message"], unknown.json()["message"]);

    // Retry is allowed straight away.
    app.login_token("admin", ADMIN_PASSWORD).await;
}

#[tokio::test]
async fn test_empty_credentials_fail_validation() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let token = app.login_token("admin", ADMIN_PASSWORD).await;
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["role"], "admin");
}

#[tokio::test]
async fn test_api_logout_revokes_only_that_session() {
    let app = TestApp::new().await;
    let first = app.login_token("imam", VIEWER_PASSWORD).await;
    let second = app.login_token("imam", VIEWER_PASSWORD).await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&first))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/auth/me", None, Some(&first)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = app.request("GET", "/api/auth/me", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}
