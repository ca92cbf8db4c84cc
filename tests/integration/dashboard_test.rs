//! JSON dashboard and the prayer-time cache seen through HTTP.

use axum::http::StatusCode;
use chrono::Duration;

use crate::helpers::{TestApp, VIEWER_PASSWORD};

#[tokio::test]
async fn test_dashboard_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/dashboard", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_json_for_viewer() {
    let app = TestApp::new().await;
    let token = app.login_token("imam", VIEWER_PASSWORD).await;

    let response = app
        .request("GET", "/api/dashboard", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.json()["data"];
    assert_eq!(data["header"]["hijri_date"], "6 Jumādá al-ūlá 1448H");
    assert_eq!(data["prayers"].as_array().unwrap().len(), 5);
    assert_eq!(data["prayers"][1]["prayer"], "Dhuhr");
    assert_eq!(data["prayers"][1]["iqama"], "12:15");
    assert_eq!(data["refresh_interval_seconds"], 60);
    assert!(data["offsets"].is_null());
}

#[tokio::test]
async fn test_timings_cached_for_an_hour() {
    let app = TestApp::new().await;
    let token = app.login_token("imam", VIEWER_PASSWORD).await;

    for _ in 0..3 {
        app.request("GET", "/api/dashboard", None, Some(&token))
            .await;
    }
    assert_eq!(app.upstream.timings_calls(), 1);

    app.clock.advance(Duration::minutes(59));
    app.request("GET", "/api/dashboard", None, Some(&token))
        .await;
    assert_eq!(app.upstream.timings_calls(), 1);

    app.clock.advance(Duration::minutes(2));
    app.request("GET", "/api/dashboard", None, Some(&token))
        .await;
    assert_eq!(app.upstream.timings_calls(), 2);

    // A different location is a different cache entry.
    app.request(
        "GET",
        "/api/dashboard?city=Kara&country=Togo",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(app.upstream.timings_calls(), 3);
}

#[tokio::test]
async fn test_unavailable_is_reported_in_body() {
    let app = TestApp::new().await;
    app.upstream
        .fail_timings
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let token = app.login_token("imam", VIEWER_PASSWORD).await;

    let response = app
        .request("GET", "/api/dashboard", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let data = &response.json()["data"];
    assert!(data["prayers"].is_null());
    assert!(data["unavailable_reason"].as_str().is_some());
    assert!(data["refresh_interval_seconds"].is_null());
    assert_eq!(app.upstream.timings_calls(), 1);
}
