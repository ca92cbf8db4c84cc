//! The server-rendered page: login form, dashboard, logout.

use axum::http::StatusCode;

use crate::helpers::{ADMIN_PASSWORD, TestApp, VIEWER_PASSWORD};

#[tokio::test]
async fn test_anonymous_visitor_sees_login_form_with_header() {
    let app = TestApp::new().await;
    let response = app.get_page("/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Please log in."));
    assert!(response.text.contains(r#"action="/login""#));
    assert!(response.text.contains("18 October 2026 | 6 Jumādá al-ūlá 1448H"));
    assert!(!response.text.contains("prayer-card"));
    assert!(response.text.contains("Développé par Yacoubou KOUMAI"));
    assert_eq!(app.upstream.timings_calls(), 0);
}

#[tokio::test]
async fn test_rejected_login_rerenders_form() {
    let app = TestApp::new().await;
    let response = app
        .post_form("/login", &[("username", "admin"), ("password", "wrong")], None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.text.contains("Username/password is incorrect."));
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn test_login_cookie_unlocks_dashboard() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie("imam", VIEWER_PASSWORD).await;

    let response = app.get_page("/", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Logged in as Imam Yusuf"));
    assert_eq!(response.text.matches(r#"class="prayer-card""#).count(), 5);
    // Fajr 04:55 with the default 10 minute Iqama offset.
    assert!(response.text.contains("04:55 ⏳ +10 min"));
    assert!(response.text.contains("Iqama 05:05"));
    assert!(response.text.contains(r#"http-equiv="refresh" content="60;url=/""#));
}

#[tokio::test]
async fn test_unknown_mode_falls_back_to_manual_page() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie("imam", VIEWER_PASSWORD).await;

    let response = app
        .get_page("/?mode=satellite&city=Kara&country=Togo", Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Using manual location."));
    assert!(response.text.contains(r#"value="Kara""#));
    assert_eq!(response.text.matches(r#"class="prayer-card""#).count(), 5);
    assert_eq!(app.upstream.reverse_calls(), 0);
}

#[tokio::test]
async fn test_logout_clears_cookie_and_revokes_session() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie("admin", ADMIN_PASSWORD).await;

    let response = app.post_form("/logout", &[], Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
    assert_eq!(
        response.session_cookie().as_deref(),
        Some("salat_session=")
    );

    // The old cookie value no longer works even if the browser keeps it.
    let response = app.get_page("/", Some(&cookie)).await;
    assert!(response.text.contains("Please log in."));
}

#[tokio::test]
async fn test_timings_failure_renders_unavailable_with_one_call() {
    let app = TestApp::new().await;
    app.upstream
        .fail_timings
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let cookie = app.login_cookie("imam", VIEWER_PASSWORD).await;

    let response = app.get_page("/", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Prayer times are not available."));
    assert!(!response.text.contains("http-equiv=\"refresh\""));
    assert_eq!(app.upstream.timings_calls(), 1);
}

#[tokio::test]
async fn test_manual_location_is_shown() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie("imam", VIEWER_PASSWORD).await;

    let response = app
        .get_page("/?mode=manual&city=Kara&country=Togo", Some(&cookie))
        .await;
    assert!(response.text.contains("Kara, Togo - 18 October 2026"));
}

#[tokio::test]
async fn test_unresolvable_coordinates_fall_back_with_warning() {
    let app = TestApp::new().await;
    let cookie = app.login_cookie("imam", VIEWER_PASSWORD).await;

    let response = app.get_page("/?mode=gps&lat=0&lon=0", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Lomé, Togo - 18 October 2026"));
    assert!(response.text.contains("No place was found at these coordinates."));
    assert_eq!(app.upstream.reverse_calls(), 1);

    let response = app
        .get_page("/?mode=gps&lat=6.9&lon=0.63", Some(&cookie))
        .await;
    assert!(response.text.contains("Kpalimé, Togo"));
}
