//! Offset editing: visibility, authorization, and concurrent writes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ADMIN_PASSWORD, TestApp, VIEWER_PASSWORD};

#[tokio::test]
async fn test_editor_only_rendered_for_admin() {
    let app = TestApp::new().await;

    let viewer = app.login_cookie("imam", VIEWER_PASSWORD).await;
    let response = app.get_page("/", Some(&viewer)).await;
    assert!(!response.text.contains("/admin/offsets"));

    let admin = app.login_cookie("admin", ADMIN_PASSWORD).await;
    let response = app.get_page("/", Some(&admin)).await;
    assert!(response.text.contains(r#"action="/admin/offsets""#));
    assert!(response.text.contains(r#"name="iqama_fajr""#));

    // An admin being logged in elsewhere changes nothing for the viewer.
    let response = app.get_page("/", Some(&viewer)).await;
    assert!(!response.text.contains("/admin/offsets"));
}

#[tokio::test]
async fn test_admin_form_updates_offsets() {
    let app = TestApp::new().await;
    let admin = app.login_cookie("admin", ADMIN_PASSWORD).await;

    let response = app
        .post_form(
            "/admin/offsets",
            &[("iqama_fajr", "20"), ("reminder_isha", "30")],
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let page = app.get_page("/?saved=1", Some(&admin)).await;
    assert!(page.text.contains("Configuration saved."));
    // The confirmation is not repeated on every refresh.
    assert!(page.text.contains(r#"content="60;url=/""#));
    assert!(page.text.contains("04:55 ⏳ +20 min"));
    assert!(page.text.contains("Iqama 05:15"));

    // Everyone sees the shared table.
    let viewer = app.login_cookie("imam", VIEWER_PASSWORD).await;
    let page = app.get_page("/", Some(&viewer)).await;
    assert!(page.text.contains("Iqama 05:15"));
}

#[tokio::test]
async fn test_admin_form_rejects_out_of_range_without_partial_write() {
    let app = TestApp::new().await;
    let token = app.login_token("admin", ADMIN_PASSWORD).await;
    let admin = app.login_cookie("admin", ADMIN_PASSWORD).await;

    let response = app
        .post_form(
            "/admin/offsets",
            &[("iqama_fajr", "20"), ("iqama_isha", "61")],
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let offsets = app.request("GET", "/api/offsets", None, Some(&token)).await;
    assert_eq!(offsets.json()["data"]["iqama"]["Fajr"], 10);
}

#[tokio::test]
async fn test_viewer_and_anonymous_cannot_mutate() {
    let app = TestApp::new().await;

    let response = app
        .post_form("/admin/offsets", &[("iqama_fajr", "30")], None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let viewer = app.login_cookie("imam", VIEWER_PASSWORD).await;
    let response = app
        .post_form("/admin/offsets", &[("iqama_fajr", "30")], Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let token = app.login_token("imam", VIEWER_PASSWORD).await;
    let response = app
        .request(
            "PUT",
            "/api/offsets",
            Some(json!({ "updates": [
                { "kind": "iqama", "prayer": "Fajr", "minutes": 30 }
            ]})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("GET", "/api/offsets", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["data"]["iqama"]["Fajr"], 10);
}

#[tokio::test]
async fn test_api_update_validates_range() {
    let app = TestApp::new().await;
    let token = app.login_token("admin", ADMIN_PASSWORD).await;

    let response = app
        .request(
            "PUT",
            "/api/offsets",
            Some(json!({ "updates": [
                { "kind": "reminder", "prayer": "Asr", "minutes": 90 }
            ]})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("PUT", "/api/offsets", Some(json!({ "updates": [] })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_admin_edits_last_write_wins() {
    let app = TestApp::new().await;
    let token = app.login_token("admin", ADMIN_PASSWORD).await;

    let writes = [12u8, 25, 37, 48, 59];
    let mut handles = Vec::new();
    for minutes in writes {
        let router = app.router.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            use axum::body::Body;
            use axum::http::Request;
            use tower::ServiceExt;

            let request = Request::builder()
                .method("PUT")
                .uri("/api/offsets")
                .header("authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "updates": [
                        { "kind": "iqama", "prayer": "Maghrib", "minutes": minutes }
                    ]})
                    .to_string(),
                ))
                .unwrap();
            router.oneshot(request).await.unwrap().status()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let response = app.request("GET", "/api/offsets", None, Some(&token)).await;
    let stored = response.json()["data"]["iqama"]["Maghrib"].as_u64().unwrap() as u8;
    assert!(writes.contains(&stored));
}
