//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use salat_auth::{CookieSettings, CredentialStore, PasswordHasher};
use salat_core::config::AppConfig;
use salat_core::traits::ManualClock;

pub const ADMIN_PASSWORD: &str = "admin-pass";
pub const VIEWER_PASSWORD: &str = "imam-pass";
pub const COOKIE_NAME: &str = "salat_session";

/// Call counters and failure switches for the fake upstream server.
#[derive(Debug, Default)]
pub struct UpstreamState {
    pub timings_calls: AtomicUsize,
    pub hijri_calls: AtomicUsize,
    pub reverse_calls: AtomicUsize,
    pub fail_timings: AtomicBool,
}

impl UpstreamState {
    pub fn timings_calls(&self) -> usize {
        self.timings_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

async fn timings(State(state): State<Arc<UpstreamState>>) -> Response {
    state.timings_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_timings.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(json!({
        "code": 200,
        "status": "OK",
        "data": { "timings": {
            "Fajr": "04:55", "Sunrise": "06:05", "Dhuhr": "12:10",
            "Asr": "15:28", "Maghrib": "18:07", "Isha": "19:15"
        }}
    }))
    .into_response()
}

async fn hijri(State(state): State<Arc<UpstreamState>>) -> Json<Value> {
    state.hijri_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "code": 200,
        "data": { "hijri": {
            "day": "6",
            "month": { "number": 5, "en": "Jumādá al-ūlá" },
            "year": "1448"
        }}
    }))
}

async fn reverse(
    State(state): State<Arc<UpstreamState>>,
    Query(q): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    state.reverse_calls.fetch_add(1, Ordering::SeqCst);
    if q.get("lat").and_then(|v| v.parse::<f64>().ok()) == Some(0.0) {
        return Json(json!({ "error": "Unable to geocode" }));
    }
    Json(json!({ "address": { "town": "Kpalimé", "country": "Togo" } }))
}

/// Starts the fake Aladhan + Nominatim server on an ephemeral port.
async fn spawn_upstream(state: Arc<UpstreamState>) -> String {
    let router = Router::new()
        .route("/v1/timingsByCity", get(timings))
        .route("/v1/gToH", get(hijri))
        .route("/reverse", get(reverse))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Response captured from the router.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap()
    }

    /// `name=value` of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{COOKIE_NAME}=")))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// Test application context.
pub struct TestApp {
    pub router: Router,
    pub upstream: Arc<UpstreamState>,
    pub clock: ManualClock,
}

impl TestApp {
    pub async fn new() -> Self {
        let upstream = Arc::new(UpstreamState::default());
        let base_url = spawn_upstream(upstream.clone()).await;

        let mut config = AppConfig::default();
        config.upstream.aladhan_base_url = base_url.clone();
        config.upstream.nominatim_base_url = base_url;
        config.upstream.timeout_seconds = 2;

        let hasher = PasswordHasher::new();
        let credentials = CredentialStore::from_records(
            vec![
                (
                    "admin".to_string(),
                    "Administrator".to_string(),
                    hasher.hash_password(ADMIN_PASSWORD).unwrap(),
                ),
                (
                    "imam".to_string(),
                    "Imam Yusuf".to_string(),
                    hasher.hash_password(VIEWER_PASSWORD).unwrap(),
                ),
            ],
            CookieSettings {
                name: COOKIE_NAME.to_string(),
                key: "integration-test-key".to_string(),
                expiry_days: 30,
            },
        )
        .unwrap();

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap());
        let state =
            salat_api::build_state(config, credentials, Arc::new(clock.clone())).unwrap();

        Self {
            router: salat_api::build_app(state),
            upstream,
            clock,
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// JSON API request, optionally with a Bearer token.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Page request carrying the session cookie.
    pub async fn get_page(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Form POST. Field values must already be URL-safe.
    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Logs in through the page form and returns the cookie pair.
    pub async fn login_cookie(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/login",
                &[("username", username), ("password", password)],
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response.session_cookie().unwrap()
    }

    /// Logs in through the JSON API and returns the Bearer token.
    pub async fn login_token(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["data"]["token"].as_str().unwrap().to_string()
    }
}
