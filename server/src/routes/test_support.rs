//! Request helpers for router tests.

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::state::AppState;
use crate::state::test_helpers::TEST_COOKIE;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// `name=value` pair of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        let prefix = format!("{TEST_COOKIE}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .and_then(|v| v.split(';').next())
            .map(str::to_owned)
    }

    /// Raw `Set-Cookie` header for the session cookie.
    pub fn session_set_cookie(&self) -> Option<String> {
        let prefix = format!("{TEST_COOKIE}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&prefix))
            .map(str::to_owned)
    }
}

pub fn router(state: AppState) -> Router {
    super::app(state, &[])
}

pub async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let req = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    into_test_response(app, req).await
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, raw_body: &'static str) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw_body))
        .unwrap();
    into_test_response(app, req).await
}

/// Bodyless request carrying extra headers, e.g. `Origin` for CORS checks.
pub async fn send_with_headers(app: &Router, method: Method, uri: &str, headers: &[(HeaderName, &str)]) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, *value);
    }
    into_test_response(app, builder.body(Body::empty()).unwrap()).await
}

async fn into_test_response(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse { status, headers, body }
}
