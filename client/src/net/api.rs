//! REST API helpers for communicating with the server.
//!
//! Browser (csr): real HTTP calls via `gloo-net`, always with credentials so
//! the HTTP-only session cookie travels to the API origin.
//! Elsewhere: stubs returning `None`/`false`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Failing requests
//! surface the server's `message` field so forms can show it as-is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use forms::{Credentials, PasswordChange, ProfileUpdate, Registration};

use super::types::{UserProfile, UserSummary};
#[cfg(any(test, feature = "csr"))]
use super::types::ApiErrorBody;

/// API origin, fixed at build time.
pub const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

#[cfg(not(feature = "csr"))]
const UNAVAILABLE: &str = "not available outside the browser";

#[cfg(any(test, feature = "csr"))]
fn endpoint(path: &str) -> String {
    format!("{}{path}", API_URL.trim_end_matches('/'))
}

#[cfg(any(test, feature = "csr"))]
fn failure_message(status: u16, body: Option<ApiErrorBody>) -> String {
    match body {
        Some(body) if !body.message.is_empty() => body.message,
        _ => format!("request failed: {status}"),
    }
}

#[cfg(feature = "csr")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use web_sys::RequestCredentials;

    use super::{ApiErrorBody, endpoint, failure_message};

    pub(super) fn get(path: &str) -> RequestBuilder {
        Request::get(&endpoint(path)).credentials(RequestCredentials::Include)
    }

    pub(super) fn post(path: &str) -> RequestBuilder {
        Request::post(&endpoint(path)).credentials(RequestCredentials::Include)
    }

    pub(super) fn patch(path: &str) -> RequestBuilder {
        Request::patch(&endpoint(path)).credentials(RequestCredentials::Include)
    }

    pub(super) async fn send_json<T: serde::Serialize>(builder: RequestBuilder, body: &T) -> Result<Response, String> {
        let resp = builder
            .json(body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        ensure_ok(resp).await
    }

    pub(super) async fn ensure_ok(resp: Response) -> Result<Response, String> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.json::<ApiErrorBody>().await.ok();
        Err(failure_message(status, body))
    }
}

/// Log in via `POST /api/users/login`; the response sets the session cookie.
///
/// # Errors
///
/// Returns the server's message (e.g. "Invalid credentials") on failure.
pub async fn login(credentials: &Credentials) -> Result<UserSummary, String> {
    #[cfg(feature = "csr")]
    {
        let body = forms::LoginInput { email: credentials.email.clone(), password: credentials.password.clone() };
        let resp = http::send_json(http::post("/api/users/login"), &body).await?;
        resp.json::<UserSummary>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = credentials;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Create an account via `POST /api/users/register`; the response sets the
/// session cookie.
///
/// # Errors
///
/// Returns the server's message on failure.
pub async fn register(registration: &Registration) -> Result<UserSummary, String> {
    #[cfg(feature = "csr")]
    {
        let body = forms::RegisterInput {
            name: registration.name.clone(),
            email: registration.email.clone(),
            password: registration.password.clone(),
            password2: None,
        };
        let resp = http::send_json(http::post("/api/users/register"), &body).await?;
        resp.json::<UserSummary>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = registration;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Log out via `POST /api/users/logout`.
///
/// # Errors
///
/// Returns an error string if the request fails.
pub async fn logout() -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let resp = http::post("/api/users/logout").send().await.map_err(|e| e.to_string())?;
        http::ensure_ok(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        Err(UNAVAILABLE.to_owned())
    }
}

/// Ask `GET /api/users/loggedin` whether the session cookie is valid.
/// Any failure reads as logged out.
pub async fn logged_in() -> bool {
    #[cfg(feature = "csr")]
    {
        let Ok(resp) = http::get("/api/users/loggedin").send().await else {
            return false;
        };
        if !resp.ok() {
            return false;
        }
        resp.json::<bool>().await.unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Fetch the signed-in user's profile from `GET /api/users/getuser`.
pub async fn get_user() -> Option<UserProfile> {
    #[cfg(feature = "csr")]
    {
        let resp = http::get("/api/users/getuser").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<UserProfile>().await.ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Update name, phone, or bio via `PATCH /api/users/updateuser`.
///
/// # Errors
///
/// Returns the server's message on failure.
pub async fn update_user(update: &ProfileUpdate) -> Result<UserProfile, String> {
    #[cfg(feature = "csr")]
    {
        let resp = http::send_json(http::patch("/api/users/updateuser"), update).await?;
        resp.json::<UserProfile>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = update;
        Err(UNAVAILABLE.to_owned())
    }
}

/// Change the password via `PATCH /api/users/changepassword`.
///
/// # Errors
///
/// Returns the server's message (e.g. "Old password is incorrect") on failure.
pub async fn change_password(change: &PasswordChange) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let body = forms::ChangePasswordInput {
            old_password: change.old_password.clone(),
            password: change.new_password.clone(),
            password2: None,
        };
        http::send_json(http::patch("/api/users/changepassword"), &body).await.map(|_| ())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = change;
        Err(UNAVAILABLE.to_owned())
    }
}
