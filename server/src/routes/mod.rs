//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under a single Axum router. Routes are split
//! into a public set and a declared protected set; the protected set sits
//! behind the `require_session` layer, so a handler added there cannot be
//! reached without a valid session whatever the client believes about its
//! own login state.

pub mod auth;
pub mod users;

#[cfg(test)]
mod test_support;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware;
use axum::response::Json;
use axum::routing::{get, patch, post};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Routes reachable without a session.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/api/health", get(health))
        .route("/api/users/register", post(auth::register))
        .route("/api/users/login", post(auth::login))
        .route("/api/users/logout", post(auth::logout))
        .route("/api/users/loggedin", get(auth::logged_in))
}

/// Routes that require a valid session.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/users/getuser", get(users::get_user))
        .route("/api/users/updateuser", patch(users::update_user))
        .route("/api/users/changepassword", patch(users::change_password))
        .route("/api/users/admin/users", get(users::list_users))
        .route_layer(middleware::from_fn_with_state(state, auth::require_session))
}

/// Credentialed CORS restricted to an explicit origin list.
fn cors(allowed_origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins.iter().cloned()))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Full API router.
pub fn app(state: AppState, allowed_origins: &[HeaderValue]) -> Router {
    public_routes()
        .merge(protected_routes(state.clone()))
        .layer(cors(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> &'static str {
    "Home Page - Backend is live"
}

async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
