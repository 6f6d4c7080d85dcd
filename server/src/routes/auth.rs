//! Auth routes: register, login, logout, login status, plus the session
//! extractors every protected handler depends on.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, FromRequestParts, Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use forms::{LoginInput, RegisterInput};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use crate::config::{CookieSameSite, SessionConfig};
use crate::error::ApiError;
use crate::services::auth as auth_svc;
use crate::services::session::{self, Claims};
use crate::services::store::{Role, UserRecord, UserSummary};
use crate::state::AppState;

// =============================================================================
// COOKIES
// =============================================================================

fn same_site(config: &SessionConfig) -> SameSite {
    match config.same_site {
        CookieSameSite::Lax => SameSite::Lax,
        CookieSameSite::None => SameSite::None,
    }
}

pub(crate) fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(same_site(config))
        .secure(config.cookie_secure)
        .max_age(Duration::seconds(config.ttl_secs))
        .build()
}

pub(crate) fn cleared_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(same_site(config))
        .secure(config.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

fn token_from_jar<'a>(jar: &'a CookieJar, config: &SessionConfig) -> Option<&'a str> {
    jar.get(&config.cookie_name)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Authenticated user resolved from the session cookie.
/// Use as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: UserRecord,
    pub claims: Claims,
}

/// Resolve the session cookie in `jar`, if any, to an authenticated user.
async fn resolve(state: &AppState, jar: &CookieJar) -> Result<Option<AuthUser>, ApiError> {
    let Some(token) = token_from_jar(jar, &state.session) else {
        return Ok(None);
    };
    let session = session::validate_session(
        &state.keys,
        state.users.as_ref(),
        state.revocations.as_ref(),
        token,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(session.map(|s| AuthUser { user: s.user, claims: s.claims }))
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_session` for routes behind the guard layer.
        if let Some(auth) = parts.extensions.get::<AuthUser>() {
            return Ok(auth.clone());
        }

        let app_state = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        resolve(&app_state, &jar).await?.ok_or(ApiError::Unauthenticated)
    }
}

/// Authenticated user whose role is `admin`.
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;
        if auth.user.role != Role::Admin {
            tracing::warn!(user_id = %auth.user.id, "non-admin denied admin route");
            return Err(ApiError::Forbidden);
        }
        Ok(Self(auth))
    }
}

/// Guard layer for the protected router: rejects the request unless the
/// session cookie validates, and hands the identity to downstream handlers.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = resolve(&state, &jar).await?.ok_or(ApiError::Unauthenticated)?;
    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/users/register`: create account, set session cookie.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> Result<(StatusCode, CookieJar, Json<UserSummary>), ApiError> {
    let Json(input) = payload?;
    let registration = forms::validate_register(&input)?;

    let user = auth_svc::register(state.users.as_ref(), &state.passwords, registration).await?;
    let issued = state.keys.issue(user.id, OffsetDateTime::now_utc())?;

    let jar = jar.add(session_cookie(&state.session, issued.token));
    Ok((StatusCode::CREATED, jar, Json(UserSummary::from(&user))))
}

/// `POST /api/users/login`: check credentials, set session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<UserSummary>), ApiError> {
    let Json(input) = payload?;
    let credentials = forms::validate_login(&input)?;

    let user = match auth_svc::authenticate(state.users.as_ref(), &state.passwords, credentials).await {
        Ok(user) => user,
        Err(auth_svc::AuthError::InvalidCredentials) => {
            tracing::info!("login rejected");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };
    let issued = state.keys.issue(user.id, OffsetDateTime::now_utc())?;
    tracing::info!(user_id = %user.id, jti = %issued.claims.jti, "session issued");

    let jar = jar.add(session_cookie(&state.session, issued.token));
    Ok((jar, Json(UserSummary::from(&user))))
}

/// `POST /api/users/logout`: revoke the presented session and clear the cookie.
/// The cookie is cleared even when revocation fails.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let outcome = revoke_presented(&state, &jar).await;
    let jar = jar.add(cleared_cookie(&state.session));
    match outcome {
        Ok(()) => (jar, Json(json!({ "message": "Successfully logged out" }))).into_response(),
        Err(e) => (jar, e).into_response(),
    }
}

async fn revoke_presented(state: &AppState, jar: &CookieJar) -> Result<(), ApiError> {
    if let Some(auth) = resolve(state, jar).await? {
        session::revoke_session(state.revocations.as_ref(), &auth.claims, OffsetDateTime::now_utc()).await?;
        tracing::info!(user_id = %auth.user.id, jti = %auth.claims.jti, "session revoked");
    }
    Ok(())
}

/// `GET /api/users/loggedin`: `true` if the cookie carries a valid session.
pub async fn logged_in(State(state): State<AppState>, jar: CookieJar) -> Result<Json<bool>, ApiError> {
    Ok(Json(resolve(&state, &jar).await?.is_some()))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
