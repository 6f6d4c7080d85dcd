//! HTTP error taxonomy.
//!
//! Every handler failure becomes an [`ApiError`], rendered as
//! `{"message": ..., "errors": [...]}` with a fixed status. Store and
//! internal details are logged here and never written to the body.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use forms::FieldError;
use serde::Serialize;

use crate::services::auth::AuthError;
use crate::services::password::PasswordError;
use crate::services::session::TokenError;
use crate::services::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not authorized, please login")]
    Unauthenticated,
    #[error("Forbidden")]
    Forbidden,
    #[error("Service temporarily unavailable")]
    StoreUnavailable,
    #[error("Internal server error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            Self::Validation(errors) => {
                let message = errors.first().map_or_else(|| "Invalid input".to_owned(), |e| e.message.clone());
                ErrorBody { message, errors: Some(errors) }
            }
            other => ErrorBody { message: other.to_string(), errors: None },
        }
    }

    /// Single-field validation failure.
    #[must_use]
    pub fn field(field: &str, message: &str) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.body())).into_response()
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        Self::BadRequest("Request body must be valid JSON".to_owned())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::field("email", "Email has already been registered"),
            // The session user vanished between validation and the write.
            StoreError::NotFound => Self::Unauthenticated,
            StoreError::Unavailable(e) => {
                tracing::error!(error = %e, "credential store unavailable");
                Self::StoreUnavailable
            }
            StoreError::Db(e) => {
                tracing::error!(error = %e, "credential store query failed");
                Self::Internal
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "password hashing failed");
        Self::Internal
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        tracing::error!(error = %err, "session token error");
        Self::Internal
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::EmailTaken => Self::field("email", "Email has already been registered"),
            AuthError::WrongPassword => Self::BadRequest("Old password is incorrect".to_owned()),
            AuthError::Store(e) => e.into(),
            AuthError::Password(e) => e.into(),
            AuthError::Worker(e) => {
                tracing::error!(error = %e, "password worker failed");
                Self::Internal
            }
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
