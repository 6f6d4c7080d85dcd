//! Profile routes for the signed-in user, plus the admin user listing.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use forms::{ChangePasswordInput, ProfileUpdate};
use serde::Serialize;
use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

use super::auth::{AdminUser, AuthUser};
use crate::error::ApiError;
use crate::services::auth as auth_svc;
use crate::services::store::{Role, UserRecord, UserSummary};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

/// `GET /api/users/getuser`: profile of the session user.
pub async fn get_user(auth: AuthUser) -> Json<UserProfile> {
    Json(UserProfile::from(auth.user))
}

/// `PATCH /api/users/updateuser`: update name, phone, or bio.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserProfile>, ApiError> {
    let Json(input) = payload?;
    let update = forms::validate_profile_update(&input)?;
    let user = state.users.update_profile(auth.user.id, &update).await?;
    tracing::info!(user_id = %user.id, "profile updated");
    Ok(Json(UserProfile::from(user)))
}

/// `PATCH /api/users/changepassword`: replace the password after checking the old one.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<ChangePasswordInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;
    let change = forms::validate_change_password(&input)?;
    auth_svc::change_password(state.users.as_ref(), &state.passwords, &auth.user, change).await?;
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

/// `GET /api/users/admin/users`: every account, admins only.
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.users.list().await?;
    tracing::debug!(admin_id = %admin.user.id, count = users.len(), "listed users");
    Ok(Json(users.iter().map(UserSummary::from).collect()))
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
