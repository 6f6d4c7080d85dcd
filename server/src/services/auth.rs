//! Credential checks behind login, registration, and password change.
//!
//! Hashing and verification run on the blocking pool; Argon2 is deliberately
//! slow and would otherwise stall the async workers.

use std::sync::Arc;

use forms::{Credentials, PasswordChange, Registration};

use super::password::{PasswordError, Passwords};
use super::store::{NewUser, Role, StoreError, UserRecord, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("old password is incorrect")]
    WrongPassword,
    #[error(transparent)]
    Store(StoreError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("password worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::EmailTaken,
            other => Self::Store(other),
        }
    }
}

async fn hash_blocking(passwords: &Arc<Passwords>, password: String) -> Result<String, AuthError> {
    let passwords = Arc::clone(passwords);
    Ok(tokio::task::spawn_blocking(move || passwords.hash(&password)).await??)
}

async fn verify_blocking(passwords: &Arc<Passwords>, password: String, hash: Option<String>) -> Result<bool, AuthError> {
    let passwords = Arc::clone(passwords);
    let verified = tokio::task::spawn_blocking(move || match hash {
        Some(hash) => passwords.verify(&password, &hash),
        None => Ok(passwords.verify_dummy(&password)),
    })
    .await??;
    Ok(verified)
}

/// Check login credentials against the store.
///
/// Unknown email and wrong password both return
/// [`AuthError::InvalidCredentials`] after one full hash verification.
///
/// # Errors
///
/// Returns `InvalidCredentials` on any mismatch, or a store/hash failure.
pub async fn authenticate(
    users: &dyn UserStore,
    passwords: &Arc<Passwords>,
    credentials: Credentials,
) -> Result<UserRecord, AuthError> {
    let user = users.find_by_email(&credentials.email).await?;
    let hash = user.as_ref().map(|u| u.password_hash.clone());

    let verified = match verify_blocking(passwords, credentials.password, hash).await {
        Ok(verified) => verified,
        Err(AuthError::Password(PasswordError::MalformedHash(e))) => {
            tracing::error!(error = %e, "stored password hash is malformed");
            false
        }
        Err(e) => return Err(e),
    };

    match user {
        Some(user) if verified => Ok(user),
        _ => Err(AuthError::InvalidCredentials),
    }
}

/// Create a new account with role `user`.
///
/// # Errors
///
/// Returns `EmailTaken` if the email is already registered.
pub async fn register(
    users: &dyn UserStore,
    passwords: &Arc<Passwords>,
    registration: Registration,
) -> Result<UserRecord, AuthError> {
    let password_hash = hash_blocking(passwords, registration.password).await?;
    let user = users
        .insert(NewUser { email: registration.email, password_hash, name: registration.name, role: Role::User })
        .await?;
    tracing::info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Replace a user's password after confirming the old one.
///
/// # Errors
///
/// Returns `WrongPassword` if the old password does not verify.
pub async fn change_password(
    users: &dyn UserStore,
    passwords: &Arc<Passwords>,
    user: &UserRecord,
    change: PasswordChange,
) -> Result<(), AuthError> {
    if !verify_blocking(passwords, change.old_password, Some(user.password_hash.clone())).await? {
        return Err(AuthError::WrongPassword);
    }
    let password_hash = hash_blocking(passwords, change.new_password).await?;
    users.update_password(user.id, &password_hash).await?;
    tracing::info!(user_id = %user.id, "password changed");
    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
