//! Credential and revocation store seams.
//!
//! ARCHITECTURE
//! ============
//! Handlers and the session validator only see the [`UserStore`] and
//! [`RevocationStore`] traits. Production wires both to Postgres
//! (`pg_store`); tests wire them to an in-memory map.

use async_trait::async_trait;
use forms::ProfileUpdate;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// ROLE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// A stored role string that is neither `user` nor `admin`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Stored user identity. Never serialized directly: the password hash must
/// not leave the server.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Fields required to create a user. The email must already be normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
}

/// Non-sensitive identity returned by login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl From<&UserRecord> for UserSummary {
    fn from(user: &UserRecord) -> Self {
        Self { id: user.id, name: user.name.clone(), role: user.role }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("user not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
    #[error("database error: {0}")]
    Db(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => Self::DuplicateEmail,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Unavailable(err),
            other => Self::Db(other),
        }
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Persistent repository of user identity records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Create a user. Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Apply the provided profile fields, leaving absent ones unchanged. An
    /// empty phone or bio clears the stored value.
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<UserRecord, StoreError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), StoreError>;

    /// All users ordered by creation time.
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;
}

/// Set of session token ids invalidated before their natural expiry.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a token id as revoked. Revoking the same id twice is a no-op.
    async fn revoke(&self, token_id: &str, expires_at: OffsetDateTime) -> Result<(), StoreError>;

    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError>;

    /// Drop entries whose token would be expired anyway. Returns the count removed.
    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, StoreError>;
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
