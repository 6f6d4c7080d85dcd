//! Session token issuance and validation.
//!
//! ARCHITECTURE
//! ============
//! A session is an HS256-signed token carrying the user id (`sub`), a random
//! token id (`jti`) and an absolute expiry (`exp`). Nothing is stored at
//! login. Validation checks signature and expiry, then the revocation set,
//! then resolves `sub` against the user store so a deleted account stops
//! authenticating immediately.
//!
//! TRADE-OFFS
//! ==========
//! Expiry is compared against an explicit `now` with zero leeway, so a token
//! issued at T is accepted through T+ttl and rejected strictly after. Tokens
//! are never renewed; a new one comes only from login or registration.

use std::fmt::Write;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::store::{RevocationStore, StoreError, UserRecord, UserStore};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 16-byte hex token id.
#[must_use]
pub(crate) fn generate_token_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signing failed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("token expired")]
    Expired,
}

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Token id, the key used for revocation.
    pub jti: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Absolute expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    /// Expiry as a timestamp, clamped to the epoch for out-of-range values.
    #[must_use]
    pub fn expires_at(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.exp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

/// A freshly signed token and the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: Claims,
}

/// Signing keys plus the configured lifetime of new tokens.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a new token for `user_id`, valid from `now` for the configured ttl.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, user_id: Uuid, now: OffsetDateTime) -> Result<IssuedSession, TokenError> {
        let iat = now.unix_timestamp();
        let claims = Claims { sub: user_id, jti: generate_token_id(), iat, exp: iat + self.ttl_secs };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Sign)?;
        Ok(IssuedSession { token, claims })
    }

    /// Check signature and expiry, returning the claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for a malformed or forged token and
    /// [`TokenError::Expired`] once `now` is past `exp`.
    pub fn verify(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Invalid)?;
        if now.unix_timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}

/// Identity resolved from a valid session token.
#[derive(Debug, Clone)]
pub struct ValidSession {
    pub user: UserRecord,
    pub claims: Claims,
}

/// Resolve a raw session token to a user.
///
/// `Ok(None)` means unauthenticated: bad signature, expired, revoked, or the
/// user no longer exists. Only store failures surface as errors.
pub async fn validate_session(
    keys: &SessionKeys,
    users: &dyn UserStore,
    revocations: &dyn RevocationStore,
    token: &str,
    now: OffsetDateTime,
) -> Result<Option<ValidSession>, StoreError> {
    let claims = match keys.verify(token, now) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "session token rejected");
            return Ok(None);
        }
    };

    if revocations.is_revoked(&claims.jti).await? {
        tracing::debug!(jti = %claims.jti, "session token revoked");
        return Ok(None);
    }

    let Some(user) = users.find_by_id(claims.sub).await? else {
        tracing::debug!(user_id = %claims.sub, "session user no longer exists");
        return Ok(None);
    };

    Ok(Some(ValidSession { user, claims }))
}

/// Revoke a session until its natural expiry and drop stale revocations.
pub async fn revoke_session(
    revocations: &dyn RevocationStore,
    claims: &Claims,
    now: OffsetDateTime,
) -> Result<(), StoreError> {
    revocations.revoke(&claims.jti, claims.expires_at()).await?;
    let purged = revocations.purge_expired(now).await?;
    if purged > 0 {
        tracing::debug!(purged, "purged expired revocations");
    }
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
