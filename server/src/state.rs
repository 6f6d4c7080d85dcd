//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the credential and revocation stores behind trait objects, the
//! session signing keys, and the password hasher. There is no per-session
//! in-process state; everything a request needs is in its cookie or the store.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::services::password::Passwords;
use crate::services::session::SessionKeys;
use crate::services::store::{RevocationStore, UserStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub revocations: Arc<dyn RevocationStore>,
    pub keys: Arc<SessionKeys>,
    pub passwords: Arc<Passwords>,
    pub session: Arc<SessionConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        revocations: Arc<dyn RevocationStore>,
        passwords: Passwords,
        session: SessionConfig,
    ) -> Self {
        let keys = SessionKeys::new(session.secret.as_bytes(), session.ttl_secs);
        Self {
            users,
            revocations,
            keys: Arc::new(keys),
            passwords: Arc::new(passwords),
            session: Arc::new(session),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
