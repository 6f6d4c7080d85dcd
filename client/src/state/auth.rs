//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root component provides one `RwSignal<AuthState>` via context. Pages
//! change it only through [`AuthState::set_session`],
//! [`AuthState::clear_session`] and [`AuthState::after_logout`]; the route
//! guard and header read it. The
//! snapshot drives rendering only. The server decides on every request.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

/// Client view of the session: logged-in flag and display name.
///
/// `loading` stays `true` from startup until the first login-status answer
/// arrives, so guards can wait instead of redirecting a user who is in fact
/// signed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub is_logged_in: bool,
    pub name: String,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { is_logged_in: false, name: String::new(), loading: true }
    }
}

impl AuthState {
    /// Record a login-status answer. The name is dropped when logged out.
    pub fn set_session(&mut self, logged_in: bool, name: impl Into<String>) {
        self.is_logged_in = logged_in;
        self.name = if logged_in { name.into() } else { String::new() };
        self.loading = false;
    }

    /// Forget the session after logout or a rejected request.
    pub fn clear_session(&mut self) {
        self.set_session(false, String::new());
    }

    /// Apply the outcome of a logout request. The session is only forgotten
    /// once the server confirms; on failure it is kept and the message to
    /// show is returned.
    pub fn after_logout(&mut self, result: &Result<(), String>) -> Option<String> {
        match result {
            Ok(()) => {
                self.clear_session();
                None
            }
            Err(e) => Some(format!("Logout failed: {e}")),
        }
    }
}

/// The auth signal provided by the root component.
///
/// # Panics
///
/// Panics if called outside the tree under `App`.
pub fn use_auth() -> RwSignal<AuthState> {
    expect_context::<RwSignal<AuthState>>()
}

/// Seed `auth` from the server's view of the session cookie.
///
/// Asks `GET /api/users/loggedin`; when logged in, the display name comes from
/// the profile endpoint.
pub fn hydrate(auth: RwSignal<AuthState>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let logged_in = crate::net::api::logged_in().await;
        let name = if logged_in {
            crate::net::api::get_user().await.map(|p| p.name).unwrap_or_default()
        } else {
            String::new()
        };
        log::debug!("session hydrated: logged_in={logged_in}");
        auth.update(|state| state.set_session(logged_in, name));
    });

    #[cfg(not(feature = "csr"))]
    auth.update(AuthState::clear_session);
}
