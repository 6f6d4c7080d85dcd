//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views apply identical unauthenticated redirect behavior. The
//! decision is a pure function of the auth snapshot; the effect only acts on
//! it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// What a protected view should do for the current snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session known good: render the protected subtree.
    Render,
    /// Login status not answered yet.
    Wait,
    /// No session: navigate away.
    Redirect(&'static str),
}

#[must_use]
pub fn guard_decision(state: &AuthState) -> GuardDecision {
    if state.loading {
        GuardDecision::Wait
    } else if state.is_logged_in {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

/// Redirect whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = guard_decision(&auth.get()) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
