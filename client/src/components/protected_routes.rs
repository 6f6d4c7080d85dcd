//! Route guard wrapper for views that need a session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;
use crate::util::auth::{GuardDecision, guard_decision, install_unauth_redirect};

/// Render `children` only for a logged-in snapshot; wait while the login
/// status is pending; otherwise navigate to the login page.
///
/// This only shapes the UI. Every protected API call is checked server-side.
#[component]
pub fn ProtectedRoutes(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    install_unauth_redirect(auth, use_navigate());

    let decision = move || guard_decision(&auth.get());

    view! {
        <Show
            when=move || decision() == GuardDecision::Render
            fallback=move || {
                (decision() == GuardDecision::Wait)
                    .then(|| view! { <p class="guard-wait">"Checking session..."</p> })
            }
        >
            <div class="protected-layout">{children()}</div>
        </Show>
    }
}
