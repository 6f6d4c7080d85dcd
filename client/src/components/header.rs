//! Top navigation bar, aware of the current session.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::use_auth;

/// Site header. A confirmed logout clears the auth snapshot and any
/// protected view on screen then redirects through its guard. A failed one
/// keeps the session and shows why.
#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let logout_error = RwSignal::new(String::new());

    let on_logout = move |_| {
        logout_error.set(String::new());
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::logout().await;
            if let Err(e) = &result {
                log::warn!("logout request failed: {e}");
            }
            let mut failure = None;
            auth.update(|state| failure = state.after_logout(&result));
            if let Some(message) = failure {
                logout_error.set(message);
            }
        });
    };

    view! {
        <header class="site-header">
            <A href="/">"Inventory"</A>
            <nav class="site-header__nav">
                <Show
                    when=move || auth.get().is_logged_in
                    fallback=|| {
                        view! {
                            <A href="/login">"Login"</A>
                            <A href="/register">"Register"</A>
                        }
                    }
                >
                    <span class="site-header__name">{move || format!("Hi, {}", auth.get().name)}</span>
                    <A href="/dashboard">"Dashboard"</A>
                    <A href="/profile">"Profile"</A>
                    <button class="site-header__logout" on:click=on_logout>
                        "Logout"
                    </button>
                    <Show when=move || !logout_error.get().is_empty()>
                        <span class="site-header__error">{move || logout_error.get()}</span>
                    </Show>
                </Show>
            </nav>
        </header>
    }
}
