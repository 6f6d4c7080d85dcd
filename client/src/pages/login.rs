//! Login page: email + password against `POST /api/users/login`.

use forms::LoginInput;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::use_auth;
use crate::util::form::first_error_message;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = LoginInput { email: email.get(), password: password.get() };
        let credentials = match forms::validate_login(&input) {
            Ok(credentials) => credentials,
            Err(errors) => {
                info.set(first_error_message(&errors));
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let navigate = navigate.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&credentials).await {
                Ok(user) => {
                    auth.update(|state| state.set_session(true, user.name));
                    navigate("/dashboard", Default::default());
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (credentials, auth, navigate);
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"Login"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Login"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-links">
                    <A href="/">"Home"</A>
                    " Don't have an account? "
                    <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
