//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::use_auth;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="home">
            <h1>"Inventory management"</h1>
            <p>"Track products, stock levels, and value in one place."</p>
            <Show
                when=move || auth.get().is_logged_in
                fallback=|| {
                    view! {
                        <A href="/register">"Register"</A>
                        <A href="/login">"Login"</A>
                    }
                }
            >
                <A href="/dashboard">"Go to dashboard"</A>
            </Show>
        </section>
    }
}
