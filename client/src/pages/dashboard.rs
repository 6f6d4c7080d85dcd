//! Landing view after login.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::use_auth;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    view! {
        <section class="dashboard">
            <h2>{move || format!("Welcome, {}", auth.get().name)}</h2>
            <p>"Inventory stats and product lists appear here."</p>
            <div class="dashboard__links">
                <A href="/profile">"View profile"</A>
                <A href="/edit-profile">"Edit profile"</A>
            </div>
        </section>
    }
}
