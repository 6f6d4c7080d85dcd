//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::{header::Header, protected_routes::ProtectedRoutes};
use crate::pages::{
    dashboard::DashboardPage, edit_profile::EditProfilePage, home::HomePage, login::LoginPage, profile::ProfilePage,
    register::RegisterPage,
};
use crate::state::auth::{AuthState, hydrate};

/// Root application component.
///
/// Provides the auth state context, asks the API whether the browser already
/// holds a session, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    hydrate(auth);

    view! {
        <Title text="Inventory"/>

        <Router>
            <Header/>
            <main>
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>

                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoutes><DashboardPage/></ProtectedRoutes> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <ProtectedRoutes><ProfilePage/></ProtectedRoutes> }
                    />
                    <Route
                        path=StaticSegment("edit-profile")
                        view=|| view! { <ProtectedRoutes><EditProfilePage/></ProtectedRoutes> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
