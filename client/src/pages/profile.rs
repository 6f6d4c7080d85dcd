//! Read-only profile of the signed-in user.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::UserProfile;
use crate::state::auth::{AuthState, use_auth};

/// Label/value pairs shown on the profile card, blanks rendered as "-".
#[must_use]
pub fn profile_rows(profile: &UserProfile) -> Vec<(&'static str, String)> {
    let or_dash = |v: Option<&str>| v.filter(|s| !s.is_empty()).unwrap_or("-").to_owned();
    vec![
        ("Name", profile.name.clone()),
        ("Email", profile.email.clone()),
        ("Phone", or_dash(profile.phone.as_deref())),
        ("Bio", or_dash(profile.bio.as_deref())),
        ("Role", profile.role.clone()),
    ]
}

/// Fetch the profile into `profile`. A missing profile means the server no
/// longer accepts the session, so the snapshot is cleared.
pub fn load_profile(auth: RwSignal<AuthState>, profile: RwSignal<Option<UserProfile>>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        match crate::net::api::get_user().await {
            Some(p) => {
                auth.update(|state| state.set_session(true, p.name.clone()));
                profile.set(Some(p));
            }
            None => auth.update(AuthState::clear_session),
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = (auth, profile);
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let profile = RwSignal::new(None::<UserProfile>);
    load_profile(auth, profile);

    view! {
        <section class="profile">
            <h2>"Profile"</h2>
            {move || match profile.get() {
                Some(p) => {
                    view! {
                        <dl class="profile__card">
                            {profile_rows(&p)
                                .into_iter()
                                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                .collect_view()}
                        </dl>
                    }
                        .into_any()
                }
                None => view! { <p>"Loading profile..."</p> }.into_any(),
            }}
            <A href="/edit-profile">"Edit profile"</A>
        </section>
    }
}
