//! Profile edit page: name, phone, and bio, plus a password change form.

#[cfg(test)]
#[path = "edit_profile_test.rs"]
mod edit_profile_test;

use forms::{ChangePasswordInput, ProfileUpdate};
use leptos::prelude::*;

use super::profile::load_profile;
use crate::net::types::UserProfile;
use crate::state::auth::use_auth;
use crate::util::form::first_error_message;

/// Build the update body from the form fields. Every field is sent, so an
/// emptied phone or bio clears the stored value.
#[must_use]
pub fn profile_update(name: &str, phone: &str, bio: &str) -> ProfileUpdate {
    ProfileUpdate { name: Some(name.to_owned()), phone: Some(phone.to_owned()), bio: Some(bio.to_owned()) }
}

#[component]
pub fn EditProfilePage() -> impl IntoView {
    let auth = use_auth();
    let profile = RwSignal::new(None::<UserProfile>);
    load_profile(auth, profile);

    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let profile_info = RwSignal::new(String::new());

    let old_password = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password2 = RwSignal::new(String::new());
    let password_info = RwSignal::new(String::new());

    let busy = RwSignal::new(false);

    Effect::new(move || {
        if let Some(p) = profile.get() {
            name.set(p.name);
            phone.set(p.phone.unwrap_or_default());
            bio.set(p.bio.unwrap_or_default());
        }
    });

    let on_save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let update = match forms::validate_profile_update(&profile_update(&name.get(), &phone.get(), &bio.get())) {
            Ok(update) => update,
            Err(errors) => {
                profile_info.set(first_error_message(&errors));
                return;
            }
        };
        busy.set(true);
        profile_info.set("Saving...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::update_user(&update).await {
                Ok(updated) => {
                    auth.update(|state| state.set_session(true, updated.name.clone()));
                    profile.set(Some(updated));
                    profile_info.set("Profile updated.".to_owned());
                }
                Err(e) => profile_info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = update;
            busy.set(false);
        }
    };

    let on_change_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = ChangePasswordInput {
            old_password: old_password.get(),
            password: password.get(),
            password2: Some(password2.get()),
        };
        let change = match forms::validate_change_password(&input) {
            Ok(change) => change,
            Err(errors) => {
                password_info.set(first_error_message(&errors));
                return;
            }
        };
        busy.set(true);
        password_info.set("Changing password...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            match crate::net::api::change_password(&change).await {
                Ok(()) => {
                    old_password.set(String::new());
                    password.set(String::new());
                    password2.set(String::new());
                    password_info.set("Password changed.".to_owned());
                }
                Err(e) => password_info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = change;
            busy.set(false);
        }
    };

    view! {
        <section class="edit-profile">
            <h2>"Edit profile"</h2>
            <form class="profile-form" on:submit=on_save_profile>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Email"
                    <input
                        type="email"
                        disabled=true
                        prop:value=move || profile.get().map(|p| p.email).unwrap_or_default()
                    />
                </label>
                <label>
                    "Phone"
                    <input
                        type="text"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Bio"
                    <textarea
                        prop:value=move || bio.get()
                        on:input=move |ev| bio.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button type="submit" disabled=move || busy.get()>
                    "Save changes"
                </button>
                <Show when=move || !profile_info.get().is_empty()>
                    <p class="form-message">{move || profile_info.get()}</p>
                </Show>
            </form>

            <h3>"Change password"</h3>
            <form class="profile-form" on:submit=on_change_password>
                <input
                    type="password"
                    placeholder="Old password"
                    prop:value=move || old_password.get()
                    on:input=move |ev| old_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="New password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm new password"
                    prop:value=move || password2.get()
                    on:input=move |ev| password2.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    "Change password"
                </button>
                <Show when=move || !password_info.get().is_empty()>
                    <p class="form-message">{move || password_info.get()}</p>
                </Show>
            </form>
        </section>
    }
}
