//! # client
//!
//! Leptos + WASM single-page frontend for the inventory app's session flows.
//!
//! This crate holds the login, registration, and profile pages, the
//! context-provided auth state, the route guard, and the REST helpers that
//! talk to the `server` API with credentialed requests. Form rules come from
//! the shared `forms` crate so the browser and the API agree on what is valid.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install panic/log hooks and mount [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
