//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared auth signal from Leptos context and render
//! chrome around the route-level pages.

pub mod header;
pub mod protected_routes;
