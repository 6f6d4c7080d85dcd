//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration: it validates with the shared
//! `forms` rules, calls `net::api`, and updates the auth snapshot. Pages under
//! the route guard assume a session but still handle a rejected request.

pub mod dashboard;
pub mod edit_profile;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
