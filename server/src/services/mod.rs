//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential checks, token handling and persistence so
//! route handlers can stay focused on protocol translation and cookie
//! plumbing.

pub mod auth;
#[cfg(test)]
pub mod memory_store;
pub mod password;
pub mod pg_store;
pub mod session;
pub mod store;
