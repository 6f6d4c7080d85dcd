//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` makes credentialed HTTP calls against the API origin and `types`
//! defines the response bodies it decodes.

pub mod api;
pub mod types;
