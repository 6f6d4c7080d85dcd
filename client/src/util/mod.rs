//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep guard and form decisions as plain functions so pages
//! stay thin and the logic is testable off the browser.

pub mod auth;
pub mod form;
