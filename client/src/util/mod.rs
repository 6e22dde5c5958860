//! Utility helpers shared across client UI modules and the server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure logic lives here so the server gate and proxy can reuse it without a
//! reactive runtime.

pub mod auth;
pub mod validation;
