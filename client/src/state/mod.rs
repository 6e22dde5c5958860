//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the home page's view model, `session` is the app-wide session
//! store, and `form` is the per-form controller state.

pub mod auth;
pub mod form;
pub mod session;
