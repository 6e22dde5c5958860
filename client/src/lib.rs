//! # client
//!
//! Leptos frontend for Where It Goes: sign-in and sign-up forms and a
//! session-aware home page.
//!
//! The crate builds twice: with `ssr` for server rendering inside the `server`
//! binary, and with `hydrate` as the WASM bundle that takes over in the
//! browser. Validation, form state, and page-entry rules are plain Rust so the
//! server can reuse them.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
