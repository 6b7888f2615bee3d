//! # client
//!
//! Leptos + WASM browser frontend for the classifieds marketplace.
//!
//! Session state, the route guard, and the authenticated fetch client live in
//! the `marketplace` crate. This crate binds them to the browser: a gloo-net
//! transport, `localStorage` persistence, reactive signals for the session
//! snapshot and toasts, and the route-level pages.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs the panic hook and logger, then mounts the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"client: logger already installed".into());
    }
    leptos::mount::mount_to_body(app::App);
}
