//! # blastwatch
//!
//! Leptos + WASM browser client for the shot-blasting machine monitoring
//! dashboard (machine status, daily reports, historical charts, settings).
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns authentication and all dashboard data. This crate owns the
//! client half of session-authenticated navigation:
//! - `state::session` holds the credential + identity and persists them.
//! - `net::api` attaches that credential to every backend call.
//! - `nav` maps paths to views and decides allow/redirect before rendering.
//!
//! Pages and components are thin presentation on top of those three.

pub mod app;
pub mod components;
pub mod config;
pub mod nav;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
