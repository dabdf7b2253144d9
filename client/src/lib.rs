//! # staffdesk-client
//!
//! Leptos + WASM dashboard for the workplace management backend
//! (employees, departments, complaints, reminders, permissions).
//!
//! This crate contains the session state machine, the REST API client and
//! per-resource service modules, storage backends, the route guard, and the
//! pages/components that render them. The `csr` feature enables the browser
//! transport, `localStorage`, and the mount entry point; without it the same
//! modules build natively so the `cli` frontend and the test suite can drive
//! them.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

/// Browser entry point: mount the dashboard into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
