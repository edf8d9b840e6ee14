//! # portal
//!
//! Leptos frontend for the CareHub marketplace dashboards: admin user, dues
//! and service management, the clinic's listings and slot calendar, and the
//! expert's bookings.
//!
//! Pages render on the server and hydrate in the browser. All data is local
//! fixture data from the `records` crate; nothing is persisted.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logging unavailable: {err}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
