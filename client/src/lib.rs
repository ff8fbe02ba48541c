//! # client
//!
//! Leptos + WASM frontend for the HCIMS admin dashboard.
//!
//! Every CRUD screen is one `ResourceSpec` from `catalog`, rendered by the
//! generic `ResourcePage` through `DataTable`, `DynamicForm` and
//! `FieldInput`. Form, table and mutation state live in the `crud` crate;
//! this crate only renders them and talks to the REST backend.

#![recursion_limit = "256"]

pub mod app;
pub mod catalog;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
