//! Reactive application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wraps each of these in an `RwSignal` and provides it once; pages and
//! components read them with `expect_context`. Per-resource row data is not
//! here: each `ResourcePage` owns its coordinator for as long as it is mounted.

pub mod auth;
pub mod toasts;
pub mod ui;
