//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser storage, session tokens, and pure text helpers. Anything touching
//! `window` is gated on `hydrate` and degrades to a no-op during SSR.

pub mod auth;
pub mod command;
pub mod dark_mode;
pub mod markdown;
pub mod session;
pub mod ui_persistence;
