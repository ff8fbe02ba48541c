//! Networking: REST access to the HR backend.

pub mod api;
