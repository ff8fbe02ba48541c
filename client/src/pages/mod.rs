//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Every CRUD screen goes through `resource`; there are no
//! per-entity page modules.

pub mod dashboard;
pub mod layout;
pub mod login;
pub mod resource;
