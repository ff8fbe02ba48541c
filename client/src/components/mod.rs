//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome and the generic CRUD surfaces.
//! They report user intent through callbacks and read shared state from
//! Leptos context; none of them owns domain rows.

pub mod command_bar;
pub mod confirm_dialog;
pub mod data_table;
pub mod dynamic_form;
pub mod field_input;
pub mod nav_bar;
pub mod toast_stack;
