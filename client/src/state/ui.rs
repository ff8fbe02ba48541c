//! Local UI chrome state (theme, sidebar, command bar feedback).

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    /// Last command-bar message, e.g. an unrecognised command.
    pub command_feedback: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: false, sidebar_open: true, command_feedback: None }
    }
}
