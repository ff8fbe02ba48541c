//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards read this to decide whether to redirect to `/login`. The
//! source of truth is the token pair in `localStorage`; this mirrors it so the
//! UI can react without polling storage.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

/// Authentication state: whether a token is present and whether it has been
/// checked yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub signed_in: bool,
    /// True until the browser has read `localStorage` after hydration.
    pub loading: bool,
    pub email: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { signed_in: false, loading: true, email: None }
    }
}

impl AuthState {
    /// Settled state from a storage read.
    #[must_use]
    pub fn resolved(signed_in: bool) -> Self {
        Self { signed_in, loading: false, email: None }
    }

    pub fn sign_out(&mut self) {
        self.signed_in = false;
        self.email = None;
    }

    /// Redirect only once loading finished and no session exists.
    #[must_use]
    pub fn should_redirect(&self) -> bool {
        !self.loading && !self.signed_in
    }
}
