//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if auth.get().should_redirect() {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Drop the stored session and return to the login page.
pub fn sign_out(auth: RwSignal<AuthState>) {
    crate::util::session::clear_tokens();
    auth.update(AuthState::sign_out);
    #[cfg(feature = "hydrate")]
    {
        if let Some(w) = web_sys::window() {
            let _ = w.location().set_href("/login");
        }
    }
}
