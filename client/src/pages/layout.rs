//! Authenticated page frame: top bar, sidebar and content area.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_bar::{NavBar, Sidebar};
use crate::state::auth::AuthState;

/// Wraps signed-in pages. Redirects to `/login` once auth has loaded
/// without a session.
#[component]
pub fn PageLayout(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, use_navigate());

    view! {
        <Show
            when=move || auth.get().signed_in
            fallback=move || {
                view! {
                    <div class="page-loading">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="app-layout">
                <NavBar/>
                <div class="app-layout__body">
                    <Sidebar/>
                    <main class="app-layout__main">{children()}</main>
                </div>
            </div>
        </Show>
    }
}
