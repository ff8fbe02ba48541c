//! Application chrome: top bar and resource sidebar.

use leptos::prelude::*;

use crate::catalog;
use crate::components::command_bar::CommandBar;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

/// Top bar with sidebar toggle, command bar, theme toggle and sign-out.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <header class="nav-bar">
            <button
                class="btn nav-bar__menu"
                title="Toggle sidebar"
                on:click=move |_| ui.update(|u| u.sidebar_open = !u.sidebar_open)
            >
                "☰"
            </button>
            <a class="nav-bar__brand" href="/">"HCIMS"</a>
            <CommandBar/>
            <span class="nav-bar__spacer"></span>
            <button
                class="btn nav-bar__dark-toggle"
                title="Toggle dark mode"
                on:click=move |_| {
                    let next = crate::util::dark_mode::toggle(ui.get_untracked().dark_mode);
                    ui.update(|u| u.dark_mode = next);
                }
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>
            <button class="btn nav-bar__logout" on:click=move |_| crate::util::auth::sign_out(auth)>
                "Sign out"
            </button>
        </header>
    }
}

/// Links to every resource page; hidden when the sidebar is collapsed.
#[component]
pub fn Sidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let links = catalog::resources()
        .unwrap_or_default()
        .into_iter()
        .map(|spec| {
            let href = catalog::resource_path(&spec.key);
            view! {
                <li>
                    <a class="sidebar__link" href=href>{spec.heading}</a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="sidebar" class:sidebar--collapsed=move || !ui.get().sidebar_open>
            <ul class="sidebar__list">
                <li>
                    <a class="sidebar__link" href="/">"Dashboard"</a>
                </li>
                {links}
            </ul>
        </nav>
    }
}
