//! Header command bar: type where you want to go.
//!
//! Typed commands such as "go to leave requests" are matched against the
//! catalog's routes with `match_command`. Unmatched commands leave a short
//! note in `UiState::command_feedback` instead of navigating.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::catalog;
use crate::state::ui::UiState;
use crate::util::command::match_command;

#[component]
pub fn CommandBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let navigate = use_navigate();
    let routes = StoredValue::new(catalog::command_routes());
    let input = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let command = input.get_untracked();
        if command.trim().is_empty() {
            return;
        }
        let target = routes.with_value(|r| match_command(&command, r).map(ToOwned::to_owned));
        match target {
            Some(path) => {
                ui.update(|u| u.command_feedback = None);
                input.set(String::new());
                navigate(&path, NavigateOptions::default());
            }
            None => ui.update(|u| u.command_feedback = Some(format!("No page matches \"{}\"", command.trim()))),
        }
    };

    view! {
        <form class="command-bar" on:submit=on_submit>
            <input
                class="command-bar__input"
                type="search"
                placeholder="Go to... (e.g. leave requests)"
                prop:value=move || input.get()
                on:input=move |ev| {
                    input.set(event_target_value(&ev));
                    ui.update(|u| u.command_feedback = None);
                }
            />
            <Show when=move || ui.get().command_feedback.is_some()>
                <span class="command-bar__feedback">{move || ui.get().command_feedback.unwrap_or_default()}</span>
            </Show>
        </form>
    }
}
