//! Generic CRUD page for any catalog resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted at `/r/:resource`. The page looks the resource up in the catalog,
//! owns a `ResourceCoordinator` for as long as it is mounted, and is the only
//! place that talks to the backend for it.
//!
//! FLOW
//! ====
//! - every user action goes through the coordinator first (optimistic)
//! - unsettled mutations are sent with `HttpStore`; the answer is fed back
//!   with `resolve`, which keeps, reverts, or marks the list stale
//! - a stale list is refetched; remote resources start stale
//! - all async work runs under the page's `MountScope`, so answers that
//!   arrive after navigation are dropped

#[cfg(test)]
#[path = "resource_test.rs"]
mod resource_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;
use serde_json::{Map, Value};
use uuid::Uuid;

use crud::{MountScope, Mutation, OpKind, Outcome, RecordId, ResourceCoordinator, ResourceSpec, Settlement};

use crate::catalog;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::data_table::DataTable;
use crate::pages::layout::PageLayout;
use crate::state::auth::AuthState;
use crate::state::toasts::{ToastKind, ToastState};

#[component]
pub fn ResourcePage() -> impl IntoView {
    let params = use_params_map();
    let key = move || params.read().get("resource").unwrap_or_default();

    view! {
        <PageLayout>
            {move || match catalog::find(&key()) {
                Some(spec) => view! { <ResourceView spec=spec/> }.into_any(),
                None => {
                    view! {
                        <section class="resource-page resource-page--missing">
                            <Title text="Not found · HCIMS"/>
                            <h1>"Unknown page"</h1>
                            <a href="/">"Back to dashboard"</a>
                        </section>
                    }
                        .into_any()
                }
            }}
        </PageLayout>
    }
}

#[component]
fn ResourceView(spec: ResourceSpec) -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let heading = spec.heading.clone();
    let key = spec.key.clone();
    let columns = spec.columns.clone();
    let actions = spec.actions;
    let confirm_delete = spec.confirm_delete;

    let coordinator = RwSignal::new(ResourceCoordinator::new(spec));
    let scope = MountScope::new();
    {
        let scope = scope.clone();
        on_cleanup(move || scope.close());
    }
    let pending_delete = RwSignal::new(None::<RecordId>);

    let notify = {
        let heading = heading.clone();
        Callback::new(move |settlement: Settlement| {
            let (kind, message) = settlement_toast(&heading, &settlement);
            toasts.update(|t| {
                t.push(kind, message);
            });
        })
    };

    // Feed a backend answer back into the coordinator.
    let settle = Callback::new(move |(op_id, outcome): (Uuid, Outcome)| {
        if let Some(settlement) = coordinator.try_update(|c| c.resolve(op_id, outcome)).flatten() {
            notify.run(settlement);
        }
    });

    let dispatch = {
        let scope = scope.clone();
        Callback::new(move |mutation: Mutation| {
            if mutation.settled {
                notify.run(Settlement { kind: mutation.kind, outcome: Outcome::Confirmed(None) });
                return;
            }
            send_mutation(&scope, coordinator, mutation, settle, auth);
        })
    };

    load_remote_options(&scope, coordinator, toasts);
    refetch_when_stale(&scope, coordinator, toasts, auth, heading.clone());

    let on_add = Callback::new(move |()| {
        coordinator.update(|c| log_busy(c.open_add()));
    });
    let on_edit = Callback::new(move |id: RecordId| {
        coordinator.update(|c| log_busy(c.open_edit(&id)));
    });
    let on_cancel = Callback::new(move |()| {
        coordinator.update(|c| log_busy(c.cancel()));
    });
    let on_submit = Callback::new(move |payload: Map<String, Value>| {
        match coordinator.try_update(|c| c.submit(payload)) {
            Some(Ok(mutation)) => dispatch.run(mutation),
            Some(Err(e)) => {
                toasts.update(|t| {
                    t.error(e.to_string());
                });
            }
            None => {}
        }
    });
    let delete_now = Callback::new(move |id: RecordId| {
        if let Some(mutation) = coordinator.try_update(|c| c.delete(&id)).flatten() {
            dispatch.run(mutation);
        }
    });
    let on_delete = Callback::new(move |id: RecordId| {
        if confirm_delete {
            pending_delete.set(Some(id));
        } else {
            delete_now.run(id);
        }
    });
    let on_confirm_delete = Callback::new(move |()| {
        if let Some(id) = pending_delete.get_untracked() {
            pending_delete.set(None);
            delete_now.run(id);
        }
    });
    let on_dismiss_delete = Callback::new(move |()| pending_delete.set(None));

    let rows = Signal::derive(move || coordinator.with(|c| c.records().to_vec()));
    let schema = Signal::derive(move || coordinator.with(|c| c.spec().schema.clone()));
    let modal_open = Signal::derive(move || coordinator.with(ResourceCoordinator::modal_open));
    let modal_title = Signal::derive(move || coordinator.with(ResourceCoordinator::modal_title));
    let initial = Signal::derive(move || coordinator.with(ResourceCoordinator::draft_initial));
    let loading = Signal::derive(move || coordinator.with(ResourceCoordinator::is_submitting));
    let fetching = move || coordinator.with(|c| c.is_stale() && c.records().is_empty());

    let title = format!("{heading} · HCIMS");
    let confirm_text = format!("This {} will be permanently removed.", heading.to_lowercase());
    let confirm_title = format!("Delete {heading}?");

    view! {
        <section class="resource-page">
            <Title text=title/>
            <Show when=fetching>
                <p class="resource-page__loading">"Loading..."</p>
            </Show>
            <DataTable
                resource=key
                heading=heading
                columns=columns
                rows=rows
                schema=schema
                actions=actions
                on_submit=on_submit
                on_add=on_add
                on_edit=on_edit
                on_delete=on_delete
                on_cancel=on_cancel
                modal_open=modal_open
                modal_title=modal_title
                initial=initial
                loading=loading
            />
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title=confirm_title.clone()
                    message=confirm_text.clone()
                    on_confirm=on_confirm_delete
                    on_cancel=on_dismiss_delete
                />
            </Show>
        </section>
    }
}

/// Toast for a settled mutation.
fn settlement_toast(heading: &str, settlement: &Settlement) -> (ToastKind, String) {
    match &settlement.outcome {
        Outcome::Confirmed(_) => (ToastKind::Success, format!("{heading} {}!", settlement.kind.past_tense())),
        Outcome::Rejected(reason) => {
            let verb = match settlement.kind {
                OpKind::Create => "add",
                OpKind::Update => "update",
                OpKind::Delete => "delete",
            };
            (ToastKind::Error, format!("Could not {verb} {}: {reason}", heading.to_lowercase()))
        }
        Outcome::Unknown => {
            (ToastKind::Info, format!("No answer from the server; reloading {}.", heading.to_lowercase()))
        }
    }
}

fn log_busy(result: Result<(), crud::CoordinatorError>) {
    if let Err(e) = result {
        leptos::logging::debug_warn!("ignored table action: {e}");
    }
}

// =============================================================
// Backend calls
// =============================================================

/// Send one mutation and resolve it with the answer.
fn send_mutation(
    scope: &MountScope,
    coordinator: RwSignal<ResourceCoordinator>,
    mutation: Mutation,
    settle: Callback<(Uuid, Outcome)>,
    auth: RwSignal<AuthState>,
) {
    #[cfg(feature = "hydrate")]
    {
        let Some(endpoint) = coordinator.with_untracked(|c| c.spec().endpoint.clone()) else {
            return;
        };
        let guard = scope.guard();
        leptos::task::spawn_local(async move {
            let store = crate::net::api::HttpStore::new(endpoint);
            let result = guard.run(crud::execute(&store, &mutation.request)).await;
            match result {
                Err(crud::StoreError::Cancelled) => {}
                Err(crud::StoreError::Unauthorized) => {
                    auth.update(AuthState::sign_out);
                    settle.run((mutation.op_id, crud::StoreError::Unauthorized.outcome()));
                }
                other => settle.run((mutation.op_id, Outcome::from(other))),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, coordinator, mutation, settle, auth);
    }
}

/// Fetch the list whenever the coordinator is stale.
fn refetch_when_stale(
    scope: &MountScope,
    coordinator: RwSignal<ResourceCoordinator>,
    toasts: RwSignal<ToastState>,
    auth: RwSignal<AuthState>,
    heading: String,
) {
    #[cfg(feature = "hydrate")]
    {
        use crud::RecordStore;

        let in_flight = RwSignal::new(false);
        let scope = scope.clone();
        Effect::new(move || {
            if !coordinator.with(ResourceCoordinator::is_stale) || in_flight.get_untracked() {
                return;
            }
            let Some(endpoint) = coordinator.with_untracked(|c| c.spec().endpoint.clone()) else {
                return;
            };
            in_flight.set(true);
            let guard = scope.guard();
            let heading = heading.clone();
            leptos::task::spawn_local(async move {
                let store = crate::net::api::HttpStore::new(endpoint);
                match guard.run(store.list()).await {
                    Ok(records) => coordinator.update(|c| c.replace_all(records)),
                    Err(crud::StoreError::Cancelled) => return,
                    Err(crud::StoreError::Unauthorized) => auth.update(AuthState::sign_out),
                    Err(e) => {
                        leptos::logging::warn!("loading {heading} failed: {e}");
                        toasts.update(|t| {
                            t.error(format!("Could not load {}: {e}", heading.to_lowercase()));
                        });
                    }
                }
                in_flight.set(false);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, coordinator, toasts, auth, heading);
    }
}

/// Load dropdown options for remote-backed select fields, once per mount.
fn load_remote_options(scope: &MountScope, coordinator: RwSignal<ResourceCoordinator>, toasts: RwSignal<ToastState>) {
    #[cfg(feature = "hydrate")]
    {
        let remotes = coordinator.with_untracked(|c| c.spec().remote_options.clone());
        for remote in remotes {
            let guard = scope.guard();
            leptos::task::spawn_local(async move {
                match guard.run(crate::net::api::fetch_options(&remote)).await {
                    Ok(options) => coordinator.update(|c| {
                        match c.spec().schema.with_options(&remote.field_id, options) {
                            Ok(schema) => c.set_schema(schema),
                            Err(e) => leptos::logging::warn!("options for {} rejected: {e}", remote.field_id),
                        }
                    }),
                    Err(crud::StoreError::Cancelled) => {}
                    Err(e) => {
                        leptos::logging::warn!("loading options for {} failed: {e}", remote.field_id);
                        toasts.update(|t| {
                            t.error(format!("Could not load {} options", remote.field_id));
                        });
                    }
                }
            });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (scope, coordinator, toasts);
    }
}
