//! Paginated table with an actions column and the add/edit modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The table never owns rows. It renders whatever `rows` holds, slices it
//! client-side, and reports row actions and form submissions through
//! callbacks. The only state it keeps is the current page, the page size
//! (remembered per resource in `localStorage`), and, when the caller does
//! not control it, whether the modal is open.

use leptos::prelude::*;
use serde_json::{Map, Value};

use crud::{AddTrigger, ColumnDescriptor, FieldSchema, PAGE_SIZES, Pagination, Record, RecordId, RowAction, RowActions};

use crate::components::dynamic_form::DynamicForm;
use crate::util::ui_persistence;

#[component]
pub fn DataTable(
    /// Key used to remember the page size.
    resource: String,
    heading: String,
    columns: Vec<ColumnDescriptor>,
    #[prop(into)] rows: Signal<Vec<Record>>,
    #[prop(into)] schema: Signal<FieldSchema>,
    actions: RowActions,
    on_submit: Callback<Map<String, Value>>,
    /// Supplying this hands the add button to the caller.
    #[prop(optional)]
    on_add: Option<Callback<()>>,
    #[prop(optional)] on_edit: Option<Callback<RecordId>>,
    #[prop(optional)] on_delete: Option<Callback<RecordId>>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    /// Caller-controlled modal visibility.
    #[prop(optional, into)]
    modal_open: Option<Signal<bool>>,
    #[prop(optional, into)] modal_title: Option<Signal<String>>,
    #[prop(optional, into)] initial: Option<Signal<Map<String, Value>>>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let pagination = RwSignal::new(Pagination::default());
    let internal_open = RwSignal::new(false);
    let trigger = if on_add.is_some() { AddTrigger::External } else { AddTrigger::Internal };
    let is_open = move || modal_open.map_or_else(|| internal_open.get(), |s| s.get());

    let resource_key = StoredValue::new(resource);
    Effect::new(move || {
        if let Some(size) = ui_persistence::load_page_size(&resource_key.get_value()) {
            pagination.update(|p| {
                p.set_page_size(size);
            });
        }
    });

    Effect::new(move || {
        let total = rows.with(Vec::len);
        pagination.update(|p| p.clamp_to(total));
    });

    let on_add_click = move |_| {
        let mut open = internal_open.get_untracked();
        if trigger.press(&mut open) {
            if let Some(cb) = on_add {
                cb.run(());
            }
        } else {
            internal_open.set(open);
        }
    };

    let close_modal = Callback::new(move |()| {
        internal_open.set(false);
        if let Some(cb) = on_cancel {
            cb.run(());
        }
    });

    let submit = Callback::new(move |payload: Map<String, Value>| {
        if modal_open.is_none() {
            internal_open.set(false);
        }
        on_submit.run(payload);
    });

    let on_page_size = move |ev: leptos::ev::Event| {
        let Ok(size) = event_target_value(&ev).parse::<usize>() else {
            return;
        };
        if pagination.try_update(|p| p.set_page_size(size)).unwrap_or(false) {
            ui_persistence::save_page_size(&resource_key.get_value(), size);
        }
    };

    let total = move || rows.with(Vec::len);
    let page_count = move || pagination.get().page_count(total());
    let go_to = move |page: usize| {
        let total = rows.with_untracked(Vec::len);
        pagination.update(|p| p.set_page(page, total));
    };

    let enabled_actions = actions.enabled();
    let show_actions = actions.has_column();
    let column_count = columns.len() + usize::from(show_actions);
    let header_cells = columns.iter().map(|c| view! { <th>{c.title.clone()}</th> }).collect_view();
    let columns = StoredValue::new(columns);
    let enabled_actions = StoredValue::new(enabled_actions);

    let body = move || {
        let page = pagination.get();
        rows.with(|all| {
            let visible = page.slice(all);
            if visible.is_empty() {
                return view! {
                    <tr class="data-table__empty">
                        <td colspan=column_count.to_string()>"No records found."</td>
                    </tr>
                }
                .into_any();
            }
            visible
                .iter()
                .map(|row| {
                    let cells = columns.with_value(|cols| {
                        cols.iter().map(|c| view! { <td>{c.cell(row)}</td> }).collect_view()
                    });
                    let action_cell = show_actions.then(|| {
                        let id = row.id();
                        let buttons = enabled_actions.with_value(|list| {
                            list.iter()
                                .map(|action| action_button(*action, id.clone(), on_edit, on_delete))
                                .collect_view()
                        });
                        view! { <td class="data-table__actions">{buttons}</td> }
                    });
                    view! { <tr>{cells}{action_cell}</tr> }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <section class="data-table">
            <header class="data-table__header">
                <h1 class="data-table__heading">{heading.clone()}</h1>
                <button class="btn btn--primary" on:click=on_add_click>
                    {format!("+ Add {heading}")}
                </button>
            </header>

            <table class="data-table__grid">
                <thead>
                    <tr>
                        {header_cells}
                        {show_actions.then_some(view! { <th>"Actions"</th> })}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>

            <footer class="data-table__footer">
                <span class="data-table__summary">{move || pagination.get().summary(total())}</span>
                <label class="data-table__page-size">
                    "Rows per page "
                    <select on:change=on_page_size>
                        {PAGE_SIZES
                            .iter()
                            .map(|size| {
                                let size = *size;
                                view! {
                                    <option value=size.to_string() selected=move || pagination.get().page_size == size>
                                        {size.to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <div class="data-table__pager">
                    <button
                        class="btn btn--small"
                        disabled=move || pagination.get().page <= 1
                        on:click=move |_| go_to(pagination.get_untracked().page.saturating_sub(1))
                    >
                        "Prev"
                    </button>
                    <span>{move || format!("Page {} of {}", pagination.get().page, page_count())}</span>
                    <button
                        class="btn btn--small"
                        disabled=move || pagination.get().page >= page_count()
                        on:click=move |_| go_to(pagination.get_untracked().page + 1)
                    >
                        "Next"
                    </button>
                </div>
            </footer>

            <Show when=is_open>
                <div class="dialog-backdrop" on:click=move |_| close_modal.run(())>
                    <div class="dialog dialog--form" on:click=move |ev| ev.stop_propagation()>
                        <h2>{move || modal_title.map(|t| t.get()).unwrap_or_default()}</h2>
                        <DynamicForm
                            schema=schema
                            initial=initial.map(|i| i.get_untracked()).unwrap_or_default()
                            loading=loading
                            on_submit=submit
                            on_cancel=close_modal
                        />
                    </div>
                </div>
            </Show>
        </section>
    }
}

fn action_button(
    action: RowAction,
    id: RecordId,
    on_edit: Option<Callback<RecordId>>,
    on_delete: Option<Callback<RecordId>>,
) -> impl IntoView {
    let (class, handler) = match action {
        RowAction::Edit => ("btn btn--small", on_edit),
        RowAction::Delete => ("btn btn--small btn--danger", on_delete),
    };
    view! {
        <button
            class=class
            disabled=handler.is_none()
            on:click=move |_| {
                if let Some(cb) = handler {
                    cb.run(id.clone());
                }
            }
        >
            {action.label()}
        </button>
    }
}
