//! Schema-driven form inside the add/edit modal.
//!
//! DESIGN
//! ======
//! The draft is seeded once when the form mounts. The modal unmounts the
//! form on close, so reopening it (for a different row, say) mounts a fresh
//! form with a fresh seed. A schema change while open (remote options
//! arriving) is applied in place without touching typed values. Submit hands
//! the whole draft to the caller; the caller decides between create and
//! update. Validation messages are left to the browser's native `required`.

#[cfg(test)]
#[path = "dynamic_form_test.rs"]
mod dynamic_form_test;

use leptos::prelude::*;
use serde_json::{Map, Value};

use crud::{FieldSchema, FieldValue, FormState};

use crate::components::field_input::FieldInput;

#[component]
pub fn DynamicForm(
    #[prop(into)] schema: Signal<FieldSchema>,
    initial: Map<String, Value>,
    #[prop(into)] loading: Signal<bool>,
    on_submit: Callback<Map<String, Value>>,
    on_cancel: Callback<()>,
    /// Fires on every accepted field change.
    #[prop(optional)]
    on_value_change: Option<Callback<(String, FieldValue)>>,
) -> impl IntoView {
    let form = RwSignal::new(FormState::new(schema.get_untracked(), &initial));

    Effect::new(move || {
        let busy = loading.get();
        form.update(|f| f.loading = busy);
    });

    Effect::new(move || {
        let next = schema.get();
        if form.with_untracked(|f| f.schema() != &next) {
            form.update(|f| f.set_schema(next));
        }
    });

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Some(payload) = form.with_untracked(ready_payload) {
            on_submit.run(payload);
        }
    };

    let inputs = move || {
        schema
            .get()
            .fields()
            .iter()
            .cloned()
            .map(|field| {
                let id = field.id.clone();
                let value = Signal::derive({
                    let id = id.clone();
                    move || form.with(|f| f.value(&id))
                });
                let on_change = Callback::new(move |next: FieldValue| {
                    let mut result = Ok(());
                    form.update(|f| result = f.set(&id, next.clone()));
                    match result {
                        Ok(()) => {
                            if let Some(cb) = on_value_change {
                                cb.run((id.clone(), next));
                            }
                        }
                        Err(e) => leptos::logging::warn!("field change dropped: {e}"),
                    }
                });
                view! { <FieldInput field=field value=value on_change=on_change disabled=loading/> }
            })
            .collect_view()
    };

    view! {
        <form class="dynamic-form" on:submit=on_form_submit>
            {inputs}
            <div class="dialog__actions">
                <button
                    class="btn"
                    type="button"
                    disabled=move || loading.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <button class="btn btn--primary" type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Submitting..." } else { "Submit" }}
                </button>
            </div>
        </form>
    }
}

/// Payload to hand over, or `None` while busy or while a required field is
/// still empty (the native `required` check normally stops that earlier).
fn ready_payload(form: &FormState) -> Option<Map<String, Value>> {
    if !form.missing_required().is_empty() {
        return None;
    }
    form.submit()
}
