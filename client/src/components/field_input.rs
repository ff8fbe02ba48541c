//! One form control, chosen by field kind.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DynamicForm` renders one `FieldInput` per schema field. The control only
//! reports changes through `on_change`; it never validates beyond the
//! native `required` attribute and never touches the network.
//!
//! - single-line kinds report the raw input string (numbers included)
//! - rich text is Markdown in a textarea with a rendered preview
//! - file pickers report a `FileRef` (name, size, type), never the content

use leptos::prelude::*;

use crud::format::format_bytes;
use crud::{FieldDescriptor, FieldKind, FieldValue};

use crate::util::markdown::render_markdown_html;

#[component]
pub fn FieldInput(
    field: FieldDescriptor,
    #[prop(into)] value: Signal<FieldValue>,
    on_change: Callback<FieldValue>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let dom_id = format!("field-{}", field.id);
    let help = field.help_text.clone();
    let label = field.label.clone();

    let control = match field.kind {
        FieldKind::Select => select_control(&field, &dom_id, value, on_change, disabled),
        FieldKind::RichText => rich_text_control(&field, &dom_id, value, on_change, disabled),
        FieldKind::File => file_control(&field, &dom_id, value, on_change, disabled),
        kind => {
            let input_type = kind.html_input_type().unwrap_or("text");
            let step = (kind == FieldKind::Number).then_some("any");
            view! {
                <input
                    id=dom_id.clone()
                    name=field.id.clone()
                    class="field__input"
                    type=input_type
                    step=step
                    required=field.required
                    disabled=move || disabled.get()
                    prop:value=move || value.get().as_input_text()
                    on:input=move |ev| on_change.run(FieldValue::Text(event_target_value(&ev)))
                />
            }
            .into_any()
        }
    };

    view! {
        <div class="field">
            <label class="field__label" for=dom_id>
                {label}
                {field.required.then_some(view! { <span class="field__required">"*"</span> })}
            </label>
            {control}
            {help.map(|text| view! { <small class="field__help">{text}</small> })}
        </div>
    }
}

fn select_control(
    field: &FieldDescriptor,
    dom_id: &str,
    value: Signal<FieldValue>,
    on_change: Callback<FieldValue>,
    disabled: Signal<bool>,
) -> AnyView {
    let options = field
        .options
        .iter()
        .map(|opt| {
            let option_value = opt.value.clone();
            let selected_value = opt.value.clone();
            view! {
                <option
                    value=option_value
                    disabled=opt.disabled
                    selected=move || value.get().as_input_text() == selected_value
                >
                    {opt.label.clone()}
                </option>
            }
        })
        .collect_view();

    view! {
        <select
            id=dom_id.to_owned()
            name=field.id.clone()
            class="field__input field__select"
            required=field.required
            disabled=move || disabled.get()
            on:change=move |ev| on_change.run(FieldValue::Text(event_target_value(&ev)))
        >
            {options}
        </select>
    }
    .into_any()
}

fn rich_text_control(
    field: &FieldDescriptor,
    dom_id: &str,
    value: Signal<FieldValue>,
    on_change: Callback<FieldValue>,
    disabled: Signal<bool>,
) -> AnyView {
    let preview = RwSignal::new(false);
    let preview_html = move || render_markdown_html(&value.get().as_input_text());

    view! {
        <div class="field__rich">
            <div class="field__rich-tabs">
                <button
                    type="button"
                    class="btn btn--small"
                    class:btn--active=move || !preview.get()
                    on:click=move |_| preview.set(false)
                >
                    "Write"
                </button>
                <button
                    type="button"
                    class="btn btn--small"
                    class:btn--active=move || preview.get()
                    on:click=move |_| preview.set(true)
                >
                    "Preview"
                </button>
            </div>
            <Show
                when=move || preview.get()
                fallback={
                    let dom_id = dom_id.to_owned();
                    let name = field.id.clone();
                    let required = field.required;
                    move || {
                        view! {
                            <textarea
                                id=dom_id.clone()
                                name=name.clone()
                                class="field__input field__textarea"
                                rows="6"
                                required=required
                                disabled=move || disabled.get()
                                prop:value=move || value.get().as_input_text()
                                on:input=move |ev| on_change.run(FieldValue::Text(event_target_value(&ev)))
                            ></textarea>
                        }
                    }
                }
            >
                <div class="field__preview markdown" inner_html=preview_html></div>
            </Show>
        </div>
    }
    .into_any()
}

fn file_control(
    field: &FieldDescriptor,
    dom_id: &str,
    value: Signal<FieldValue>,
    on_change: Callback<FieldValue>,
    disabled: Signal<bool>,
) -> AnyView {
    let on_pick = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let picked = input.files().and_then(|files| files.get(0)).map(|file| file_ref(&file));
            on_change.run(picked.map_or(FieldValue::Null, FieldValue::File));
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let current = move || match value.get() {
        FieldValue::File(file) => Some(format!("{} ({})", file.name, format_bytes(file.size))),
        _ => None,
    };

    view! {
        <div class="field__file">
            <input
                id=dom_id.to_owned()
                name=field.id.clone()
                class="field__input"
                type="file"
                required=field.required
                disabled=move || disabled.get()
                on:change=on_pick
            />
            <Show when=move || current().is_some()>
                <span class="field__file-name">{move || current().unwrap_or_default()}</span>
                <button
                    type="button"
                    class="btn btn--small"
                    disabled=move || disabled.get()
                    on:click=move |_| on_change.run(FieldValue::Null)
                >
                    "Remove"
                </button>
            </Show>
        </div>
    }
    .into_any()
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn file_ref(file: &web_sys::File) -> crud::FileRef {
    crud::FileRef { name: file.name(), size: file.size() as u64, mime: file.type_() }
}
