//! Labeled input with inline validation message.

use leptos::prelude::*;

use crate::state::form::FormState;
use crate::util::validation::{FieldSpec, FormSchema};

#[component]
pub fn FormField(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    on_input: Callback<String>,
    on_blur: Callback<()>,
) -> impl IntoView {
    let invalid = move || error.get().is_some();

    view! {
        <div class="field" data-invalid=invalid>
            <label class="field__label" for=id>
                {label}
            </label>
            <input
                class="field__input"
                id=id
                name=id
                type=input_type
                placeholder=placeholder
                required=true
                aria-invalid=move || if invalid() { "true" } else { "false" }
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:blur=move |_| on_blur.run(())
            />
            <Show when=invalid>
                <p class="field__error" role="alert">
                    {move || error.get().unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}

/// Bind `field` of a form signal to a [`FormField`].
pub fn bound_field<S: FormSchema>(form: RwSignal<FormState<S>>, field: S::Field) -> impl IntoView {
    let value = Signal::derive(move || form.with(|f| f.value(field).to_owned()));
    let error = Signal::derive(move || form.with(|f| f.error(field).map(str::to_owned)));
    let on_input = Callback::new(move |text: String| form.update(|f| f.change(field, text)));
    let on_blur = Callback::new(move |()| form.update(|f| f.blur(field)));

    view! {
        <FormField
            id=field.id()
            label=field.label()
            input_type=field.input_type()
            placeholder=field.placeholder()
            value=value
            error=error
            on_input=on_input
            on_blur=on_blur
        />
    }
}

/// Form-level error banner for provider failures.
#[component]
pub fn RootError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <p class="field__error field__error--root" role="alert">
                {move || message.get().unwrap_or_default()}
            </p>
        </Show>
    }
}
