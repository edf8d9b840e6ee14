//! Modal dialogs: a form shell and a delete confirmation.

use leptos::prelude::*;

/// Form modal with a title, inline error and cancel/submit actions.
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional)] submit_label: Option<&'static str>,
    on_cancel: Callback<()>,
    on_submit: Callback<()>,
    children: Children,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_cancel.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation() on:keydown=on_keydown tabindex="0">
                <h2>{move || title.get()}</h2>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error" role="alert">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__body">{children()}</div>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_submit.run(())>
                        {submit_label.unwrap_or("Save")}
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Labelled form row inside a [`Modal`].
#[component]
pub fn Field(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <label class="dialog__label">
            <span class="dialog__label-text">{label}</span>
            {children()}
        </label>
    }
}

/// Text-like input bound to one draft field.
#[component]
pub fn TextInput(
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] kind: Option<&'static str>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <input
            class="dialog__input"
            type=kind.unwrap_or("text")
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Checkbox bound to one draft flag.
#[component]
pub fn Toggle(label: &'static str, #[prop(into)] checked: Signal<bool>, on_change: Callback<bool>) -> impl IntoView {
    view! {
        <label class="dialog__check">
            <input type="checkbox" prop:checked=move || checked.get() on:change=move |ev| on_change.run(event_target_checked(&ev))/>
            {label}
        </label>
    }
}

/// Destructive-action confirmation.
#[component]
pub fn ConfirmDialog(
    title: &'static str,
    #[prop(into)] message: Signal<String>,
    #[prop(optional)] confirm_label: Option<&'static str>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <p class="dialog__danger">{move || message.get()}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        {confirm_label.unwrap_or("Delete")}
                    </button>
                </div>
            </div>
        </div>
    }
}
