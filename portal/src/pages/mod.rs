//! Route-level page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page owns one state struct from [`crate::state`] inside an
//! `RwSignal`, recreated from fixtures on mount. Handlers run a single
//! `update` through [`act`] so the outcome always lands in the toast.

pub mod admin_dues;
pub mod admin_services;
pub mod admin_users;
pub mod clinic_services;
pub mod clinic_slots;
pub mod expert_portal;
pub mod overview;
pub mod slots_panel;

use leptos::prelude::*;

use crate::state::ActionError;
use crate::state::collection::Form;
use crate::state::notice::Notices;

/// Apply one mutation to page state and toast the outcome.
pub(crate) fn act<S>(state: RwSignal<S>, notices: RwSignal<Notices>, f: impl FnOnce(&mut S) -> Result<String, ActionError>)
where
    S: Send + Sync + 'static,
{
    if let Some(outcome) = state.try_update(f) {
        notices.update(|n| {
            n.report(outcome);
        });
    }
}

/// Apply a mutation that is silent on success, such as opening a modal.
pub(crate) fn attempt<S>(state: RwSignal<S>, notices: RwSignal<Notices>, f: impl FnOnce(&mut S) -> Result<(), ActionError>)
where
    S: Send + Sync + 'static,
{
    if let Some(Err(err)) = state.try_update(f) {
        log::warn!("{err}");
        notices.update(|n| {
            n.error(err.to_string());
        });
    }
}

/// Page state with an open modal editing a draft of type `D`.
pub(crate) trait HasForm<D> {
    fn form(&self) -> Option<&Form<D>>;
    fn form_mut(&mut self) -> Option<&mut Form<D>>;
}

/// Signal/callback pair binding one text field of the open draft.
pub(crate) fn bind_text<S, D>(
    state: RwSignal<S>,
    get: fn(&D) -> String,
    set: fn(&mut D, String),
) -> (Signal<String>, Callback<String>)
where
    S: HasForm<D> + Send + Sync + 'static,
    D: 'static,
{
    let value = Signal::derive(move || state.with(|s| s.form().map(|f| get(&f.draft)).unwrap_or_default()));
    let on_input = Callback::new(move |raw: String| {
        state.update(|s| {
            if let Some(form) = s.form_mut() {
                set(&mut form.draft, raw);
            }
        });
    });
    (value, on_input)
}

/// Like [`bind_text`] for any copyable draft field (enums, flags).
/// `closed` is reported while no modal is open.
pub(crate) fn bind_value<S, D, V>(
    state: RwSignal<S>,
    closed: V,
    get: fn(&D) -> V,
    set: fn(&mut D, V),
) -> (Signal<V>, Callback<V>)
where
    S: HasForm<D> + Send + Sync + 'static,
    D: 'static,
    V: Copy + Send + Sync + 'static,
{
    let value = Signal::derive(move || state.with(|s| s.form().map_or(closed, |f| get(&f.draft))));
    let on_change = Callback::new(move |v: V| {
        state.update(|s| {
            if let Some(form) = s.form_mut() {
                set(&mut form.draft, v);
            }
        });
    });
    (value, on_change)
}

/// Title and inline error of the open modal.
pub(crate) fn form_chrome<S, D>(state: RwSignal<S>, noun: &'static str) -> (Signal<String>, Signal<Option<String>>)
where
    S: HasForm<D> + Send + Sync + 'static,
    D: 'static,
{
    let title = Signal::derive(move || state.with(|s| s.form().map(|f| f.title(noun)).unwrap_or_default()));
    let error = Signal::derive(move || state.with(|s| s.form().and_then(|f| f.error.clone())));
    (title, error)
}
