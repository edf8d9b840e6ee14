//! Status badges and summary cards.

use leptos::prelude::*;
use records::query::Choice;

use crate::util::tone::Toned;

/// Coloured pill for a status enum.
#[component]
pub fn StatusBadge<S>(status: S) -> impl IntoView
where
    S: Choice + Toned,
{
    view! { <span class=status.tone().class()>{status.label()}</span> }
}

/// Headline number above a table.
#[component]
pub fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>, #[prop(optional)] hint: Option<Signal<String>>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__label">{label}</span>
            <span class="stat-card__value">{move || value.get()}</span>
            {hint.map(|hint| view! { <span class="stat-card__hint">{move || hint.get()}</span> })}
        </div>
    }
}
