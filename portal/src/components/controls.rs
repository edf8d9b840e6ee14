//! Table toolbar inputs: search, facet selects, date ranges and sortable
//! column headers.

use leptos::prelude::*;
use records::query::{ALL_SENTINEL, Choice};
use records::{DateRange, Facet, SortSpec};

use crate::util::form;

/// Free-text search input.
#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <input
            class="table-toolbar__search"
            type="search"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| on_input.run(event_target_value(&ev))
        />
    }
}

/// Select over a closed enum with an "All" option.
#[component]
pub fn FacetSelect<T>(label: &'static str, #[prop(into)] value: Signal<Facet<T>>, on_change: Callback<Facet<T>>) -> impl IntoView
where
    T: Choice + Send + Sync,
{
    view! {
        <label class="table-toolbar__facet">
            <span class="table-toolbar__facet-label">{label}</span>
            <select
                prop:value=move || value.get().value()
                on:change=move |ev| on_change.run(Facet::parse(&event_target_value(&ev)))
            >
                <option value=ALL_SENTINEL>"All"</option>
                {T::ALL
                    .iter()
                    .map(|v| view! { <option value=v.as_str()>{v.label()}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Select over a closed enum for form fields (no "All").
#[component]
pub fn ChoiceSelect<T>(#[prop(into)] value: Signal<T>, on_change: Callback<T>) -> impl IntoView
where
    T: Choice + Send + Sync,
{
    view! {
        <select
            class="dialog__input"
            prop:value=move || value.get().as_str()
            on:change=move |ev| {
                if let Some(choice) = T::parse(&event_target_value(&ev)) {
                    on_change.run(choice);
                }
            }
        >
            {T::ALL
                .iter()
                .map(|v| view! { <option value=v.as_str()>{v.label()}</option> })
                .collect_view()}
        </select>
    }
}

/// Inclusive from/to date inputs; a cleared input opens that bound.
#[component]
pub fn DateRangeInputs(label: &'static str, #[prop(into)] value: Signal<DateRange>, on_change: Callback<DateRange>) -> impl IntoView {
    let bound = move |pick: fn(&DateRange) -> Option<time::Date>| pick(&value.get()).map(form::date_value).unwrap_or_default();

    view! {
        <fieldset class="table-toolbar__dates">
            <legend>{label}</legend>
            <input
                type="date"
                aria-label="From"
                prop:value=move || bound(|r| r.from)
                on:change=move |ev| {
                    let mut range = value.get_untracked();
                    range.from = form::optional_date(&event_target_value(&ev));
                    on_change.run(range);
                }
            />
            <span class="table-toolbar__dates-sep">"to"</span>
            <input
                type="date"
                aria-label="To"
                prop:value=move || bound(|r| r.to)
                on:change=move |ev| {
                    let mut range = value.get_untracked();
                    range.to = form::optional_date(&event_target_value(&ev));
                    on_change.run(range);
                }
            />
        </fieldset>
    }
}

/// Clickable column header showing the active sort direction.
#[component]
pub fn SortHeader<K>(label: &'static str, key: K, #[prop(into)] sort: Signal<Option<SortSpec<K>>>, on_sort: Callback<K>) -> impl IntoView
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    let arrow = move || match sort.get() {
        Some(spec) if spec.key == key => spec.order.arrow(),
        _ => "",
    };
    let class = move || {
        if sort.get().is_some_and(|spec| spec.key == key) {
            "data-table__sortable data-table__sortable--active"
        } else {
            "data-table__sortable"
        }
    };

    view! {
        <th class=class on:click=move |_| on_sort.run(key)>
            {label}
            <span class="data-table__arrow">{arrow}</span>
        </th>
    }
}

/// Reset control shown while any search or facet narrows the table.
#[component]
pub fn ClearFilters(#[prop(into)] visible: Signal<bool>, on_clear: Callback<()>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <button class="btn btn--link" on:click=move |_| on_clear.run(())>
                "Clear filters"
            </button>
        </Show>
    }
}
