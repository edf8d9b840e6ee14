//! Page navigation and page-size selection under every table.

use leptos::prelude::*;
use records::PageWindow;
use records::query::{PAGE_SIZE_OPTIONS, PageLink};

/// Pages shown either side of the current one before eliding.
const LINK_RADIUS: usize = 1;

#[component]
pub fn Pager(
    #[prop(into)] window: Signal<PageWindow>,
    #[prop(into)] page_size: Signal<usize>,
    on_page: Callback<usize>,
    on_page_size: Callback<usize>,
) -> impl IntoView {
    let links = move || {
        let current = window.get().page;
        window
            .get()
            .links(LINK_RADIUS)
            .into_iter()
            .map(|link| match link {
                PageLink::Page(n) => {
                    let class = if n == current { "pager__page pager__page--current" } else { "pager__page" };
                    view! { <button class=class on:click=move |_| on_page.run(n)>{n}</button> }.into_any()
                }
                PageLink::Gap => view! { <span class="pager__gap">"…"</span> }.into_any(),
            })
            .collect_view()
    };

    view! {
        <nav class="pager" aria-label="Pagination">
            <span class="pager__label">{move || window.get().label()}</span>
            <button
                class="pager__step"
                disabled=move || !window.get().has_prev()
                on:click=move |_| on_page.run(window.get_untracked().page.saturating_sub(1))
            >
                "‹ Prev"
            </button>
            {links}
            <button
                class="pager__step"
                disabled=move || !window.get().has_next()
                on:click=move |_| on_page.run(window.get_untracked().page + 1)
            >
                "Next ›"
            </button>
            <label class="pager__size">
                "Rows"
                <select
                    prop:value=move || page_size.get().to_string()
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse() {
                            on_page_size.run(size);
                        }
                    }
                >
                    {PAGE_SIZE_OPTIONS
                        .iter()
                        .map(|n| view! { <option value=n.to_string()>{*n}</option> })
                        .collect_view()}
                </select>
            </label>
        </nav>
    }
}
