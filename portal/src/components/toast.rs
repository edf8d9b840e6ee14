//! Toast banner for action outcomes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the app-wide `RwSignal<Notices>` context. In the browser each notice
//! dismisses itself after [`TOAST_MS`]; a newer notice is never closed by an
//! older timer because dismissal is keyed by notice id.

use leptos::prelude::*;

use crate::state::notice::Notices;

pub const TOAST_MS: u64 = 4_000;

#[component]
pub fn Toast() -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();

    #[cfg(feature = "hydrate")]
    Effect::new(move || {
        if let Some(id) = notices.with(|n| n.current().map(|c| c.id)) {
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(TOAST_MS)).await;
                notices.update(|n| n.dismiss(id));
            });
        }
    });

    move || {
        notices.with(|n| n.current().cloned()).map(|notice| {
            let id = notice.id;
            view! {
                <div class=notice.kind.class() role="status">
                    <span class="toast__message">{notice.message}</span>
                    <button class="toast__close" title="Dismiss" on:click=move |_| notices.update(|n| n.dismiss(id))>
                        "✕"
                    </button>
                </div>
            }
        })
    }
}
