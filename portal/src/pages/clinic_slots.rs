//! Clinic dashboard: slot calendars for the clinic's approved services.

use leptos::prelude::*;

use super::slots_panel::SlotsPanel;
use crate::components::badge::StatCard;
use crate::state::slots::SlotsState;

#[component]
pub fn ClinicSlotsPage() -> impl IntoView {
    let state = RwSignal::new(SlotsState::clinic_fixtures());

    let services = Signal::derive(move || state.with(|s| s.owners.len().to_string()));
    let open = Signal::derive(move || {
        state.with(|s| s.slots.table().rows().iter().map(|slot| u64::from(slot.available_slots)).sum::<u64>().to_string())
    });
    let booked = Signal::derive(move || {
        state.with(|s| s.slots.table().rows().iter().map(|slot| u64::from(slot.booked())).sum::<u64>().to_string())
    });

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Slots"</h1>
                    <p class="page__subtitle">"Only approved services can take slots"</p>
                </div>
            </header>

            <div class="stat-grid">
                <StatCard label="Bookable services" value=services/>
                <StatCard label="Open places" value=open/>
                <StatCard label="Booked places" value=booked/>
            </div>

            <Show
                when=move || state.with(|s| !s.owners.is_empty())
                fallback=|| view! { <p class="panel panel--empty">"No approved services yet. Slots open once a listing is approved."</p> }
            >
                <SlotsPanel state=state title="Service slots"/>
            </Show>
        </section>
    }
}
