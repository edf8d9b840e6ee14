//! Expert dashboard: the expert's bookings and their own slot calendar.

use leptos::prelude::*;
use records::booking::{Booking, BookingSortKey, BookingStatus};
use records::query::Choice;

use super::act;
use super::slots_panel::SlotsPanel;
use crate::components::badge::{StatCard, StatusBadge};
use crate::components::controls::{ClearFilters, DateRangeInputs, FacetSelect, SearchBox, SortHeader};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::bookings::BookingsState;
use crate::state::notice::Notices;
use crate::state::slots::SlotsState;
use crate::util::{clock, format};

/// Button text for moving a booking to `next`.
fn step_label(next: BookingStatus) -> &'static str {
    match next {
        BookingStatus::Confirmed => "Confirm",
        BookingStatus::Completed => "Complete",
        BookingStatus::Canceled => "Cancel",
        BookingStatus::Pending => "Reopen",
    }
}

#[component]
pub fn ExpertPortalPage() -> impl IntoView {
    let bookings = RwSignal::new(BookingsState::from_fixtures());
    let slots = RwSignal::new(SlotsState::expert_fixtures());
    let expert_name = bookings.with_untracked(|s| s.expert.name.clone());

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Expert portal"</h1>
                    <p class="page__subtitle">{expert_name}</p>
                </div>
            </header>
            <BookingsSection state=bookings/>
            <SlotsPanel state=slots title="My availability"/>
        </section>
    }
}

#[component]
fn BookingsSection(state: RwSignal<BookingsState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let counts = Signal::derive(move || state.with(BookingsState::counts));
    let view_state = Signal::derive(move || state.with(|s| s.bookings.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());

    let on_search = Callback::new(move |raw: String| state.update(|s| s.bookings.view_state_mut().set_search(&raw)));
    let on_status =
        Callback::new(move |v| state.update(|s| s.bookings.view_state_mut().update_filters(|f| f.status = v)));
    let on_mode = Callback::new(move |v| state.update(|s| s.bookings.view_state_mut().update_filters(|f| f.mode = v)));
    let on_dates =
        Callback::new(move |v| state.update(|s| s.bookings.view_state_mut().update_filters(|f| f.dates = v)));
    let on_sort = Callback::new(move |key: BookingSortKey| state.update(|s| s.bookings.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.bookings.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.bookings.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.bookings.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.bookings.export(format, clock::today())));
    let error = move || state.with(|s| s.error.clone());

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>"Bookings"</h2>
                <button class="btn btn--small" on:click=move |_| act(state, notices, |s| Ok(s.refresh()))>
                    "Refresh"
                </button>
            </header>

            <div class="stat-grid">
                <StatCard label="Pending" value=Signal::derive(move || counts.get().pending.to_string())/>
                <StatCard label="Confirmed" value=Signal::derive(move || counts.get().confirmed.to_string())/>
                <StatCard label="Completed" value=Signal::derive(move || counts.get().completed.to_string())/>
                <StatCard label="Canceled" value=Signal::derive(move || counts.get().canceled.to_string())/>
                <StatCard
                    label="Earned"
                    value=Signal::derive(move || format::rupees(counts.get().earned))
                    hint=Signal::derive(move || format!("{} in total", format::count(counts.get().total(), "booking")))
                />
            </div>

            {move || {
                error()
                    .map(|message| {
                        view! {
                            <div class="alert alert--error" role="alert">
                                <span>{message}</span>
                                <button class="btn btn--link" on:click=move |_| state.update(BookingsState::dismiss_error)>
                                    "Dismiss"
                                </button>
                            </div>
                        }
                    })
            }}

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search patient or service"
                />
                <FacetSelect
                    label="Status"
                    value=Signal::derive(move || view_state.get().filters().status)
                    on_change=on_status
                />
                <FacetSelect label="Mode" value=Signal::derive(move || view_state.get().filters().mode) on_change=on_mode/>
                <DateRangeInputs
                    label="Date"
                    value=Signal::derive(move || view_state.get().filters().dates)
                    on_change=on_dates
                />
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Patient" key=BookingSortKey::Patient sort=sort on_sort=on_sort/>
                        <th>"Service"</th>
                        <th>"Mode"</th>
                        <SortHeader label="When" key=BookingSortKey::StartTime sort=sort on_sort=on_sort/>
                        <SortHeader label="Charge" key=BookingSortKey::Charge sort=sort on_sort=on_sort/>
                        <th>"Status"</th>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.bookings.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="7">"No bookings match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|booking| booking_row(booking, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.bookings.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />
        </section>
    }
}

fn booking_row(booking: Booking, state: RwSignal<BookingsState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = booking.id;
    let steps = booking.status.next_steps();

    view! {
        <tr>
            <td>{booking.patient_name.clone()}</td>
            <td>{booking.service_name.clone()}</td>
            <td>{booking.mode.label()}</td>
            <td>
                {format::date_time(booking.start_time)}
                <span class="muted">{format!(" · {}", format::duration(booking.duration_minutes()))}</span>
            </td>
            <td>{format::rupees(booking.charge)}</td>
            <td>
                <StatusBadge status=booking.status/>
            </td>
            <td class="data-table__actions">
                {steps
                    .iter()
                    .map(|&next| {
                        let class = if next == BookingStatus::Canceled { "btn btn--small btn--danger" } else { "btn btn--small" };
                        view! {
                            <button class=class on:click=move |_| act(state, notices, |s| s.transition(id, next))>
                                {step_label(next)}
                            </button>
                        }
                    })
                    .collect_view()}
            </td>
        </tr>
    }
}
