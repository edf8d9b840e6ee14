//! Slot calendar panel shared by the clinic and expert dashboards.
//!
//! DESIGN
//! ======
//! The panel takes its `SlotsState` from the page so each page decides whose
//! calendars are shown. The owner column and selects only appear when the
//! state has more than one owner.

use leptos::prelude::*;
use records::slot::{Slot, SlotSortKey};
use time::Weekday;
use uuid::Uuid;

use super::{HasForm, act, attempt, bind_text, form_chrome};
use crate::components::badge::StatusBadge;
use crate::components::controls::{ClearFilters, DateRangeInputs, FacetSelect, SearchBox, SortHeader};
use crate::components::dialog::{ConfirmDialog, Field, Modal, TextInput};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::collection::Form;
use crate::state::notice::Notices;
use crate::state::slots::{BulkInput, EditInput, SlotInput, SlotsState};
use crate::util::{clock, format};

const WEEK: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl HasForm<SlotInput> for SlotsState {
    fn form(&self) -> Option<&Form<SlotInput>> {
        self.single.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<SlotInput>> {
        self.single.as_mut()
    }
}

impl HasForm<BulkInput> for SlotsState {
    fn form(&self) -> Option<&Form<BulkInput>> {
        self.bulk.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<BulkInput>> {
        self.bulk.as_mut()
    }
}

impl HasForm<EditInput> for SlotsState {
    fn form(&self) -> Option<&Form<EditInput>> {
        self.edit.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<EditInput>> {
        self.edit.as_mut()
    }
}

#[component]
pub fn SlotsPanel(state: RwSignal<SlotsState>, title: &'static str) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let shared = state.with_untracked(|s| s.owners.len() > 1);
    let view_state = Signal::derive(move || state.with(|s| s.slots.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());

    let on_search = Callback::new(move |raw: String| state.update(|s| s.slots.view_state_mut().set_search(&raw)));
    let on_status =
        Callback::new(move |v| state.update(|s| s.slots.view_state_mut().update_filters(|f| f.status = v)));
    let on_dates = Callback::new(move |v| state.update(|s| s.slots.view_state_mut().update_filters(|f| f.dates = v)));
    let on_sort = Callback::new(move |key: SlotSortKey| state.update(|s| s.slots.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.slots.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.slots.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.slots.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.slots.export(format, clock::today())));

    let on_delete = Callback::new(move |()| act(state, notices, SlotsState::confirm_delete));
    let on_delete_cancel = Callback::new(move |()| state.update(|s| s.slots.cancel_delete()));
    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.slots
                .pending_delete()
                .map(|slot| format!("Delete the slot on {}?", format::date_time(slot.start_time)))
                .unwrap_or_default()
        })
    });
    let colspan = if shared { "8" } else { "7" };

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>{title}</h2>
                <div class="panel__actions">
                    <button class="btn" on:click=move |_| state.update(|s| s.open_single(clock::today()))>
                        "+ Add slot"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| state.update(|s| s.open_bulk(clock::today()))>
                        "Generate slots"
                    </button>
                </div>
            </header>

            <div class="table-toolbar">
                <Show when=move || shared>
                    <SearchBox
                        value=Signal::derive(move || view_state.get().search().raw().to_owned())
                        on_input=on_search
                        placeholder="Search service"
                    />
                </Show>
                <FacetSelect
                    label="Status"
                    value=Signal::derive(move || view_state.get().filters().status)
                    on_change=on_status
                />
                <DateRangeInputs label="Date" value=Signal::derive(move || view_state.get().filters().dates) on_change=on_dates/>
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Starts" key=SlotSortKey::StartTime sort=sort on_sort=on_sort/>
                        <th>"Time"</th>
                        <Show when=move || shared>
                            <th>"Service"</th>
                        </Show>
                        <th>"Duration"</th>
                        <th>"Booked"</th>
                        <SortHeader label="Open" key=SlotSortKey::Available sort=sort on_sort=on_sort/>
                        <th>"Status"</th>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.slots.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan=colspan>"No slots match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|slot| slot_row(slot, shared, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.slots.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />

            <Show when=move || state.with(|s| s.single.is_some())>
                <SingleSlotModal state=state/>
            </Show>
            <Show when=move || state.with(|s| s.bulk.is_some())>
                <BulkSlotModal state=state/>
            </Show>
            <Show when=move || state.with(|s| s.edit.is_some())>
                <EditSlotModal state=state/>
            </Show>
            <Show when=move || state.with(|s| s.slots.pending_delete().is_some())>
                <ConfirmDialog
                    title="Delete slot"
                    message=delete_message
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

fn slot_row(slot: Slot, shared: bool, state: RwSignal<SlotsState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = slot.id;
    let block_label = if slot.is_blocked { "Reopen" } else { "Block" };
    let owner = slot.owner.name().to_owned();

    view! {
        <tr>
            <td>{format::date(slot.start_time.date())}</td>
            <td>{format::time_range(slot.start_time, slot.end_time())}</td>
            <Show when=move || shared>
                <td>{owner.clone()}</td>
            </Show>
            <td>{format::duration(i64::from(slot.duration_minutes))}</td>
            <td>{format!("{} / {}", slot.booked(), slot.max_bookings)}</td>
            <td>{slot.available_slots}</td>
            <td>
                <StatusBadge status=slot.status()/>
            </td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=move |_| attempt(state, notices, |s| s.open_edit(id))>
                    "Edit"
                </button>
                <button class="btn btn--small" on:click=move |_| act(state, notices, |s| s.toggle_block(id))>
                    {block_label}
                </button>
                <button class="btn btn--small btn--danger" on:click=move |_| state.update(|s| s.slots.request_delete(id))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

/// Select over the panel's owners; hidden when there is only one.
#[component]
fn OwnerSelect(
    state: RwSignal<SlotsState>,
    #[prop(into)] value: Signal<Option<Uuid>>,
    on_change: Callback<Option<Uuid>>,
) -> impl IntoView {
    let options = state.with_untracked(|s| s.owners.iter().map(|o| (o.id().to_string(), o.name().to_owned())).collect::<Vec<_>>());
    let single = options.len() <= 1;
    let options = StoredValue::new(options);

    view! {
        <Show when=move || !single>
            <Field label="Service">
                <select
                    class="dialog__input"
                    prop:value=move || value.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| on_change.run(Uuid::parse_str(&event_target_value(&ev)).ok())
                >
                    <option value="">"Choose a service"</option>
                    {options.with_value(|options| {
                        options
                            .iter()
                            .map(|(id, name)| view! { <option value=id.clone()>{name.clone()}</option> })
                            .collect_view()
                    })}
                </select>
            </Field>
        </Show>
    }
}

#[component]
fn SingleSlotModal(state: RwSignal<SlotsState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let (title, error) = form_chrome::<_, SlotInput>(state, "slot");
    let (date, on_date) = bind_text(state, |d: &SlotInput| d.date.clone(), |d, v| d.date = v);
    let (time, on_time) = bind_text(state, |d: &SlotInput| d.time.clone(), |d, v| d.time = v);
    let (duration, on_duration) = bind_text(state, |d: &SlotInput| d.duration.clone(), |d, v| d.duration = v);
    let (capacity, on_capacity) = bind_text(state, |d: &SlotInput| d.capacity.clone(), |d, v| d.capacity = v);
    let owner = Signal::derive(move || state.with(|s| s.single.as_ref().and_then(|f| f.draft.owner)));
    let on_owner = Callback::new(move |id| {
        state.update(|s| {
            if let Some(form) = s.single.as_mut() {
                form.draft.owner = id;
            }
        });
    });
    let on_submit = Callback::new(move |()| act(state, notices, |s| s.submit_single(Uuid::new_v4(), clock::now())));
    let on_cancel = Callback::new(move |()| state.update(SlotsState::close));

    view! {
        <Modal title=title error=error on_cancel=on_cancel on_submit=on_submit>
            <OwnerSelect state=state value=owner on_change=on_owner/>
            <div class="dialog__row">
                <Field label="Date">
                    <TextInput value=date on_input=on_date kind="date"/>
                </Field>
                <Field label="Start time">
                    <TextInput value=time on_input=on_time kind="time"/>
                </Field>
            </div>
            <div class="dialog__row">
                <Field label="Duration (minutes)">
                    <TextInput value=duration on_input=on_duration kind="number"/>
                </Field>
                <Field label="Capacity">
                    <TextInput value=capacity on_input=on_capacity kind="number"/>
                </Field>
            </div>
        </Modal>
    }
}

#[component]
fn BulkSlotModal(state: RwSignal<SlotsState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let (_, error) = form_chrome::<_, BulkInput>(state, "slots");
    let (start, on_start) = bind_text(state, |d: &BulkInput| d.start_date.clone(), |d, v| d.start_date = v);
    let (end, on_end) = bind_text(state, |d: &BulkInput| d.end_date.clone(), |d, v| d.end_date = v);
    let (duration, on_duration) = bind_text(state, |d: &BulkInput| d.duration.clone(), |d, v| d.duration = v);
    let (capacity, on_capacity) = bind_text(state, |d: &BulkInput| d.capacity.clone(), |d, v| d.capacity = v);
    let owner = Signal::derive(move || state.with(|s| s.bulk.as_ref().and_then(|f| f.draft.owner)));
    let on_owner = Callback::new(move |id| edit_bulk(state, |d| d.owner = id));
    let preview = move || {
        state.with(|s| match s.bulk.as_ref().and_then(|f| f.draft.preview_count()) {
            Some(n) => format!("This will create up to {}.", format::count(n, "slot")),
            None => "Complete the dates, days and times to preview.".to_owned(),
        })
    };
    let time_count = move || state.with(|s| s.bulk.as_ref().map_or(0, |f| f.draft.times.len()));

    let on_submit = Callback::new(move |()| act(state, notices, |s| s.submit_bulk(Uuid::new_v4, clock::now())));
    let on_cancel = Callback::new(move |()| state.update(SlotsState::close));

    view! {
        <Modal
            title=Signal::derive(|| "Generate slots".to_owned())
            error=error
            submit_label="Generate"
            on_cancel=on_cancel
            on_submit=on_submit
        >
            <OwnerSelect state=state value=owner on_change=on_owner/>
            <div class="dialog__row">
                <Field label="From">
                    <TextInput value=start on_input=on_start kind="date"/>
                </Field>
                <Field label="To">
                    <TextInput value=end on_input=on_end kind="date"/>
                </Field>
            </div>
            <Field label="Days">
                <div class="weekday-picker">
                    {WEEK
                        .into_iter()
                        .map(|day| {
                            let on = move || state.with(|s| s.bulk.as_ref().is_some_and(|f| f.draft.weekdays.contains(day)));
                            let class = move || if on() { "weekday-picker__day weekday-picker__day--on" } else { "weekday-picker__day" };
                            view! {
                                <button type="button" class=class on:click=move |_| edit_bulk(state, |d| d.weekdays.toggle(day))>
                                    {format::weekday(day)}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Field>
            <Field label="Start times">
                <div class="time-list">
                    {move || {
                        (0..time_count())
                            .map(|i| {
                                let value = move || {
                                    state.with(|s| s.bulk.as_ref().and_then(|f| f.draft.times.get(i).cloned()).unwrap_or_default())
                                };
                                view! {
                                    <div class="time-list__row">
                                        <input
                                            class="dialog__input"
                                            type="time"
                                            prop:value=value
                                            on:input=move |ev| {
                                                let raw = event_target_value(&ev);
                                                edit_bulk(
                                                    state,
                                                    |d| {
                                                        if let Some(slot) = d.times.get_mut(i) {
                                                            *slot = raw;
                                                        }
                                                    },
                                                );
                                            }
                                        />
                                        <button
                                            type="button"
                                            class="btn btn--small btn--link"
                                            disabled=move || time_count() <= 1
                                            on:click=move |_| edit_bulk(state, |d| d.remove_time(i))
                                        >
                                            "Remove"
                                        </button>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <button type="button" class="btn btn--small" on:click=move |_| edit_bulk(state, BulkInput::add_time)>
                        "+ Add time"
                    </button>
                </div>
            </Field>
            <div class="dialog__row">
                <Field label="Duration (minutes)">
                    <TextInput value=duration on_input=on_duration kind="number"/>
                </Field>
                <Field label="Capacity">
                    <TextInput value=capacity on_input=on_capacity kind="number"/>
                </Field>
            </div>
            <p class="dialog__hint">{preview}</p>
        </Modal>
    }
}

fn edit_bulk(state: RwSignal<SlotsState>, f: impl FnOnce(&mut BulkInput)) {
    state.update(|s| {
        if let Some(form) = s.bulk.as_mut() {
            f(&mut form.draft);
        }
    });
}

#[component]
fn EditSlotModal(state: RwSignal<SlotsState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let (title, error) = form_chrome::<_, EditInput>(state, "slot");
    let (duration, on_duration) = bind_text(state, |d: &EditInput| d.duration.clone(), |d, v| d.duration = v);
    let (max, on_max) = bind_text(state, |d: &EditInput| d.max_bookings.clone(), |d, v| d.max_bookings = v);
    let (available, on_available) =
        bind_text(state, |d: &EditInput| d.available_slots.clone(), |d, v| d.available_slots = v);
    let on_submit = Callback::new(move |()| act(state, notices, SlotsState::submit_edit));
    let on_cancel = Callback::new(move |()| state.update(SlotsState::close));

    view! {
        <Modal title=title error=error on_cancel=on_cancel on_submit=on_submit>
            <Field label="Duration (minutes)">
                <TextInput value=duration on_input=on_duration kind="number"/>
            </Field>
            <div class="dialog__row">
                <Field label="Capacity">
                    <TextInput value=max on_input=on_max kind="number"/>
                </Field>
                <Field label="Still open">
                    <TextInput value=available on_input=on_available kind="number"/>
                </Field>
            </div>
        </Modal>
    }
}
