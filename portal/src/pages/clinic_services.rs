//! Clinic dashboard: the clinic's own service listings.

use leptos::prelude::*;
use records::clinic_service::{ApprovalStatus, ClinicService, ClinicServiceSortKey};
use uuid::Uuid;

use super::{HasForm, act, attempt, bind_text, form_chrome};
use crate::components::badge::{StatCard, StatusBadge};
use crate::components::controls::{ClearFilters, FacetSelect, SearchBox, SortHeader};
use crate::components::dialog::{ConfirmDialog, Field, Modal, TextInput};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::clinic_services::{ClinicServicesState, ServiceInput};
use crate::state::collection::Form;
use crate::state::notice::Notices;
use crate::util::{clock, format};

impl HasForm<ServiceInput> for ClinicServicesState {
    fn form(&self) -> Option<&Form<ServiceInput>> {
        self.form.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<ServiceInput>> {
        self.form.as_mut()
    }
}

#[component]
pub fn ClinicServicesPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let state = RwSignal::new(ClinicServicesState::from_fixtures());

    let clinic_name = state.with_untracked(|s| s.clinic.name.clone());
    let view_state = Signal::derive(move || state.with(|s| s.services.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());
    let count_by = move |approval: ApprovalStatus| {
        Signal::derive(move || {
            state.with(|s| s.services.table().rows().iter().filter(|r| r.approval == approval).count().to_string())
        })
    };

    let on_search = Callback::new(move |raw: String| state.update(|s| s.services.view_state_mut().set_search(&raw)));
    let on_approval =
        Callback::new(move |v| state.update(|s| s.services.view_state_mut().update_filters(|f| f.approval = v)));
    let on_mode = Callback::new(move |v| state.update(|s| s.services.view_state_mut().update_filters(|f| f.mode = v)));
    let on_sort =
        Callback::new(move |key: ClinicServiceSortKey| state.update(|s| s.services.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.services.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.services.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.services.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.services.export(format, clock::today())));

    let on_submit =
        Callback::new(move |()| act(state, notices, |s| s.submit(Uuid::new_v4(), clock::today(), clock::now())));
    let on_cancel = Callback::new(move |()| state.update(ClinicServicesState::close));
    let on_delete = Callback::new(move |()| act(state, notices, ClinicServicesState::confirm_delete));
    let on_delete_cancel = Callback::new(move |()| state.update(|s| s.services.cancel_delete()));

    let (form_title, form_error) = form_chrome::<_, ServiceInput>(state, "service");
    let (name, on_name) = bind_text(state, |d: &ServiceInput| d.name.clone(), |d, v| d.name = v);
    let (video, on_video) = bind_text(state, |d: &ServiceInput| d.video.clone(), |d, v| d.video = v);
    let (physical, on_physical) = bind_text(state, |d: &ServiceInput| d.physical.clone(), |d, v| d.physical = v);
    let (home, on_home) = bind_text(state, |d: &ServiceInput| d.home.clone(), |d, v| d.home = v);
    let (rank, on_rank) = bind_text(state, |d: &ServiceInput| d.rank.clone(), |d, v| d.rank = v);
    let (display_date, on_display_date) =
        bind_text(state, |d: &ServiceInput| d.display_date.clone(), |d, v| d.display_date = v);

    let catalog_value = move || {
        state.with(|s| {
            s.form.as_ref().and_then(|f| f.draft.catalog_service_id).map(|id| id.to_string()).unwrap_or_default()
        })
    };
    let on_catalog = move |raw: String| {
        state.update(|s| {
            let entry = Uuid::parse_str(&raw).ok().and_then(|id| s.catalog_entry(id)).cloned();
            if let (Some(entry), Some(form)) = (entry, s.form.as_mut()) {
                form.draft.choose_catalog(&entry);
            }
        });
    };
    let catalog_options = state.with_untracked(|s| {
        s.catalog.iter().map(|c| (c.id.to_string(), c.name.clone())).collect::<Vec<_>>()
    });
    let catalog_options = StoredValue::new(catalog_options);

    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.services
                .pending_delete()
                .map(|c| format!("Delete {}? Patients will no longer be able to book it.", c.name))
                .unwrap_or_default()
        })
    });

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"My services"</h1>
                    <p class="page__subtitle">{clinic_name}</p>
                </div>
                <button class="btn btn--primary" on:click=move |_| state.update(|s| s.open_create(clock::today()))>
                    "+ Add service"
                </button>
            </header>

            <div class="stat-grid">
                <StatCard label="Live" value=count_by(ApprovalStatus::Approved)/>
                <StatCard label="Awaiting review" value=count_by(ApprovalStatus::Pending)/>
                <StatCard label="Rejected" value=count_by(ApprovalStatus::Rejected)/>
            </div>

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search services"
                />
                <FacetSelect
                    label="Approval"
                    value=Signal::derive(move || view_state.get().filters().approval)
                    on_change=on_approval
                />
                <FacetSelect label="Mode" value=Signal::derive(move || view_state.get().filters().mode) on_change=on_mode/>
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Rank" key=ClinicServiceSortKey::Rank sort=sort on_sort=on_sort/>
                        <SortHeader label="Service" key=ClinicServiceSortKey::Name sort=sort on_sort=on_sort/>
                        <th>"Video"</th>
                        <th>"In clinic"</th>
                        <th>"Home"</th>
                        <SortHeader label="From" key=ClinicServiceSortKey::LowestCharge sort=sort on_sort=on_sort/>
                        <SortHeader label="Display date" key=ClinicServiceSortKey::DisplayDate sort=sort on_sort=on_sort/>
                        <th>"Approval"</th>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.services.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="9">"No services match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|service| service_row(service, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.services.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />

            <Show when=move || state.with(|s| s.form.is_some())>
                <Modal title=form_title error=form_error on_cancel=on_cancel on_submit=on_submit>
                    <Field label="Catalog service">
                        <select
                            class="dialog__input"
                            prop:value=catalog_value
                            on:change=move |ev| on_catalog(event_target_value(&ev))
                        >
                            <option value="">"Choose a service"</option>
                            {catalog_options.with_value(|options| {
                                options
                                    .iter()
                                    .map(|(id, name)| view! { <option value=id.clone()>{name.clone()}</option> })
                                    .collect_view()
                            })}
                        </select>
                    </Field>
                    <Field label="Display name">
                        <TextInput value=name on_input=on_name/>
                    </Field>
                    <p class="dialog__hint">"Leave a charge blank if you do not offer that mode."</p>
                    <div class="dialog__row">
                        <Field label="Video (₹)">
                            <TextInput value=video on_input=on_video/>
                        </Field>
                        <Field label="In clinic (₹)">
                            <TextInput value=physical on_input=on_physical/>
                        </Field>
                        <Field label="Home visit (₹)">
                            <TextInput value=home on_input=on_home/>
                        </Field>
                    </div>
                    <div class="dialog__row">
                        <Field label="Rank">
                            <TextInput value=rank on_input=on_rank kind="number"/>
                        </Field>
                        <Field label="Display from">
                            <TextInput value=display_date on_input=on_display_date kind="date"/>
                        </Field>
                    </div>
                </Modal>
            </Show>

            <Show when=move || state.with(|s| s.services.pending_delete().is_some())>
                <ConfirmDialog
                    title="Delete service"
                    message=delete_message
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

fn service_row(service: ClinicService, state: RwSignal<ClinicServicesState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = service.id;

    view! {
        <tr>
            <td>{service.rank}</td>
            <td>{service.name.clone()}</td>
            <td>{format::charge(service.charges.video)}</td>
            <td>{format::charge(service.charges.physical)}</td>
            <td>{format::charge(service.charges.home)}</td>
            <td>{format::charge(service.charges.lowest())}</td>
            <td>{format::date(service.display_date)}</td>
            <td>
                <StatusBadge status=service.approval/>
            </td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=move |_| attempt(state, notices, |s| s.open_edit(id))>
                    "Edit"
                </button>
                <button class="btn btn--small btn--danger" on:click=move |_| state.update(|s| s.services.request_delete(id))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
