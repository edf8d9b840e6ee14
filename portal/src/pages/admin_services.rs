//! Admin services page: the platform catalog and clinic listings under review.
//!
//! SYSTEM CONTEXT
//! ==============
//! The catalog is what clinics may offer; the review queue is what they have
//! offered. Both live on one page with independent filters.

use leptos::prelude::*;
use records::catalog::{Availability, CatalogDraft, CatalogService, CatalogSortKey, ServiceCategory};
use records::clinic_service::{ApprovalStatus, ClinicService, ClinicServiceSortKey, ReviewDecision};
use records::query::Choice;
use uuid::Uuid;

use super::{HasForm, act, attempt, bind_text, bind_value, form_chrome};
use crate::components::badge::{StatCard, StatusBadge};
use crate::components::controls::{ChoiceSelect, ClearFilters, FacetSelect, SearchBox, SortHeader};
use crate::components::dialog::{ConfirmDialog, Field, Modal, TextInput, Toggle};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::catalog::CatalogState;
use crate::state::collection::Form;
use crate::state::notice::Notices;
use crate::state::review::ReviewState;
use crate::util::{clock, format};

impl HasForm<CatalogDraft> for CatalogState {
    fn form(&self) -> Option<&Form<CatalogDraft>> {
        self.form.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<CatalogDraft>> {
        self.form.as_mut()
    }
}

#[component]
pub fn AdminServicesPage() -> impl IntoView {
    let catalog = RwSignal::new(CatalogState::from_fixtures());
    let review = RwSignal::new(ReviewState::from_fixtures());

    let total = Signal::derive(move || catalog.with(|s| s.services.table().len().to_string()));
    let active = Signal::derive(move || catalog.with(|s| s.active().len().to_string()));
    let listings = Signal::derive(move || review.with(|s| s.services.table().len().to_string()));
    let pending = Signal::derive(move || review.with(|s| s.pending_count().to_string()));

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Services"</h1>
                    <p class="page__subtitle">"Platform catalog and clinic listings"</p>
                </div>
            </header>

            <div class="stat-grid">
                <StatCard label="Catalog entries" value=total/>
                <StatCard label="Enabled" value=active/>
                <StatCard label="Clinic listings" value=listings/>
                <StatCard label="Awaiting review" value=pending/>
            </div>

            <CatalogSection state=catalog/>
            <ReviewSection state=review/>
        </section>
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[component]
fn CatalogSection(state: RwSignal<CatalogState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let view_state = Signal::derive(move || state.with(|s| s.services.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());

    let on_search = Callback::new(move |raw: String| state.update(|s| s.services.view_state_mut().set_search(&raw)));
    let on_category =
        Callback::new(move |v| state.update(|s| s.services.view_state_mut().update_filters(|f| f.category = v)));
    let on_availability =
        Callback::new(move |v| state.update(|s| s.services.view_state_mut().update_filters(|f| f.availability = v)));
    let on_sort = Callback::new(move |key: CatalogSortKey| state.update(|s| s.services.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.services.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.services.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.services.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.services.export(format, clock::today())));

    let on_submit = Callback::new(move |()| act(state, notices, |s| s.submit(Uuid::new_v4(), clock::now())));
    let on_cancel = Callback::new(move |()| state.update(CatalogState::close));
    let on_delete = Callback::new(move |()| act(state, notices, CatalogState::confirm_delete));
    let on_delete_cancel = Callback::new(move |()| state.update(|s| s.services.cancel_delete()));

    let (form_title, form_error) = form_chrome::<_, CatalogDraft>(state, "catalog service");
    let (name, on_name) = bind_text(state, |d: &CatalogDraft| d.name.clone(), |d, v| d.name = v);
    let (description, on_description) =
        bind_text(state, |d: &CatalogDraft| d.description.clone(), |d, v| d.description = v);
    let (category, on_category_pick) =
        bind_value(state, ServiceCategory::Consultation, |d: &CatalogDraft| d.category, |d, v| d.category = v);
    let (enabled, on_enabled) = bind_value(state, true, |d: &CatalogDraft| d.is_active, |d, v| d.is_active = v);

    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.services
                .pending_delete()
                .map(|c| format!("Remove {} from the catalog? Existing clinic listings keep their copy.", c.name))
                .unwrap_or_default()
        })
    });

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>"Catalog"</h2>
                <button class="btn btn--primary" on:click=move |_| state.update(CatalogState::open_create)>
                    "+ Add service"
                </button>
            </header>

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search name or description"
                />
                <FacetSelect
                    label="Category"
                    value=Signal::derive(move || view_state.get().filters().category)
                    on_change=on_category
                />
                <FacetSelect
                    label="Availability"
                    value=Signal::derive(move || view_state.get().filters().availability)
                    on_change=on_availability
                />
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Name" key=CatalogSortKey::Name sort=sort on_sort=on_sort/>
                        <SortHeader label="Category" key=CatalogSortKey::Category sort=sort on_sort=on_sort/>
                        <th>"Description"</th>
                        <th>"Availability"</th>
                        <SortHeader label="Added" key=CatalogSortKey::Created sort=sort on_sort=on_sort/>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.services.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="6">"No catalog services match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|service| catalog_row(service, state, notices)).collect_view().into_any()
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
                    <Field label="Name">
                        <TextInput value=name on_input=on_name/>
                    </Field>
                    <Field label="Category">
                        <ChoiceSelect value=category on_change=on_category_pick/>
                    </Field>
                    <Field label="Description">
                        <textarea
                            class="dialog__input"
                            rows="3"
                            prop:value=move || description.get()
                            on:input=move |ev| on_description.run(event_target_value(&ev))
                        ></textarea>
                    </Field>
                    <Toggle label="Available to clinics" checked=enabled on_change=on_enabled/>
                </Modal>
            </Show>

            <Show when=move || state.with(|s| s.services.pending_delete().is_some())>
                <ConfirmDialog
                    title="Remove service"
                    message=delete_message
                    confirm_label="Remove"
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

fn catalog_row(service: CatalogService, state: RwSignal<CatalogState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = service.id;
    let toggle_label = if service.is_active { "Disable" } else { "Enable" };

    view! {
        <tr>
            <td>{service.name.clone()}</td>
            <td>{service.category.label()}</td>
            <td class="data-table__wrap">{service.description.clone()}</td>
            <td>
                <StatusBadge status=Availability::from(service.is_active)/>
            </td>
            <td>{format::date(service.created_at.date())}</td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=move |_| attempt(state, notices, |s| s.open_edit(id))>
                    "Edit"
                </button>
                <button class="btn btn--small" on:click=move |_| act(state, notices, |s| s.toggle_active(id))>
                    {toggle_label}
                </button>
                <button class="btn btn--small btn--danger" on:click=move |_| state.update(|s| s.services.request_delete(id))>
                    "Remove"
                </button>
            </td>
        </tr>
    }
}

// =============================================================================
// REVIEW
// =============================================================================

#[component]
fn ReviewSection(state: RwSignal<ReviewState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let view_state = Signal::derive(move || state.with(|s| s.services.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());

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

    view! {
        <section class="panel">
            <header class="panel__header">
                <h2>"Clinic listings"</h2>
            </header>

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search service or clinic"
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
                        <SortHeader label="Service" key=ClinicServiceSortKey::Name sort=sort on_sort=on_sort/>
                        <th>"Clinic"</th>
                        <th>"Video"</th>
                        <th>"In clinic"</th>
                        <th>"Home"</th>
                        <SortHeader label="Listed" key=ClinicServiceSortKey::Created sort=sort on_sort=on_sort/>
                        <th>"Approval"</th>
                        <th class="data-table__actions">"Review"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.services.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="8">"No listings match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|service| review_row(service, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.services.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />
        </section>
    }
}

fn review_row(service: ClinicService, state: RwSignal<ReviewState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = service.id;
    let pending = service.approval == ApprovalStatus::Pending;

    view! {
        <tr>
            <td>{service.name.clone()}</td>
            <td>{service.clinic_name.clone()}</td>
            <td>{format::charge(service.charges.video)}</td>
            <td>{format::charge(service.charges.physical)}</td>
            <td>{format::charge(service.charges.home)}</td>
            <td>{format::date(service.created_at.date())}</td>
            <td>
                <StatusBadge status=service.approval/>
            </td>
            <td class="data-table__actions">
                <Show when=move || pending fallback=|| view! { <span class="muted">"Reviewed"</span> }>
                    <button
                        class="btn btn--small btn--primary"
                        on:click=move |_| act(state, notices, |s| s.review(id, ReviewDecision::Approve))
                    >
                        "Approve"
                    </button>
                    <button
                        class="btn btn--small btn--danger"
                        on:click=move |_| act(state, notices, |s| s.review(id, ReviewDecision::Reject))
                    >
                        "Reject"
                    </button>
                </Show>
            </td>
        </tr>
    }
}
