//! Admin dues page: platform fees owed by each clinic.

use leptos::prelude::*;
use records::dues::{ClinicDues, DuesSortKey, PLATFORM_FEE_BPS, PaymentMethod};
use records::query::Choice;
use uuid::Uuid;

use super::{HasForm, act, attempt, bind_text, bind_value};
use crate::components::badge::{StatCard, StatusBadge};
use crate::components::controls::{ChoiceSelect, ClearFilters, FacetSelect, SearchBox, SortHeader};
use crate::components::dialog::{Field, Modal, TextInput};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::collection::{Form, FormMode};
use crate::state::dues::{DuesState, PaymentInput};
use crate::state::notice::Notices;
use crate::util::{clock, format};

impl HasForm<PaymentInput> for DuesState {
    fn form(&self) -> Option<&Form<PaymentInput>> {
        self.payment.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<PaymentInput>> {
        self.payment.as_mut()
    }
}

#[component]
pub fn AdminDuesPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let state = RwSignal::new(DuesState::from_fixtures());

    let summary = Signal::derive(move || state.with(DuesState::summary));
    let view_state = Signal::derive(move || state.with(|s| s.clinics.view_state().clone()));
    let sort = Signal::derive(move || view_state.get().sort());

    let on_search = Callback::new(move |raw: String| state.update(|s| s.clinics.view_state_mut().set_search(&raw)));
    let on_status =
        Callback::new(move |status| state.update(|s| s.clinics.view_state_mut().update_filters(|f| f.status = status)));
    let on_sort = Callback::new(move |key: DuesSortKey| state.update(|s| s.clinics.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.clinics.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.clinics.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.clinics.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.clinics.export(format, clock::today())));

    let on_pay = Callback::new(move |()| act(state, notices, |s| s.submit_payment(Uuid::new_v4(), clock::now())));
    let on_pay_cancel = Callback::new(move |()| state.update(DuesState::close_payment));
    let pay_title = Signal::derive(move || {
        state.with(|s| {
            let clinic = s.payment.as_ref().and_then(|f| match f.mode {
                FormMode::Edit(id) => s.clinics.get(id),
                FormMode::Create => None,
            });
            clinic.map(|c| format!("Record payment from {}", c.clinic_name)).unwrap_or_default()
        })
    });
    let pay_error = Signal::derive(move || state.with(|s| s.payment.as_ref().and_then(|f| f.error.clone())));
    let (amount, on_amount) = bind_text(state, |d: &PaymentInput| d.amount.clone(), |d, v| d.amount = v);
    let (reference, on_reference) = bind_text(state, |d: &PaymentInput| d.reference.clone(), |d, v| d.reference = v);
    let (method, on_method) =
        bind_value(state, PaymentMethod::BankTransfer, |d: &PaymentInput| d.method, |d, v| d.method = v);

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Dues"</h1>
                    <p class="page__subtitle">
                        {format!("Platform fee of {}% on clinic earnings", PLATFORM_FEE_BPS / 100)}
                    </p>
                </div>
            </header>

            <div class="stat-grid">
                <StatCard
                    label="Gross earnings"
                    value=Signal::derive(move || format::rupees(summary.get().total_earned))
                    hint=Signal::derive(move || format!("{} bookings", summary.get().total_bookings))
                />
                <StatCard label="Platform fees" value=Signal::derive(move || format::rupees(summary.get().platform_fee))/>
                <StatCard
                    label="Collected"
                    value=Signal::derive(move || format::rupees(summary.get().amount_paid))
                    hint=Signal::derive(move || format!("{}% of fees", summary.get().collected_percent()))
                />
                <StatCard
                    label="Outstanding"
                    value=Signal::derive(move || format::rupees(summary.get().outstanding))
                    hint=Signal::derive(move || {
                        let s = summary.get();
                        format!("{} clear · {} partial · {} unpaid", s.clear, s.partial, s.unpaid)
                    })
                />
            </div>

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search clinic"
                />
                <FacetSelect label="Status" value=Signal::derive(move || view_state.get().filters().status) on_change=on_status/>
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Clinic" key=DuesSortKey::ClinicName sort=sort on_sort=on_sort/>
                        <th>"Bookings"</th>
                        <SortHeader label="Earned" key=DuesSortKey::TotalEarned sort=sort on_sort=on_sort/>
                        <th>"Fee"</th>
                        <th>"Paid"</th>
                        <SortHeader label="Outstanding" key=DuesSortKey::Outstanding sort=sort on_sort=on_sort/>
                        <SortHeader label="Last payment" key=DuesSortKey::LastPayment sort=sort on_sort=on_sort/>
                        <th>"Status"</th>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = state.with(|s| s.clinics.page_rows());
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="9">"No clinics match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|clinic| dues_row(clinic, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.clinics.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />

            <Show when=move || state.with(|s| s.payment.is_some())>
                <Modal title=pay_title error=pay_error submit_label="Record payment" on_cancel=on_pay_cancel on_submit=on_pay>
                    <Field label="Amount (₹)">
                        <TextInput value=amount on_input=on_amount kind="text"/>
                    </Field>
                    <Field label="Method">
                        <ChoiceSelect value=method on_change=on_method/>
                    </Field>
                    <Field label="Reference">
                        <TextInput value=reference on_input=on_reference placeholder="UTR / transaction id"/>
                    </Field>
                </Modal>
            </Show>

            {move || state.with(|s| s.history().cloned()).map(|clinic| history_dialog(clinic, state))}
        </section>
    }
}

fn dues_row(clinic: ClinicDues, state: RwSignal<DuesState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = clinic.id;
    let owes = clinic.outstanding().is_positive();
    let last = clinic.last_payment_at.map_or_else(|| "Never".to_owned(), |at| format::date(at.date()));

    view! {
        <tr>
            <td>{clinic.clinic_name.clone()}</td>
            <td>{clinic.total_bookings}</td>
            <td>{format::rupees(clinic.total_earned)}</td>
            <td>{format::rupees(clinic.platform_fee)}</td>
            <td>{format::rupees(clinic.amount_paid)}</td>
            <td>{format::rupees(clinic.outstanding())}</td>
            <td>{last}</td>
            <td>
                <StatusBadge status=clinic.status()/>
            </td>
            <td class="data-table__actions">
                <button
                    class="btn btn--small btn--primary"
                    disabled=!owes
                    on:click=move |_| attempt(state, notices, |s| s.open_payment(id))
                >
                    "Record payment"
                </button>
                <button class="btn btn--small" on:click=move |_| state.update(|s| s.open_history(id))>
                    "History"
                </button>
            </td>
        </tr>
    }
}

fn history_dialog(clinic: ClinicDues, state: RwSignal<DuesState>) -> impl IntoView {
    let close = move |_| state.update(DuesState::close_history);
    let empty = clinic.transactions.is_empty();

    view! {
        <div class="dialog-backdrop" on:click=close>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                <h2>{format!("Payments from {}", clinic.clinic_name)}</h2>
                <Show when=move || empty>
                    <p class="dialog__empty">"No payments recorded yet."</p>
                </Show>
                <table class="data-table data-table--compact">
                    <thead>
                        <tr>
                            <th>"Date"</th>
                            <th>"Amount"</th>
                            <th>"Method"</th>
                            <th>"Reference"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {clinic
                            .transactions
                            .iter()
                            .map(|t| {
                                view! {
                                    <tr>
                                        <td>{format::date_time(t.paid_at)}</td>
                                        <td>{format::rupees(t.amount)}</td>
                                        <td>{t.method.label()}</td>
                                        <td>{t.reference.clone()}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
                <div class="dialog__actions">
                    <button class="btn" on:click=close>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}
