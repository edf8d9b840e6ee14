//! Admin user management page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists every platform account with role/status/joined filters, and offers
//! create, edit, block, activate and delete through modals.

use leptos::prelude::*;
use records::query::Choice;
use records::user::{Role, User, UserDraft, UserSortKey};
use uuid::Uuid;

use super::{HasForm, act, attempt, bind_text, bind_value, form_chrome};
use crate::components::badge::{StatCard, StatusBadge};
use crate::components::controls::{ChoiceSelect, ClearFilters, DateRangeInputs, FacetSelect, SearchBox, SortHeader};
use crate::components::dialog::{ConfirmDialog, Field, Modal, TextInput, Toggle};
use crate::components::export_buttons::ExportButtons;
use crate::components::pager::Pager;
use crate::state::collection::Form;
use crate::state::notice::Notices;
use crate::state::users::UsersState;
use crate::util::{clock, format};

impl HasForm<UserDraft> for UsersState {
    fn form(&self) -> Option<&Form<UserDraft>> {
        self.form.as_ref()
    }

    fn form_mut(&mut self) -> Option<&mut Form<UserDraft>> {
        self.form.as_mut()
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();
    let state = RwSignal::new(UsersState::from_fixtures());

    let stats = Signal::derive(move || state.with(UsersState::stats));
    let view_state = Signal::derive(move || state.with(|s| s.users.view_state().clone()));
    let rows = move || state.with(|s| s.users.page_rows());

    let on_search = Callback::new(move |raw: String| state.update(|s| s.users.view_state_mut().set_search(&raw)));
    let on_role = Callback::new(move |role| state.update(|s| s.users.view_state_mut().update_filters(|f| f.role = role)));
    let on_status =
        Callback::new(move |status| state.update(|s| s.users.view_state_mut().update_filters(|f| f.status = status)));
    let on_joined =
        Callback::new(move |range| state.update(|s| s.users.view_state_mut().update_filters(|f| f.joined = range)));
    let on_sort = Callback::new(move |key: UserSortKey| state.update(|s| s.users.view_state_mut().toggle_sort(key)));
    let on_clear = Callback::new(move |()| state.update(|s| s.users.view_state_mut().reset()));
    let on_page = Callback::new(move |page| state.update(|s| s.users.view_state_mut().set_page(page)));
    let on_page_size = Callback::new(move |size| {
        state.update(|s| {
            s.users.view_state_mut().set_items_per_page(size);
        });
    });
    let on_export = Callback::new(move |format| state.with(|s| s.users.export(format, clock::today())));

    let on_submit = Callback::new(move |()| act(state, notices, |s| s.submit(Uuid::new_v4(), clock::now())));
    let on_cancel = Callback::new(move |()| state.update(UsersState::close));
    let on_delete = Callback::new(move |()| act(state, notices, UsersState::confirm_delete));
    let on_delete_cancel = Callback::new(move |()| state.update(|s| s.users.cancel_delete()));

    let (form_title, form_error) = form_chrome::<_, UserDraft>(state, "user");
    let (name, on_name) = bind_text(state, |d: &UserDraft| d.name.clone(), |d, v| d.name = v);
    let (email, on_email) = bind_text(state, |d: &UserDraft| d.email.clone(), |d, v| d.email = v);
    let (country, on_country) = bind_text(state, |d: &UserDraft| d.country_code.clone(), |d, v| d.country_code = v);
    let (phone, on_phone) = bind_text(state, |d: &UserDraft| d.phone.clone(), |d, v| d.phone = v);
    let (role, on_role_pick) = bind_value(state, Role::Patient, |d: &UserDraft| d.role, |d, v| d.role = v);
    let (active, on_active) = bind_value(state, true, |d: &UserDraft| d.is_active, |d, v| d.is_active = v);

    let delete_message = Signal::derive(move || {
        state.with(|s| {
            s.users
                .pending_delete()
                .map(|u| format!("Delete {} ({})? This cannot be undone.", u.name, u.email))
                .unwrap_or_default()
        })
    });

    view! {
        <section class="page">
            <header class="page__header">
                <div>
                    <h1>"Users"</h1>
                    <p class="page__subtitle">"Patients, clinics, experts and admins on the platform"</p>
                </div>
                <button class="btn btn--primary" on:click=move |_| state.update(UsersState::open_create)>
                    "+ Add user"
                </button>
            </header>

            <div class="stat-grid">
                <StatCard label="Total" value=Signal::derive(move || stats.get().total.to_string())/>
                <StatCard label="Active" value=Signal::derive(move || stats.get().active.to_string())/>
                <StatCard label="Inactive" value=Signal::derive(move || stats.get().inactive.to_string())/>
                <StatCard label="Blocked" value=Signal::derive(move || stats.get().blocked.to_string())/>
            </div>

            <div class="table-toolbar">
                <SearchBox
                    value=Signal::derive(move || view_state.get().search().raw().to_owned())
                    on_input=on_search
                    placeholder="Search name, email or phone"
                />
                <FacetSelect label="Role" value=Signal::derive(move || view_state.get().filters().role) on_change=on_role/>
                <FacetSelect
                    label="Status"
                    value=Signal::derive(move || view_state.get().filters().status)
                    on_change=on_status
                />
                <DateRangeInputs
                    label="Joined"
                    value=Signal::derive(move || view_state.get().filters().joined)
                    on_change=on_joined
                />
                <ClearFilters visible=Signal::derive(move || view_state.get().is_filtered()) on_clear=on_clear/>
                <span class="table-toolbar__spacer"></span>
                <ExportButtons export=on_export/>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <SortHeader label="Name" key=UserSortKey::Name sort=Signal::derive(move || view_state.get().sort()) on_sort=on_sort/>
                        <SortHeader label="Email" key=UserSortKey::Email sort=Signal::derive(move || view_state.get().sort()) on_sort=on_sort/>
                        <th>"Phone"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
                        <SortHeader label="Joined" key=UserSortKey::Joined sort=Signal::derive(move || view_state.get().sort()) on_sort=on_sort/>
                        <th class="data-table__actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td class="data-table__empty" colspan="7">"No users match these filters."</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter().map(|user| user_row(user, state, notices)).collect_view().into_any()
                    }}
                </tbody>
            </table>

            <Pager
                window=Signal::derive(move || state.with(|s| s.users.window()))
                page_size=Signal::derive(move || view_state.get().pagination().items_per_page())
                on_page=on_page
                on_page_size=on_page_size
            />

            <Show when=move || state.with(|s| s.form.is_some())>
                <Modal title=form_title error=form_error on_cancel=on_cancel on_submit=on_submit>
                    <Field label="Full name">
                        <TextInput value=name on_input=on_name/>
                    </Field>
                    <Field label="Email">
                        <TextInput value=email on_input=on_email kind="email"/>
                    </Field>
                    <div class="dialog__row">
                        <Field label="Code">
                            <TextInput value=country on_input=on_country placeholder="+91"/>
                        </Field>
                        <Field label="Phone">
                            <TextInput value=phone on_input=on_phone kind="tel"/>
                        </Field>
                    </div>
                    <Field label="Role">
                        <ChoiceSelect value=role on_change=on_role_pick/>
                    </Field>
                    <Toggle label="Account active" checked=active on_change=on_active/>
                </Modal>
            </Show>

            <Show when=move || state.with(|s| s.users.pending_delete().is_some())>
                <ConfirmDialog
                    title="Delete user"
                    message=delete_message
                    on_confirm=on_delete
                    on_cancel=on_delete_cancel
                />
            </Show>
        </section>
    }
}

fn user_row(user: User, state: RwSignal<UsersState>, notices: RwSignal<Notices>) -> impl IntoView {
    let id = user.id;
    let block_label = user.block_action().label();
    let active_label = if user.is_active { "Deactivate" } else { "Activate" };

    view! {
        <tr>
            <td>{user.name.clone()}</td>
            <td>{user.email.clone()}</td>
            <td>{user.full_phone()}</td>
            <td>{user.role.label()}</td>
            <td>
                <StatusBadge status=user.status()/>
            </td>
            <td>{format::date(user.created_at.date())}</td>
            <td class="data-table__actions">
                <button class="btn btn--small" on:click=move |_| attempt(state, notices, |s| s.open_edit(id))>
                    "Edit"
                </button>
                <button class="btn btn--small" on:click=move |_| act(state, notices, |s| s.toggle_block(id, clock::now()))>
                    {block_label}
                </button>
                <button class="btn btn--small" on:click=move |_| act(state, notices, |s| s.toggle_active(id, clock::now()))>
                    {active_label}
                </button>
                <button class="btn btn--small btn--danger" on:click=move |_| state.update(|s| s.users.request_delete(id))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
