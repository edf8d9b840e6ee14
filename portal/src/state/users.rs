//! Admin user management.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use records::fixtures;
use records::user::{AccountStatus, User, UserDraft, UserFilters, UserSortKey};
use records::{RecordError, SortSpec, ValidationErrors};
use time::PrimitiveDateTime;
use uuid::Uuid;

use super::ActionError;
use super::collection::{Collection, Form, FormMode, settle_form};

const FIXTURE_USERS: usize = 64;

/// Headline counts for the cards above the users table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub blocked: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsersState {
    pub users: Collection<User, UserFilters>,
    pub form: Option<Form<UserDraft>>,
}

impl UsersState {
    #[must_use]
    pub fn new(rows: Vec<User>) -> Self {
        Self { users: Collection::new(rows, Some(SortSpec::desc(UserSortKey::Joined))), form: None }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::users(FIXTURE_USERS))
    }

    #[must_use]
    pub fn stats(&self) -> UserStats {
        let mut stats = UserStats::default();
        for user in self.users.table().rows() {
            stats.total += 1;
            match user.status() {
                AccountStatus::Active => stats.active += 1,
                AccountStatus::Inactive => stats.inactive += 1,
                AccountStatus::Blocked => stats.blocked += 1,
            }
        }
        stats
    }

    pub fn open_create(&mut self) {
        self.form = Some(Form::create(UserDraft::default()));
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the user no longer exists.
    pub fn open_edit(&mut self, id: Uuid) -> Result<(), ActionError> {
        let user = self.users.get(id).ok_or(RecordError::NotFound(id))?;
        self.form = Some(Form::edit(id, UserDraft::from(user)));
        Ok(())
    }

    pub fn close(&mut self) {
        self.form = None;
    }

    /// Save the open form. `id` is used only when creating.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when no form is open, otherwise the
    /// validation failure, which is also kept on the form.
    pub fn submit(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(form) = self.form.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let (mode, draft) = (form.mode, form.draft.clone());
        let outcome = self.save(mode, &draft, id, now);
        settle_form(&mut self.form, outcome)
    }

    fn save(&mut self, mode: FormMode, draft: &UserDraft, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        draft.validate()?;
        let editing = match mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        };
        let email = draft.email.trim().to_lowercase();
        let taken = self.users.table().rows().iter().any(|u| Some(u.id) != editing && u.email == email);
        if taken {
            return Err(ValidationErrors::single("email", "A user with this email already exists").into());
        }

        match mode {
            FormMode::Create => {
                let user = draft.create(id, now)?;
                let message = format!("Created {}", user.name);
                self.users.table_mut().insert(user);
                Ok(message)
            }
            FormMode::Edit(id) => {
                let name = self.users.table_mut().update(id, |user| {
                    draft.apply(user, now)?;
                    Ok(user.name.clone())
                })?;
                Ok(format!("Updated {name}"))
            }
        }
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the user no longer exists.
    pub fn toggle_block(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let message = self.users.table_mut().update(id, |user| {
            let verb = if user.toggle_block(now) { "Blocked" } else { "Unblocked" };
            Ok(format!("{verb} {}", user.name))
        })?;
        log::info!("{message}");
        Ok(message)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the user no longer exists.
    pub fn toggle_active(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let message = self.users.table_mut().update(id, |user| {
            let verb = if user.toggle_active(now) { "Activated" } else { "Deactivated" };
            Ok(format!("{verb} {}", user.name))
        })?;
        log::info!("{message}");
        Ok(message)
    }

    /// # Errors
    ///
    /// See [`Collection::confirm_delete`].
    pub fn confirm_delete(&mut self) -> Result<String, ActionError> {
        let user = self.users.confirm_delete()?;
        log::info!("deleted user {}", user.id);
        Ok(format!("Deleted {}", user.name))
    }
}
