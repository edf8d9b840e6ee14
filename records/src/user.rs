//! Platform users managed from the admin console.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::query::{Choice, DateRange, Facet, FilterSet, Record};
use crate::validate::{ValidationErrors, Validator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Clinic,
    Expert,
    Patient,
}

impl Choice for Role {
    const ALL: &'static [Self] = &[Self::Admin, Self::Clinic, Self::Expert, Self::Patient];

    fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Clinic => "CLINIC",
            Self::Expert => "EXPERT",
            Self::Patient => "PATIENT",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Clinic => "Clinic",
            Self::Expert => "Expert",
            Self::Patient => "Patient",
        }
    }
}

/// Account state derived from the active and blocked flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Blocked,
}

impl Choice for AccountStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Blocked];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Blocked => "BLOCKED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Blocked => "Blocked",
        }
    }
}

/// The moderation action currently offered for a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockAction {
    Block,
    Unblock,
}

impl BlockAction {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Block => "Block",
            Self::Unblock => "Unblock",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
    pub is_blocked: bool,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl User {
    #[must_use]
    pub fn status(&self) -> AccountStatus {
        if self.is_blocked {
            AccountStatus::Blocked
        } else if self.is_active {
            AccountStatus::Active
        } else {
            AccountStatus::Inactive
        }
    }

    #[must_use]
    pub fn block_action(&self) -> BlockAction {
        if self.is_blocked { BlockAction::Unblock } else { BlockAction::Block }
    }

    /// Flip the blocked flag and return the new value.
    pub fn toggle_block(&mut self, now: PrimitiveDateTime) -> bool {
        self.is_blocked = !self.is_blocked;
        self.updated_at = now;
        self.is_blocked
    }

    /// Flip the active flag and return the new value.
    pub fn toggle_active(&mut self, now: PrimitiveDateTime) -> bool {
        self.is_active = !self.is_active;
        self.updated_at = now;
        self.is_active
    }

    #[must_use]
    pub fn full_phone(&self) -> String {
        format!("{} {}", self.country_code, self.phone)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserSortKey {
    Name,
    Email,
    Joined,
}

impl Record for User {
    type SortKey = UserSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.phone]
    }

    fn compare_by(&self, other: &Self, key: UserSortKey) -> Ordering {
        match key {
            UserSortKey::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            UserSortKey::Email => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            UserSortKey::Joined => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub role: Facet<Role>,
    pub status: Facet<AccountStatus>,
    pub joined: DateRange,
}

impl FilterSet<User> for UserFilters {
    fn matches(&self, user: &User) -> bool {
        self.role.matches(&user.role)
            && self.status.matches(&user.status())
            && self.joined.contains(user.created_at.date())
    }
}

/// Create/edit form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub country_code: String,
    pub phone: String,
    pub role: Role,
    pub is_active: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            country_code: "+91".to_owned(),
            phone: String::new(),
            role: Role::Patient,
            is_active: true,
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            country_code: user.country_code.clone(),
            phone: user.phone.clone(),
            role: user.role,
            is_active: user.is_active,
        }
    }
}

impl UserDraft {
    /// # Errors
    ///
    /// Returns every invalid field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        Validator::new()
            .required("name", "Name", &self.name)
            .email("email", &self.email)
            .country_code("country_code", &self.country_code)
            .phone("phone", &self.phone)
            .finish()
    }

    /// Build a new user from a valid draft.
    ///
    /// # Errors
    ///
    /// Returns every invalid field.
    pub fn create(&self, id: Uuid, now: PrimitiveDateTime) -> Result<User, ValidationErrors> {
        self.validate()?;
        Ok(User {
            id,
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            country_code: self.country_code.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            role: self.role,
            is_active: self.is_active,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the editable fields of `user`.
    ///
    /// # Errors
    ///
    /// Returns every invalid field; `user` is left untouched.
    pub fn apply(&self, user: &mut User, now: PrimitiveDateTime) -> Result<(), ValidationErrors> {
        self.validate()?;
        user.name = self.name.trim().to_owned();
        user.email = self.email.trim().to_lowercase();
        user.country_code = self.country_code.trim().to_owned();
        user.phone = self.phone.trim().to_owned();
        user.role = self.role;
        user.is_active = self.is_active;
        user.updated_at = now;
        Ok(())
    }
}
