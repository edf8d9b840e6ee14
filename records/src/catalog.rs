//! Generic service catalog maintained by platform admins.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::query::{Choice, Facet, FilterSet, Record};
use crate::validate::{ValidationErrors, Validator};

pub const MAX_DESCRIPTION_LEN: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Consultation,
    Diagnostics,
    Therapy,
    Dental,
    Wellness,
    Vaccination,
}

impl Choice for ServiceCategory {
    const ALL: &'static [Self] = &[
        Self::Consultation,
        Self::Diagnostics,
        Self::Therapy,
        Self::Dental,
        Self::Wellness,
        Self::Vaccination,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Consultation => "CONSULTATION",
            Self::Diagnostics => "DIAGNOSTICS",
            Self::Therapy => "THERAPY",
            Self::Dental => "DENTAL",
            Self::Wellness => "WELLNESS",
            Self::Vaccination => "VACCINATION",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Consultation => "Consultation",
            Self::Diagnostics => "Diagnostics",
            Self::Therapy => "Therapy",
            Self::Dental => "Dental",
            Self::Wellness => "Wellness",
            Self::Vaccination => "Vaccination",
        }
    }
}

/// Active/inactive facet for catalog entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Active,
    Inactive,
}

impl Choice for Availability {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl From<bool> for Availability {
    fn from(active: bool) -> Self {
        if active { Self::Active } else { Self::Inactive }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogService {
    pub id: Uuid,
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub is_active: bool,
    pub created_at: PrimitiveDateTime,
}

impl CatalogService {
    pub fn toggle_active(&mut self) -> bool {
        self.is_active = !self.is_active;
        self.is_active
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogSortKey {
    Name,
    Category,
    Created,
}

impl Record for CatalogService {
    type SortKey = CatalogSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, self.category.label(), &self.description]
    }

    fn compare_by(&self, other: &Self, key: CatalogSortKey) -> Ordering {
        match key {
            CatalogSortKey::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            CatalogSortKey::Category => self.category.label().cmp(other.category.label()),
            CatalogSortKey::Created => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogFilters {
    pub category: Facet<ServiceCategory>,
    pub availability: Facet<Availability>,
}

impl FilterSet<CatalogService> for CatalogFilters {
    fn matches(&self, service: &CatalogService) -> bool {
        self.category.matches(&service.category)
            && self.availability.matches(&Availability::from(service.is_active))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogDraft {
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub is_active: bool,
}

impl Default for CatalogDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: ServiceCategory::Consultation,
            description: String::new(),
            is_active: true,
        }
    }
}

impl From<&CatalogService> for CatalogDraft {
    fn from(service: &CatalogService) -> Self {
        Self {
            name: service.name.clone(),
            category: service.category,
            description: service.description.clone(),
            is_active: service.is_active,
        }
    }
}

impl CatalogDraft {
    /// # Errors
    ///
    /// Returns every invalid field. Names must be unique (case-insensitive)
    /// among `existing`, ignoring the entry being edited.
    pub fn validate<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a CatalogService>,
        editing: Option<Uuid>,
    ) -> Result<(), ValidationErrors> {
        let name = self.name.trim().to_lowercase();
        let duplicate = existing
            .into_iter()
            .any(|s| Some(s.id) != editing && s.name.trim().to_lowercase() == name);

        Validator::new()
            .required("name", "Service name", &self.name)
            .check(!duplicate, "name", "A service with this name already exists")
            .check(
                self.description.chars().count() <= MAX_DESCRIPTION_LEN,
                "description",
                &format!("Description must be at most {MAX_DESCRIPTION_LEN} characters"),
            )
            .finish()
    }

    #[must_use]
    pub fn build(&self, id: Uuid, now: PrimitiveDateTime) -> CatalogService {
        CatalogService {
            id,
            name: self.name.trim().to_owned(),
            category: self.category,
            description: self.description.trim().to_owned(),
            is_active: self.is_active,
            created_at: now,
        }
    }

    pub fn apply(&self, service: &mut CatalogService) {
        service.name = self.name.trim().to_owned();
        service.category = self.category;
        service.description = self.description.trim().to_owned();
        service.is_active = self.is_active;
    }
}
