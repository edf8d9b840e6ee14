//! Badge colours for status values.

#[cfg(test)]
#[path = "tone_test.rs"]
mod tone_test;

use records::booking::BookingStatus;
use records::catalog::Availability;
use records::clinic_service::ApprovalStatus;
use records::dues::DuesStatus;
use records::slot::SlotStatus;
use records::user::AccountStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Tone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "badge badge--success",
            Self::Warning => "badge badge--warning",
            Self::Danger => "badge badge--danger",
            Self::Info => "badge badge--info",
            Self::Neutral => "badge badge--neutral",
        }
    }
}

/// A status that renders as a coloured badge.
pub trait Toned {
    fn tone(self) -> Tone;
}

impl Toned for BookingStatus {
    fn tone(self) -> Tone {
        match self {
            Self::Pending => Tone::Warning,
            Self::Confirmed => Tone::Info,
            Self::Completed => Tone::Success,
            Self::Canceled => Tone::Danger,
        }
    }
}

impl Toned for ApprovalStatus {
    fn tone(self) -> Tone {
        match self {
            Self::Approved => Tone::Success,
            Self::Pending => Tone::Warning,
            Self::Rejected => Tone::Danger,
        }
    }
}

impl Toned for SlotStatus {
    fn tone(self) -> Tone {
        match self {
            Self::Available => Tone::Success,
            Self::Full => Tone::Info,
            Self::Blocked => Tone::Neutral,
        }
    }
}

impl Toned for DuesStatus {
    fn tone(self) -> Tone {
        match self {
            Self::Clear => Tone::Success,
            Self::Partial => Tone::Warning,
            Self::Outstanding => Tone::Danger,
        }
    }
}

impl Toned for AccountStatus {
    fn tone(self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::Inactive => Tone::Neutral,
            Self::Blocked => Tone::Danger,
        }
    }
}

impl Toned for Availability {
    fn tone(self) -> Tone {
        match self {
            Self::Active => Tone::Success,
            Self::Inactive => Tone::Neutral,
        }
    }
}
