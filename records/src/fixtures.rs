//! Deterministic mock data for every dashboard.
//!
//! DESIGN
//! ======
//! Every generator seeds its own `StdRng` from [`SEED`] and a per-collection
//! salt, and places dates relative to the fixed [`ANCHOR`]. The server
//! renders and the browser hydrates from the same calls, so both produce
//! byte-identical markup without shipping the data over the wire.

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures_test;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use time::macros::datetime;
use time::{Duration, PrimitiveDateTime, Time};
use uuid::{Builder, Uuid};

use crate::booking::{Booking, BookingStatus, ConsultationMode, Provider};
use crate::catalog::{CatalogService, ServiceCategory};
use crate::clinic_service::{ApprovalStatus, Charges, ClinicService};
use crate::dues::{ClinicDues, PaymentMethod, Transaction};
use crate::money::Money;
use crate::query::Choice;
use crate::schedule::{SlotTemplate, WeekdaySet};
use crate::slot::{Slot, SlotBatch, SlotOwner};
use crate::user::{Role, User};

pub const SEED: u64 = 0x0C4E_2025;

/// "Now" for all generated data. A Monday.
pub const ANCHOR: PrimitiveDateTime = datetime!(2025-06-02 09:00);

const CLINIC_NAMES: [&str; 8] = [
    "Sunrise Multispeciality Clinic",
    "Lotus Family Health",
    "Apollo Care Point",
    "Green Valley Clinic",
    "CityCare Diagnostics",
    "Harmony Wellness Centre",
    "BlueCross Polyclinic",
    "Riverside Medical",
];

const EXPERT_NAMES: [&str; 6] = [
    "Dr. Meera Iyer",
    "Dr. Arjun Rao",
    "Dr. Kavya Menon",
    "Dr. Rohan Desai",
    "Dr. Sana Qureshi",
    "Dr. Vikram Nair",
];

const FIRST_NAMES: [&str; 16] = [
    "Aarav", "Ananya", "Vihaan", "Diya", "Ishaan", "Saanvi", "Kabir", "Myra", "Reyansh", "Aadhya", "Arjun", "Kiara",
    "Vivaan", "Anika", "Aditya", "Pari",
];

const LAST_NAMES: [&str; 10] =
    ["Sharma", "Patel", "Reddy", "Iyer", "Gupta", "Khan", "Singh", "Das", "Mehta", "Joshi"];

const CATALOG: [(&str, ServiceCategory, &str); 12] = [
    ("General Physician", ServiceCategory::Consultation, "Routine consultation for common illnesses"),
    ("Pediatric Consultation", ServiceCategory::Consultation, "Child health checkups and advice"),
    ("Dermatology Consultation", ServiceCategory::Consultation, "Skin, hair and nail conditions"),
    ("Complete Blood Count", ServiceCategory::Diagnostics, "Standard blood panel"),
    ("Thyroid Profile", ServiceCategory::Diagnostics, "T3, T4 and TSH levels"),
    ("Chest X-Ray", ServiceCategory::Diagnostics, "Single view chest radiograph"),
    ("Physiotherapy Session", ServiceCategory::Therapy, "Guided rehabilitation exercises"),
    ("Counselling Session", ServiceCategory::Therapy, "One-on-one talk therapy"),
    ("Dental Cleaning", ServiceCategory::Dental, "Scaling and polishing"),
    ("Root Canal Review", ServiceCategory::Dental, "Follow-up after endodontic treatment"),
    ("Nutrition Planning", ServiceCategory::Wellness, "Personalised diet plan"),
    ("Flu Vaccination", ServiceCategory::Vaccination, "Seasonal influenza vaccine"),
];

/// A clinic or expert that owns records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    pub id: Uuid,
    pub name: String,
}

fn rng_for(salt: u64) -> StdRng {
    StdRng::seed_from_u64(SEED ^ salt.rotate_left(32))
}

fn next_id(rng: &mut StdRng) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

fn parties(salt: u64, names: &[&str]) -> Vec<Party> {
    let mut rng = rng_for(salt);
    names.iter().map(|name| Party { id: next_id(&mut rng), name: (*name).to_owned() }).collect()
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    // Callers pass non-empty constant tables.
    &items[rng.random_range(0..items.len())]
}

fn days_before(days: i64) -> PrimitiveDateTime {
    ANCHOR - Duration::days(days)
}

fn at_hour(date_time: PrimitiveDateTime, hour: u8, minute: u8) -> PrimitiveDateTime {
    Time::from_hms(hour, minute, 0).map_or(date_time, |t| date_time.replace_time(t))
}

fn money_between(rng: &mut StdRng, low: i64, high: i64, step: i64) -> Money {
    Money::from_major(rng.random_range(low / step..=high / step) * step)
}

// =============================================================================
// PARTIES
// =============================================================================

#[must_use]
pub fn clinics() -> Vec<Party> {
    parties(1, &CLINIC_NAMES)
}

#[must_use]
pub fn experts() -> Vec<Party> {
    parties(2, &EXPERT_NAMES)
}

/// The clinic whose portal the clinic pages show.
#[must_use]
pub fn current_clinic() -> Party {
    clinics().swap_remove(0)
}

/// The expert whose portal the expert page shows.
#[must_use]
pub fn current_expert() -> Party {
    experts().swap_remove(0)
}

// =============================================================================
// USERS
// =============================================================================

#[must_use]
pub fn users(count: usize) -> Vec<User> {
    let mut rng = rng_for(3);
    (0..count)
        .map(|n| {
            let first = *pick(&mut rng, &FIRST_NAMES);
            let last = *pick(&mut rng, &LAST_NAMES);
            let role = *pick(&mut rng, &[Role::Patient, Role::Patient, Role::Patient, Role::Clinic, Role::Expert, Role::Admin]);
            let created_at = at_hour(days_before(rng.random_range(1..=365)), rng.random_range(8..=20), 0);
            let updated_at = created_at + Duration::days(rng.random_range(0..=30));
            User {
                id: next_id(&mut rng),
                name: format!("{first} {last}"),
                email: format!("{}.{}{n}@example.com", first.to_lowercase(), last.to_lowercase()),
                country_code: if rng.random_bool(0.85) { "+91" } else { "+1" }.to_owned(),
                phone: format!("{}{:09}", rng.random_range(7..=9), rng.random_range(0..1_000_000_000u32)),
                role,
                is_active: rng.random_bool(0.8),
                is_blocked: rng.random_bool(0.1),
                created_at,
                updated_at: updated_at.min(ANCHOR),
            }
        })
        .collect()
}

// =============================================================================
// SERVICES
// =============================================================================

#[must_use]
pub fn catalog() -> Vec<CatalogService> {
    let mut rng = rng_for(4);
    CATALOG
        .iter()
        .enumerate()
        .map(|(i, (name, category, description))| CatalogService {
            id: next_id(&mut rng),
            name: (*name).to_owned(),
            category: *category,
            description: (*description).to_owned(),
            is_active: i % 5 != 4,
            created_at: at_hour(days_before(200 - i64::try_from(i).unwrap_or(0) * 7), 10, 30),
        })
        .collect()
}

fn charges(rng: &mut StdRng) -> Charges {
    let mut charges = Charges {
        video: rng.random_bool(0.7).then(|| money_between(rng, 300, 900, 50)),
        physical: rng.random_bool(0.8).then(|| money_between(rng, 500, 1_500, 50)),
        home: rng.random_bool(0.3).then(|| money_between(rng, 1_000, 2_500, 100)),
    };
    if charges.lowest().is_none() {
        charges.physical = Some(money_between(rng, 500, 1_500, 50));
    }
    charges
}

/// Services offered by the first few clinics, each referencing a catalog entry.
#[must_use]
pub fn clinic_services() -> Vec<ClinicService> {
    let mut rng = rng_for(5);
    let catalog = catalog();
    let clinics = clinics();
    let mut out = Vec::new();
    for clinic in clinics.iter().take(4) {
        let offered = rng.random_range(5..=9);
        for (rank, entry) in catalog.choose_multiple(&mut rng, offered).enumerate() {
            // Every clinic has at least one live listing and one awaiting review.
            let approval = match rank {
                0 => ApprovalStatus::Approved,
                1 => ApprovalStatus::Pending,
                _ => *pick(
                    &mut rng,
                    &[ApprovalStatus::Approved, ApprovalStatus::Approved, ApprovalStatus::Pending, ApprovalStatus::Rejected],
                ),
            };
            let created_at = at_hour(days_before(rng.random_range(10..=120)), 11, 0);
            out.push(ClinicService {
                id: next_id(&mut rng),
                clinic_id: clinic.id,
                clinic_name: clinic.name.clone(),
                catalog_service_id: entry.id,
                name: entry.name.clone(),
                charges: charges(&mut rng),
                approval,
                rank: u32::try_from(rank + 1).unwrap_or(1) * 10,
                display_date: (ANCHOR + Duration::days(rng.random_range(-20..=40))).date(),
                created_at,
            });
        }
    }
    out
}

// =============================================================================
// SLOTS
// =============================================================================

fn slot_batch(owner: SlotOwner, weekdays: WeekdaySet, times: &[&str], duration_minutes: u32, capacity: u32) -> SlotBatch {
    SlotBatch {
        template: SlotTemplate {
            start_date: days_before(7).date(),
            end_date: (ANCHOR + Duration::days(13)).date(),
            weekdays,
            times: times.iter().map(|t| (*t).to_owned()).collect(),
        },
        owner,
        duration_minutes,
        capacity,
    }
}

/// Slots over three weeks around the anchor, with some capacity already taken.
fn booked_slots(salt: u64, batches: Vec<SlotBatch>) -> Vec<Slot> {
    let mut rng = rng_for(salt);
    let mut slots: Vec<Slot> = Vec::new();
    for batch in batches {
        // Templates are constants; an invalid one yields no slots.
        let generated = batch
            .generate(&slots, || next_id(&mut rng), days_before(14))
            .unwrap_or_default();
        slots.extend(generated);
    }
    for slot in &mut slots {
        slot.available_slots = rng.random_range(0..=slot.max_bookings);
        slot.is_blocked = rng.random_bool(0.08);
    }
    slots.sort_by_key(|s| s.start_time);
    slots
}

/// Slots for the current clinic's approved services.
#[must_use]
pub fn clinic_slots(services: &[ClinicService]) -> Vec<Slot> {
    let clinic = current_clinic();
    let batches = services
        .iter()
        .filter(|s| s.clinic_id == clinic.id && s.approval == ApprovalStatus::Approved)
        .take(3)
        .map(|s| {
            slot_batch(
                SlotOwner::ClinicService { id: s.id, name: s.name.clone() },
                WeekdaySet::WEEKDAYS,
                &["10:00", "15:00"],
                30,
                4,
            )
        })
        .collect();
    booked_slots(6, batches)
}

/// Slots for the current expert.
#[must_use]
pub fn expert_slots() -> Vec<Slot> {
    let expert = current_expert();
    let owner = SlotOwner::Expert { id: expert.id, name: expert.name };
    let weekdays = WeekdaySet::from_iso([1, 3, 5, 6]).unwrap_or(WeekdaySet::WEEKDAYS);
    booked_slots(7, vec![slot_batch(owner, weekdays, &["09:00", "11:30", "17:00"], 45, 1)])
}

// =============================================================================
// BOOKINGS
// =============================================================================

/// Bookings spread a month either side of the anchor. Past bookings are
/// mostly settled, future ones open.
#[must_use]
pub fn bookings(count: usize) -> Vec<Booking> {
    let mut rng = rng_for(8);
    let clinics = clinics();
    let experts = experts();
    let services: Vec<&str> = CATALOG.iter().map(|(name, _, _)| *name).collect();
    (0..count)
        .map(|_| {
            let provider = if rng.random_bool(0.5) {
                let c = pick(&mut rng, &clinics);
                Provider::Clinic { id: c.id, name: c.name.clone() }
            } else {
                let e = pick(&mut rng, &experts);
                Provider::Expert { id: e.id, name: e.name.clone() }
            };
            let start_time = at_hour(
                ANCHOR + Duration::days(rng.random_range(-30..=30)),
                rng.random_range(9..=18),
                *pick(&mut rng, &[0, 30]),
            );
            let past = start_time < ANCHOR;
            let status = if past {
                *pick(&mut rng, &[BookingStatus::Completed, BookingStatus::Completed, BookingStatus::Canceled])
            } else {
                *pick(&mut rng, &[BookingStatus::Pending, BookingStatus::Confirmed])
            };
            let first = *pick(&mut rng, &FIRST_NAMES);
            let last = *pick(&mut rng, &LAST_NAMES);
            Booking {
                id: next_id(&mut rng),
                patient_name: format!("{first} {last}"),
                provider,
                service_name: (*pick(&mut rng, &services)).to_owned(),
                mode: *pick(&mut rng, ConsultationMode::ALL),
                start_time,
                end_time: start_time + Duration::minutes(*pick(&mut rng, &[15, 30, 45, 60])),
                charge: money_between(&mut rng, 300, 3_000, 50),
                status,
                created_at: start_time - Duration::days(rng.random_range(1..=14)),
            }
        })
        .collect()
}

// =============================================================================
// DUES
// =============================================================================

/// One dues record per clinic: some settled, some partly paid, some unpaid.
#[must_use]
pub fn dues() -> Vec<ClinicDues> {
    let mut rng = rng_for(9);
    clinics()
        .iter()
        .enumerate()
        .map(|(i, clinic)| {
            let bookings = rng.random_range(20..=240);
            let average = money_between(&mut rng, 400, 1_200, 50);
            let earned = Money::from_minor(average.minor() * i64::from(bookings));
            let mut dues = ClinicDues::new(clinic.id, &clinic.name, bookings, earned);

            let target = match i % 3 {
                0 => dues.platform_fee,
                1 => dues.platform_fee.basis_points(rng.random_range(2_000..=8_000)),
                _ => Money::ZERO,
            };
            let installments = if target.is_positive() { rng.random_range(1..=3) } else { 0 };
            let mut remaining = target;
            for k in 0..installments {
                let amount = if k + 1 == installments {
                    remaining
                } else {
                    remaining.basis_points(rng.random_range(3_000..=6_000))
                };
                if !amount.is_positive() {
                    continue;
                }
                remaining = remaining.saturating_sub(amount);
                let method = *pick(&mut rng, &[PaymentMethod::BankTransfer, PaymentMethod::Upi, PaymentMethod::Card]);
                let paid_at = at_hour(days_before(rng.random_range(1..=60)), 14, 0);
                dues.transactions.push(Transaction {
                    id: next_id(&mut rng),
                    clinic_id: clinic.id,
                    amount,
                    method,
                    reference: format!("{}-{:06}", method.as_str(), rng.random_range(0..1_000_000)),
                    paid_at,
                });
            }
            dues.transactions.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
            dues.amount_paid = dues.transactions.iter().map(|t| t.amount).sum();
            dues.last_payment_at = dues.transactions.first().map(|t| t.paid_at);
            dues
        })
        .collect()
}
