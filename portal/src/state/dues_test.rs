use records::Money;
use records::dues::DuesStatus;
use time::macros::datetime;

use super::*;

const NOW: PrimitiveDateTime = datetime!(2025-06-02 15:00);

fn owing(state: &DuesState) -> ClinicDues {
    state.clinics.table().rows().iter().find(|c| c.outstanding().is_positive()).unwrap().clone()
}

#[test]
fn payment_modal_prefills_outstanding() {
    let mut s = DuesState::from_fixtures();
    let clinic = owing(&s);
    s.open_payment(clinic.id).unwrap();
    let amount = &s.payment.as_ref().unwrap().draft.amount;
    assert_eq!(Money::parse(amount), Ok(clinic.outstanding()));
}

#[test]
fn full_payment_clears_clinic_and_updates_summary() {
    let mut s = DuesState::from_fixtures();
    let clinic = owing(&s);
    let before = s.summary();

    s.open_payment(clinic.id).unwrap();
    s.payment.as_mut().unwrap().draft.reference = "UTR-1".to_owned();
    let message = s.submit_payment(Uuid::from_u128(1), NOW).unwrap();
    assert!(message.starts_with("Recorded ₹"));
    assert!(s.payment.is_none());

    let after = s.summary();
    assert_eq!(after.amount_paid, before.amount_paid + clinic.outstanding());
    assert_eq!(after.outstanding, before.outstanding.saturating_sub(clinic.outstanding()));
    assert_eq!(after.clear, before.clear + 1);

    let updated = s.clinics.get(clinic.id).unwrap();
    assert_eq!(updated.status(), DuesStatus::Clear);
    assert_eq!(updated.transactions[0].id, Uuid::from_u128(1));
    assert_eq!(updated.last_payment_at, Some(NOW));
}

#[test]
fn overpayment_keeps_modal_open() {
    let mut s = DuesState::from_fixtures();
    let clinic = owing(&s);
    s.open_payment(clinic.id).unwrap();
    {
        let input = &mut s.payment.as_mut().unwrap().draft;
        input.amount = format!("{}", clinic.outstanding().minor() / 100 + 1);
        input.method = PaymentMethod::Cash;
    }
    let err = s.submit_payment(Uuid::from_u128(1), NOW).unwrap_err();
    assert!(err.to_string().contains("exceeds outstanding dues"));
    assert!(s.payment.as_ref().unwrap().error.is_some());
    assert_eq!(s.clinics.get(clinic.id).unwrap().amount_paid, clinic.amount_paid);
}

#[test]
fn unparsable_amount_is_an_input_error() {
    let mut s = DuesState::from_fixtures();
    let clinic = owing(&s);
    s.open_payment(clinic.id).unwrap();
    s.payment.as_mut().unwrap().draft.amount = "12.345".to_owned();
    assert!(matches!(s.submit_payment(Uuid::from_u128(1), NOW), Err(ActionError::Input(_))));
}

#[test]
fn history_follows_selected_clinic() {
    let mut s = DuesState::from_fixtures();
    assert!(s.history().is_none());
    let clinic = owing(&s);
    s.open_history(clinic.id);
    assert_eq!(s.history().map(|c| c.id), Some(clinic.id));
    s.close_history();
    assert!(s.history().is_none());
}

#[test]
fn summary_matches_sums_over_rows() {
    let s = DuesState::from_fixtures();
    let summary = s.summary();
    let paid: Money = s.clinics.table().rows().iter().map(|c| c.amount_paid).sum();
    assert_eq!(summary.amount_paid, paid);
    assert_eq!(summary.clinics, s.clinics.table().len());
}
