use records::Facet;

use super::*;

fn pending_id(state: &ReviewState) -> Uuid {
    state.services.table().rows().iter().find(|s| s.approval == ApprovalStatus::Pending).unwrap().id
}

#[test]
fn approve_moves_service_out_of_queue() {
    let mut s = ReviewState::from_fixtures();
    let before = s.pending_count();
    let id = pending_id(&s);

    let message = s.review(id, ReviewDecision::Approve).unwrap();
    assert!(message.starts_with("Approved "));
    assert_eq!(s.pending_count(), before - 1);
    assert_eq!(s.services.get(id).unwrap().approval, ApprovalStatus::Approved);
}

#[test]
fn reviewed_service_cannot_be_reviewed_again() {
    let mut s = ReviewState::from_fixtures();
    let id = pending_id(&s);
    s.review(id, ReviewDecision::Reject).unwrap();

    let err = s.review(id, ReviewDecision::Approve).unwrap_err();
    assert!(matches!(err, ActionError::Record(records::RecordError::InvalidTransition { .. })));
    assert_eq!(s.services.get(id).unwrap().approval, ApprovalStatus::Rejected);
}

#[test]
fn pending_facet_lists_the_queue() {
    let mut s = ReviewState::from_fixtures();
    s.services.view_state_mut().update_filters(|f| f.approval = Facet::Only(ApprovalStatus::Pending));
    assert_eq!(s.services.visible().filtered_count(), s.pending_count());
}
