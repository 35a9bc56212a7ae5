// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_facility, create_test_reservation, date};
use crate::{
    DomainError, PaymentMethod, Reservation, ReservationAction, ReservationNumber,
    ReservationState,
};
use time::Month;

fn reservation_in(state: ReservationState) -> Reservation {
    let facility = create_test_facility("FAC-0001", 40.0);
    create_test_reservation(1, &facility, date(2026, Month::May, 4), 14.0, 16.0, state)
}

#[test]
fn test_transition_table() {
    use ReservationAction::{Cancel, Complete, Confirm, MarkNoShow, Start};
    use ReservationState::{Cancelled, Completed, Confirmed, Draft, InProgress, NoShow};

    assert_eq!(Draft.next(Confirm), Some(Confirmed));
    assert_eq!(Draft.next(Cancel), Some(Cancelled));
    assert_eq!(Confirmed.next(Start), Some(InProgress));
    assert_eq!(Confirmed.next(Cancel), Some(Cancelled));
    assert_eq!(Confirmed.next(MarkNoShow), Some(NoShow));
    assert_eq!(InProgress.next(Complete), Some(Completed));

    assert_eq!(Draft.next(Start), None);
    assert_eq!(InProgress.next(Cancel), None);
    for terminal in [Completed, Cancelled, NoShow] {
        assert!(terminal.is_terminal());
        for action in [Confirm, Start, Complete, Cancel, MarkNoShow] {
            assert_eq!(terminal.next(action), None);
        }
    }
}

#[test]
fn test_full_lifecycle_with_payment() {
    let mut r: Reservation = reservation_in(ReservationState::Draft);
    r = r.apply_action(ReservationAction::Confirm).unwrap();
    r = r.apply_action(ReservationAction::Start).unwrap();
    r.payment_method = Some(PaymentMethod::Card);
    r = r.apply_action(ReservationAction::MarkPaid).unwrap();
    assert_eq!(r.state, ReservationState::InProgress);
    r = r.apply_action(ReservationAction::Complete).unwrap();

    assert_eq!(r.state, ReservationState::Completed);
    assert!(r.paid);
    assert!(r.active);
}

#[test]
fn test_complete_unpaid_fails_payment_required() {
    let r: Reservation = reservation_in(ReservationState::InProgress);
    assert_eq!(
        r.apply_action(ReservationAction::Complete),
        Err(DomainError::PaymentRequired(ReservationNumber::new(1)))
    );
}

#[test]
fn test_mark_paid_requires_method() {
    let r: Reservation = reservation_in(ReservationState::Confirmed);
    assert_eq!(
        r.apply_action(ReservationAction::MarkPaid),
        Err(DomainError::PaymentMethodRequired(ReservationNumber::new(1)))
    );
}

#[test]
fn test_mark_paid_twice_is_idempotent() {
    let mut r: Reservation = reservation_in(ReservationState::Confirmed);
    r.payment_method = Some(PaymentMethod::Cash);
    let once: Reservation = r.apply_action(ReservationAction::MarkPaid).unwrap();
    let twice: Reservation = once.apply_action(ReservationAction::MarkPaid).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_cancel_clears_active_and_second_cancel_fails() {
    let r: Reservation = reservation_in(ReservationState::Confirmed);
    let cancelled: Reservation = r.apply_action(ReservationAction::Cancel).unwrap();
    assert_eq!(cancelled.state, ReservationState::Cancelled);
    assert!(!cancelled.active);

    let err: DomainError = cancelled
        .apply_action(ReservationAction::Cancel)
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: ReservationState::Cancelled,
            action: ReservationAction::Cancel,
            ..
        }
    ));
}

#[test]
fn test_no_show_clears_active() {
    let r: Reservation = reservation_in(ReservationState::Confirmed);
    let no_show: Reservation = r.apply_action(ReservationAction::MarkNoShow).unwrap();
    assert_eq!(no_show.state, ReservationState::NoShow);
    assert!(!no_show.active);
}

#[test]
fn test_confirm_from_in_progress_rejected() {
    let r: Reservation = reservation_in(ReservationState::InProgress);
    assert!(r.apply_action(ReservationAction::Confirm).is_err());
}

#[test]
fn test_amount_follows_rate() {
    let mut r: Reservation = reservation_in(ReservationState::Confirmed);
    assert!((r.amount() - 80.0).abs() < f64::EPSILON);
    r.hourly_rate = 50.0;
    assert!((r.amount() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_reservation_number_format_and_parse() {
    let number = ReservationNumber::new(42);
    assert_eq!(number.to_string(), "RES-000042");
    assert_eq!("RES-000042".parse::<ReservationNumber>().unwrap(), number);
    assert_eq!("42".parse::<ReservationNumber>().unwrap(), number);
    assert!("RES-abc".parse::<ReservationNumber>().is_err());
}

#[test]
fn test_rescheduled_only_from_draft_or_confirmed() {
    let new_date = date(2026, Month::May, 5);
    let moved: Reservation = reservation_in(ReservationState::Confirmed)
        .rescheduled(new_date, 18.0, 19.5)
        .unwrap();
    assert_eq!(moved.date, new_date);
    assert!((moved.duration_hours() - 1.5).abs() < f64::EPSILON);
    assert_eq!(moved.state, ReservationState::Confirmed);

    let err: DomainError = reservation_in(ReservationState::InProgress)
        .rescheduled(new_date, 18.0, 19.0)
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::NotReschedulable {
            number: ReservationNumber::new(1),
            from: ReservationState::InProgress,
        }
    );
}
