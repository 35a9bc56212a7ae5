// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_facility, create_test_reservation, date};
use crate::{
    DomainError, Reservation, ReservationNumber, ReservationState, ensure_slot_free,
    find_conflict, intervals_overlap,
};
use time::Month;

#[test]
fn test_intervals_overlap_half_open() {
    assert!(intervals_overlap(10.0, 12.0, 11.0, 13.0));
    assert!(intervals_overlap(10.0, 11.5, 11.0, 12.0));
    assert!(intervals_overlap(10.0, 14.0, 11.0, 12.0));
    assert!(!intervals_overlap(10.0, 12.0, 12.0, 14.0));
    assert!(!intervals_overlap(12.0, 14.0, 10.0, 12.0));
}

#[test]
fn test_adjacent_booking_allowed_overlapping_rejected() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let r1: Reservation =
        create_test_reservation(1, &facility, d, 10.0, 12.0, ReservationState::Draft);
    assert!((r1.amount() - 100.0).abs() < f64::EPSILON);
    let existing: Vec<Reservation> = vec![r1];

    let err: DomainError =
        ensure_slot_free(&facility.code, d, 11.0, 13.0, &existing, None).unwrap_err();
    assert_eq!(
        err,
        DomainError::SlotConflict {
            facility: facility.code.clone(),
            date: d,
            conflicting: ReservationNumber::new(1),
            conflict_start: 10.0,
            conflict_end: 12.0,
        }
    );

    assert!(ensure_slot_free(&facility.code, d, 12.0, 14.0, &existing, None).is_ok());
}

#[test]
fn test_terminal_states_release_the_slot() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    for state in [
        ReservationState::Cancelled,
        ReservationState::NoShow,
        ReservationState::Completed,
    ] {
        let existing = vec![create_test_reservation(1, &facility, d, 10.0, 12.0, state)];
        assert!(find_conflict(&facility.code, d, 10.0, 12.0, &existing, None).is_none());
    }
}

#[test]
fn test_other_facility_or_date_never_conflicts() {
    let a = create_test_facility("FAC-0001", 50.0);
    let b = create_test_facility("FAC-0002", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![create_test_reservation(
        1,
        &a,
        d,
        10.0,
        12.0,
        ReservationState::Confirmed,
    )];

    assert!(find_conflict(&b.code, d, 10.0, 12.0, &existing, None).is_none());
    assert!(
        find_conflict(&a.code, date(2026, Month::June, 2), 10.0, 12.0, &existing, None).is_none()
    );
}

#[test]
fn test_excluded_reservation_does_not_conflict_with_itself() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![create_test_reservation(
        5,
        &facility,
        d,
        10.0,
        12.0,
        ReservationState::Confirmed,
    )];

    assert!(
        ensure_slot_free(
            &facility.code,
            d,
            11.0,
            13.0,
            &existing,
            Some(ReservationNumber::new(5))
        )
        .is_ok()
    );
}
