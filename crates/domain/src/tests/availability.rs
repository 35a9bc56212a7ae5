// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_facility, create_test_reservation, date};
use crate::{AvailabilitySlot, DraftVisibility, ReservationState, compute_availability};
use time::Month;

fn occupied_hours(slots: &[AvailabilitySlot]) -> Vec<u8> {
    slots.iter().filter(|s| !s.free).map(|s| s.hour).collect()
}

#[test]
fn test_confirmed_reservation_occupies_its_hours() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![create_test_reservation(
        1,
        &facility,
        d,
        10.0,
        12.0,
        ReservationState::Confirmed,
    )];

    let slots = compute_availability(&facility, &existing, d, DraftVisibility::Hidden);
    assert_eq!(slots.len(), 17);
    assert_eq!(slots.first().unwrap().hour, 6);
    assert_eq!(slots.last().unwrap().hour, 22);
    assert_eq!(occupied_hours(&slots), vec![10, 11]);
    assert!(slots.iter().all(|s| (s.price - 50.0).abs() < f64::EPSILON));
}

#[test]
fn test_draft_visibility_policy() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![create_test_reservation(
        1,
        &facility,
        d,
        15.0,
        16.0,
        ReservationState::Draft,
    )];

    let hidden = compute_availability(&facility, &existing, d, DraftVisibility::default());
    assert!(occupied_hours(&hidden).is_empty());

    let shown = compute_availability(&facility, &existing, d, DraftVisibility::Shown);
    assert_eq!(occupied_hours(&shown), vec![15]);
}

#[test]
fn test_partial_hour_marks_slot_by_start_membership() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![create_test_reservation(
        1,
        &facility,
        d,
        10.5,
        11.5,
        ReservationState::Confirmed,
    )];

    let slots = compute_availability(&facility, &existing, d, DraftVisibility::Hidden);
    assert_eq!(occupied_hours(&slots), vec![11]);
}

#[test]
fn test_cancelled_and_completed_leave_slots_free() {
    let facility = create_test_facility("FAC-0001", 50.0);
    let d = date(2026, Month::June, 1);
    let existing = vec![
        create_test_reservation(1, &facility, d, 8.0, 9.0, ReservationState::Cancelled),
        create_test_reservation(2, &facility, d, 9.0, 10.0, ReservationState::Completed),
    ];

    let slots = compute_availability(&facility, &existing, d, DraftVisibility::Shown);
    assert!(slots.iter().all(|s| s.free));
}
