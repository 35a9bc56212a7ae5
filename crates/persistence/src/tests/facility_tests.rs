// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside::Command;
use courtside_domain::{DomainError, FacilityCode, FacilityState, ReservationAction};

use super::{act, book, create_facility, run, seeded, tomorrow};
use crate::{Persistence, PersistenceError};

#[test]
fn test_facility_codes_are_sequential_and_persisted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let first = create_facility(&mut persistence, "Court A", 50.0);
    let second = create_facility(&mut persistence, "Court B", 80.0);

    assert_eq!(first.code.value(), "FAC-0001");
    assert_eq!(second.code.value(), "FAC-0002");

    let stored = persistence.get_facility(&second.code).unwrap().unwrap();
    assert_eq!(stored, second);
}

#[test]
fn test_rejected_facility_leaves_nothing_behind() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err = run(
        &mut persistence,
        Command::CreateFacility {
            name: String::from("Court A"),
            sport: courtside_domain::SportType::Tennis,
            surface: None,
            capacity: 4,
            hourly_rate: 0.0,
            amenities: courtside_domain::Amenities::default(),
            description: None,
        },
    )
    .unwrap_err();

    assert!(matches!(
        err.domain_error(),
        Some(DomainError::InvalidRate { .. })
    ));
    assert!(persistence.list_facilities().unwrap().is_empty());
    assert!(persistence.list_audit_events(None, None).unwrap().is_empty());
}

#[test]
fn test_rate_change_reprices_existing_reservations() {
    let (mut persistence, facility, customer) = seeded();
    let reservation = book(
        &mut persistence,
        customer.customer_id,
        &facility.code,
        tomorrow(),
        10.0,
        12.0,
    )
    .unwrap();
    act(&mut persistence, reservation.number, ReservationAction::Confirm).unwrap();

    run(
        &mut persistence,
        Command::UpdateHourlyRate {
            code: facility.code.clone(),
            hourly_rate: 75.0,
        },
    )
    .unwrap();

    let stored = persistence
        .get_reservation(reservation.number)
        .unwrap()
        .unwrap();
    assert!((stored.amount() - 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_unavailable_facility_rejects_bookings() {
    let (mut persistence, facility, customer) = seeded();
    run(
        &mut persistence,
        Command::SetFacilityState {
            code: facility.code.clone(),
            state: FacilityState::UnderMaintenance,
        },
    )
    .unwrap();

    let err = book(
        &mut persistence,
        customer.customer_id,
        &facility.code,
        tomorrow(),
        10.0,
        11.0,
    )
    .unwrap_err();

    assert!(matches!(
        err.domain_error(),
        Some(DomainError::FacilityUnavailable { .. })
    ));
    let available = persistence
        .list_facilities_in_state(FacilityState::Available)
        .unwrap();
    assert!(available.is_empty());
}

#[test]
fn test_referenced_facility_cannot_be_deleted() {
    let (mut persistence, facility, customer) = seeded();
    book(
        &mut persistence,
        customer.customer_id,
        &facility.code,
        tomorrow(),
        10.0,
        11.0,
    )
    .unwrap();

    let err = run(
        &mut persistence,
        Command::DeleteFacility {
            code: facility.code.clone(),
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::from(DomainError::FacilityReferenced {
            facility: facility.code.clone(),
            count: 1,
        })
    );
    assert!(persistence.get_facility(&facility.code).unwrap().is_some());
}

#[test]
fn test_unreferenced_facility_is_deleted() {
    let (mut persistence, _, _) = seeded();
    let spare = create_facility(&mut persistence, "Court B", 40.0);

    run(
        &mut persistence,
        Command::DeleteFacility {
            code: spare.code.clone(),
        },
    )
    .unwrap();

    assert!(persistence.get_facility(&spare.code).unwrap().is_none());
}

#[test]
fn test_unknown_facility_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let code = FacilityCode::new("FAC-9999");

    let err = run(
        &mut persistence,
        Command::SetFacilityState {
            code: code.clone(),
            state: FacilityState::Inactive,
        },
    )
    .unwrap_err();

    assert_eq!(err, PersistenceError::from(DomainError::FacilityNotFound(code)));
}
