// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    book_command, create_facility_command, create_test_actor, create_test_cause,
    create_test_moment, first_facility, run, seeded_state, tomorrow,
};
use crate::{Command, CoreError, InMemorySequence, Outcome, State, TransitionResult, apply};
use courtside_audit::EntityKind;
use courtside_domain::{DomainError, FacilityCode, FacilityState};

#[test]
fn test_create_facility_assigns_sequential_codes() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let first: TransitionResult = run(
        &State::new(),
        create_facility_command("Court A", 40.0),
        &mut sequence,
    );
    let second: TransitionResult = run(
        &first.new_state,
        create_facility_command("Court B", 40.0),
        &mut sequence,
    );

    let codes: Vec<&str> = second
        .new_state
        .facilities
        .iter()
        .map(|f| f.code.value())
        .collect();
    assert_eq!(codes, vec!["FAC-0001", "FAC-0002"]);
    assert_eq!(
        second.new_state.facilities[1].state,
        FacilityState::Available
    );

    let event = &second.audit_events[0];
    assert_eq!(event.entity.kind, EntityKind::Facility);
    assert_eq!(event.entity.id, "FAC-0002");
    assert_eq!(event.action.name, "CreateFacility");
    assert_eq!(
        event.change_for("hourly_rate").and_then(|c| c.new_value.as_deref()),
        Some("40")
    );
}

#[test]
fn test_create_facility_rejects_non_positive_rate() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    for rate in [0.0, -10.0] {
        let result = apply(
            &State::new(),
            create_facility_command("Court A", rate),
            create_test_actor(),
            create_test_cause(),
            create_test_moment(),
            &mut sequence,
        );
        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(DomainError::InvalidRate { .. }))
        ));
    }
}

#[test]
fn test_create_facility_rejects_blank_name() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let result = apply(
        &State::new(),
        create_facility_command("  ", 40.0),
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidName("facility name"))
    );
}

#[test]
fn test_maintenance_facility_rejects_bookings() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        Command::SetFacilityState {
            code: first_facility(),
            state: FacilityState::UnderMaintenance,
        },
        &mut sequence,
    )
    .new_state;

    let result = apply(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 11.0),
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::FacilityUnavailable {
            facility: first_facility(),
            state: "under_maintenance",
        })
    );
}

#[test]
fn test_state_change_is_audited_with_old_and_new() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let result: TransitionResult = run(
        &state,
        Command::SetFacilityState {
            code: first_facility(),
            state: FacilityState::Inactive,
        },
        &mut sequence,
    );

    let change = result.audit_events[0].change_for("state").unwrap();
    assert_eq!(change.old_value.as_deref(), Some("available"));
    assert_eq!(change.new_value.as_deref(), Some("inactive"));
}

#[test]
fn test_rate_change_flows_into_loaded_amounts() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;
    assert!((state.reservations[0].amount() - 100.0).abs() < f64::EPSILON);

    let state: State = run(
        &state,
        Command::UpdateHourlyRate {
            code: first_facility(),
            hourly_rate: 60.0,
        },
        &mut sequence,
    )
    .new_state;
    assert!((state.reservations[0].amount() - 120.0).abs() < f64::EPSILON);
}

#[test]
fn test_delete_unreferenced_facility() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let result: TransitionResult = run(
        &state,
        Command::DeleteFacility {
            code: first_facility(),
        },
        &mut sequence,
    );
    assert_eq!(result.outcome, Outcome::FacilityDeleted(first_facility()));
    assert!(result.new_state.facilities.is_empty());
}

#[test]
fn test_delete_referenced_facility_rejected() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;

    let result = apply(
        &state,
        Command::DeleteFacility {
            code: first_facility(),
        },
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::FacilityReferenced {
            facility: first_facility(),
            count: 1,
        })
    );
}

#[test]
fn test_unknown_facility_not_found() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let missing: FacilityCode = FacilityCode::new("FAC-9999");
    let result = apply(
        &State::new(),
        Command::UpdateHourlyRate {
            code: missing.clone(),
            hourly_rate: 30.0,
        },
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::FacilityNotFound(missing))
    );
}
