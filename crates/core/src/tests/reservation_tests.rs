// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    book_command, create_test_actor, create_test_cause, create_test_moment, first_facility,
    res, run, seeded_state, today, tomorrow,
};
use crate::{Command, CoreError, InMemorySequence, Outcome, State, TransitionResult, apply};
use courtside_domain::{
    DomainError, FacilityCode, PaymentMethod, ReservationAction, ReservationState,
};

fn try_run(
    state: &State,
    command: Command,
    sequence: &mut InMemorySequence,
) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        command,
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        sequence,
    )
}

#[test]
fn test_adjacent_bookings_succeed_overlapping_fails() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);

    let r1: TransitionResult = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    );
    let Outcome::ReservationCreated { reservation, .. } = &r1.outcome else {
        panic!("expected a created reservation");
    };
    assert_eq!(reservation.number.to_string(), "RES-000001");
    assert_eq!(reservation.state, ReservationState::Draft);
    assert!((reservation.amount() - 100.0).abs() < f64::EPSILON);
    assert_eq!(reservation.registered_by, "staff-1");
    let state: State = r1.new_state;

    let r2 = try_run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 11.0, 13.0),
        &mut sequence,
    );
    assert_eq!(
        r2.unwrap_err(),
        CoreError::DomainViolation(DomainError::SlotConflict {
            facility: first_facility(),
            date: tomorrow(),
            conflicting: res(1),
            conflict_start: 10.0,
            conflict_end: 12.0,
        })
    );

    let r3: TransitionResult = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 12.0, 14.0),
        &mut sequence,
    );
    let created = r3.new_state.reservation(res(2)).unwrap();
    assert!((created.amount() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_partial_hour_overlap_detected() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 11.5),
        &mut sequence,
    )
    .new_state;

    let result = try_run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 11.0, 12.0),
        &mut sequence,
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SlotConflict { .. }))
    ));
}

#[test]
fn test_invalid_time_ranges_rejected() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);

    for (start, end) in [(12.0, 12.0), (14.0, 12.0), (5.0, 7.0), (22.0, 23.5)] {
        let result = try_run(
            &state,
            book_command(1, &first_facility(), tomorrow(), start, end),
            &mut sequence,
        );
        assert!(
            matches!(
                result,
                Err(CoreError::DomainViolation(DomainError::InvalidTimeRange { .. }))
            ),
            "{start}-{end} should be rejected"
        );
    }
}

#[test]
fn test_past_date_rejected_today_allowed() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let yesterday = today().previous_day().unwrap();

    let result = try_run(
        &state,
        book_command(1, &first_facility(), yesterday, 10.0, 11.0),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::PastDate {
            date: yesterday,
            today: today(),
        })
    );

    assert!(
        try_run(
            &state,
            book_command(1, &first_facility(), today(), 10.0, 11.0),
            &mut sequence,
        )
        .is_ok()
    );
}

#[test]
fn test_missing_references_checked_before_slot_rules() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);

    // Inverted hours would also fail, but the unknown customer wins
    let result = try_run(
        &state,
        book_command(42, &first_facility(), tomorrow(), 14.0, 12.0),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::CustomerNotFound(42))
    );

    let missing: FacilityCode = FacilityCode::new("FAC-0404");
    let result = try_run(
        &state,
        book_command(1, &missing, tomorrow(), 14.0, 12.0),
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::FacilityNotFound(missing))
    );
}

#[test]
fn test_rejected_booking_does_not_consume_a_number() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let _ = try_run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 5.0, 6.0),
        &mut sequence,
    );

    let result: TransitionResult = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 11.0),
        &mut sequence,
    );
    assert!(result.new_state.reservation(res(1)).is_some());
}

#[test]
fn test_cancelled_reservation_frees_the_slot() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;
    let state: State = run(
        &state,
        Command::TransitionReservation {
            number: res(1),
            action: ReservationAction::Cancel,
        },
        &mut sequence,
    )
    .new_state;

    assert!(
        try_run(
            &state,
            book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
            &mut sequence,
        )
        .is_ok()
    );
}

#[test]
fn test_reschedule_excludes_itself_from_overlap() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;

    let result: TransitionResult = run(
        &state,
        Command::RescheduleReservation {
            number: res(1),
            date: tomorrow(),
            start_hour: 11.0,
            end_hour: 13.0,
        },
        &mut sequence,
    );
    let moved = result.new_state.reservation(res(1)).unwrap();
    assert!((moved.start_hour - 11.0).abs() < f64::EPSILON);
    assert_eq!(result.new_state.reservations.len(), 1);
    assert!(result.audit_events[0].change_for("date").is_none());
    assert!(result.audit_events[0].change_for("start_hour").is_some());
}

#[test]
fn test_reschedule_into_another_booking_conflicts() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let mut state: State = seeded_state(&mut sequence);
    for (start, end) in [(10.0, 12.0), (14.0, 16.0)] {
        state = run(
            &state,
            book_command(1, &first_facility(), tomorrow(), start, end),
            &mut sequence,
        )
        .new_state;
    }

    let result = try_run(
        &state,
        Command::RescheduleReservation {
            number: res(2),
            date: tomorrow(),
            start_hour: 11.0,
            end_hour: 13.0,
        },
        &mut sequence,
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::SlotConflict { conflicting, .. }))
            if conflicting == res(1)
    ));
}

#[test]
fn test_reschedule_in_progress_rejected() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let mut state: State = seeded_state(&mut sequence);
    state = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;
    for action in [ReservationAction::Confirm, ReservationAction::Start] {
        state = run(
            &state,
            Command::TransitionReservation {
                number: res(1),
                action,
            },
            &mut sequence,
        )
        .new_state;
    }

    let result = try_run(
        &state,
        Command::RescheduleReservation {
            number: res(1),
            date: tomorrow(),
            start_hour: 15.0,
            end_hour: 16.0,
        },
        &mut sequence,
    );
    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::NotReschedulable {
            number: res(1),
            from: ReservationState::InProgress,
        })
    );
}

#[test]
fn test_set_payment_method_records_change() {
    let mut sequence: InMemorySequence = InMemorySequence::new();
    let state: State = seeded_state(&mut sequence);
    let state: State = run(
        &state,
        book_command(1, &first_facility(), tomorrow(), 10.0, 12.0),
        &mut sequence,
    )
    .new_state;

    let result: TransitionResult = run(
        &state,
        Command::SetPaymentMethod {
            number: res(1),
            method: PaymentMethod::Transfer,
        },
        &mut sequence,
    );
    let change = result.audit_events[0].change_for("payment_method").unwrap();
    assert_eq!(change.old_value, None);
    assert_eq!(change.new_value.as_deref(), Some("transfer"));
    assert_eq!(
        result.new_state.reservation(res(1)).unwrap().payment_method,
        Some(PaymentMethod::Transfer)
    );
}
