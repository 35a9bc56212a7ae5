// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, InMemorySequence, Moment, State, TransitionResult, apply};
use courtside_audit::{Actor, Cause};
use courtside_domain::{
    Amenities, FacilityCode, ReservationChannel, ReservationNumber, SportType,
};
use time::{Date, Month, OffsetDateTime, Time};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("staff-1"), String::from("staff"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Front desk request"))
}

pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::March, 10).unwrap()
}

pub fn tomorrow() -> Date {
    today().next_day().unwrap()
}

pub fn create_test_moment() -> Moment {
    Moment {
        occurred_at: today().with_time(Time::from_hms(9, 0, 0).unwrap()).assume_utc(),
        today: today(),
    }
}

/// Runs a command and returns the result, panicking on rejection.
pub fn run(state: &State, command: Command, sequence: &mut InMemorySequence) -> TransitionResult {
    apply(
        state,
        command,
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
        sequence,
    )
    .unwrap()
}

pub fn create_facility_command(name: &str, hourly_rate: f64) -> Command {
    Command::CreateFacility {
        name: String::from(name),
        sport: SportType::Futsal,
        surface: None,
        capacity: 10,
        hourly_rate,
        amenities: Amenities::default(),
        description: None,
    }
}

pub fn register_customer_command(name: &str) -> Command {
    Command::RegisterCustomer {
        name: String::from(name),
        document_number: None,
        phone: String::from("+51 999 888 777"),
        email: None,
        address: None,
        account_id: None,
    }
}

pub fn book_command(
    customer_id: i64,
    facility: &FacilityCode,
    date: Date,
    start_hour: f64,
    end_hour: f64,
) -> Command {
    Command::CreateReservation {
        customer_id,
        facility: facility.clone(),
        date,
        start_hour,
        end_hour,
        channel: ReservationChannel::InPerson,
        payment_method: None,
        notes: None,
    }
}

/// A state with one facility (FAC-0001, rate 50) and one customer (id 1).
pub fn seeded_state(sequence: &mut InMemorySequence) -> State {
    let state: State = run(&State::new(), create_facility_command("Court A", 50.0), sequence)
        .new_state;
    run(&state, register_customer_command("Ana Torres"), sequence).new_state
}

pub fn first_facility() -> FacilityCode {
    FacilityCode::new("FAC-0001")
}

pub fn res(number: u64) -> ReservationNumber {
    ReservationNumber::new(number)
}
