// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod facility_tests;

use courtside::{Command, Moment, Outcome};
use courtside_audit::{Actor, Cause};
use courtside_domain::{
    Amenities, Customer, Facility, FacilityCode, PaymentMethod, Reservation, ReservationAction,
    ReservationChannel, ReservationNumber, SportType,
};
use time::{Date, Month, Time};

use crate::{ExecutedCommand, Persistence, PersistenceError};

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

pub fn run(
    persistence: &mut Persistence,
    command: Command,
) -> Result<ExecutedCommand, PersistenceError> {
    persistence.execute(
        command,
        create_test_actor(),
        create_test_cause(),
        create_test_moment(),
    )
}

pub fn create_facility(persistence: &mut Persistence, name: &str, hourly_rate: f64) -> Facility {
    let executed = run(
        persistence,
        Command::CreateFacility {
            name: String::from(name),
            sport: SportType::Futsal,
            surface: None,
            capacity: 10,
            hourly_rate,
            amenities: Amenities::default(),
            description: None,
        },
    )
    .unwrap();
    match executed.result.outcome {
        Outcome::FacilityCreated(facility) => facility,
        other => panic!("unexpected outcome {other:?}"),
    }
}

pub fn register_customer(
    persistence: &mut Persistence,
    name: &str,
    document_number: Option<&str>,
) -> Customer {
    let executed = run(
        persistence,
        Command::RegisterCustomer {
            name: String::from(name),
            document_number: document_number.map(String::from),
            phone: String::from("+51 999 888 777"),
            email: None,
            address: None,
            account_id: None,
        },
    )
    .unwrap();
    match executed.result.outcome {
        Outcome::CustomerRegistered(customer) => customer,
        other => panic!("unexpected outcome {other:?}"),
    }
}

pub fn book(
    persistence: &mut Persistence,
    customer_id: i64,
    facility: &FacilityCode,
    date: Date,
    start_hour: f64,
    end_hour: f64,
) -> Result<Reservation, PersistenceError> {
    let executed = run(
        persistence,
        Command::CreateReservation {
            customer_id,
            facility: facility.clone(),
            date,
            start_hour,
            end_hour,
            channel: ReservationChannel::InPerson,
            payment_method: Some(PaymentMethod::Cash),
            notes: None,
        },
    )?;
    match executed.result.outcome {
        Outcome::ReservationCreated { reservation, .. } => Ok(reservation),
        other => panic!("unexpected outcome {other:?}"),
    }
}

pub fn act(
    persistence: &mut Persistence,
    number: ReservationNumber,
    action: ReservationAction,
) -> Result<ExecutedCommand, PersistenceError> {
    run(
        persistence,
        Command::TransitionReservation { number, action },
    )
}

/// A database with one facility at rate 50 and one customer.
pub fn seeded() -> (Persistence, Facility, Customer) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let facility: Facility = create_facility(&mut persistence, "Court A", 50.0);
    let customer: Customer = register_customer(&mut persistence, "Ana Torres", None);
    (persistence, facility, customer)
}
