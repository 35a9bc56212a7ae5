// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use courtside_audit::Cause;
use courtside_domain::{Amenities, SportType};
use courtside_persistence::Persistence;
use time::{Date, Month, Time};

use crate::{
    AuthenticatedActor, CreateFacilityRequest, CreateReservationRequest, FixedClock,
    RegisterCustomerRequest, ReservationView, Role, create_facility, create_reservation,
    register_customer,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_staff() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("staff-1"), Role::Staff)
}

pub fn create_test_customer_actor(customer_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::for_customer(format!("portal-{customer_id}"), customer_id)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

/// Tuesday, 10 March 2026.
pub fn today() -> Date {
    Date::from_calendar_date(2026, Month::March, 10).unwrap()
}

pub fn days_from_today(days: i64) -> Date {
    today() + time::Duration::days(days)
}

pub fn create_test_clock() -> FixedClock {
    FixedClock::new(
        today().with_time(Time::from_hms(9, 0, 0).unwrap()).assume_utc(),
        today(),
    )
}

pub fn date_string(date: Date) -> String {
    crate::format_date(date)
}

pub fn facility_request(name: &str, sport: SportType, hourly_rate: f64) -> CreateFacilityRequest {
    CreateFacilityRequest {
        name: String::from(name),
        sport,
        surface: None,
        capacity: None,
        hourly_rate,
        amenities: Amenities::default(),
        description: None,
    }
}

pub fn customer_request(name: &str) -> RegisterCustomerRequest {
    RegisterCustomerRequest {
        name: String::from(name),
        document_number: None,
        phone: String::from("+51 999 888 777"),
        email: None,
        address: None,
        account_id: None,
    }
}

pub fn booking_request(
    customer_id: i64,
    facility: &str,
    date: Date,
    start_hour: f64,
    end_hour: f64,
) -> CreateReservationRequest {
    CreateReservationRequest {
        customer_id,
        facility: String::from(facility),
        date: date_string(date),
        start_hour,
        end_hour,
        channel: None,
        payment_method: None,
        notes: None,
    }
}

/// A database with facility "Court A" at rate 50 and customer "Ana Torres".
pub struct Fixture {
    pub persistence: Persistence,
    pub clock: FixedClock,
    pub facility: String,
    pub customer_id: i64,
}

pub fn setup() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let clock: FixedClock = create_test_clock();

    let facility = create_facility(
        &mut persistence,
        &clock,
        facility_request("Court A", SportType::Futsal, 50.0),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();
    let customer = register_customer(
        &mut persistence,
        &clock,
        customer_request("Ana Torres"),
        &create_test_staff(),
        create_test_cause(),
    )
    .unwrap();

    Fixture {
        persistence,
        clock,
        facility: facility.code,
        customer_id: customer.customer_id,
    }
}

impl Fixture {
    pub fn book(&mut self, date: Date, start_hour: f64, end_hour: f64) -> ReservationView {
        create_reservation(
            &mut self.persistence,
            &self.clock,
            booking_request(self.customer_id, &self.facility, date, start_hour, end_hour),
            &create_test_staff(),
            create_test_cause(),
        )
        .unwrap()
    }
}
