// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Amenities, Customer, CustomerTier, Facility, FacilityCode, FacilityState, Reservation,
    ReservationChannel, ReservationNumber, ReservationState, SportType,
};
use time::{Date, Month, OffsetDateTime};

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

pub fn create_test_facility(code: &str, rate: f64) -> Facility {
    Facility {
        code: FacilityCode::new(code),
        name: format!("Court {code}"),
        sport: SportType::Futsal,
        surface: None,
        capacity: 10,
        hourly_rate: rate,
        state: FacilityState::Available,
        amenities: Amenities::default(),
        description: None,
    }
}

pub fn create_test_customer(customer_id: i64, name: &str) -> Customer {
    Customer {
        customer_id,
        name: String::from(name),
        document_number: None,
        phone: String::from("555 123 456"),
        email: None,
        address: None,
        account_id: None,
        tier: CustomerTier::New,
    }
}

pub fn create_test_reservation(
    number: u64,
    facility: &Facility,
    date: Date,
    start_hour: f64,
    end_hour: f64,
    state: ReservationState,
) -> Reservation {
    Reservation {
        number: ReservationNumber::new(number),
        customer_id: 1,
        facility: facility.code.clone(),
        date,
        start_hour,
        end_hour,
        channel: ReservationChannel::InPerson,
        payment_method: None,
        paid: false,
        notes: None,
        registered_by: String::from("front-desk"),
        created_at: OffsetDateTime::UNIX_EPOCH,
        active: true,
        state,
        hourly_rate: facility.hourly_rate,
    }
}
