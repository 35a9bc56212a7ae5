// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_customer, create_test_facility, date};
use crate::{
    Customer, DomainError, FacilityCode, validate_booking_date, validate_capacity,
    validate_code_unique, validate_document_unique, validate_email, validate_hourly_rate,
    validate_name, validate_phone, validate_time_range,
};
use time::Month;

#[test]
fn test_validate_hourly_rate() {
    assert!(validate_hourly_rate(40.0).is_ok());
    assert!(validate_hourly_rate(0.01).is_ok());
    assert!(matches!(
        validate_hourly_rate(0.0),
        Err(DomainError::InvalidRate { .. })
    ));
    assert!(matches!(
        validate_hourly_rate(-5.0),
        Err(DomainError::InvalidRate { .. })
    ));
    assert!(validate_hourly_rate(f64::NAN).is_err());
}

#[test]
fn test_validate_time_range_accepts_window_edges() {
    assert!(validate_time_range(6.0, 23.0).is_ok());
    assert!(validate_time_range(14.5, 16.0).is_ok());
}

#[test]
fn test_validate_time_range_rejects_inverted_and_empty() {
    assert!(matches!(
        validate_time_range(16.0, 14.0),
        Err(DomainError::InvalidTimeRange { .. })
    ));
    assert!(matches!(
        validate_time_range(10.0, 10.0),
        Err(DomainError::InvalidTimeRange { .. })
    ));
}

#[test]
fn test_validate_time_range_rejects_outside_window() {
    assert!(validate_time_range(5.5, 7.0).is_err());
    assert!(validate_time_range(22.0, 23.5).is_err());
}

#[test]
fn test_validate_booking_date() {
    let today = date(2026, Month::March, 10);
    assert!(validate_booking_date(today, today).is_ok());
    assert!(validate_booking_date(date(2026, Month::March, 11), today).is_ok());
    assert_eq!(
        validate_booking_date(date(2026, Month::March, 9), today),
        Err(DomainError::PastDate {
            date: date(2026, Month::March, 9),
            today,
        })
    );
}

#[test]
fn test_validate_name_and_capacity() {
    assert!(validate_name("Court A", "facility name").is_ok());
    assert_eq!(
        validate_name("   ", "facility name"),
        Err(DomainError::InvalidName("facility name"))
    );
    assert!(validate_capacity(0).is_ok());
    assert_eq!(validate_capacity(-1), Err(DomainError::InvalidCapacity(-1)));
}

#[test]
fn test_validate_email() {
    assert!(validate_email("ana@example.com").is_ok());
    assert!(validate_email("a.b+c@mail.example.org").is_ok());

    for bad in ["", "ana", "ana@", "@example.com", "ana@example", "ana@example.c", "a na@x.com", "a@@x.com"] {
        assert!(
            matches!(validate_email(bad), Err(DomainError::InvalidEmailFormat(_))),
            "expected {bad:?} to be rejected"
        );
    }
}

#[test]
fn test_validate_phone() {
    assert!(validate_phone("+51 (1) 555-1234").is_ok());
    assert!(validate_phone("987654").is_ok());
    assert!(matches!(
        validate_phone("12345"),
        Err(DomainError::InvalidPhoneFormat(_))
    ));
    assert!(validate_phone("555-CALL-NOW").is_err());
}

#[test]
fn test_validate_document_unique() {
    let mut holder: Customer = create_test_customer(1, "Ana");
    holder.document_number = Some(String::from("12345678"));
    let existing: Vec<Customer> = vec![holder, create_test_customer(2, "Luis")];

    assert!(validate_document_unique("87654321", &existing, None).is_ok());
    assert_eq!(
        validate_document_unique("12345678", &existing, None),
        Err(DomainError::DuplicateDocument(String::from("12345678")))
    );
    // The holder itself may keep its own number
    assert!(validate_document_unique("12345678", &existing, Some(1)).is_ok());
}

#[test]
fn test_validate_code_unique() {
    let existing = vec![create_test_facility("FAC-0001", 40.0)];
    assert!(validate_code_unique(&FacilityCode::new("FAC-0002"), &existing).is_ok());
    assert!(matches!(
        validate_code_unique(&FacilityCode::new("fac-0001"), &existing),
        Err(DomainError::DuplicateCode(_))
    ));
}
