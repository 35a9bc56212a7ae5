// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shape of the request and response types.

use courtside_domain::{PaymentMethod, ReservationAction, ReservationChannel, SportType};
use serde_json::{Value, json};

use crate::{
    ApiError, CreateFacilityRequest, CreateReservationRequest, TransitionReservationRequest,
    parse_date,
};

use super::helpers::{days_from_today, setup};

#[test]
fn test_reservation_view_serializes_dates_as_strings() {
    let mut fixture = setup();
    let view = fixture.book(days_from_today(1), 10.0, 11.5);

    let value: Value = serde_json::to_value(&view).unwrap();

    assert_eq!(value["reference"], "RES-000001");
    assert_eq!(value["date"], "2026-03-11");
    assert_eq!(value["state"], "draft");
    assert_eq!(value["state_label"], "Draft");
    assert_eq!(value["channel"], "in_person");
    assert_eq!(value["amount"], 75.0);
    assert!(value["created_at"].as_str().unwrap().starts_with("2026-03-10T09:00:00"));
}

#[test]
fn test_create_reservation_request_from_json() {
    let request: CreateReservationRequest = serde_json::from_value(json!({
        "customer_id": 3,
        "facility": "FAC-0002",
        "date": "2026-04-01",
        "start_hour": 18,
        "end_hour": 20,
        "channel": "online",
        "payment_method": "mobile_wallet",
        "notes": null
    }))
    .unwrap();

    assert_eq!(request.channel, Some(ReservationChannel::Online));
    assert_eq!(request.payment_method, Some(PaymentMethod::MobileWallet));
    assert!((request.end_hour - 20.0).abs() < f64::EPSILON);
}

#[test]
fn test_create_facility_request_defaults() {
    let request: CreateFacilityRequest = serde_json::from_value(json!({
        "name": "Court C",
        "sport": "basketball",
        "hourly_rate": 35.5
    }))
    .unwrap();

    assert_eq!(request.sport, SportType::Basketball);
    assert_eq!(request.capacity, None);
    assert!(!request.amenities.roofed);
}

#[test]
fn test_unknown_action_is_rejected() {
    let parsed = serde_json::from_value::<TransitionReservationRequest>(json!({
        "action": "teleport"
    }));
    assert!(parsed.is_err());

    let parsed: TransitionReservationRequest =
        serde_json::from_value(json!({ "action": "mark_no_show" })).unwrap();
    assert_eq!(parsed.action, ReservationAction::MarkNoShow);
}

#[test]
fn test_parse_date_names_the_field() {
    assert_eq!(
        parse_date("start", " 2026-03-10 ").map(super::helpers::date_string),
        Ok(String::from("2026-03-10"))
    );

    let err = parse_date("start", "2026-02-30").unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start"));
}
