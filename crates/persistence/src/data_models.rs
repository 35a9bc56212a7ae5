// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversion to domain values.
//!
//! Enums are stored by their `as_str` form, booleans as `0`/`1`,
//! dates as `YYYY-MM-DD` and timestamps as RFC 3339.

use std::str::FromStr;

use courtside_audit::{Action, Actor, AuditEvent, Cause, EntityKind, EntityRef, FieldChange};
use courtside_domain::{
    Amenities, Customer, CustomerTier, Facility, FacilityCode, FacilityState, PaymentMethod,
    Reservation, ReservationChannel, ReservationNumber, ReservationState, SportType, SurfaceType,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{audit_events, customers, facilities, reservations};
use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Formats a date the way it is stored.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("date '{value}': {e}")))
}

/// Formats a timestamp the way it is stored.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

fn parse_label<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Converts a reservation number to its column value.
///
/// # Errors
///
/// Returns an error if the number exceeds the column range.
pub fn number_column(number: ReservationNumber) -> Result<i64, PersistenceError> {
    number.value().to_i64().ok_or_else(|| {
        PersistenceError::SerializationError(format!("reservation number {number} out of range"))
    })
}

#[must_use]
pub fn flag(value: bool) -> i32 {
    i32::from(value)
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = facilities)]
pub struct FacilityRow {
    pub code: String,
    pub name: String,
    pub sport: String,
    pub surface: Option<String>,
    pub capacity: i32,
    pub hourly_rate: f64,
    pub state: String,
    pub roofed: i32,
    pub lit: i32,
    pub changing_rooms: i32,
    pub parking: i32,
    pub description: Option<String>,
}

impl FacilityRow {
    /// Rebuilds the domain facility.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored enum value is unknown.
    pub fn into_domain(self) -> Result<Facility, PersistenceError> {
        Ok(Facility {
            code: FacilityCode::new(&self.code),
            name: self.name,
            sport: parse_label::<SportType>(&self.sport)?,
            surface: self
                .surface
                .as_deref()
                .map(parse_label::<SurfaceType>)
                .transpose()?,
            capacity: self.capacity,
            hourly_rate: self.hourly_rate,
            state: parse_label::<FacilityState>(&self.state)?,
            amenities: Amenities {
                roofed: self.roofed != 0,
                lit: self.lit != 0,
                changing_rooms: self.changing_rooms != 0,
                parking: self.parking != 0,
            },
            description: self.description,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = customers)]
pub struct CustomerRow {
    pub customer_id: i64,
    pub name: String,
    pub document_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub account_id: Option<String>,
    pub tier: String,
}

impl CustomerRow {
    /// Rebuilds the domain customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored tier is unknown.
    pub fn into_domain(self) -> Result<Customer, PersistenceError> {
        Ok(Customer {
            customer_id: self.customer_id,
            name: self.name,
            document_number: self.document_number,
            phone: self.phone,
            email: self.email,
            address: self.address,
            account_id: self.account_id,
            tier: parse_label::<CustomerTier>(&self.tier)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = reservations)]
pub struct ReservationRow {
    pub reservation_number: i64,
    pub customer_id: i64,
    pub facility_code: String,
    pub date: String,
    pub start_hour: f64,
    pub end_hour: f64,
    pub channel: String,
    pub payment_method: Option<String>,
    pub paid: i32,
    pub notes: Option<String>,
    pub registered_by: String,
    pub created_at: String,
    pub active: i32,
    pub state: String,
}

impl ReservationRow {
    /// Rebuilds the domain reservation, priced at the facility's current rate.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored value cannot be parsed.
    pub fn into_domain(self, hourly_rate: f64) -> Result<Reservation, PersistenceError> {
        let number: u64 = self.reservation_number.to_u64().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "negative reservation number {}",
                self.reservation_number
            ))
        })?;
        Ok(Reservation {
            number: ReservationNumber::new(number),
            customer_id: self.customer_id,
            facility: FacilityCode::new(&self.facility_code),
            date: parse_date(&self.date)?,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            channel: parse_label::<ReservationChannel>(&self.channel)?,
            payment_method: self
                .payment_method
                .as_deref()
                .map(parse_label::<PaymentMethod>)
                .transpose()?,
            paid: self.paid != 0,
            notes: self.notes,
            registered_by: self.registered_by,
            created_at: parse_timestamp(&self.created_at)?,
            active: self.active != 0,
            state: parse_label::<ReservationState>(&self.state)?,
            hourly_rate,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub entity_kind: String,
    pub entity_id: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub changes_json: String,
    pub occurred_at: String,
}

/// An audit event together with its storage-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAuditEvent {
    pub event_id: i64,
    pub event: AuditEvent,
}

impl AuditEventRow {
    /// Deserializes the stored event.
    ///
    /// # Errors
    ///
    /// Returns an error if any JSON column is malformed.
    pub fn into_domain(self) -> Result<StoredAuditEvent, PersistenceError> {
        let kind: EntityKind = EntityKind::parse(&self.entity_kind).ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "unknown entity kind '{}'",
                self.entity_kind
            ))
        })?;
        let actor: Actor = serde_json::from_str(&self.actor_json)?;
        let cause: Cause = serde_json::from_str(&self.cause_json)?;
        let action: Action = serde_json::from_str(&self.action_json)?;
        let changes: Vec<FieldChange> = serde_json::from_str(&self.changes_json)?;

        Ok(StoredAuditEvent {
            event_id: self.event_id,
            event: AuditEvent::new(
                EntityRef::new(kind, self.entity_id),
                actor,
                cause,
                action,
                changes,
                parse_timestamp(&self.occurred_at)?,
            ),
        })
    }
}
