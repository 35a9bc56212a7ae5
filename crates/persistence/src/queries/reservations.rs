// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation reads.
//!
//! Every query joins the facility so the reservation carries the rate the
//! facility has right now. Results are ordered by date, start hour, then
//! number.

use courtside_domain::{
    DateRange, FacilityCode, Reservation, ReservationNumber, ReservationState,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::Date;
use tracing::debug;

use crate::data_models::{ReservationRow, format_date, number_column};
use crate::diesel_schema::{facilities, reservations};
use crate::error::PersistenceError;

/// States that hold a slot.
pub const BLOCKING_STATES: [&str; 3] = [
    ReservationState::Draft.as_str(),
    ReservationState::Confirmed.as_str(),
    ReservationState::InProgress.as_str(),
];

fn rebuild(rows: Vec<(ReservationRow, f64)>) -> Result<Vec<Reservation>, PersistenceError> {
    rows.into_iter()
        .map(|(row, rate)| row.into_domain(rate))
        .collect()
}

/// Retrieves a reservation by number.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the reservation does not exist.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    number: ReservationNumber,
) -> Result<Option<Reservation>, PersistenceError> {
    let row: Option<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::reservation_number.eq(number_column(number)?))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .first(conn)
        .optional()?;

    row.map(|(row, rate)| row.into_domain(rate)).transpose()
}

/// Lists every reservation.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_reservations(conn: &mut SqliteConnection) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .order((
            reservations::date.asc(),
            reservations::start_hour.asc(),
            reservations::reservation_number.asc(),
        ))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .load(conn)?;

    debug!(count = rows.len(), "Loaded reservations");
    rebuild(rows)
}

/// Lists reservations whose date falls inside `range`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_reservations_between(
    conn: &mut SqliteConnection,
    range: &DateRange,
) -> Result<Vec<Reservation>, PersistenceError> {
    let start: String = format_date(range.start())?;
    let end: String = format_date(range.end())?;

    let rows: Vec<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::date.ge(start))
        .filter(reservations::date.le(end))
        .order((
            reservations::date.asc(),
            reservations::start_hour.asc(),
            reservations::reservation_number.asc(),
        ))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .load(conn)?;

    rebuild(rows)
}

/// Lists every reservation of one facility.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_reservations_for_facility(
    conn: &mut SqliteConnection,
    code: &FacilityCode,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::facility_code.eq(code.value()))
        .order((
            reservations::date.asc(),
            reservations::start_hour.asc(),
            reservations::reservation_number.asc(),
        ))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .load(conn)?;

    rebuild(rows)
}

/// Lists the reservations of one facility on one date.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_reservations_for_facility_on(
    conn: &mut SqliteConnection,
    code: &FacilityCode,
    date: Date,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::facility_code.eq(code.value()))
        .filter(reservations::date.eq(format_date(date)?))
        .order((
            reservations::start_hour.asc(),
            reservations::reservation_number.asc(),
        ))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .load(conn)?;

    rebuild(rows)
}

/// Lists every reservation of one customer.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_reservations_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::customer_id.eq(customer_id))
        .order((
            reservations::date.asc(),
            reservations::start_hour.asc(),
            reservations::reservation_number.asc(),
        ))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .load(conn)?;

    rebuild(rows)
}

/// Finds the reservation holding a slot start, if any.
///
/// Used to describe a storage-level slot conflict.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_slot_holder(
    conn: &mut SqliteConnection,
    code: &FacilityCode,
    date: Date,
    start_hour: f64,
) -> Result<Option<Reservation>, PersistenceError> {
    let row: Option<(ReservationRow, f64)> = reservations::table
        .inner_join(facilities::table)
        .filter(reservations::facility_code.eq(code.value()))
        .filter(reservations::date.eq(format_date(date)?))
        .filter(reservations::start_hour.eq(start_hour))
        .filter(reservations::state.eq_any(BLOCKING_STATES))
        .select((ReservationRow::as_select(), facilities::hourly_rate))
        .first(conn)
        .optional()?;

    row.map(|(row, rate)| row.into_domain(rate)).transpose()
}
