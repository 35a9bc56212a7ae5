// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{DomainError, Reservation};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info, warn};

use crate::data_models::{flag, format_date, format_timestamp, number_column};
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;
use crate::queries::reservations::find_slot_holder;

/// Turns a tripped slot guard into the conflict it represents.
fn slot_conflict(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
    err: DieselError,
) -> PersistenceError {
    warn!(
        number = %reservation.number,
        facility = %reservation.facility,
        date = %reservation.date,
        start_hour = reservation.start_hour,
        "Slot guard rejected reservation"
    );
    match find_slot_holder(
        conn,
        &reservation.facility,
        reservation.date,
        reservation.start_hour,
    ) {
        Ok(Some(holder)) => DomainError::SlotConflict {
            facility: reservation.facility.clone(),
            date: reservation.date,
            conflicting: holder.number,
            conflict_start: holder.start_hour,
            conflict_end: holder.end_hour,
        }
        .into(),
        Ok(None) => err.into(),
        Err(lookup) => lookup,
    }
}

/// Inserts a new reservation.
///
/// # Errors
///
/// Returns `SlotConflict` if another blocking reservation starts at the
/// same hour, or a database error.
pub fn insert_reservation(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
) -> Result<(), PersistenceError> {
    let result = diesel::insert_into(reservations::table)
        .values((
            reservations::reservation_number.eq(number_column(reservation.number)?),
            reservations::customer_id.eq(reservation.customer_id),
            reservations::facility_code.eq(reservation.facility.value()),
            reservations::date.eq(format_date(reservation.date)?),
            reservations::start_hour.eq(reservation.start_hour),
            reservations::end_hour.eq(reservation.end_hour),
            reservations::channel.eq(reservation.channel.as_str()),
            reservations::payment_method.eq(reservation.payment_method.map(|m| m.as_str())),
            reservations::paid.eq(flag(reservation.paid)),
            reservations::notes.eq(reservation.notes.as_deref()),
            reservations::registered_by.eq(&reservation.registered_by),
            reservations::created_at.eq(format_timestamp(reservation.created_at)?),
            reservations::active.eq(flag(reservation.active)),
            reservations::state.eq(reservation.state.as_str()),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(
                number = %reservation.number,
                facility = %reservation.facility,
                date = %reservation.date,
                start_hour = reservation.start_hour,
                end_hour = reservation.end_hour,
                "Reservation created"
            );
            Ok(())
        }
        Err(e @ DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(slot_conflict(conn, reservation, e))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rewrites the mutable columns of a reservation.
///
/// # Errors
///
/// Returns `SlotConflict` if a reschedule collides with another blocking
/// reservation, `NotFound` if the reservation does not exist, or a
/// database error.
pub fn update_reservation(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
) -> Result<(), PersistenceError> {
    let result = diesel::update(reservations::table.find(number_column(reservation.number)?))
        .set((
            reservations::date.eq(format_date(reservation.date)?),
            reservations::start_hour.eq(reservation.start_hour),
            reservations::end_hour.eq(reservation.end_hour),
            reservations::payment_method.eq(reservation.payment_method.map(|m| m.as_str())),
            reservations::paid.eq(flag(reservation.paid)),
            reservations::notes.eq(reservation.notes.as_deref()),
            reservations::active.eq(flag(reservation.active)),
            reservations::state.eq(reservation.state.as_str()),
        ))
        .execute(conn);

    match result {
        Ok(0) => Err(PersistenceError::NotFound(format!(
            "reservation {}",
            reservation.number
        ))),
        Ok(_) => {
            debug!(
                number = %reservation.number,
                state = %reservation.state,
                paid = reservation.paid,
                "Reservation updated"
            );
            Ok(())
        }
        Err(e @ DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(slot_conflict(conn, reservation, e))
        }
        Err(e) => Err(e.into()),
    }
}
