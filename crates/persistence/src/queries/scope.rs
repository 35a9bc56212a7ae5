// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loads the state slice a command needs.
//!
//! Runs inside the write transaction, so the slice cannot change between
//! loading and persisting.

use courtside::{Command, State};
use courtside_domain::{FacilityCode, Reservation};
use diesel::SqliteConnection;
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries::{customers, facilities, reservations};

fn merge(into: &mut Vec<Reservation>, more: Vec<Reservation>) {
    for reservation in more {
        if !into.iter().any(|r| r.number == reservation.number) {
            into.push(reservation);
        }
    }
}

fn add_facility(
    conn: &mut SqliteConnection,
    state: &mut State,
    code: &FacilityCode,
) -> Result<(), PersistenceError> {
    if state.facility(code).is_none()
        && let Some(facility) = facilities::get_facility(conn, code)?
    {
        state.facilities.push(facility);
    }
    Ok(())
}

fn add_customer_with_history(
    conn: &mut SqliteConnection,
    state: &mut State,
    customer_id: i64,
) -> Result<(), PersistenceError> {
    if state.customer(customer_id).is_none()
        && let Some(customer) = customers::get_customer(conn, customer_id)?
    {
        state.customers.push(customer);
    }
    let history: Vec<Reservation> = reservations::list_reservations_for_customer(conn, customer_id)?;
    merge(&mut state.reservations, history);
    Ok(())
}

/// Builds the state a command is evaluated against.
///
/// # Errors
///
/// Returns an error if any query fails.
pub fn load_scope(conn: &mut SqliteConnection, command: &Command) -> Result<State, PersistenceError> {
    let mut state: State = State::new();

    match command {
        Command::CreateFacility { .. } => {
            state.facilities = facilities::list_facilities(conn)?;
        }
        Command::SetFacilityState { code, .. } => {
            add_facility(conn, &mut state, code)?;
        }
        Command::UpdateHourlyRate { code, .. } | Command::DeleteFacility { code } => {
            add_facility(conn, &mut state, code)?;
            state.reservations = reservations::list_reservations_for_facility(conn, code)?;
        }
        Command::RegisterCustomer {
            document_number, ..
        } => {
            if let Some(document) = document_number
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
            {
                state.customers = customers::customers_with_document(conn, document)?;
            }
        }
        Command::DeleteCustomer { customer_id } => {
            add_customer_with_history(conn, &mut state, *customer_id)?;
        }
        Command::CreateReservation {
            customer_id,
            facility,
            date,
            ..
        } => {
            add_facility(conn, &mut state, facility)?;
            state.reservations = reservations::list_reservations_for_facility_on(conn, facility, *date)?;
            add_customer_with_history(conn, &mut state, *customer_id)?;
        }
        Command::RescheduleReservation { number, date, .. } => {
            if let Some(current) = reservations::get_reservation(conn, *number)? {
                add_facility(conn, &mut state, &current.facility)?;
                let same_day: Vec<Reservation> =
                    reservations::list_reservations_for_facility_on(conn, &current.facility, *date)?;
                state.reservations.push(current);
                merge(&mut state.reservations, same_day);
            }
        }
        Command::TransitionReservation { number, .. } => {
            if let Some(current) = reservations::get_reservation(conn, *number)? {
                add_facility(conn, &mut state, &current.facility)?;
                let customer_id: i64 = current.customer_id;
                state.reservations.push(current);
                add_customer_with_history(conn, &mut state, customer_id)?;
            }
        }
        Command::SetPaymentMethod { number, .. } => {
            if let Some(current) = reservations::get_reservation(conn, *number)? {
                add_facility(conn, &mut state, &current.facility)?;
                state.reservations.push(current);
            }
        }
    }

    debug!(
        command = command.name(),
        facilities = state.facilities.len(),
        customers = state.customers.len(),
        reservations = state.reservations.len(),
        "Loaded command scope"
    );
    Ok(state)
}
