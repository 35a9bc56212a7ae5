// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside::{Outcome, TransitionResult};
use diesel::SqliteConnection;

use crate::error::PersistenceError;
use crate::mutations::{audit, customers, facilities, reservations};

/// Writes the records and audit events of a successful transition.
///
/// Must run inside the transaction the scope was loaded in.
///
/// # Returns
///
/// The ids of the persisted audit events, in order.
///
/// # Errors
///
/// Returns an error if any write fails, including storage-level
/// uniqueness and reference violations.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<Vec<i64>, PersistenceError> {
    match &result.outcome {
        Outcome::FacilityCreated(facility) => facilities::insert_facility(conn, facility)?,
        Outcome::FacilityUpdated(facility) => facilities::update_facility(conn, facility)?,
        Outcome::FacilityDeleted(code) => facilities::delete_facility(conn, code)?,
        Outcome::CustomerRegistered(customer) => customers::insert_customer(conn, customer)?,
        Outcome::CustomerDeleted(customer_id) => customers::delete_customer(conn, *customer_id)?,
        Outcome::ReservationCreated {
            reservation,
            retiered,
        } => {
            reservations::insert_reservation(conn, reservation)?;
            if let Some(customer) = retiered {
                customers::update_customer_tier(conn, customer)?;
            }
        }
        Outcome::ReservationUpdated {
            reservation,
            retiered,
        } => {
            reservations::update_reservation(conn, reservation)?;
            if let Some(customer) = retiered {
                customers::update_customer_tier(conn, customer)?;
            }
        }
    }

    result
        .audit_events
        .iter()
        .map(|event| audit::persist_audit_event(conn, event))
        .collect()
}
