// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Courtside booking engine.
//!
//! Facilities, customers, reservations, the audit log and the reference
//! number counters all live in one `SQLite` database managed through
//! Diesel and embedded migrations.
//!
//! ## Write Path
//!
//! Every mutating command runs through [`Persistence::execute`], which
//! opens an `IMMEDIATE` transaction, loads the state slice the command
//! needs, applies it with the pure engine, and writes the outcome plus
//! its audit events. Reference numbers are drawn from the `sequences`
//! table inside that same transaction, so a rejected command consumes
//! nothing.
//!
//! `IMMEDIATE` takes the write lock up front. Two concurrent bookings for
//! the same slot are therefore serialized, and the second one sees the
//! first when it loads its scope.
//!
//! ## Storage Guard
//!
//! A partial unique index on `(facility_code, date, start_hour)` over
//! blocking states backs the engine's overlap check. When it fires, the
//! error is reported as the same `SlotConflict` the engine would raise.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives each caller an isolated shared
//! in-memory database with migrations applied.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use courtside::{Command, Moment, Outcome, TransitionResult, apply};
use courtside_audit::{Actor, Cause, EntityRef};
use courtside_domain::{
    Customer, DateRange, Facility, FacilityCode, FacilityState, Reservation, ReservationAction,
    ReservationNumber,
};
use diesel::SqliteConnection;
use time::Date;
use tracing::{debug, info};

pub use data_models::StoredAuditEvent;
pub use error::PersistenceError;

use mutations::SqliteSequence;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A committed command: what the engine produced and the ids its audit
/// events were stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedCommand {
    pub result: TransitionResult,
    pub event_ids: Vec<i64>,
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

/// Loads the scope, applies the command and persists the outcome.
///
/// Runs on a connection that is already inside a transaction.
fn run_command(
    conn: &mut SqliteConnection,
    command: Command,
    actor: Actor,
    cause: Cause,
    moment: Moment,
) -> Result<ExecutedCommand, PersistenceError> {
    let action: &'static str = command.name();
    let scope = queries::scope::load_scope(conn, &command)?;

    let result: TransitionResult = {
        let mut sequence: SqliteSequence<'_> = SqliteSequence::new(conn);
        apply(&scope, command, actor, cause, moment, &mut sequence)?
    };

    let event_ids: Vec<i64> = mutations::persist_transition(conn, &result)?;
    info!(
        action,
        events = event_ids.len(),
        "Command committed"
    );
    Ok(ExecutedCommand { result, event_ids })
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call gets its own uniquely named shared-cache database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_courtside_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is still active.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Executes a command atomically.
    ///
    /// Either the outcome and all of its audit events are committed, or
    /// nothing is.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the engine or a storage constraint refuses
    /// the command, or a database error.
    pub fn execute(
        &mut self,
        command: Command,
        actor: Actor,
        cause: Cause,
        moment: Moment,
    ) -> Result<ExecutedCommand, PersistenceError> {
        debug!(action = command.name(), actor = %actor.id, "Executing command");
        self.conn
            .immediate_transaction(|conn| run_command(conn, command, actor, cause, moment))
    }

    /// Returns the customer linked to a portal login, registering one if
    /// none matches.
    ///
    /// Lookup and registration share one transaction. The boolean is
    /// `true` when a new customer was registered.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if registration is refused, or a database error.
    pub fn find_or_register_customer(
        &mut self,
        email: Option<&str>,
        account_id: Option<&str>,
        registration: Command,
        actor: Actor,
        cause: Cause,
        moment: Moment,
    ) -> Result<(Customer, bool), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if let Some(existing) =
                queries::customers::find_customer_by_email_or_account(conn, email, account_id)?
            {
                return Ok((existing, false));
            }

            let executed: ExecutedCommand = run_command(conn, registration, actor, cause, moment)?;
            match executed.result.outcome {
                Outcome::CustomerRegistered(customer) => Ok((customer, true)),
                _ => Err(PersistenceError::UnexpectedOutcome(
                    "registration command did not register a customer".to_string(),
                )),
            }
        })
    }

    /// Creates a reservation and confirms it in one transaction.
    ///
    /// Used for self-service bookings, which skip the draft stage. If the
    /// confirmation is refused the booking is rolled back with it.
    ///
    /// # Returns
    ///
    /// The creation and the confirmation, in that order.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` if either step is refused, `UnexpectedOutcome` if
    /// `booking` does not create a reservation, or a database error.
    pub fn execute_confirmed_booking(
        &mut self,
        booking: Command,
        actor: Actor,
        cause: Cause,
        moment: Moment,
    ) -> Result<(ExecutedCommand, ExecutedCommand), PersistenceError> {
        debug!(action = booking.name(), actor = %actor.id, "Executing confirmed booking");
        self.conn.immediate_transaction(|conn| {
            let created: ExecutedCommand =
                run_command(conn, booking, actor.clone(), cause.clone(), moment)?;
            let number: ReservationNumber = match &created.result.outcome {
                Outcome::ReservationCreated { reservation, .. } => reservation.number,
                _ => {
                    return Err(PersistenceError::UnexpectedOutcome(
                        "booking command did not create a reservation".to_string(),
                    ));
                }
            };

            let confirmation: Command = Command::TransitionReservation {
                number,
                action: ReservationAction::Confirm,
            };
            let confirmed: ExecutedCommand = run_command(conn, confirmation, actor, cause, moment)?;
            Ok((created, confirmed))
        })
    }

    // ========================================================================
    // Facilities
    // ========================================================================

    /// Lists every facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_facilities(&mut self) -> Result<Vec<Facility>, PersistenceError> {
        queries::facilities::list_facilities(&mut self.conn)
    }

    /// Lists facilities in one operational state.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_facilities_in_state(
        &mut self,
        state: FacilityState,
    ) -> Result<Vec<Facility>, PersistenceError> {
        queries::facilities::list_facilities_in_state(&mut self.conn, state)
    }

    /// Retrieves a facility by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_facility(&mut self, code: &FacilityCode) -> Result<Option<Facility>, PersistenceError> {
        queries::facilities::get_facility(&mut self.conn, code)
    }

    // ========================================================================
    // Customers
    // ========================================================================

    /// Lists every customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(&mut self) -> Result<Vec<Customer>, PersistenceError> {
        queries::customers::list_customers(&mut self.conn)
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_customer(&mut self, customer_id: i64) -> Result<Option<Customer>, PersistenceError> {
        queries::customers::get_customer(&mut self.conn, customer_id)
    }

    /// Finds the customer linked to a portal login.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_customer_by_email_or_account(
        &mut self,
        email: Option<&str>,
        account_id: Option<&str>,
    ) -> Result<Option<Customer>, PersistenceError> {
        queries::customers::find_customer_by_email_or_account(&mut self.conn, email, account_id)
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Retrieves a reservation by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(
        &mut self,
        number: ReservationNumber,
    ) -> Result<Option<Reservation>, PersistenceError> {
        queries::reservations::get_reservation(&mut self.conn, number)
    }

    /// Lists every reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(&mut self) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_reservations(&mut self.conn)
    }

    /// Lists reservations dated inside `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_between(
        &mut self,
        range: &DateRange,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_reservations_between(&mut self.conn, range)
    }

    /// Lists every reservation of one facility.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_facility(
        &mut self,
        code: &FacilityCode,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_reservations_for_facility(&mut self.conn, code)
    }

    /// Lists the reservations of one facility on one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_facility_on(
        &mut self,
        code: &FacilityCode,
        date: Date,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_reservations_for_facility_on(&mut self.conn, code, date)
    }

    /// Lists every reservation of one customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_customer(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_reservations_for_customer(&mut self.conn, customer_id)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Reads the audit log, optionally for one record and capped to the
    /// most recent `limit` events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(
        &mut self,
        entity: Option<&EntityRef>,
        limit: Option<i64>,
    ) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, entity, limit)
    }
}
