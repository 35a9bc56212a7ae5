// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_audit::AuditEvent;
use courtside_domain::{Customer, Facility, FacilityCode, Reservation, ReservationNumber};
use time::{Date, OffsetDateTime};

/// The slice of the system a command is evaluated against.
///
/// Callers load whatever scope the command needs: the facility and
/// customer it names, every reservation on the same facility and date for
/// bookings, and every reservation of the customer whose tier may change.
/// The engine treats anything absent as nonexistent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub facilities: Vec<Facility>,
    pub customers: Vec<Customer>,
    pub reservations: Vec<Reservation>,
}

impl State {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            facilities: Vec::new(),
            customers: Vec::new(),
            reservations: Vec::new(),
        }
    }

    #[must_use]
    pub fn facility(&self, code: &FacilityCode) -> Option<&Facility> {
        self.facilities.iter().find(|f| &f.code == code)
    }

    #[must_use]
    pub fn customer(&self, customer_id: i64) -> Option<&Customer> {
        self.customers.iter().find(|c| c.customer_id == customer_id)
    }

    #[must_use]
    pub fn reservation(&self, number: ReservationNumber) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.number == number)
    }

    /// Folds an outcome into this state.
    ///
    /// Reservation amounts follow the live rate, so a rate change is
    /// propagated to every loaded reservation of that facility.
    pub fn absorb(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::FacilityCreated(facility) => self.facilities.push(facility.clone()),
            Outcome::FacilityUpdated(facility) => {
                upsert(&mut self.facilities, facility.clone(), |f| {
                    f.code == facility.code
                });
                for r in self
                    .reservations
                    .iter_mut()
                    .filter(|r| r.facility == facility.code)
                {
                    r.hourly_rate = facility.hourly_rate;
                }
            }
            Outcome::FacilityDeleted(code) => self.facilities.retain(|f| &f.code != code),
            Outcome::CustomerRegistered(customer) => self.customers.push(customer.clone()),
            Outcome::CustomerDeleted(customer_id) => {
                self.customers.retain(|c| c.customer_id != *customer_id);
            }
            Outcome::ReservationCreated {
                reservation,
                retiered,
            }
            | Outcome::ReservationUpdated {
                reservation,
                retiered,
            } => {
                upsert(&mut self.reservations, reservation.clone(), |r| {
                    r.number == reservation.number
                });
                if let Some(customer) = retiered {
                    upsert(&mut self.customers, customer.clone(), |c| {
                        c.customer_id == customer.customer_id
                    });
                }
            }
        }
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, matches: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| matches(existing)) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

/// The records a successful command wrote.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    FacilityCreated(Facility),
    FacilityUpdated(Facility),
    FacilityDeleted(FacilityCode),
    CustomerRegistered(Customer),
    CustomerDeleted(i64),
    ReservationCreated {
        reservation: Reservation,
        /// The customer, when its tier changed.
        retiered: Option<Customer>,
    },
    ReservationUpdated {
        reservation: Reservation,
        /// The customer, when its tier changed.
        retiered: Option<Customer>,
    },
}

/// Wall-clock inputs to a transition.
///
/// `today` is the calendar date in the facility's timezone and is what
/// booking dates are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub occurred_at: OffsetDateTime,
    pub today: Date,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The state with the outcome folded in.
    pub new_state: State,
    pub outcome: Outcome,
    /// One event per mutated record, in the order they were written.
    pub audit_events: Vec<AuditEvent>,
}
