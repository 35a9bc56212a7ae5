// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation records and the reservation lifecycle.
//!
//! ```text
//! draft       -> confirmed   (confirm)
//! draft       -> cancelled   (cancel)
//! confirmed   -> in_progress (start)
//! confirmed   -> cancelled   (cancel)
//! confirmed   -> no_show     (mark_no_show)
//! in_progress -> completed   (complete, requires paid)
//! any state   -> paid        (mark_paid, requires a payment method)
//! ```

use crate::error::DomainError;
use crate::facility::FacilityCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// First bookable hour of the day.
pub const BOOKABLE_START_HOUR: f64 = 6.0;
/// Bookable hours end at this hour (exclusive).
pub const BOOKABLE_END_HOUR: f64 = 23.0;
/// Number of unit-hour slots in the bookable window.
pub const BOOKABLE_HOURS_PER_DAY: usize = 17;

labeled_enum! {
    /// Lifecycle state of a reservation.
    pub enum ReservationState ("reservation state") {
        Draft => ("draft", "Draft"),
        Confirmed => ("confirmed", "Confirmed"),
        InProgress => ("in_progress", "In progress"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
        NoShow => ("no_show", "No show"),
    }
}

labeled_enum! {
    /// How the reservation was placed.
    pub enum ReservationChannel ("reservation channel") {
        Online => ("online", "Online"),
        InPerson => ("in_person", "In person"),
    }
}

labeled_enum! {
    /// Recorded payment method. No transaction is ever processed.
    pub enum PaymentMethod ("payment method") {
        Cash => ("cash", "Cash"),
        Card => ("card", "Card"),
        Transfer => ("transfer", "Bank transfer"),
        MobileWallet => ("mobile_wallet", "Mobile wallet"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    /// Operator actions on a reservation.
    pub enum ReservationAction ("reservation action") {
        Confirm => ("confirm", "Confirm"),
        Start => ("start", "Start"),
        Complete => ("complete", "Complete"),
        Cancel => ("cancel", "Cancel"),
        MarkNoShow => ("mark_no_show", "Mark no-show"),
        MarkPaid => ("mark_paid", "Mark paid"),
    }
}

impl ReservationState {
    /// Returns true if no further state transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// States that hold the facility against new conflicting bookings.
    #[must_use]
    pub const fn blocks_booking(&self) -> bool {
        matches!(self, Self::Draft | Self::Confirmed | Self::InProgress)
    }

    /// States counted as valid for customer tiers and customer totals.
    #[must_use]
    pub const fn counts_toward_tier(&self) -> bool {
        matches!(self, Self::Confirmed | Self::InProgress | Self::Completed)
    }

    /// States from which a reservation may be moved to another slot.
    #[must_use]
    pub const fn is_reschedulable(&self) -> bool {
        matches!(self, Self::Draft | Self::Confirmed)
    }

    /// States whose amount counts as revenue.
    #[must_use]
    pub const fn counts_as_revenue(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Completed)
    }

    /// Returns the state reached by `action`, if the lifecycle allows it.
    ///
    /// `MarkPaid` is orthogonal to the state and is not handled here.
    #[must_use]
    pub const fn next(&self, action: ReservationAction) -> Option<Self> {
        match (self, action) {
            (Self::Draft, ReservationAction::Confirm) => Some(Self::Confirmed),
            (Self::Draft | Self::Confirmed, ReservationAction::Cancel) => Some(Self::Cancelled),
            (Self::Confirmed, ReservationAction::Start) => Some(Self::InProgress),
            (Self::Confirmed, ReservationAction::MarkNoShow) => Some(Self::NoShow),
            (Self::InProgress, ReservationAction::Complete) => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Sequential reference number of a reservation, displayed as `RES-000042`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ReservationNumber(u64);

impl ReservationNumber {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ReservationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RES-{:06}", self.0)
    }
}

impl FromStr for ReservationNumber {
    type Err = DomainError;

    /// Accepts either the display form (`RES-000042`) or the bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: &str = s.trim().strip_prefix("RES-").unwrap_or_else(|| s.trim());
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidEnumValue {
                kind: "reservation number",
                value: s.to_string(),
            })
    }
}

/// A time-bounded booking of one facility by one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub number: ReservationNumber,
    pub customer_id: i64,
    pub facility: FacilityCode,
    pub date: Date,
    /// Fractional hour of day, e.g. `14.5` for 14:30.
    pub start_hour: f64,
    /// Fractional hour of day, exclusive.
    pub end_hour: f64,
    pub channel: ReservationChannel,
    pub payment_method: Option<PaymentMethod>,
    pub paid: bool,
    pub notes: Option<String>,
    /// Identity of whoever registered the booking.
    pub registered_by: String,
    pub created_at: OffsetDateTime,
    /// Cleared when the reservation is cancelled or marked no-show.
    pub active: bool,
    pub state: ReservationState,
    /// The facility's hourly rate as read when the reservation was loaded.
    ///
    /// This is never persisted with the reservation; amounts always follow
    /// the facility's current rate.
    pub hourly_rate: f64,
}

impl Reservation {
    /// Returns the reservation moved to a new slot.
    ///
    /// Only the state precondition is checked here; window, date and
    /// overlap checks belong to the caller, which sees the other bookings.
    ///
    /// # Errors
    ///
    /// Returns `NotReschedulable` unless the reservation is draft or
    /// confirmed.
    pub fn rescheduled(
        &self,
        date: Date,
        start_hour: f64,
        end_hour: f64,
    ) -> Result<Self, DomainError> {
        if !self.state.is_reschedulable() {
            return Err(DomainError::NotReschedulable {
                number: self.number,
                from: self.state,
            });
        }
        Ok(Self {
            date,
            start_hour,
            end_hour,
            ..self.clone()
        })
    }

    /// Booked duration in hours.
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }

    /// Total amount: duration times the facility's current hourly rate.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.duration_hours() * self.hourly_rate
    }

    /// Returns the reservation after applying `action`.
    ///
    /// # Errors
    ///
    /// - `PaymentRequired` when completing an unpaid reservation
    /// - `PaymentMethodRequired` when marking paid without a method
    /// - `InvalidTransition` for any action the lifecycle forbids
    pub fn apply_action(&self, action: ReservationAction) -> Result<Self, DomainError> {
        let mut next: Self = self.clone();

        if action == ReservationAction::MarkPaid {
            if self.payment_method.is_none() {
                return Err(DomainError::PaymentMethodRequired(self.number));
            }
            next.paid = true;
            return Ok(next);
        }

        if action == ReservationAction::Complete && !self.paid {
            return Err(DomainError::PaymentRequired(self.number));
        }

        let Some(state) = self.state.next(action) else {
            return Err(DomainError::InvalidTransition {
                number: self.number,
                from: self.state,
                action,
            });
        };

        next.state = state;
        if matches!(state, ReservationState::Cancelled | ReservationState::NoShow) {
            next.active = false;
        }
        Ok(next)
    }
}
