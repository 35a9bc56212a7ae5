// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::facility::FacilityCode;
use crate::reservation::{ReservationAction, ReservationNumber, ReservationState};
use thiserror::Error;

/// Broad classification of a [`DomainError`].
///
/// Callers use the family to decide how to surface a failure; none of
/// them is ever retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// Malformed input.
    Validation,
    /// State or uniqueness violation.
    Conflict,
    /// Illegal lifecycle transition.
    Precondition,
    /// Dangling reference.
    NotFound,
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Hourly rate is zero or negative.
    #[error("Invalid hourly rate {rate}: must be greater than zero")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },
    /// Start/end hours are inverted or outside the bookable window.
    #[error("Invalid time range {start}-{end}: {reason}")]
    InvalidTimeRange {
        /// Requested start hour.
        start: f64,
        /// Requested end hour.
        end: f64,
        /// Which rule was broken.
        reason: &'static str,
    },
    /// Booking date lies before today.
    #[error("Cannot book {date}: date is before {today}")]
    PastDate {
        /// Requested date.
        date: time::Date,
        /// The reference "today".
        today: time::Date,
    },
    /// Email address does not look like an address.
    #[error("Invalid email format: '{0}'")]
    InvalidEmailFormat(String),
    /// Phone number contains illegal characters or too few digits.
    #[error("Invalid phone format: '{0}'")]
    InvalidPhoneFormat(String),
    /// A required name is empty.
    #[error("Invalid name: {0}")]
    InvalidName(&'static str),
    /// Capacity is negative.
    #[error("Invalid capacity {0}: must not be negative")]
    InvalidCapacity(i32),
    /// A date range whose end precedes its start.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Range start.
        start: time::Date,
        /// Range end.
        end: time::Date,
    },
    /// A leaderboard or listing limit of zero.
    #[error("Invalid limit: must be at least 1")]
    InvalidLimit,
    /// A string could not be parsed into one of the domain enums.
    #[error("Invalid {kind} value: '{value}'")]
    InvalidEnumValue {
        /// The enum being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The requested interval overlaps an existing reservation.
    #[error(
        "Facility {facility} is already booked on {date} from {conflict_start} to {conflict_end} by {conflicting}"
    )]
    SlotConflict {
        /// The facility.
        facility: FacilityCode,
        /// The date.
        date: time::Date,
        /// The reservation that holds the slot.
        conflicting: ReservationNumber,
        /// Start hour of the holding reservation.
        conflict_start: f64,
        /// End hour of the holding reservation.
        conflict_end: f64,
    },
    /// Facility code already in use.
    #[error("Facility code '{0}' already exists")]
    DuplicateCode(FacilityCode),
    /// Customer document number already registered.
    #[error("Document number '{0}' is already registered")]
    DuplicateDocument(String),
    /// Facility is not in the `available` state.
    #[error("Facility {facility} is not available for booking (state: {state})")]
    FacilityUnavailable {
        /// The facility.
        facility: FacilityCode,
        /// Its current operational state.
        state: &'static str,
    },
    /// Facility still referenced by reservations.
    #[error("Facility {facility} cannot be deleted: referenced by {count} reservation(s)")]
    FacilityReferenced {
        /// The facility.
        facility: FacilityCode,
        /// Number of referencing reservations.
        count: usize,
    },
    /// Customer still referenced by reservations.
    #[error("Customer {customer_id} cannot be deleted: referenced by {count} reservation(s)")]
    CustomerReferenced {
        /// The customer.
        customer_id: i64,
        /// Number of referencing reservations.
        count: usize,
    },

    /// Completing requires the reservation to be paid.
    #[error("Reservation {0} must be paid before it can be completed")]
    PaymentRequired(ReservationNumber),
    /// Marking paid requires a payment method.
    #[error("Reservation {0} has no payment method set")]
    PaymentMethodRequired(ReservationNumber),
    /// The action is not permitted from the current state.
    #[error("Cannot {action} reservation {number} while it is {from}")]
    InvalidTransition {
        /// The reservation.
        number: ReservationNumber,
        /// Its current state.
        from: ReservationState,
        /// The rejected action.
        action: ReservationAction,
    },
    /// Only draft and confirmed reservations can be moved.
    #[error("Reservation {number} cannot be rescheduled while it is {from}")]
    NotReschedulable {
        /// The reservation.
        number: ReservationNumber,
        /// Its current state.
        from: ReservationState,
    },

    /// Facility does not exist.
    #[error("Facility {0} not found")]
    FacilityNotFound(FacilityCode),
    /// Customer does not exist.
    #[error("Customer {0} not found")]
    CustomerNotFound(i64),
    /// Reservation does not exist.
    #[error("Reservation {0} not found")]
    ReservationNotFound(ReservationNumber),
}

impl DomainError {
    /// Classifies this error into its family.
    #[must_use]
    pub const fn family(&self) -> ErrorFamily {
        match self {
            Self::InvalidRate { .. }
            | Self::InvalidTimeRange { .. }
            | Self::PastDate { .. }
            | Self::InvalidEmailFormat(_)
            | Self::InvalidPhoneFormat(_)
            | Self::InvalidName(_)
            | Self::InvalidCapacity(_)
            | Self::InvalidDateRange { .. }
            | Self::InvalidLimit
            | Self::InvalidEnumValue { .. } => ErrorFamily::Validation,
            Self::SlotConflict { .. }
            | Self::DuplicateCode(_)
            | Self::DuplicateDocument(_)
            | Self::FacilityUnavailable { .. }
            | Self::FacilityReferenced { .. }
            | Self::CustomerReferenced { .. } => ErrorFamily::Conflict,
            Self::PaymentRequired(_)
            | Self::PaymentMethodRequired(_)
            | Self::InvalidTransition { .. }
            | Self::NotReschedulable { .. } => ErrorFamily::Precondition,
            Self::FacilityNotFound(_) | Self::CustomerNotFound(_) | Self::ReservationNotFound(_) => {
                ErrorFamily::NotFound
            }
        }
    }

    /// A stable, machine-readable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRate { .. } => "invalid_rate",
            Self::InvalidTimeRange { .. } => "invalid_time_range",
            Self::PastDate { .. } => "past_date",
            Self::InvalidEmailFormat(_) => "invalid_email_format",
            Self::InvalidPhoneFormat(_) => "invalid_phone_format",
            Self::InvalidName(_) => "invalid_name",
            Self::InvalidCapacity(_) => "invalid_capacity",
            Self::InvalidDateRange { .. } => "invalid_date_range",
            Self::InvalidLimit => "invalid_limit",
            Self::InvalidEnumValue { .. } => "invalid_enum_value",
            Self::SlotConflict { .. } => "slot_conflict",
            Self::DuplicateCode(_) => "duplicate_code",
            Self::DuplicateDocument(_) => "duplicate_document",
            Self::FacilityUnavailable { .. } => "facility_unavailable",
            Self::FacilityReferenced { .. } => "facility_referenced",
            Self::CustomerReferenced { .. } => "customer_referenced",
            Self::PaymentRequired(_) => "payment_required",
            Self::PaymentMethodRequired(_) => "payment_method_required",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::NotReschedulable { .. } => "not_reschedulable",
            Self::FacilityNotFound(_) => "facility_not_found",
            Self::CustomerNotFound(_) => "customer_not_found",
            Self::ReservationNotFound(_) => "reservation_not_found",
        }
    }
}
