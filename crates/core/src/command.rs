// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{
    Amenities, FacilityCode, FacilityState, PaymentMethod, ReservationAction,
    ReservationChannel, ReservationNumber, SportType, SurfaceType,
};
use time::Date;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a new facility. The code is drawn from the sequence.
    CreateFacility {
        name: String,
        sport: SportType,
        surface: Option<SurfaceType>,
        capacity: i32,
        hourly_rate: f64,
        amenities: Amenities,
        description: Option<String>,
    },
    /// Move a facility to another operational state.
    SetFacilityState {
        code: FacilityCode,
        state: FacilityState,
    },
    /// Change the price per hour of a facility.
    UpdateHourlyRate { code: FacilityCode, hourly_rate: f64 },
    /// Remove a facility that no reservation references.
    DeleteFacility { code: FacilityCode },
    /// Register a new customer.
    RegisterCustomer {
        name: String,
        document_number: Option<String>,
        phone: String,
        email: Option<String>,
        address: Option<String>,
        account_id: Option<String>,
    },
    /// Remove a customer that no reservation references.
    DeleteCustomer { customer_id: i64 },
    /// Book a facility slot. The reservation starts as a draft.
    CreateReservation {
        customer_id: i64,
        facility: FacilityCode,
        date: Date,
        start_hour: f64,
        end_hour: f64,
        channel: ReservationChannel,
        payment_method: Option<PaymentMethod>,
        notes: Option<String>,
    },
    /// Move a draft or confirmed reservation to another slot.
    RescheduleReservation {
        number: ReservationNumber,
        date: Date,
        start_hour: f64,
        end_hour: f64,
    },
    /// Drive a reservation through its lifecycle.
    TransitionReservation {
        number: ReservationNumber,
        action: ReservationAction,
    },
    /// Record how a reservation is (or will be) paid.
    SetPaymentMethod {
        number: ReservationNumber,
        method: PaymentMethod,
    },
}

impl Command {
    /// The action name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateFacility { .. } => "CreateFacility",
            Self::SetFacilityState { .. } => "SetFacilityState",
            Self::UpdateHourlyRate { .. } => "UpdateHourlyRate",
            Self::DeleteFacility { .. } => "DeleteFacility",
            Self::RegisterCustomer { .. } => "RegisterCustomer",
            Self::DeleteCustomer { .. } => "DeleteCustomer",
            Self::CreateReservation { .. } => "CreateReservation",
            Self::RescheduleReservation { .. } => "RescheduleReservation",
            Self::TransitionReservation { .. } => "TransitionReservation",
            Self::SetPaymentMethod { .. } => "SetPaymentMethod",
        }
    }
}
