// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The boundary between transports and the booking engine.
//!
//! Operations take an [`AuthenticatedActor`], check one capability, and
//! speak in request/response types whose dates are plain strings. The
//! engine underneath never sees roles.

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

mod auth;
mod capabilities;
mod clock;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use capabilities::{Capability, capabilities_for, grants};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    DASHBOARD_DAYS, DASHBOARD_TOP_N, DEFAULT_CAPACITY, create_facility, create_reservation,
    delete_customer, delete_facility, find_or_create_customer, get_availability, get_customer,
    get_dashboard, get_facility, get_period_statistics, get_statistics, list_audit_events,
    list_customer_leaderboard, list_customer_reservations, list_facility_leaderboard,
    list_public_facilities, register_customer, reschedule_reservation, selection_options,
    set_facility_state, set_payment_method, transition_reservation, update_hourly_rate,
};
pub use request_response::{
    AuditEventView, AvailabilityResponse, CreateFacilityRequest, CreateReservationRequest,
    CustomerReservationsResponse, CustomerView, DailyCountView, DashboardResponse, FacilityView,
    FindOrCreateCustomerRequest, FindOrCreateCustomerResponse, PeriodStatisticsResponse,
    PublicFacilitiesResponse, RegisterCustomerRequest, RescheduleReservationRequest,
    ReservationView, SelectionOptionsResponse, SetFacilityStateRequest, SetPaymentMethodRequest,
    StatisticsResponse, TransitionReservationRequest, UpdateHourlyRateRequest, format_date,
    parse_date,
};
