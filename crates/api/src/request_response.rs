// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings and timestamps as
//! RFC 3339, so the wire format does not depend on how `time` serializes.

use courtside_audit::FieldChange;
use courtside_domain::{
    Amenities, AvailabilitySlot, Customer, CustomerLeaderboardEntry, CustomerSummary,
    CustomerTier, Facility, FacilityLeaderboardEntry, FacilityState, FacilitySummary, HourCount,
    PaymentMethod, Reservation, ReservationAction, ReservationChannel, ReservationState,
    ReservationStatistics, SelectionKind, SelectionOption, SportType, StateCount,
    StatisticsPeriod, SurfaceType,
};
use courtside_persistence::StoredAuditEvent;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::ApiError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` request field.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` if the value is not a date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from(field),
        message: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}

#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| at.to_string())
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_id: i64,
    pub facility: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub start_hour: f64,
    pub end_hour: f64,
    /// Defaults to in-person for staff; portal customers always book online.
    pub channel: Option<ReservationChannel>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TransitionReservationRequest {
    pub action: ReservationAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RescheduleReservationRequest {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub start_hour: f64,
    pub end_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetPaymentMethodRequest {
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateFacilityRequest {
    pub name: String,
    pub sport: SportType,
    pub surface: Option<SurfaceType>,
    /// Defaults to 10 players.
    pub capacity: Option<i32>,
    pub hourly_rate: f64,
    #[serde(default)]
    pub amenities: Amenities,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetFacilityStateRequest {
    pub state: FacilityState,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct UpdateHourlyRateRequest {
    pub hourly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub document_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub account_id: Option<String>,
}

/// A portal login looking for its customer record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FindOrCreateCustomerRequest {
    pub email: Option<String>,
    pub account_id: Option<String>,
    pub name: String,
    pub phone: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationView {
    pub number: u64,
    /// Display form, e.g. `RES-000042`.
    pub reference: String,
    pub customer_id: i64,
    pub facility: String,
    pub date: String,
    pub start_hour: f64,
    pub end_hour: f64,
    pub duration_hours: f64,
    pub amount: f64,
    pub state: ReservationState,
    pub state_label: &'static str,
    pub channel: ReservationChannel,
    pub payment_method: Option<PaymentMethod>,
    pub paid: bool,
    pub active: bool,
    pub notes: Option<String>,
    pub registered_by: String,
    pub created_at: String,
}

impl From<&Reservation> for ReservationView {
    fn from(r: &Reservation) -> Self {
        Self {
            number: r.number.value(),
            reference: r.number.to_string(),
            customer_id: r.customer_id,
            facility: r.facility.value().to_string(),
            date: format_date(r.date),
            start_hour: r.start_hour,
            end_hour: r.end_hour,
            duration_hours: r.duration_hours(),
            amount: r.amount(),
            state: r.state,
            state_label: r.state.label(),
            channel: r.channel,
            payment_method: r.payment_method,
            paid: r.paid,
            active: r.active,
            notes: r.notes.clone(),
            registered_by: r.registered_by.clone(),
            created_at: format_timestamp(r.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityView {
    pub code: String,
    pub name: String,
    pub sport: SportType,
    pub sport_label: &'static str,
    pub surface: Option<SurfaceType>,
    pub capacity: i32,
    pub hourly_rate: f64,
    pub state: FacilityState,
    pub state_label: &'static str,
    pub amenities: Amenities,
    pub description: Option<String>,
    pub reservation_count: usize,
    pub revenue_total: f64,
    pub available_today: bool,
}

impl FacilityView {
    #[must_use]
    pub fn new(facility: &Facility, summary: FacilitySummary) -> Self {
        Self {
            code: facility.code.value().to_string(),
            name: facility.name.clone(),
            sport: facility.sport,
            sport_label: facility.sport.label(),
            surface: facility.surface,
            capacity: facility.capacity,
            hourly_rate: facility.hourly_rate,
            state: facility.state,
            state_label: facility.state.label(),
            amenities: facility.amenities,
            description: facility.description.clone(),
            reservation_count: summary.reservation_count,
            revenue_total: summary.revenue_total,
            available_today: summary.available_today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerView {
    pub customer_id: i64,
    pub name: String,
    pub document_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub account_id: Option<String>,
    pub tier: CustomerTier,
    pub tier_label: &'static str,
    pub valid_reservations: usize,
    pub total_spent: f64,
    pub last_reservation: Option<String>,
}

impl CustomerView {
    #[must_use]
    pub fn new(customer: &Customer, summary: CustomerSummary) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: customer.name.clone(),
            document_number: customer.document_number.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            address: customer.address.clone(),
            account_id: customer.account_id.clone(),
            tier: customer.tier,
            tier_label: customer.tier.label(),
            valid_reservations: summary.valid_reservations,
            total_spent: summary.total_spent,
            last_reservation: summary.last_reservation.map(format_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindOrCreateCustomerResponse {
    pub customer: CustomerView,
    /// True when no existing customer matched and one was registered.
    pub created: bool,
}

/// A customer's bookings split for the portal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerReservationsResponse {
    pub customer_id: i64,
    /// Today or later, still draft, confirmed or in progress.
    pub active: Vec<ReservationView>,
    pub past: Vec<ReservationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicFacilitiesResponse {
    pub facilities: Vec<FacilityView>,
    /// Distinct sports among the listed facilities, in label-table order.
    pub sports: Vec<SelectionOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityResponse {
    pub facility: String,
    pub date: String,
    pub hourly_rate: f64,
    pub slots: Vec<AvailabilitySlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsResponse {
    pub start: String,
    pub end: String,
    pub total_count: usize,
    pub by_state: Vec<StateCount>,
    pub revenue: f64,
}

impl From<ReservationStatistics> for StatisticsResponse {
    fn from(stats: ReservationStatistics) -> Self {
        Self {
            start: format_date(stats.range.start()),
            end: format_date(stats.range.end()),
            total_count: stats.total_count,
            by_state: stats.by_state,
            revenue: stats.revenue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStatisticsResponse {
    pub period: StatisticsPeriod,
    pub statistics: StatisticsResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCountView {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardResponse {
    pub today: String,
    /// Confirmed and in-progress reservations dated today.
    pub today_count: usize,
    /// All reservations dated this month.
    pub month_count: usize,
    pub month_revenue: f64,
    pub facility_count: usize,
    pub top_facilities: Vec<FacilityLeaderboardEntry>,
    pub top_customers: Vec<CustomerLeaderboardEntry>,
    /// Start hours this month, excluding cancellations.
    pub popular_hours: Vec<HourCount>,
    /// The last seven days, oldest first.
    pub daily_counts: Vec<DailyCountView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEventView {
    pub event_id: i64,
    pub entity_kind: String,
    pub entity_id: String,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action: String,
    pub details: Option<String>,
    pub changes: Vec<FieldChange>,
    pub occurred_at: String,
}

impl From<StoredAuditEvent> for AuditEventView {
    fn from(stored: StoredAuditEvent) -> Self {
        let event = stored.event;
        Self {
            event_id: stored.event_id,
            entity_kind: event.entity.kind.to_string(),
            entity_id: event.entity.id,
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            cause_id: event.cause.id,
            cause_description: event.cause.description,
            action: event.action.name,
            details: event.action.details,
            changes: event.changes,
            occurred_at: format_timestamp(event.occurred_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOptionsResponse {
    pub kind: SelectionKind,
    pub options: Vec<SelectionOption>,
}
