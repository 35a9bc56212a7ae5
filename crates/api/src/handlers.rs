// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation checks the actor's capability once, translates the
//! request into domain values, and either runs a command through
//! persistence or reads and summarizes stored records.

use courtside::{Command, Outcome};
use courtside_audit::{Cause, EntityRef};
use courtside_domain::{
    Customer, DateRange, DomainError, DraftVisibility, Facility, FacilityCode, FacilityState,
    Reservation, ReservationAction, ReservationChannel, ReservationNumber, ReservationState,
    SelectionKind, SelectionOption, SportType, StatisticsPeriod, compute_availability,
    customer_leaderboard, daily_counts, facility_leaderboard, period_range, popular_hours,
    revenue_in_range, selection_options as options_for, summarize_customer, summarize_facility,
    summarize_range, validate_booking_date,
};
use courtside_domain::{CustomerLeaderboardEntry, FacilityLeaderboardEntry};
use courtside_persistence::{ExecutedCommand, Persistence};
use time::Date;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::capabilities::{Capability, grants};
use crate::clock::Clock;
use crate::error::ApiError;
use crate::request_response::{
    AuditEventView, AvailabilityResponse, CreateFacilityRequest, CreateReservationRequest,
    CustomerReservationsResponse, CustomerView, DailyCountView, DashboardResponse, FacilityView,
    FindOrCreateCustomerRequest, FindOrCreateCustomerResponse, PeriodStatisticsResponse,
    PublicFacilitiesResponse, RegisterCustomerRequest, RescheduleReservationRequest,
    ReservationView, SelectionOptionsResponse, SetFacilityStateRequest, SetPaymentMethodRequest,
    StatisticsResponse, TransitionReservationRequest, UpdateHourlyRateRequest, format_date,
    parse_date,
};

/// Capacity used when a new facility does not state one.
pub const DEFAULT_CAPACITY: i32 = 10;

/// Entries shown in each dashboard ranking.
pub const DASHBOARD_TOP_N: usize = 5;

/// Days covered by the dashboard's daily series.
pub const DASHBOARD_DAYS: u16 = 7;

// ============================================================================
// Helpers
// ============================================================================

fn unexpected_outcome(action: &str) -> ApiError {
    ApiError::Internal {
        message: format!("{action} produced an unexpected outcome"),
    }
}

fn reservation_outcome(executed: ExecutedCommand, action: &str) -> Result<Reservation, ApiError> {
    match executed.result.outcome {
        Outcome::ReservationCreated { reservation, .. }
        | Outcome::ReservationUpdated { reservation, .. } => Ok(reservation),
        _ => Err(unexpected_outcome(action)),
    }
}

fn facility_outcome(executed: ExecutedCommand, action: &str) -> Result<Facility, ApiError> {
    match executed.result.outcome {
        Outcome::FacilityCreated(facility) | Outcome::FacilityUpdated(facility) => Ok(facility),
        _ => Err(unexpected_outcome(action)),
    }
}

fn load_reservation(
    persistence: &mut Persistence,
    number: ReservationNumber,
) -> Result<Reservation, ApiError> {
    persistence
        .get_reservation(number)?
        .ok_or_else(|| ApiError::from(DomainError::ReservationNotFound(number)))
}

fn load_facility(persistence: &mut Persistence, code: &FacilityCode) -> Result<Facility, ApiError> {
    persistence
        .get_facility(code)?
        .ok_or_else(|| ApiError::from(DomainError::FacilityNotFound(code.clone())))
}

fn load_customer(persistence: &mut Persistence, customer_id: i64) -> Result<Customer, ApiError> {
    persistence
        .get_customer(customer_id)?
        .ok_or_else(|| ApiError::from(DomainError::CustomerNotFound(customer_id)))
}

fn facility_view(
    persistence: &mut Persistence,
    facility: &Facility,
    today: Date,
) -> Result<FacilityView, ApiError> {
    let reservations: Vec<Reservation> = persistence.list_reservations_for_facility(&facility.code)?;
    Ok(FacilityView::new(
        facility,
        summarize_facility(facility, &reservations, today),
    ))
}

fn customer_view(
    persistence: &mut Persistence,
    customer: &Customer,
) -> Result<CustomerView, ApiError> {
    let history: Vec<Reservation> = persistence.list_reservations_for_customer(customer.customer_id)?;
    Ok(CustomerView::new(
        customer,
        summarize_customer(customer.customer_id, &history),
    ))
}

const fn require_limit(limit: usize) -> Result<usize, DomainError> {
    if limit == 0 {
        Err(DomainError::InvalidLimit)
    } else {
        Ok(limit)
    }
}

/// Newest first: by date, then by start hour.
fn sort_newest_first(reservations: &mut [Reservation]) {
    reservations.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.start_hour.total_cmp(&a.start_hour))
    });
}

// ============================================================================
// Reservations
// ============================================================================

/// Books a slot for a customer.
///
/// Staff book for anyone and default to the in-person channel; their
/// bookings start as drafts. Customers book only for their own record,
/// always online, and their bookings are confirmed in the same
/// transaction.
///
/// # Errors
///
/// Returns an error if the actor may not book for the customer, the date
/// is malformed, or the engine rejects the booking.
pub fn create_reservation(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: CreateReservationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReservationView, ApiError> {
    AuthorizationService::authorize_booking(actor, request.customer_id)?;

    let date: Date = parse_date("date", &request.date)?;
    let self_service: bool = actor.role == Role::Customer;
    let channel: ReservationChannel = if self_service {
        ReservationChannel::Online
    } else {
        request.channel.unwrap_or(ReservationChannel::InPerson)
    };

    let command: Command = Command::CreateReservation {
        customer_id: request.customer_id,
        facility: FacilityCode::new(&request.facility),
        date,
        start_hour: request.start_hour,
        end_hour: request.end_hour,
        channel,
        payment_method: request.payment_method,
        notes: request.notes,
    };

    let executed: ExecutedCommand = if self_service {
        let (_, confirmed) = persistence.execute_confirmed_booking(
            command,
            actor.to_audit_actor(),
            cause,
            clock.moment(),
        )?;
        confirmed
    } else {
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?
    };
    let reservation: Reservation = reservation_outcome(executed, "create_reservation")?;

    info!(
        number = %reservation.number,
        facility = %reservation.facility,
        date = %reservation.date,
        start = reservation.start_hour,
        end = reservation.end_hour,
        state = %reservation.state,
        "Reservation created"
    );
    Ok(ReservationView::from(&reservation))
}

/// Applies a lifecycle action to a reservation.
///
/// Customers may only cancel their own reservations; every other action
/// is staff work.
///
/// # Errors
///
/// Returns an error if the actor may not act, the reservation does not
/// exist, or the lifecycle forbids the action.
pub fn transition_reservation(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    number: ReservationNumber,
    request: TransitionReservationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReservationView, ApiError> {
    if request.action == ReservationAction::Cancel {
        let reservation: Reservation = load_reservation(persistence, number)?;
        AuthorizationService::authorize_cancel(actor, &reservation)?;
    } else {
        AuthorizationService::require(actor, Capability::OperateReservations, "transition_reservation")?;
    }

    let command: Command = Command::TransitionReservation {
        number,
        action: request.action,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let reservation: Reservation = reservation_outcome(executed, "transition_reservation")?;

    info!(
        number = %reservation.number,
        action = request.action.as_str(),
        state = %reservation.state,
        "Reservation transitioned"
    );
    Ok(ReservationView::from(&reservation))
}

/// Moves a reservation to a new date and time.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability, the date is
/// malformed, or the engine rejects the new slot.
pub fn reschedule_reservation(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    number: ReservationNumber,
    request: RescheduleReservationRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReservationView, ApiError> {
    AuthorizationService::require(actor, Capability::OperateReservations, "reschedule_reservation")?;

    let date: Date = parse_date("date", &request.date)?;
    let command: Command = Command::RescheduleReservation {
        number,
        date,
        start_hour: request.start_hour,
        end_hour: request.end_hour,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let reservation: Reservation = reservation_outcome(executed, "reschedule_reservation")?;

    info!(number = %reservation.number, date = %reservation.date, "Reservation rescheduled");
    Ok(ReservationView::from(&reservation))
}

/// Records how a reservation will be paid.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or the reservation
/// does not exist.
pub fn set_payment_method(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    number: ReservationNumber,
    request: SetPaymentMethodRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ReservationView, ApiError> {
    AuthorizationService::require(actor, Capability::OperateReservations, "set_payment_method")?;

    let command: Command = Command::SetPaymentMethod {
        number,
        method: request.method,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let reservation: Reservation = reservation_outcome(executed, "set_payment_method")?;

    debug!(number = %reservation.number, method = request.method.as_str(), "Payment method set");
    Ok(ReservationView::from(&reservation))
}

/// Unit-hour availability of a facility on a date.
///
/// Public: no actor is required. Drafts only occupy slots when
/// `include_drafts` is set, which is reserved to actors who operate
/// reservations.
///
/// # Errors
///
/// Returns an error if drafts are requested without the capability, the
/// date is malformed or already past, or the facility does not exist.
pub fn get_availability(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    facility: &str,
    date: &str,
    include_drafts: bool,
    actor: Option<&AuthenticatedActor>,
) -> Result<AvailabilityResponse, ApiError> {
    if include_drafts {
        AuthorizationService::require_present(
            actor,
            Capability::OperateReservations,
            "view_draft_availability",
        )?;
    }

    let date: Date = parse_date("date", date)?;
    validate_booking_date(date, clock.today())?;
    let facility: Facility = load_facility(persistence, &FacilityCode::new(facility))?;
    let reservations: Vec<Reservation> =
        persistence.list_reservations_for_facility_on(&facility.code, date)?;

    let visibility: DraftVisibility = if include_drafts {
        DraftVisibility::Shown
    } else {
        DraftVisibility::Hidden
    };

    Ok(AvailabilityResponse {
        facility: facility.code.value().to_string(),
        date: format_date(date),
        hourly_rate: facility.hourly_rate,
        slots: compute_availability(&facility, &reservations, date, visibility),
    })
}

// ============================================================================
// Facilities
// ============================================================================

/// Creates a facility; the code is assigned from the facility sequence.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or a field is invalid.
pub fn create_facility(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: CreateFacilityRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FacilityView, ApiError> {
    AuthorizationService::require(actor, Capability::ManageFacilities, "create_facility")?;

    let command: Command = Command::CreateFacility {
        name: request.name,
        sport: request.sport,
        surface: request.surface,
        capacity: request.capacity.unwrap_or(DEFAULT_CAPACITY),
        hourly_rate: request.hourly_rate,
        amenities: request.amenities,
        description: request.description,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let facility: Facility = facility_outcome(executed, "create_facility")?;

    info!(code = %facility.code, name = %facility.name, "Facility created");
    facility_view(persistence, &facility, clock.today())
}

/// Opens, closes or takes a facility out for maintenance.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or the facility
/// does not exist.
pub fn set_facility_state(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    code: &str,
    request: SetFacilityStateRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FacilityView, ApiError> {
    AuthorizationService::require(actor, Capability::OperateFacilities, "set_facility_state")?;

    let command: Command = Command::SetFacilityState {
        code: FacilityCode::new(code),
        state: request.state,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let facility: Facility = facility_outcome(executed, "set_facility_state")?;

    info!(code = %facility.code, state = %facility.state, "Facility state changed");
    facility_view(persistence, &facility, clock.today())
}

/// Changes a facility's hourly rate.
///
/// Amounts are derived from the live rate, so existing reservations are
/// repriced.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability, the rate is not
/// positive, or the facility does not exist.
pub fn update_hourly_rate(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    code: &str,
    request: UpdateHourlyRateRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FacilityView, ApiError> {
    AuthorizationService::require(actor, Capability::ManageFacilities, "update_hourly_rate")?;

    let command: Command = Command::UpdateHourlyRate {
        code: FacilityCode::new(code),
        hourly_rate: request.hourly_rate,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let facility: Facility = facility_outcome(executed, "update_hourly_rate")?;

    info!(code = %facility.code, rate = facility.hourly_rate, "Hourly rate updated");
    facility_view(persistence, &facility, clock.today())
}

/// Deletes a facility no reservation refers to.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability, the facility does
/// not exist, or reservations still reference it.
pub fn delete_facility(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    code: &str,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::require(actor, Capability::ManageFacilities, "delete_facility")?;

    let code: FacilityCode = FacilityCode::new(code);
    let command: Command = Command::DeleteFacility { code: code.clone() };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    match executed.result.outcome {
        Outcome::FacilityDeleted(_) => {
            info!(code = %code, "Facility deleted");
            Ok(())
        }
        _ => Err(unexpected_outcome("delete_facility")),
    }
}

/// A facility with its derived aggregates. Public.
///
/// # Errors
///
/// Returns an error if the facility does not exist.
pub fn get_facility(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    code: &str,
) -> Result<FacilityView, ApiError> {
    let facility: Facility = load_facility(persistence, &FacilityCode::new(code))?;
    facility_view(persistence, &facility, clock.today())
}

/// The public catalogue: available facilities by name, optionally for one
/// sport, plus the sports on offer.
///
/// # Errors
///
/// Returns an error if the facilities cannot be read.
pub fn list_public_facilities(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    sport: Option<SportType>,
) -> Result<PublicFacilitiesResponse, ApiError> {
    let available: Vec<Facility> = persistence.list_facilities_in_state(FacilityState::Available)?;

    let sports: Vec<SelectionOption> = SportType::ALL
        .iter()
        .filter(|s| available.iter().any(|f| f.sport == **s))
        .map(|s| SelectionOption {
            value: s.as_str(),
            label: s.label(),
        })
        .collect();

    let today: Date = clock.today();
    let mut facilities: Vec<FacilityView> = Vec::new();
    for facility in available
        .iter()
        .filter(|f| sport.is_none_or(|wanted| f.sport == wanted))
    {
        facilities.push(facility_view(persistence, facility, today)?);
    }

    Ok(PublicFacilitiesResponse { facilities, sports })
}

// ============================================================================
// Customers
// ============================================================================

/// Registers a customer at the front desk.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability, a field is invalid,
/// or the document number is already registered.
pub fn register_customer(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: RegisterCustomerRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CustomerView, ApiError> {
    AuthorizationService::require(actor, Capability::ManageCustomers, "register_customer")?;

    let command: Command = Command::RegisterCustomer {
        name: request.name,
        document_number: request.document_number,
        phone: request.phone,
        email: request.email,
        address: request.address,
        account_id: request.account_id,
    };
    let executed: ExecutedCommand =
        persistence.execute(command, actor.to_audit_actor(), cause, clock.moment())?;
    let Outcome::CustomerRegistered(customer) = executed.result.outcome else {
        return Err(unexpected_outcome("register_customer"));
    };

    info!(customer_id = customer.customer_id, "Customer registered");
    customer_view(persistence, &customer)
}

/// Resolves a portal login to its customer, registering one on first use.
///
/// The account id is matched first, then the email.
///
/// # Errors
///
/// Returns an error if neither email nor account id is given, or if
/// registration is rejected.
pub fn find_or_create_customer(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    request: FindOrCreateCustomerRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FindOrCreateCustomerResponse, ApiError> {
    if !grants(actor.role, Capability::ManageCustomers) {
        AuthorizationService::require(actor, Capability::BookForSelf, "find_or_create_customer")?;
    }

    let email: Option<String> = request
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    let account_id: Option<String> = request
        .account_id
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());
    if email.is_none() && account_id.is_none() {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("an email or an account id is required"),
        });
    }

    let registration: Command = Command::RegisterCustomer {
        name: request.name,
        document_number: None,
        phone: request.phone,
        email: email.clone(),
        address: None,
        account_id: account_id.clone(),
    };
    let (customer, created) = persistence.find_or_register_customer(
        email.as_deref(),
        account_id.as_deref(),
        registration,
        actor.to_audit_actor(),
        cause,
        clock.moment(),
    )?;

    if created {
        info!(customer_id = customer.customer_id, "Customer registered from portal login");
    } else {
        debug!(customer_id = customer.customer_id, "Portal login matched existing customer");
    }

    Ok(FindOrCreateCustomerResponse {
        customer: customer_view(persistence, &customer)?,
        created,
    })
}

/// Deletes a customer with no reservation history.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability, the customer does
/// not exist, or reservations still reference them.
pub fn delete_customer(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    customer_id: i64,
    actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::require(actor, Capability::DeleteCustomers, "delete_customer")?;

    let executed: ExecutedCommand = persistence.execute(
        Command::DeleteCustomer { customer_id },
        actor.to_audit_actor(),
        cause,
        clock.moment(),
    )?;
    match executed.result.outcome {
        Outcome::CustomerDeleted(_) => {
            info!(customer_id, "Customer deleted");
            Ok(())
        }
        _ => Err(unexpected_outcome("delete_customer")),
    }
}

/// A customer with their derived aggregates.
///
/// # Errors
///
/// Returns an error if the actor may not see the customer or the customer
/// does not exist.
pub fn get_customer(
    persistence: &mut Persistence,
    customer_id: i64,
    actor: &AuthenticatedActor,
) -> Result<CustomerView, ApiError> {
    AuthorizationService::require_customer_access(actor, customer_id, "get_customer")?;
    let customer: Customer = load_customer(persistence, customer_id)?;
    customer_view(persistence, &customer)
}

/// A customer's reservations, split into upcoming and past.
///
/// # Errors
///
/// Returns an error if the actor may not see the customer or the customer
/// does not exist.
pub fn list_customer_reservations(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    customer_id: i64,
    actor: &AuthenticatedActor,
) -> Result<CustomerReservationsResponse, ApiError> {
    AuthorizationService::require_customer_access(actor, customer_id, "list_customer_reservations")?;
    load_customer(persistence, customer_id)?;

    let today: Date = clock.today();
    let (mut active, mut past): (Vec<Reservation>, Vec<Reservation>) = persistence
        .list_reservations_for_customer(customer_id)?
        .into_iter()
        .partition(|r| r.date >= today && r.state.blocks_booking());
    sort_newest_first(&mut active);
    sort_newest_first(&mut past);

    Ok(CustomerReservationsResponse {
        customer_id,
        active: active.iter().map(ReservationView::from).collect(),
        past: past.iter().map(ReservationView::from).collect(),
    })
}

// ============================================================================
// Reports
// ============================================================================

/// Counts and revenue for reservations dated in `[start, end]`.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or the range is
/// malformed or reversed.
pub fn get_statistics(
    persistence: &mut Persistence,
    start: &str,
    end: &str,
    actor: &AuthenticatedActor,
) -> Result<StatisticsResponse, ApiError> {
    AuthorizationService::require(actor, Capability::ViewReports, "get_statistics")?;

    let range: DateRange = DateRange::new(parse_date("start", start)?, parse_date("end", end)?)?;
    let reservations: Vec<Reservation> = persistence.list_reservations_between(&range)?;
    Ok(StatisticsResponse::from(summarize_range(&reservations, range)))
}

/// Statistics for the calendar day, week, month or year containing today.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability.
pub fn get_period_statistics(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    period: StatisticsPeriod,
    actor: &AuthenticatedActor,
) -> Result<PeriodStatisticsResponse, ApiError> {
    AuthorizationService::require(actor, Capability::ViewReports, "get_period_statistics")?;

    let range: DateRange = period_range(period, clock.today());
    let reservations: Vec<Reservation> = persistence.list_reservations_between(&range)?;
    Ok(PeriodStatisticsResponse {
        period,
        statistics: StatisticsResponse::from(summarize_range(&reservations, range)),
    })
}

/// Facilities ranked by counted reservations, then revenue.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or `limit` is zero.
pub fn list_facility_leaderboard(
    persistence: &mut Persistence,
    limit: usize,
    actor: &AuthenticatedActor,
) -> Result<Vec<FacilityLeaderboardEntry>, ApiError> {
    AuthorizationService::require(actor, Capability::ViewReports, "list_facility_leaderboard")?;
    let limit: usize = require_limit(limit)?;

    let facilities: Vec<Facility> = persistence.list_facilities()?;
    let reservations: Vec<Reservation> = persistence.list_reservations()?;
    Ok(facility_leaderboard(&facilities, &reservations, limit))
}

/// Customers ranked by counted reservations, then total spent.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or `limit` is zero.
pub fn list_customer_leaderboard(
    persistence: &mut Persistence,
    limit: usize,
    actor: &AuthenticatedActor,
) -> Result<Vec<CustomerLeaderboardEntry>, ApiError> {
    AuthorizationService::require(actor, Capability::ViewReports, "list_customer_leaderboard")?;
    let limit: usize = require_limit(limit)?;

    let customers: Vec<Customer> = persistence.list_customers()?;
    let reservations: Vec<Reservation> = persistence.list_reservations()?;
    Ok(customer_leaderboard(&customers, &reservations, limit))
}

/// The back-office overview for today and the current month.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability.
pub fn get_dashboard(
    persistence: &mut Persistence,
    clock: &dyn Clock,
    actor: &AuthenticatedActor,
) -> Result<DashboardResponse, ApiError> {
    AuthorizationService::require(actor, Capability::ViewReports, "get_dashboard")?;

    let today: Date = clock.today();
    let month: DateRange = period_range(StatisticsPeriod::Month, today);

    let facilities: Vec<Facility> = persistence.list_facilities()?;
    let customers: Vec<Customer> = persistence.list_customers()?;
    let reservations: Vec<Reservation> = persistence.list_reservations()?;

    let today_count: usize = reservations
        .iter()
        .filter(|r| {
            r.date == today
                && matches!(
                    r.state,
                    ReservationState::Confirmed | ReservationState::InProgress
                )
        })
        .count();
    let month_count: usize = reservations.iter().filter(|r| month.contains(r.date)).count();

    Ok(DashboardResponse {
        today: format_date(today),
        today_count,
        month_count,
        month_revenue: revenue_in_range(&reservations, &month),
        facility_count: facilities.len(),
        top_facilities: facility_leaderboard(&facilities, &reservations, DASHBOARD_TOP_N),
        top_customers: customer_leaderboard(&customers, &reservations, DASHBOARD_TOP_N),
        popular_hours: popular_hours(&reservations, &month, DASHBOARD_TOP_N),
        daily_counts: daily_counts(&reservations, today, DASHBOARD_DAYS)
            .into_iter()
            .map(|d| DailyCountView {
                date: format_date(d.date),
                count: d.count,
            })
            .collect(),
    })
}

// ============================================================================
// Audit and reference data
// ============================================================================

/// The audit log, optionally for one record, oldest first.
///
/// # Errors
///
/// Returns an error if the actor lacks the capability or `limit` is not
/// positive.
pub fn list_audit_events(
    persistence: &mut Persistence,
    entity: Option<&EntityRef>,
    limit: Option<i64>,
    actor: &AuthenticatedActor,
) -> Result<Vec<AuditEventView>, ApiError> {
    AuthorizationService::require(actor, Capability::ViewAudit, "list_audit_events")?;
    if limit.is_some_and(|l| l < 1) {
        return Err(DomainError::InvalidLimit.into());
    }

    Ok(persistence
        .list_audit_events(entity, limit)?
        .into_iter()
        .map(AuditEventView::from)
        .collect())
}

/// The value/label list for one enum. Public.
#[must_use]
pub fn selection_options(kind: SelectionKind) -> SelectionOptionsResponse {
    SelectionOptionsResponse {
        kind,
        options: options_for(kind),
    }
}
