// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod actor;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use courtside_api::{
    ApiError, AuditEventView, AvailabilityResponse, Capability, Clock, CreateFacilityRequest,
    CreateReservationRequest, CustomerReservationsResponse, CustomerView, DashboardResponse,
    FacilityView, FindOrCreateCustomerRequest, FindOrCreateCustomerResponse,
    PeriodStatisticsResponse, PublicFacilitiesResponse, RegisterCustomerRequest,
    RescheduleReservationRequest, ReservationView, SelectionOptionsResponse,
    SetFacilityStateRequest, SetPaymentMethodRequest, StatisticsResponse, SystemClock,
    TransitionReservationRequest, UpdateHourlyRateRequest, capabilities_for, create_facility,
    create_reservation, delete_customer, delete_facility, find_or_create_customer,
    get_availability, get_customer, get_dashboard, get_facility, get_period_statistics,
    get_statistics, list_audit_events, list_customer_leaderboard, list_customer_reservations,
    list_facility_leaderboard, list_public_facilities, register_customer, reschedule_reservation,
    selection_options, set_facility_state, set_payment_method, transition_reservation,
    update_hourly_rate,
};
use courtside_audit::{EntityKind, EntityRef};
use courtside_domain::{
    CustomerLeaderboardEntry, FacilityLeaderboardEntry, ReservationNumber, SelectionKind,
    SportType, StatisticsPeriod,
};
use courtside_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::actor::RequestContext;

/// Courtside Server - HTTP server for the Courtside booking engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// IANA timezone of the facilities, used to decide what "today" is
    #[arg(short, long, default_value = "UTC")]
    timezone: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    clock: Arc<dyn Clock>,
}

/// Leaderboard size when the caller does not ask for one.
const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct CatalogueQuery {
    sport: Option<SportType>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    /// `YYYY-MM-DD`.
    date: String,
    #[serde(default)]
    include_drafts: bool,
}

#[derive(Debug, Deserialize)]
struct StatisticsQuery {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct AuditQuery {
    entity_kind: Option<EntityKind>,
    entity_id: Option<String>,
    limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    success: bool,
    message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct CapabilitiesResponse {
    actor_id: String,
    role: &'static str,
    capabilities: &'static [Capability],
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    error: bool,
    /// Machine-readable rule for conflicts and failed preconditions.
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    rule: Option<String>,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            rule: self.rule,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        let (status, rule) = match err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, None),
            ApiError::Unauthorized { .. } => (StatusCode::FORBIDDEN, None),
            ApiError::Conflict { rule, .. } => (StatusCode::CONFLICT, Some(rule)),
            ApiError::PreconditionFailed { rule, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(rule))
            }
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, None),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };
        Self {
            status,
            rule,
            message,
        }
    }
}

fn parse_reservation_number(raw: &str) -> Result<ReservationNumber, HttpError> {
    raw.parse::<ReservationNumber>()
        .map_err(|e| HttpError::from(ApiError::from(e)))
}

// ============================================================================
// Public
// ============================================================================

/// Handler for GET `/facilities`.
async fn handle_list_public_facilities(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CatalogueQuery>,
) -> Result<Json<PublicFacilitiesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_public_facilities(&mut persistence, app_state.clock.as_ref(), query.sport)?;
    Ok(Json(response))
}

/// Handler for GET `/facilities/{code}`.
async fn handle_get_facility(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FacilityView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let view = get_facility(&mut persistence, app_state.clock.as_ref(), &code)?;
    Ok(Json(view))
}

/// Handler for GET `/facilities/{code}/availability`.
///
/// Public; `include_drafts=true` needs a staff identity.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    context: Option<RequestContext>,
    Path(code): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_availability(
        &mut persistence,
        app_state.clock.as_ref(),
        &code,
        &query.date,
        query.include_drafts,
        context.as_ref().map(|context| &context.actor),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/options/{kind}`.
async fn handle_selection_options(
    Path(kind): Path<SelectionKind>,
) -> Json<SelectionOptionsResponse> {
    Json(selection_options(kind))
}

/// Handler for GET `/capabilities`.
///
/// Lets clients hide what the caller may not do.
async fn handle_capabilities(
    RequestContext { actor, .. }: RequestContext,
) -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        role: actor.role.as_str(),
        capabilities: capabilities_for(actor.role),
        actor_id: actor.id,
    })
}

// ============================================================================
// Facilities
// ============================================================================

/// Handler for POST `/facilities`.
async fn handle_create_facility(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<CreateFacilityRequest>,
) -> Result<Json<FacilityView>, HttpError> {
    info!(actor_id = %actor.id, name = %req.name, "Handling create_facility request");
    let mut persistence = app_state.persistence.lock().await;
    let view = create_facility(&mut persistence, app_state.clock.as_ref(), req, &actor, cause)?;
    Ok(Json(view))
}

/// Handler for POST `/facilities/{code}/state`.
async fn handle_set_facility_state(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<SetFacilityStateRequest>,
) -> Result<Json<FacilityView>, HttpError> {
    info!(actor_id = %actor.id, code = %code, state = %req.state, "Handling set_facility_state request");
    let mut persistence = app_state.persistence.lock().await;
    let view = set_facility_state(
        &mut persistence,
        app_state.clock.as_ref(),
        &code,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(view))
}

/// Handler for POST `/facilities/{code}/rate`.
async fn handle_update_hourly_rate(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<UpdateHourlyRateRequest>,
) -> Result<Json<FacilityView>, HttpError> {
    info!(actor_id = %actor.id, code = %code, rate = req.hourly_rate, "Handling update_hourly_rate request");
    let mut persistence = app_state.persistence.lock().await;
    let view = update_hourly_rate(
        &mut persistence,
        app_state.clock.as_ref(),
        &code,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(view))
}

/// Handler for DELETE `/facilities/{code}`.
async fn handle_delete_facility(
    AxumState(app_state): AxumState<AppState>,
    Path(code): Path<String>,
    RequestContext { actor, cause }: RequestContext,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(actor_id = %actor.id, code = %code, "Handling delete_facility request");
    let mut persistence = app_state.persistence.lock().await;
    delete_facility(&mut persistence, app_state.clock.as_ref(), &code, &actor, cause)?;
    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted facility {code}")),
    }))
}

// ============================================================================
// Customers
// ============================================================================

/// Handler for POST `/customers`.
async fn handle_register_customer(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<RegisterCustomerRequest>,
) -> Result<Json<CustomerView>, HttpError> {
    info!(actor_id = %actor.id, "Handling register_customer request");
    let mut persistence = app_state.persistence.lock().await;
    let view = register_customer(&mut persistence, app_state.clock.as_ref(), req, &actor, cause)?;
    Ok(Json(view))
}

/// Handler for POST `/customers/lookup`.
async fn handle_find_or_create_customer(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<FindOrCreateCustomerRequest>,
) -> Result<Json<FindOrCreateCustomerResponse>, HttpError> {
    info!(actor_id = %actor.id, "Handling find_or_create_customer request");
    let mut persistence = app_state.persistence.lock().await;
    let response =
        find_or_create_customer(&mut persistence, app_state.clock.as_ref(), req, &actor, cause)?;
    Ok(Json(response))
}

/// Handler for GET `/customers/{id}`.
async fn handle_get_customer(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    RequestContext { actor, .. }: RequestContext,
) -> Result<Json<CustomerView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let view = get_customer(&mut persistence, customer_id, &actor)?;
    Ok(Json(view))
}

/// Handler for DELETE `/customers/{id}`.
async fn handle_delete_customer(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    RequestContext { actor, cause }: RequestContext,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(actor_id = %actor.id, customer_id, "Handling delete_customer request");
    let mut persistence = app_state.persistence.lock().await;
    delete_customer(
        &mut persistence,
        app_state.clock.as_ref(),
        customer_id,
        &actor,
        cause,
    )?;
    Ok(Json(WriteResponse {
        success: true,
        message: Some(format!("Deleted customer {customer_id}")),
    }))
}

/// Handler for GET `/customers/{id}/reservations`.
async fn handle_list_customer_reservations(
    AxumState(app_state): AxumState<AppState>,
    Path(customer_id): Path<i64>,
    RequestContext { actor, .. }: RequestContext,
) -> Result<Json<CustomerReservationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = list_customer_reservations(
        &mut persistence,
        app_state.clock.as_ref(),
        customer_id,
        &actor,
    )?;
    Ok(Json(response))
}

// ============================================================================
// Reservations
// ============================================================================

/// Handler for POST `/reservations`.
async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<CreateReservationRequest>,
) -> Result<Json<ReservationView>, HttpError> {
    info!(
        actor_id = %actor.id,
        facility = %req.facility,
        date = %req.date,
        start = req.start_hour,
        end = req.end_hour,
        "Handling create_reservation request"
    );
    let mut persistence = app_state.persistence.lock().await;
    let view = create_reservation(&mut persistence, app_state.clock.as_ref(), req, &actor, cause)?;
    Ok(Json(view))
}

/// Handler for POST `/reservations/{number}/transition`.
async fn handle_transition_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(number): Path<String>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<TransitionReservationRequest>,
) -> Result<Json<ReservationView>, HttpError> {
    let number: ReservationNumber = parse_reservation_number(&number)?;
    info!(actor_id = %actor.id, number = %number, action = %req.action, "Handling transition_reservation request");
    let mut persistence = app_state.persistence.lock().await;
    let view = transition_reservation(
        &mut persistence,
        app_state.clock.as_ref(),
        number,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(view))
}

/// Handler for POST `/reservations/{number}/reschedule`.
async fn handle_reschedule_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(number): Path<String>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<RescheduleReservationRequest>,
) -> Result<Json<ReservationView>, HttpError> {
    let number: ReservationNumber = parse_reservation_number(&number)?;
    info!(actor_id = %actor.id, number = %number, date = %req.date, "Handling reschedule_reservation request");
    let mut persistence = app_state.persistence.lock().await;
    let view = reschedule_reservation(
        &mut persistence,
        app_state.clock.as_ref(),
        number,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(view))
}

/// Handler for POST `/reservations/{number}/payment-method`.
async fn handle_set_payment_method(
    AxumState(app_state): AxumState<AppState>,
    Path(number): Path<String>,
    RequestContext { actor, cause }: RequestContext,
    Json(req): Json<SetPaymentMethodRequest>,
) -> Result<Json<ReservationView>, HttpError> {
    let number: ReservationNumber = parse_reservation_number(&number)?;
    let mut persistence = app_state.persistence.lock().await;
    let view = set_payment_method(
        &mut persistence,
        app_state.clock.as_ref(),
        number,
        req,
        &actor,
        cause,
    )?;
    Ok(Json(view))
}

// ============================================================================
// Reports
// ============================================================================

/// Handler for GET `/reports/statistics`.
async fn handle_get_statistics(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, .. }: RequestContext,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<StatisticsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_statistics(&mut persistence, &query.start, &query.end, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/reports/statistics/{period}`.
async fn handle_get_period_statistics(
    AxumState(app_state): AxumState<AppState>,
    Path(period): Path<StatisticsPeriod>,
    RequestContext { actor, .. }: RequestContext,
) -> Result<Json<PeriodStatisticsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response =
        get_period_statistics(&mut persistence, app_state.clock.as_ref(), period, &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/reports/leaderboard/facilities`.
async fn handle_facility_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, .. }: RequestContext,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<FacilityLeaderboardEntry>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let entries = list_facility_leaderboard(
        &mut persistence,
        query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
        &actor,
    )?;
    Ok(Json(entries))
}

/// Handler for GET `/reports/leaderboard/customers`.
async fn handle_customer_leaderboard(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, .. }: RequestContext,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<CustomerLeaderboardEntry>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let entries = list_customer_leaderboard(
        &mut persistence,
        query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
        &actor,
    )?;
    Ok(Json(entries))
}

/// Handler for GET `/reports/dashboard`.
async fn handle_get_dashboard(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, .. }: RequestContext,
) -> Result<Json<DashboardResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = get_dashboard(&mut persistence, app_state.clock.as_ref(), &actor)?;
    Ok(Json(response))
}

/// Handler for GET `/audit`.
///
/// `entity_kind` and `entity_id` narrow the log to one record and must be
/// given together.
async fn handle_list_audit_events(
    AxumState(app_state): AxumState<AppState>,
    RequestContext { actor, .. }: RequestContext,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEventView>>, HttpError> {
    let entity: Option<EntityRef> = match (query.entity_kind, query.entity_id) {
        (Some(kind), Some(id)) => Some(EntityRef::new(kind, id)),
        (None, None) => None,
        _ => {
            return Err(HttpError::from(ApiError::InvalidInput {
                field: String::from("entity"),
                message: String::from("entity_kind and entity_id must be given together"),
            }));
        }
    };

    let mut persistence = app_state.persistence.lock().await;
    let events = list_audit_events(&mut persistence, entity.as_ref(), query.limit, &actor)?;
    Ok(Json(events))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/facilities",
            get(handle_list_public_facilities).post(handle_create_facility),
        )
        .route(
            "/facilities/{code}",
            get(handle_get_facility).delete(handle_delete_facility),
        )
        .route("/facilities/{code}/availability", get(handle_get_availability))
        .route("/facilities/{code}/state", post(handle_set_facility_state))
        .route("/facilities/{code}/rate", post(handle_update_hourly_rate))
        .route("/customers", post(handle_register_customer))
        .route("/customers/lookup", post(handle_find_or_create_customer))
        .route(
            "/customers/{id}",
            get(handle_get_customer).delete(handle_delete_customer),
        )
        .route(
            "/customers/{id}/reservations",
            get(handle_list_customer_reservations),
        )
        .route("/reservations", post(handle_create_reservation))
        .route(
            "/reservations/{number}/transition",
            post(handle_transition_reservation),
        )
        .route(
            "/reservations/{number}/reschedule",
            post(handle_reschedule_reservation),
        )
        .route(
            "/reservations/{number}/payment-method",
            post(handle_set_payment_method),
        )
        .route("/reports/statistics", get(handle_get_statistics))
        .route(
            "/reports/statistics/{period}",
            get(handle_get_period_statistics),
        )
        .route(
            "/reports/leaderboard/facilities",
            get(handle_facility_leaderboard),
        )
        .route(
            "/reports/leaderboard/customers",
            get(handle_customer_leaderboard),
        )
        .route("/reports/dashboard", get(handle_get_dashboard))
        .route("/audit", get(handle_list_audit_events))
        .route("/options/{kind}", get(handle_selection_options))
        .route("/capabilities", get(handle_capabilities))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Courtside Server");

    let clock: SystemClock = SystemClock::from_name(&args.timezone)?;
    info!(timezone = %clock.timezone(), "Using facility timezone");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(clock),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
