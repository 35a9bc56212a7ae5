// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::sequence::{SequenceError, SequenceKind, SequenceSource};
use crate::state::{Moment, Outcome, State, TransitionResult};
use courtside_audit::{Action, Actor, AuditEvent, Cause, EntityKind, EntityRef, FieldChange};
use courtside_domain::{
    Customer, CustomerTier, DomainError, Facility, FacilityCode, FacilityState, PaymentMethod,
    Reservation, ReservationAction, ReservationChannel, ReservationNumber, ReservationState,
    ensure_slot_free, recompute_tier, validate_booking_date, validate_capacity,
    validate_code_unique, validate_document_unique, validate_email, validate_hourly_rate,
    validate_name, validate_phone, validate_time_range,
};
use time::Date;

/// Collects the audit events of one command.
struct Recorder {
    actor: Actor,
    cause: Cause,
    action: &'static str,
    moment: Moment,
    events: Vec<AuditEvent>,
}

impl Recorder {
    fn record(
        &mut self,
        entity: EntityRef,
        details: Option<String>,
        changes: Vec<FieldChange>,
    ) {
        self.events.push(AuditEvent::new(
            entity,
            self.actor.clone(),
            self.cause.clone(),
            Action::new(String::from(self.action), details),
            changes,
            self.moment.occurred_at,
        ));
    }

    /// Records a tier change as a separate customer event.
    fn record_tier(&mut self, before: &Customer, after: Option<&Customer>) {
        if let Some(after) = after {
            self.events.push(AuditEvent::new(
                customer_ref(after.customer_id),
                self.actor.clone(),
                self.cause.clone(),
                Action::new(String::from("RecomputeTier"), None),
                FieldChange::diff("tier", &before.tier.as_str(), &after.tier.as_str())
                    .into_iter()
                    .collect(),
                self.moment.occurred_at,
            ));
        }
    }
}

fn facility_ref(code: &FacilityCode) -> EntityRef {
    EntityRef::new(EntityKind::Facility, code.value())
}

fn customer_ref(customer_id: i64) -> EntityRef {
    EntityRef::new(EntityKind::Customer, customer_id.to_string())
}

fn reservation_ref(number: ReservationNumber) -> EntityRef {
    EntityRef::new(EntityKind::Reservation, number.to_string())
}

/// Trims optional free text; blank becomes absent.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn find_facility<'a>(state: &'a State, code: &FacilityCode) -> Result<&'a Facility, DomainError> {
    state
        .facility(code)
        .ok_or_else(|| DomainError::FacilityNotFound(code.clone()))
}

fn find_customer(state: &State, customer_id: i64) -> Result<&Customer, DomainError> {
    state
        .customer(customer_id)
        .ok_or(DomainError::CustomerNotFound(customer_id))
}

fn find_reservation(state: &State, number: ReservationNumber) -> Result<&Reservation, DomainError> {
    state
        .reservation(number)
        .ok_or(DomainError::ReservationNotFound(number))
}

fn ensure_bookable(facility: &Facility) -> Result<(), DomainError> {
    if facility.is_bookable() {
        return Ok(());
    }
    Err(DomainError::FacilityUnavailable {
        facility: facility.code.clone(),
        state: facility.state.as_str(),
    })
}

/// Checks rules 1 through 5 of a booking slot.
fn ensure_slot_bookable(
    state: &State,
    facility: &Facility,
    date: Date,
    start_hour: f64,
    end_hour: f64,
    today: Date,
    exclude: Option<ReservationNumber>,
) -> Result<(), DomainError> {
    validate_time_range(start_hour, end_hour)?;
    validate_booking_date(date, today)?;
    ensure_bookable(facility)?;
    ensure_slot_free(
        &facility.code,
        date,
        start_hour,
        end_hour,
        &state.reservations,
        exclude,
    )
}

/// Returns the customer with its recomputed tier, if the tier changed.
fn retier(customer: &Customer, reservations: &[Reservation]) -> Option<Customer> {
    let tier: CustomerTier = recompute_tier(customer, reservations);
    (tier != customer.tier).then(|| Customer {
        tier,
        ..customer.clone()
    })
}

/// Reservations of the scope with `updated` substituted or appended.
fn with_reservation(state: &State, updated: &Reservation) -> Vec<Reservation> {
    let mut reservations: Vec<Reservation> = state
        .reservations
        .iter()
        .filter(|r| r.number != updated.number)
        .cloned()
        .collect();
    reservations.push(updated.clone());
    reservations
}

fn draw(sequence: &mut dyn SequenceSource, kind: SequenceKind) -> Result<u64, SequenceError> {
    sequence.next_value(kind)
}

fn draw_customer_id(sequence: &mut dyn SequenceSource) -> Result<i64, SequenceError> {
    let value: u64 = draw(sequence, SequenceKind::Customer)?;
    i64::try_from(value).map_err(|_| SequenceError {
        kind: SequenceKind::Customer,
        message: format!("value {value} does not fit a customer id"),
    })
}

/// Applies a command to the current state, producing a new state and audit events.
///
/// The engine is actor-agnostic: it records who acted but never decides
/// whether they may. Capability checks happen before a command is built.
///
/// # Arguments
///
/// * `state` - The loaded scope (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `moment` - The current instant and calendar date
/// * `sequence` - Source of facility codes, customer ids and reservation numbers
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or a reference
/// number cannot be drawn. Nothing is drawn from the sequence unless every
/// validation has passed.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
    moment: Moment,
    sequence: &mut dyn SequenceSource,
) -> Result<TransitionResult, CoreError> {
    let mut recorder: Recorder = Recorder {
        actor,
        cause,
        action: command.name(),
        moment,
        events: Vec::new(),
    };

    let outcome: Outcome = match command {
        Command::CreateFacility {
            name,
            sport,
            surface,
            capacity,
            hourly_rate,
            amenities,
            description,
        } => {
            validate_name(&name, "facility name")?;
            validate_hourly_rate(hourly_rate)?;
            validate_capacity(capacity)?;

            let code: FacilityCode =
                FacilityCode::from_sequence(draw(sequence, SequenceKind::Facility)?);
            validate_code_unique(&code, &state.facilities)?;

            let facility: Facility = Facility {
                code,
                name: name.trim().to_string(),
                sport,
                surface,
                capacity,
                hourly_rate,
                state: FacilityState::Available,
                amenities,
                description: normalize(description),
            };
            recorder.record(
                facility_ref(&facility.code),
                Some(format!("Created facility '{}'", facility.name)),
                vec![
                    FieldChange::created("name", &facility.name),
                    FieldChange::created("sport", facility.sport),
                    FieldChange::created("capacity", facility.capacity),
                    FieldChange::created("hourly_rate", facility.hourly_rate),
                    FieldChange::created("state", facility.state),
                ],
            );
            Outcome::FacilityCreated(facility)
        }
        Command::SetFacilityState { code, state: target } => {
            let facility: &Facility = find_facility(state, &code)?;
            let updated: Facility = Facility {
                state: target,
                ..facility.clone()
            };
            recorder.record(
                facility_ref(&code),
                None,
                FieldChange::diff("state", &facility.state, &updated.state)
                    .into_iter()
                    .collect(),
            );
            Outcome::FacilityUpdated(updated)
        }
        Command::UpdateHourlyRate { code, hourly_rate } => {
            validate_hourly_rate(hourly_rate)?;
            let facility: &Facility = find_facility(state, &code)?;
            let updated: Facility = Facility {
                hourly_rate,
                ..facility.clone()
            };
            recorder.record(
                facility_ref(&code),
                None,
                FieldChange::diff("hourly_rate", &facility.hourly_rate, &hourly_rate)
                    .into_iter()
                    .collect(),
            );
            Outcome::FacilityUpdated(updated)
        }
        Command::DeleteFacility { code } => {
            let facility: &Facility = find_facility(state, &code)?;
            let count: usize = state
                .reservations
                .iter()
                .filter(|r| r.facility == code)
                .count();
            if count > 0 {
                return Err(DomainError::FacilityReferenced {
                    facility: code,
                    count,
                }
                .into());
            }
            recorder.record(
                facility_ref(&code),
                Some(format!("Deleted facility '{}'", facility.name)),
                Vec::new(),
            );
            Outcome::FacilityDeleted(code)
        }
        Command::RegisterCustomer {
            name,
            document_number,
            phone,
            email,
            address,
            account_id,
        } => {
            validate_name(&name, "customer name")?;
            let phone: String = phone.trim().to_string();
            validate_phone(&phone)?;
            let email: Option<String> = normalize(email);
            if let Some(email) = &email {
                validate_email(email)?;
            }
            let document_number: Option<String> = normalize(document_number);
            if let Some(document) = &document_number {
                validate_document_unique(document, &state.customers, None)?;
            }

            let customer: Customer = Customer {
                customer_id: draw_customer_id(sequence)?,
                name: name.trim().to_string(),
                document_number,
                phone,
                email,
                address: normalize(address),
                account_id: normalize(account_id),
                tier: CustomerTier::New,
            };
            let mut changes: Vec<FieldChange> = vec![
                FieldChange::created("name", &customer.name),
                FieldChange::created("phone", &customer.phone),
                FieldChange::created("tier", customer.tier),
            ];
            if let Some(email) = &customer.email {
                changes.push(FieldChange::created("email", email));
            }
            recorder.record(customer_ref(customer.customer_id), None, changes);
            Outcome::CustomerRegistered(customer)
        }
        Command::DeleteCustomer { customer_id } => {
            let customer: &Customer = find_customer(state, customer_id)?;
            let count: usize = state
                .reservations
                .iter()
                .filter(|r| r.customer_id == customer_id)
                .count();
            if count > 0 {
                return Err(DomainError::CustomerReferenced { customer_id, count }.into());
            }
            recorder.record(
                customer_ref(customer_id),
                Some(format!("Deleted customer '{}'", customer.name)),
                Vec::new(),
            );
            Outcome::CustomerDeleted(customer_id)
        }
        Command::CreateReservation {
            customer_id,
            facility,
            date,
            start_hour,
            end_hour,
            channel,
            payment_method,
            notes,
        } => create_reservation(
            state,
            NewReservation {
                customer_id,
                facility,
                date,
                start_hour,
                end_hour,
                channel,
                payment_method,
                notes,
            },
            &mut recorder,
            sequence,
        )?,
        Command::RescheduleReservation {
            number,
            date,
            start_hour,
            end_hour,
        } => {
            let reservation: &Reservation = find_reservation(state, number)?;
            let moved: Reservation = reservation.rescheduled(date, start_hour, end_hour)?;
            let facility: &Facility = find_facility(state, &reservation.facility)?;
            ensure_slot_bookable(
                state,
                facility,
                date,
                start_hour,
                end_hour,
                moment.today,
                Some(number),
            )?;

            let changes: Vec<FieldChange> = [
                FieldChange::diff("date", &reservation.date, &moved.date),
                FieldChange::diff("start_hour", &reservation.start_hour, &moved.start_hour),
                FieldChange::diff("end_hour", &reservation.end_hour, &moved.end_hour),
            ]
            .into_iter()
            .flatten()
            .collect();
            recorder.record(reservation_ref(number), None, changes);
            Outcome::ReservationUpdated {
                reservation: moved,
                retiered: None,
            }
        }
        Command::TransitionReservation { number, action } => {
            transition_reservation(state, number, action, &mut recorder)?
        }
        Command::SetPaymentMethod { number, method } => {
            let reservation: &Reservation = find_reservation(state, number)?;
            let old: Option<PaymentMethod> = reservation.payment_method;
            let updated: Reservation = Reservation {
                payment_method: Some(method),
                ..reservation.clone()
            };
            let changes: Vec<FieldChange> = if old == Some(method) {
                Vec::new()
            } else {
                vec![FieldChange::new(
                    "payment_method",
                    old.map(|m| m.as_str().to_string()),
                    Some(method.as_str().to_string()),
                )]
            };
            recorder.record(reservation_ref(number), None, changes);
            Outcome::ReservationUpdated {
                reservation: updated,
                retiered: None,
            }
        }
    };

    let mut new_state: State = state.clone();
    new_state.absorb(&outcome);

    Ok(TransitionResult {
        new_state,
        outcome,
        audit_events: recorder.events,
    })
}

/// Fields of a booking request.
struct NewReservation {
    customer_id: i64,
    facility: FacilityCode,
    date: Date,
    start_hour: f64,
    end_hour: f64,
    channel: ReservationChannel,
    payment_method: Option<PaymentMethod>,
    notes: Option<String>,
}

fn create_reservation(
    state: &State,
    request: NewReservation,
    recorder: &mut Recorder,
    sequence: &mut dyn SequenceSource,
) -> Result<Outcome, CoreError> {
    let customer: &Customer = find_customer(state, request.customer_id)?;
    let facility: &Facility = find_facility(state, &request.facility)?;
    ensure_slot_bookable(
        state,
        facility,
        request.date,
        request.start_hour,
        request.end_hour,
        recorder.moment.today,
        None,
    )?;

    let number: ReservationNumber =
        ReservationNumber::new(draw(sequence, SequenceKind::Reservation)?);
    let reservation: Reservation = Reservation {
        number,
        customer_id: customer.customer_id,
        facility: facility.code.clone(),
        date: request.date,
        start_hour: request.start_hour,
        end_hour: request.end_hour,
        channel: request.channel,
        payment_method: request.payment_method,
        paid: false,
        notes: normalize(request.notes),
        registered_by: recorder.actor.id.clone(),
        created_at: recorder.moment.occurred_at,
        active: true,
        state: ReservationState::Draft,
        hourly_rate: facility.hourly_rate,
    };

    recorder.record(
        reservation_ref(number),
        Some(format!(
            "Booked {} on {} from {} to {}",
            facility.code, reservation.date, reservation.start_hour, reservation.end_hour
        )),
        vec![
            FieldChange::created("customer_id", customer.customer_id),
            FieldChange::created("facility", &facility.code),
            FieldChange::created("date", reservation.date),
            FieldChange::created("start_hour", reservation.start_hour),
            FieldChange::created("end_hour", reservation.end_hour),
            FieldChange::created("channel", reservation.channel),
            FieldChange::created("state", reservation.state),
        ],
    );

    let retiered: Option<Customer> = retier(customer, &with_reservation(state, &reservation));
    recorder.record_tier(customer, retiered.as_ref());

    Ok(Outcome::ReservationCreated {
        reservation,
        retiered,
    })
}

fn transition_reservation(
    state: &State,
    number: ReservationNumber,
    action: ReservationAction,
    recorder: &mut Recorder,
) -> Result<Outcome, CoreError> {
    let reservation: &Reservation = find_reservation(state, number)?;
    let next: Reservation = reservation.apply_action(action)?;

    let changes: Vec<FieldChange> = [
        FieldChange::diff("state", &reservation.state, &next.state),
        FieldChange::diff("paid", &reservation.paid, &next.paid),
        FieldChange::diff("active", &reservation.active, &next.active),
    ]
    .into_iter()
    .flatten()
    .collect();
    recorder.record(
        reservation_ref(number),
        Some(format!("Applied '{}'", action.label())),
        changes,
    );

    let retiered: Option<Customer> = state.customer(reservation.customer_id).and_then(|customer| {
        let retiered: Option<Customer> = retier(customer, &with_reservation(state, &next));
        recorder.record_tier(customer, retiered.as_ref());
        retiered
    });

    Ok(Outcome::ReservationUpdated {
        reservation: next,
        retiered,
    })
}
