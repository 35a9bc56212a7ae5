// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actors and the capability check.

use courtside_audit::Actor;
use courtside_domain::Reservation;
use tracing::warn;

use crate::capabilities::{Capability, grants};
use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles apply to whoever calls the API. A `Customer` actor is a portal
/// user linked to at most one customer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Facility administrators: pricing, facility lifecycle, audit.
    Admin,
    /// Front desk staff: bookings for anyone, day-to-day operations.
    Staff,
    /// Portal customers: their own bookings only.
    Customer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Customer => "customer",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Customer => "Customer",
        }
    }

    /// Parses a role name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "staff" => Some(Self::Staff),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// The customer record a portal actor is linked to.
    pub customer_id: Option<i64>,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self {
            id,
            role,
            customer_id: None,
        }
    }

    /// A portal actor linked to a customer record.
    #[must_use]
    pub const fn for_customer(id: String, customer_id: i64) -> Self {
        Self {
            id,
            role: Role::Customer,
            customer_id: Some(customer_id),
        }
    }

    /// Converts this actor into the audit representation.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(self.role.as_str()))
    }

    /// Returns true if this actor is the customer with `customer_id`.
    #[must_use]
    pub fn is_customer(&self, customer_id: i64) -> bool {
        self.role == Role::Customer && self.customer_id == Some(customer_id)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor's role grants a capability.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` naming the least privileged role that would
    /// have been allowed.
    pub fn require(
        actor: &AuthenticatedActor,
        capability: Capability,
        action: &str,
    ) -> Result<(), AuthError> {
        if grants(actor.role, capability) {
            return Ok(());
        }
        warn!(
            actor = %actor.id,
            role = actor.role.as_str(),
            capability = capability.as_str(),
            action,
            "Capability check failed"
        );
        Err(AuthError::Unauthorized {
            action: String::from(action),
            required_role: String::from(capability.required_role().label()),
        })
    }

    /// [`Self::require`] for operations that are public unless asked for
    /// more; an absent actor holds no capability.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when there is no actor or its role lacks the
    /// capability.
    pub fn require_present(
        actor: Option<&AuthenticatedActor>,
        capability: Capability,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor {
            Some(actor) => Self::require(actor, capability, action),
            None => {
                warn!(capability = capability.as_str(), action, "Anonymous capability check failed");
                Err(AuthError::Unauthorized {
                    action: String::from(action),
                    required_role: String::from(capability.required_role().label()),
                })
            }
        }
    }

    /// Checks that the actor may see or act for `customer_id`.
    ///
    /// Staff and admins may act for anyone; customers only for themselves.
    ///
    /// # Errors
    ///
    /// Returns `NotOwner` for a customer acting on someone else.
    pub fn require_customer_access(
        actor: &AuthenticatedActor,
        customer_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if grants(actor.role, Capability::ManageCustomers) || actor.is_customer(customer_id) {
            return Ok(());
        }
        warn!(actor = %actor.id, customer_id, action, "Customer access denied");
        Err(AuthError::NotOwner {
            action: String::from(action),
        })
    }

    /// Checks that the actor may book for `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` or `NotOwner` when the actor may not.
    pub fn authorize_booking(
        actor: &AuthenticatedActor,
        customer_id: i64,
    ) -> Result<(), AuthError> {
        if grants(actor.role, Capability::BookForAnyCustomer) {
            return Ok(());
        }
        Self::require(actor, Capability::BookForSelf, "create_reservation")?;
        if actor.is_customer(customer_id) {
            Ok(())
        } else {
            Err(AuthError::NotOwner {
                action: String::from("create_reservation"),
            })
        }
    }

    /// Checks that the actor may cancel `reservation`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` or `NotOwner` when the actor may not.
    pub fn authorize_cancel(
        actor: &AuthenticatedActor,
        reservation: &Reservation,
    ) -> Result<(), AuthError> {
        if grants(actor.role, Capability::OperateReservations) {
            return Ok(());
        }
        Self::require(actor, Capability::CancelOwnReservation, "cancel_reservation")?;
        if actor.is_customer(reservation.customer_id) {
            Ok(())
        } else {
            Err(AuthError::NotOwner {
                action: String::from("cancel_reservation"),
            })
        }
    }
}
