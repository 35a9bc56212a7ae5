// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capabilities granted by each role.
//!
//! The engine never checks privileges. Every handler asks for exactly
//! one capability before it builds a command, and [`capabilities_for`]
//! is also served to clients for UI gating.

use serde::Serialize;

use crate::auth::Role;

/// Something an actor may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Create facilities, change their rate, delete them.
    ManageFacilities,
    /// Put facilities into or out of maintenance.
    OperateFacilities,
    /// Register customers and view any customer.
    ManageCustomers,
    /// Delete customers.
    DeleteCustomers,
    /// Book on behalf of any customer.
    BookForAnyCustomer,
    /// Book for the customer linked to the actor.
    BookForSelf,
    /// Confirm, start, complete, reschedule and record payment.
    OperateReservations,
    /// Cancel one's own reservation.
    CancelOwnReservation,
    /// Statistics, leaderboards and the dashboard.
    ViewReports,
    /// Read the audit log.
    ViewAudit,
}

impl Capability {
    /// The least privileged role holding this capability.
    #[must_use]
    pub const fn required_role(self) -> Role {
        match self {
            Self::ManageFacilities | Self::DeleteCustomers | Self::ViewAudit => Role::Admin,
            Self::OperateFacilities
            | Self::ManageCustomers
            | Self::BookForAnyCustomer
            | Self::OperateReservations
            | Self::ViewReports => Role::Staff,
            Self::BookForSelf | Self::CancelOwnReservation => Role::Customer,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageFacilities => "manage_facilities",
            Self::OperateFacilities => "operate_facilities",
            Self::ManageCustomers => "manage_customers",
            Self::DeleteCustomers => "delete_customers",
            Self::BookForAnyCustomer => "book_for_any_customer",
            Self::BookForSelf => "book_for_self",
            Self::OperateReservations => "operate_reservations",
            Self::CancelOwnReservation => "cancel_own_reservation",
            Self::ViewReports => "view_reports",
            Self::ViewAudit => "view_audit",
        }
    }
}

const ADMIN: &[Capability] = &[
    Capability::ManageFacilities,
    Capability::OperateFacilities,
    Capability::ManageCustomers,
    Capability::DeleteCustomers,
    Capability::BookForAnyCustomer,
    Capability::OperateReservations,
    Capability::ViewReports,
    Capability::ViewAudit,
];

const STAFF: &[Capability] = &[
    Capability::OperateFacilities,
    Capability::ManageCustomers,
    Capability::BookForAnyCustomer,
    Capability::OperateReservations,
    Capability::ViewReports,
];

const CUSTOMER: &[Capability] = &[Capability::BookForSelf, Capability::CancelOwnReservation];

/// Returns every capability a role grants.
#[must_use]
pub const fn capabilities_for(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => ADMIN,
        Role::Staff => STAFF,
        Role::Customer => CUSTOMER,
    }
}

/// Returns true if `role` grants `capability`.
#[must_use]
pub fn grants(role: Role, capability: Capability) -> bool {
    capabilities_for(role).contains(&capability)
}
