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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// The engine never inspects the actor; it is carried through to the
/// audit log as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role of the actor (e.g., "admin", "staff", "customer").
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The operation that produced an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`CreateReservation`", "`Cancel`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The kind of record an audit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Facility,
    Customer,
    Reservation,
}

impl EntityKind {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Facility => "facility",
            Self::Customer => "customer",
            Self::Reservation => "reservation",
        }
    }

    /// Parses the persisted string form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "facility" => Some(Self::Facility),
            "customer" => Some(Self::Customer),
            "reservation" => Some(Self::Reservation),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the record an audit event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    /// Display identity: facility code, customer id or reservation number.
    pub id: String,
}

impl EntityRef {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A single field transition. `None` means the field was absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChange {
    #[must_use]
    pub fn new(field: &str, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self {
            field: String::from(field),
            old_value,
            new_value,
        }
    }

    /// A field that came into existence with the record.
    #[must_use]
    pub fn created(field: &str, value: impl ToString) -> Self {
        Self::new(field, None, Some(value.to_string()))
    }

    /// Returns a change only if the rendered values differ.
    #[must_use]
    pub fn diff<T: ToString + PartialEq>(field: &str, old: &T, new: &T) -> Option<Self> {
        (old != new).then(|| Self::new(field, Some(old.to_string()), Some(new.to_string())))
    }
}

/// An immutable audit event representing one mutation of one record.
///
/// Every successful mutating command produces at least one event. Events
/// are appended and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub entity: EntityRef,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    /// Field-level transitions. Empty for deletions.
    pub changes: Vec<FieldChange>,
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    #[must_use]
    pub const fn new(
        entity: EntityRef,
        actor: Actor,
        cause: Cause,
        action: Action,
        changes: Vec<FieldChange>,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            entity,
            actor,
            cause,
            action,
            changes,
            occurred_at,
        }
    }

    /// Returns the change recorded for `field`, if any.
    #[must_use]
    pub fn change_for(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }
}
