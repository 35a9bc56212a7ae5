// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence. Events are only ever inserted.

use courtside_audit::AuditEvent;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::format_timestamp;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Appends an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let changes_json: String = serde_json::to_string(&event.changes)?;

    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values((
            audit_events::entity_kind.eq(event.entity.kind.as_str()),
            audit_events::entity_id.eq(&event.entity.id),
            audit_events::actor_json.eq(actor_json),
            audit_events::cause_json.eq(cause_json),
            audit_events::action_json.eq(action_json),
            audit_events::changes_json.eq(changes_json),
            audit_events::occurred_at.eq(format_timestamp(event.occurred_at)?),
        ))
        .returning(audit_events::event_id)
        .get_result(conn)?;

    debug!(
        event_id,
        entity = %event.entity,
        action = %event.action.name,
        "Persisted audit event"
    );
    Ok(event_id)
}
