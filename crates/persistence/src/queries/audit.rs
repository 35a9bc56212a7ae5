// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_audit::EntityRef;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{AuditEventRow, StoredAuditEvent};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Reads the audit log in insertion order.
///
/// With `entity` set, only events about that record are returned.
/// `limit` caps the result to the most recent events.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    entity: Option<&EntityRef>,
    limit: Option<i64>,
) -> Result<Vec<StoredAuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.desc())
        .into_boxed();

    if let Some(entity) = entity {
        query = query
            .filter(audit_events::entity_kind.eq(entity.kind.as_str()))
            .filter(audit_events::entity_id.eq(entity.id.clone()));
    }
    if let Some(limit) = limit {
        query = query.limit(limit);
    }

    let mut rows: Vec<AuditEventRow> = query.load(conn)?;
    rows.reverse();

    debug!(count = rows.len(), "Loaded audit events");
    rows.into_iter().map(AuditEventRow::into_domain).collect()
}
