// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{Facility, FacilityCode, FacilityState};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::FacilityRow;
use crate::diesel_schema::facilities;
use crate::error::PersistenceError;

/// Lists every facility, ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_facilities(conn: &mut SqliteConnection) -> Result<Vec<Facility>, PersistenceError> {
    let rows: Vec<FacilityRow> = facilities::table
        .order(facilities::code.asc())
        .select(FacilityRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded facilities");
    rows.into_iter().map(FacilityRow::into_domain).collect()
}

/// Lists facilities in the given operational state, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be rebuilt.
pub fn list_facilities_in_state(
    conn: &mut SqliteConnection,
    state: FacilityState,
) -> Result<Vec<Facility>, PersistenceError> {
    let rows: Vec<FacilityRow> = facilities::table
        .filter(facilities::state.eq(state.as_str()))
        .order((facilities::name.asc(), facilities::code.asc()))
        .select(FacilityRow::as_select())
        .load(conn)?;

    rows.into_iter().map(FacilityRow::into_domain).collect()
}

/// Retrieves a facility by code.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the facility does not exist.
pub fn get_facility(
    conn: &mut SqliteConnection,
    code: &FacilityCode,
) -> Result<Option<Facility>, PersistenceError> {
    debug!(code = %code, "Looking up facility");

    facilities::table
        .find(code.value())
        .select(FacilityRow::as_select())
        .first(conn)
        .optional()?
        .map(FacilityRow::into_domain)
        .transpose()
}
