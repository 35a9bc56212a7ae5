// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{DomainError, Facility, FacilityCode};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, info};

use crate::data_models::flag;
use crate::diesel_schema::{facilities, reservations};
use crate::error::PersistenceError;

/// Inserts a new facility.
///
/// # Errors
///
/// Returns `DuplicateCode` if the code is taken, or a database error.
pub fn insert_facility(
    conn: &mut SqliteConnection,
    facility: &Facility,
) -> Result<(), PersistenceError> {
    let result = diesel::insert_into(facilities::table)
        .values((
            facilities::code.eq(facility.code.value()),
            facilities::name.eq(&facility.name),
            facilities::sport.eq(facility.sport.as_str()),
            facilities::surface.eq(facility.surface.map(|s| s.as_str())),
            facilities::capacity.eq(facility.capacity),
            facilities::hourly_rate.eq(facility.hourly_rate),
            facilities::state.eq(facility.state.as_str()),
            facilities::roofed.eq(flag(facility.amenities.roofed)),
            facilities::lit.eq(flag(facility.amenities.lit)),
            facilities::changing_rooms.eq(flag(facility.amenities.changing_rooms)),
            facilities::parking.eq(flag(facility.amenities.parking)),
            facilities::description.eq(facility.description.as_deref()),
        ))
        .execute(conn);

    match result {
        Ok(_) => {
            info!(code = %facility.code, name = %facility.name, "Facility created");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(DomainError::DuplicateCode(facility.code.clone()).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Rewrites every mutable column of a facility.
///
/// # Errors
///
/// Returns `NotFound` if the facility does not exist, or a database error.
pub fn update_facility(
    conn: &mut SqliteConnection,
    facility: &Facility,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(facilities::table.find(facility.code.value()))
        .set((
            facilities::name.eq(&facility.name),
            facilities::sport.eq(facility.sport.as_str()),
            facilities::surface.eq(facility.surface.map(|s| s.as_str())),
            facilities::capacity.eq(facility.capacity),
            facilities::hourly_rate.eq(facility.hourly_rate),
            facilities::state.eq(facility.state.as_str()),
            facilities::roofed.eq(flag(facility.amenities.roofed)),
            facilities::lit.eq(flag(facility.amenities.lit)),
            facilities::changing_rooms.eq(flag(facility.amenities.changing_rooms)),
            facilities::parking.eq(flag(facility.amenities.parking)),
            facilities::description.eq(facility.description.as_deref()),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "facility {}",
            facility.code
        )));
    }

    debug!(
        code = %facility.code,
        state = %facility.state,
        hourly_rate = facility.hourly_rate,
        "Facility updated"
    );
    Ok(())
}

/// Deletes a facility.
///
/// # Errors
///
/// Returns `FacilityReferenced` if reservations still point at it, or a
/// database error.
pub fn delete_facility(
    conn: &mut SqliteConnection,
    code: &FacilityCode,
) -> Result<(), PersistenceError> {
    match diesel::delete(facilities::table.find(code.value())).execute(conn) {
        Ok(_) => {
            info!(code = %code, "Facility deleted");
            Ok(())
        }
        Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
            let count: i64 = reservations::table
                .filter(reservations::facility_code.eq(code.value()))
                .count()
                .get_result(conn)?;
            Err(DomainError::FacilityReferenced {
                facility: code.clone(),
                count: usize::try_from(count).unwrap_or(usize::MAX),
            }
            .into())
        }
        Err(e) => Err(e.into()),
    }
}
