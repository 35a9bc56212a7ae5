// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The no-double-booking predicate.

use crate::error::DomainError;
use crate::facility::FacilityCode;
use crate::reservation::{Reservation, ReservationNumber};

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Adjacent intervals do not overlap.
#[must_use]
pub fn intervals_overlap(s1: f64, e1: f64, s2: f64, e2: f64) -> bool {
    s1 < e2 && s2 < e1
}

/// Finds a reservation holding any part of `[start, end)` on the given
/// facility and date.
///
/// Only reservations whose state blocks booking (draft, confirmed,
/// in progress) are considered. `exclude` skips the reservation being
/// rescheduled.
#[must_use]
pub fn find_conflict<'a>(
    facility: &FacilityCode,
    date: time::Date,
    start: f64,
    end: f64,
    existing: &'a [Reservation],
    exclude: Option<ReservationNumber>,
) -> Option<&'a Reservation> {
    existing.iter().find(|r| {
        &r.facility == facility
            && r.date == date
            && Some(r.number) != exclude
            && r.state.blocks_booking()
            && intervals_overlap(start, end, r.start_hour, r.end_hour)
    })
}

/// Validates that `[start, end)` is free on the facility and date.
///
/// # Errors
///
/// Returns `SlotConflict` naming the reservation that holds the slot.
pub fn ensure_slot_free(
    facility: &FacilityCode,
    date: time::Date,
    start: f64,
    end: f64,
    existing: &[Reservation],
    exclude: Option<ReservationNumber>,
) -> Result<(), DomainError> {
    match find_conflict(facility, date, start, end, existing, exclude) {
        Some(holder) => Err(DomainError::SlotConflict {
            facility: facility.clone(),
            date,
            conflicting: holder.number,
            conflict_start: holder.start_hour,
            conflict_end: holder.end_hour,
        }),
        None => Ok(()),
    }
}
