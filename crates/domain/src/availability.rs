// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unit-hour availability slots for the public booking view.
//!
//! Drafts block new bookings but are, by default, not shown as taken.
//! [`DraftVisibility`] makes that choice explicit.

use crate::facility::Facility;
use crate::reservation::{Reservation, ReservationState};
use serde::Serialize;

/// First slot hour.
pub const FIRST_SLOT_HOUR: u8 = 6;
/// Hour at which the last slot ends.
pub const SLOT_WINDOW_END: u8 = 23;

/// Whether draft reservations are displayed as occupying their slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftVisibility {
    /// Only confirmed and in-progress reservations mark slots occupied.
    #[default]
    Hidden,
    /// Drafts also mark slots occupied.
    Shown,
}

impl DraftVisibility {
    const fn occupies(self, state: ReservationState) -> bool {
        match state {
            ReservationState::Confirmed | ReservationState::InProgress => true,
            ReservationState::Draft => matches!(self, Self::Shown),
            ReservationState::Completed
            | ReservationState::Cancelled
            | ReservationState::NoShow => false,
        }
    }
}

/// One unit-hour slot `[hour, hour + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AvailabilitySlot {
    pub hour: u8,
    pub free: bool,
    /// The facility's hourly rate at query time.
    pub price: f64,
}

/// Partitions the bookable window of `date` into unit-hour slots.
///
/// Slot `h` is occupied when some counted reservation satisfies
/// `start <= h < end`. Reservations for other facilities or dates are
/// ignored.
#[must_use]
pub fn compute_availability(
    facility: &Facility,
    reservations: &[Reservation],
    date: time::Date,
    visibility: DraftVisibility,
) -> Vec<AvailabilitySlot> {
    let counted = reservations
        .iter()
        .filter(|r| r.facility == facility.code && r.date == date && visibility.occupies(r.state))
        .collect::<Vec<_>>();

    (FIRST_SLOT_HOUR..SLOT_WINDOW_END)
        .map(|hour| {
            let h: f64 = f64::from(hour);
            let occupied: bool = counted.iter().any(|r| r.start_hour <= h && h < r.end_hour);
            AvailabilitySlot {
                hour,
                free: !occupied,
                price: facility.hourly_rate,
            }
        })
        .collect()
}
