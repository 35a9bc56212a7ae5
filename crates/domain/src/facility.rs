// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Facility (court) records and their derived aggregates.

use crate::reservation::{BOOKABLE_HOURS_PER_DAY, Reservation, ReservationState};
use serde::{Deserialize, Serialize};

labeled_enum! {
    /// The sport a facility is built for.
    pub enum SportType ("sport type") {
        Football => ("football", "Football"),
        Futsal => ("futsal", "Futsal"),
        Basketball => ("basketball", "Basketball"),
        Volleyball => ("volleyball", "Volleyball"),
        Tennis => ("tennis", "Tennis"),
        Padel => ("padel", "Padel"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    /// Playing surface of a facility.
    pub enum SurfaceType ("surface type") {
        NaturalGrass => ("natural_grass", "Natural grass"),
        SyntheticGrass => ("synthetic_grass", "Synthetic grass"),
        Concrete => ("concrete", "Concrete"),
        Parquet => ("parquet", "Parquet"),
        Clay => ("clay", "Clay"),
        Other => ("other", "Other"),
    }
}

labeled_enum! {
    /// Operational state of a facility. Only `Available` accepts bookings.
    pub enum FacilityState ("facility state") {
        Available => ("available", "Available"),
        UnderMaintenance => ("under_maintenance", "Under maintenance"),
        Inactive => ("inactive", "Inactive"),
    }
}

/// The unique, system-generated code of a facility (e.g. `FAC-0007`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacilityCode(String);

impl FacilityCode {
    /// Wraps an existing code.
    #[must_use]
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    /// Formats the code for the given sequence value.
    #[must_use]
    pub fn from_sequence(value: u64) -> Self {
        Self(format!("FAC-{value:04}"))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FacilityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boolean amenities of a facility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    pub roofed: bool,
    pub lit: bool,
    pub changing_rooms: bool,
    pub parking: bool,
}

/// A bookable sports court.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Unique code, immutable after creation.
    pub code: FacilityCode,
    pub name: String,
    pub sport: SportType,
    pub surface: Option<SurfaceType>,
    /// Number of players the facility holds.
    pub capacity: i32,
    /// Price per hour; always strictly positive.
    pub hourly_rate: f64,
    pub state: FacilityState,
    pub amenities: Amenities,
    pub description: Option<String>,
}

impl Facility {
    /// Returns true if the facility accepts new bookings.
    #[must_use]
    pub fn is_bookable(&self) -> bool {
        self.state == FacilityState::Available
    }
}

/// Aggregates derived from a facility's reservations.
///
/// Never stored; recomputed from the reservation set on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FacilitySummary {
    /// All reservations referencing the facility, in any state.
    pub reservation_count: usize,
    /// Sum of amounts over confirmed and completed reservations.
    pub revenue_total: f64,
    /// Whether the facility is open and not fully booked today.
    pub available_today: bool,
}

/// Computes the derived aggregates of a facility.
///
/// `reservations` may contain reservations for other facilities; they are
/// ignored.
#[must_use]
pub fn summarize_facility(
    facility: &Facility,
    reservations: &[Reservation],
    today: time::Date,
) -> FacilitySummary {
    let own = reservations
        .iter()
        .filter(|r| r.facility == facility.code)
        .collect::<Vec<_>>();

    let revenue_total: f64 = own
        .iter()
        .filter(|r| r.state.counts_as_revenue())
        .map(|r| r.amount())
        .sum();

    let booked_today: usize = own
        .iter()
        .filter(|r| {
            r.date == today
                && matches!(
                    r.state,
                    ReservationState::Confirmed | ReservationState::InProgress
                )
        })
        .count();

    FacilitySummary {
        reservation_count: own.len(),
        revenue_total,
        available_today: facility.is_bookable() && booked_today < BOOKABLE_HOURS_PER_DAY,
    }
}
