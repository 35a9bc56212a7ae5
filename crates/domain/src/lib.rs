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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

#[macro_use]
mod labels;

mod availability;
mod customer;
mod error;
mod facility;
mod overlap;
mod reservation;
mod statistics;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{AvailabilitySlot, DraftVisibility, compute_availability};
pub use customer::{
    Customer, CustomerSummary, CustomerTier, OCCASIONAL_TIER_MAX, classify_tier, recompute_tier,
    summarize_customer,
};
pub use error::{DomainError, ErrorFamily};
pub use facility::{
    Amenities, Facility, FacilityCode, FacilityState, FacilitySummary, SportType, SurfaceType,
    summarize_facility,
};
pub use labels::{SelectionKind, SelectionOption, selection_options};
pub use overlap::{ensure_slot_free, find_conflict, intervals_overlap};
pub use reservation::{
    BOOKABLE_END_HOUR, BOOKABLE_HOURS_PER_DAY, BOOKABLE_START_HOUR, PaymentMethod, Reservation,
    ReservationAction, ReservationChannel, ReservationNumber, ReservationState,
};
pub use statistics::{
    CustomerLeaderboardEntry, DailyCount, DateRange, FacilityLeaderboardEntry, HourCount,
    ReservationStatistics, StateCount, StatisticsPeriod, customer_leaderboard, daily_counts,
    facility_leaderboard, period_range, popular_hours, revenue_in_range, summarize_range,
};
pub use validation::{
    validate_booking_date, validate_capacity, validate_code_unique, validate_document_unique,
    validate_email, validate_hourly_rate, validate_name, validate_phone, validate_time_range,
};
