// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side rollups over the reservation set.
//!
//! Every function here is pure and recomputes from the reservations it is
//! given; nothing is cached.

use crate::customer::{Customer, summarize_customer};
use crate::error::DomainError;
use crate::facility::{Facility, FacilityCode};
use crate::reservation::{Reservation, ReservationState};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use time::{Date, Duration, Month};

labeled_enum! {
    /// Reporting periods around a reference date.
    pub enum StatisticsPeriod ("statistics period") {
        Day => ("day", "Today"),
        Week => ("week", "This week"),
        Month => ("month", "This month"),
        Year => ("year", "This year"),
    }
}

/// An inclusive range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `end` precedes `start`.
    pub const fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end.to_julian_day() < start.to_julian_day() {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range holding a single day.
    #[must_use]
    pub const fn single(day: Date) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// The `days` days ending on `end`, inclusive.
    #[must_use]
    pub fn trailing(end: Date, days: u16) -> Self {
        let span: i64 = i64::from(days.max(1)) - 1;
        let start: Date = end.checked_sub(Duration::days(span)).unwrap_or(Date::MIN);
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Resolves a reporting period around `reference`.
///
/// Weeks start on Monday. Months and years are calendar months and years.
#[must_use]
pub fn period_range(period: StatisticsPeriod, reference: Date) -> DateRange {
    let year: i32 = reference.year();
    match period {
        StatisticsPeriod::Day => DateRange::single(reference),
        StatisticsPeriod::Week => {
            let offset: i64 = i64::from(reference.weekday().number_days_from_monday());
            let start: Date = reference
                .checked_sub(Duration::days(offset))
                .unwrap_or(reference);
            let end: Date = start.checked_add(Duration::days(6)).unwrap_or(start);
            DateRange { start, end }
        }
        StatisticsPeriod::Month => {
            let month: Month = reference.month();
            let start: Date = Date::from_calendar_date(year, month, 1).unwrap_or(reference);
            let next_month_start = if month == Month::December {
                Date::from_calendar_date(year + 1, Month::January, 1)
            } else {
                Date::from_calendar_date(year, month.next(), 1)
            };
            let end: Date = next_month_start
                .ok()
                .and_then(Date::previous_day)
                .unwrap_or(reference);
            DateRange { start, end }
        }
        StatisticsPeriod::Year => {
            let start: Date =
                Date::from_calendar_date(year, Month::January, 1).unwrap_or(reference);
            let end: Date =
                Date::from_calendar_date(year, Month::December, 31).unwrap_or(reference);
            DateRange { start, end }
        }
    }
}

/// Count of reservations in one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateCount {
    pub state: ReservationState,
    pub count: usize,
}

/// Aggregate statistics for a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationStatistics {
    pub range: DateRange,
    pub total_count: usize,
    /// One entry per state, in lifecycle order, including zero counts.
    pub by_state: Vec<StateCount>,
    pub revenue: f64,
}

impl ReservationStatistics {
    /// Returns the count for one state.
    #[must_use]
    pub fn count_of(&self, state: ReservationState) -> usize {
        self.by_state
            .iter()
            .find(|c| c.state == state)
            .map_or(0, |c| c.count)
    }
}

/// Number of reservations starting in an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourCount {
    pub hour: u8,
    pub count: usize,
}

/// Number of reservations on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: Date,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityLeaderboardEntry {
    pub code: FacilityCode,
    pub name: String,
    pub reservation_count: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerLeaderboardEntry {
    pub customer_id: i64,
    pub name: String,
    pub reservation_count: usize,
    pub total_spent: f64,
}

/// Revenue over a range: amounts of confirmed and completed reservations.
#[must_use]
pub fn revenue_in_range(reservations: &[Reservation], range: &DateRange) -> f64 {
    reservations
        .iter()
        .filter(|r| range.contains(r.date) && r.state.counts_as_revenue())
        .map(Reservation::amount)
        .sum()
}

/// Counts reservations by state and sums revenue over a range.
#[must_use]
pub fn summarize_range(reservations: &[Reservation], range: DateRange) -> ReservationStatistics {
    let in_range = reservations
        .iter()
        .filter(|r| range.contains(r.date))
        .collect::<Vec<_>>();

    let by_state: Vec<StateCount> = ReservationState::ALL
        .iter()
        .map(|&state| StateCount {
            state,
            count: in_range.iter().filter(|r| r.state == state).count(),
        })
        .collect();

    ReservationStatistics {
        range,
        total_count: in_range.len(),
        by_state,
        revenue: revenue_in_range(reservations, &range),
    }
}

/// Histogram of integer start hours among non-cancelled reservations.
///
/// Sorted by count descending, ties broken by the lower hour first.
#[must_use]
pub fn popular_hours(reservations: &[Reservation], range: &DateRange, limit: usize) -> Vec<HourCount> {
    let mut histogram: HashMap<u8, usize> = HashMap::new();
    for reservation in reservations
        .iter()
        .filter(|r| range.contains(r.date) && r.state != ReservationState::Cancelled)
    {
        // Start hours are validated to 6..23, so truncation always fits
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let hour: u8 = reservation.start_hour.trunc() as u8;
        *histogram.entry(hour).or_insert(0) += 1;
    }

    let mut hours: Vec<HourCount> = histogram
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect();
    hours.sort_by(|a, b| b.count.cmp(&a.count).then(a.hour.cmp(&b.hour)));
    hours.truncate(limit);
    hours
}

/// Reservations per day for the `days` days ending on `end`.
///
/// Counts confirmed, in-progress and completed reservations.
#[must_use]
pub fn daily_counts(reservations: &[Reservation], end: Date, days: u16) -> Vec<DailyCount> {
    let range: DateRange = DateRange::trailing(end, days);
    let mut counts: Vec<DailyCount> = Vec::new();
    let mut day: Date = range.start();
    loop {
        counts.push(DailyCount {
            date: day,
            count: reservations
                .iter()
                .filter(|r| r.date == day && r.state.counts_toward_tier())
                .count(),
        });
        match day.next_day() {
            Some(next) if next <= range.end() => day = next,
            _ => break,
        }
    }
    counts
}

/// Ranks facilities by valid reservation count.
///
/// Ties are broken by revenue descending, then name ascending.
#[must_use]
pub fn facility_leaderboard(
    facilities: &[Facility],
    reservations: &[Reservation],
    limit: usize,
) -> Vec<FacilityLeaderboardEntry> {
    let mut entries: Vec<FacilityLeaderboardEntry> = facilities
        .iter()
        .map(|facility| {
            let own = reservations
                .iter()
                .filter(|r| r.facility == facility.code)
                .collect::<Vec<_>>();
            FacilityLeaderboardEntry {
                code: facility.code.clone(),
                name: facility.name.clone(),
                reservation_count: own.iter().filter(|r| r.state.counts_toward_tier()).count(),
                revenue: own
                    .iter()
                    .filter(|r| r.state.counts_as_revenue())
                    .map(|r| r.amount())
                    .sum(),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.reservation_count
            .cmp(&a.reservation_count)
            .then_with(|| b.revenue.total_cmp(&a.revenue))
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(limit);
    entries
}

/// Ranks customers by valid reservation count.
///
/// Ties are broken by total spent descending, then name ascending.
#[must_use]
pub fn customer_leaderboard(
    customers: &[Customer],
    reservations: &[Reservation],
    limit: usize,
) -> Vec<CustomerLeaderboardEntry> {
    let mut entries: Vec<CustomerLeaderboardEntry> = customers
        .iter()
        .map(|customer| {
            let summary = summarize_customer(customer.customer_id, reservations);
            CustomerLeaderboardEntry {
                customer_id: customer.customer_id,
                name: customer.name.clone(),
                reservation_count: summary.valid_reservations,
                total_spent: summary.total_spent,
            }
        })
        .collect();

    entries.sort_by(|a, b| match b.reservation_count.cmp(&a.reservation_count) {
        Ordering::Equal => b
            .total_spent
            .total_cmp(&a.total_spent)
            .then_with(|| a.name.cmp(&b.name)),
        other => other,
    });
    entries.truncate(limit);
    entries
}
