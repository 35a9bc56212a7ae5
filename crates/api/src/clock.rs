// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The source of "now" and "today".
//!
//! Booking dates are compared against the calendar date at the facility,
//! not in UTC. A late evening booking in UTC-5 would otherwise be judged
//! against tomorrow.

use chrono::Datelike;
use chrono_tz::Tz;
use courtside::Moment;
use num_traits::ToPrimitive;
use time::{Date, Month, OffsetDateTime};

/// Supplies the current instant and the facility-local calendar date.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> OffsetDateTime;

    /// Today's date in the facility's timezone.
    fn today(&self) -> Date;

    /// Both, as the engine expects them.
    fn moment(&self) -> Moment {
        Moment {
            occurred_at: self.now(),
            today: self.today(),
        }
    }
}

/// Wall clock in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    #[must_use]
    pub const fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Builds a clock from an IANA timezone name such as `America/Lima`.
    ///
    /// # Errors
    ///
    /// Returns the parser's message if the name is unknown.
    pub fn from_name(name: &str) -> Result<Self, String> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|e| format!("unknown timezone '{name}': {e}"))
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }
}

pub(crate) fn to_time_date(date: chrono::NaiveDate) -> Option<Date> {
    let month: Month = Month::try_from(date.month().to_u8()?).ok()?;
    let day: u8 = date.day().to_u8()?;
    Date::from_calendar_date(date.year(), month, day).ok()
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }

    fn today(&self) -> Date {
        let local = chrono::Utc::now().with_timezone(&self.timezone);
        to_time_date(local.date_naive()).unwrap_or_else(|| OffsetDateTime::now_utc().date())
    }
}

/// A clock that never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: OffsetDateTime,
    today: Date,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: OffsetDateTime, today: Date) -> Self {
        Self { now, today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now
    }

    fn today(&self) -> Date {
        self.today
    }
}
