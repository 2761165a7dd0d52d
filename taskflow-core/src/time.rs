//! Time utilities: clocks, the local "today", and week boundaries.
//!
//! Projections never read the wall clock. Callers resolve `today` once (usually
//! with [`today_in`]) and pass it down, which keeps every projection pure.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Source of timestamps for store mutations.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic callers.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Calendar day of `now` in the IANA zone `tz`, e.g. "America/Chicago".
pub fn today_in(tz: &str, now: DateTime<Utc>) -> Result<NaiveDate, ParseError> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| ParseError::new("timezone", tz, "an IANA zone name"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// First day of the week used by the calendar grid and weekly series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// First day of the week containing `date`.
    pub fn week_start(self, date: NaiveDate) -> NaiveDate {
        let back = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(i64::from(back))
    }

    /// Last day of the week containing `date`.
    pub fn week_end(self, date: NaiveDate) -> NaiveDate {
        self.week_start(date) + Duration::days(6)
    }

    /// The seven days of the week containing `date`, in order.
    pub fn week_of(self, date: NaiveDate) -> [NaiveDate; 7] {
        let start = self.week_start(date);
        std::array::from_fn(|i| start + Duration::days(i as i64))
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => f.write_str("sunday"),
            WeekStart::Monday => f.write_str("monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(ParseError::new("week start", s, "sunday|monday")),
        }
    }
}
