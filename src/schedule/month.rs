//! Calendar month keys (`YYYY-MM`, optionally `YYYY-MM_<store>`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

/// Errors parsing a month key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthKeyError {
    #[error("Malformed month key '{0}' (expected YYYY-MM)")]
    Malformed(String),

    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),
}

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse a month key, ignoring a store discriminator after the first `_`.
    pub fn parse_key(key: &str) -> Result<Self, MonthKeyError> {
        let malformed = || MonthKeyError::Malformed(key.to_string());

        let base = key.split('_').next().unwrap_or(key).trim();
        let (year, month) = base.split_once('-').ok_or_else(malformed)?;

        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || !digits(year) || month.len() > 2 || !digits(month) {
            return Err(malformed());
        }

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days_in_month(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };

        match (first, next) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            // Outside chrono's supported range; every month has at least this many.
            _ => 28,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_key(s)
    }
}
