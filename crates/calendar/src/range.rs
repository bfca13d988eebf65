//! Half-open date ranges.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::CalendarError;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A half-open range of calendar days `[start, end)`.
///
/// The end date is always exclusive, matching the convention used for
/// every date filter in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyRange`] if `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start >= end {
            return Err(CalendarError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two ISO `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if either string fails to parse,
    /// or [`CalendarError::EmptyRange`] if the dates are not ordered.
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Creates a single-day range `[date, date + 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] at the end of the calendar.
    pub fn single_day(date: NaiveDate) -> Result<Self, CalendarError> {
        let end = date.succ_opt().ok_or(CalendarError::Overflow { date })?;
        Ok(Self { start: date, end })
    }

    /// Returns the inclusive start date.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the exclusive end date.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the number of days in the range.
    pub fn len_days(&self) -> usize {
        (self.end - self.start).num_days() as usize
    }

    /// Returns `true` if `date` falls in `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Returns every day in the range in ascending order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take(self.len_days()).collect()
    }

    /// Widens the range by `before` days at the start and `after` days at
    /// the end.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Overflow`] if either bound leaves the calendar.
    pub fn widen(&self, before: u64, after: u64) -> Result<Self, CalendarError> {
        let start = self
            .start
            .checked_sub_days(Days::new(before))
            .ok_or(CalendarError::Overflow { date: self.start })?;
        let end = self
            .end
            .checked_add_days(Days::new(after))
            .ok_or(CalendarError::Overflow { date: self.end })?;
        Ok(Self { start, end })
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate {
        value: value.to_string(),
    })
}

/// Returns the interpolation window `[start - interp_days, end + interp_days)`.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] if the window leaves the calendar.
pub fn interp_window(range: DateRange, interp_days: u64) -> Result<DateRange, CalendarError> {
    range.widen(interp_days, interp_days)
}

/// Returns the number of days since 1970-01-01.
///
/// This is the numeric time axis used for interpolation weights.
pub fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
}
