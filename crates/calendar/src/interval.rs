//! Reporting intervals and their period boundaries.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::CalendarError;
use crate::range::DateRange;

/// Granularity of reporting periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    /// One period per calendar day.
    Daily,
    /// One period per calendar month.
    Monthly,
    /// One period per calendar year.
    Annual,
    /// A single period spanning exactly the requested range.
    Custom,
}

impl Interval {
    /// Returns the lowercase name of this interval.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
            Self::Custom => "custom",
        }
    }

    /// Returns the date format used to label periods of this interval.
    pub fn label_format(self) -> &'static str {
        match self {
            Self::Daily | Self::Custom => "%Y%m%d",
            Self::Monthly => "%Y%m",
            Self::Annual => "%Y",
        }
    }
}

impl FromStr for Interval {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            "custom" => Ok(Self::Custom),
            _ => Err(CalendarError::UnknownInterval {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widens `range` so that it fully covers whole periods of `interval`.
///
/// Monthly snaps the start to the first of its month and the end to the
/// first of the month following the last included day. Annual does the
/// same with calendar years. Daily and custom ranges are returned as is.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] at the edges of the calendar.
pub fn expand_to_interval(range: DateRange, interval: Interval) -> Result<DateRange, CalendarError> {
    let last = range
        .end()
        .pred_opt()
        .ok_or(CalendarError::Overflow { date: range.end() })?;
    match interval {
        Interval::Daily | Interval::Custom => Ok(range),
        Interval::Monthly => {
            let start = month_start(range.start());
            let end = add_months(month_start(last), 1)?;
            DateRange::new(start, end)
        }
        Interval::Annual => {
            let start = year_start(range.start());
            let end = add_months(year_start(last), 12)?;
            DateRange::new(start, end)
        }
    }
}

/// Splits an expanded range into ordered, non-overlapping periods.
///
/// Monthly and annual periods step from the range start by whole months or
/// years; the last period is truncated to the range end if the range was
/// not expanded beforehand.
///
/// # Errors
///
/// Returns [`CalendarError::Overflow`] at the edges of the calendar.
pub fn period_bounds(range: DateRange, interval: Interval) -> Result<Vec<DateRange>, CalendarError> {
    let step = match interval {
        Interval::Custom => return Ok(vec![range]),
        Interval::Daily => {
            return range.days().into_iter().map(DateRange::single_day).collect();
        }
        Interval::Monthly => 1,
        Interval::Annual => 12,
    };

    let mut periods = Vec::new();
    let mut current = range.start();
    while current < range.end() {
        let next = add_months(current, step)?;
        periods.push(DateRange::new(current, next.min(range.end()))?);
        current = next;
    }
    Ok(periods)
}

/// Returns the first day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns January 1 of the year containing `date`.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    month_start(date).with_month(1).unwrap_or(date)
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, CalendarError> {
    date.checked_add_months(Months::new(months))
        .ok_or(CalendarError::Overflow { date })
}
