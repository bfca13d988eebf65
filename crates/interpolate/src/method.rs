//! Interpolation method and window.

use std::fmt;
use std::str::FromStr;

use sims_calendar::{DateRange, interp_window};

use crate::error::InterpolateError;

/// Default lookback/lookahead in days.
pub const DEFAULT_INTERP_DAYS: i64 = 32;

/// Temporal interpolation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpMethod {
    /// Piecewise linear between bracketing scenes, flat beyond them.
    #[default]
    Linear,
}

impl InterpMethod {
    /// Returns the lowercase method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
        }
    }
}

impl FromStr for InterpMethod {
    type Err = InterpolateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            _ => Err(InterpolateError::UnsupportedMethod {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InterpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested date range together with its lookback/lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpWindow {
    range: DateRange,
    interp_days: u32,
}

impl InterpWindow {
    /// Creates a window around `range`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpolateError::InvalidWindow`] if `interp_days` is not
    /// positive or does not fit in a `u32`.
    pub fn new(range: DateRange, interp_days: i64) -> Result<Self, InterpolateError> {
        let days = u32::try_from(interp_days)
            .ok()
            .filter(|&d| d > 0)
            .ok_or(InterpolateError::InvalidWindow { interp_days })?;
        Ok(Self {
            range,
            interp_days: days,
        })
    }

    /// Returns the requested range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the lookback/lookahead in days.
    pub fn interp_days(&self) -> u32 {
        self.interp_days
    }

    /// Returns `[start - interp_days, end + interp_days)`.
    ///
    /// # Errors
    ///
    /// Returns a calendar error if the padded window leaves the calendar.
    pub fn padded(&self) -> Result<DateRange, InterpolateError> {
        Ok(interp_window(self.range, u64::from(self.interp_days))?)
    }
}
