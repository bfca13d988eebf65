//! Error types for the sims-interpolate crate.

use chrono::NaiveDate;
use sims_calendar::CalendarError;
use sims_raster::RasterError;

/// Error type for all fallible operations in the sims-interpolate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterpolateError {
    /// Date handling error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Raster evaluation error.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Returned when no scene falls within the interpolation window.
    #[error("insufficient data: no scenes between {start} and {end}")]
    InsufficientData {
        /// Inclusive start of the interpolation window.
        start: NaiveDate,
        /// Exclusive end of the interpolation window.
        end: NaiveDate,
    },

    /// Returned for any interpolation method other than linear.
    #[error("unsupported interpolation method: {value:?} (only linear is supported)")]
    UnsupportedMethod {
        /// The rejected method name.
        value: String,
    },

    /// Returned when the lookback/lookahead is not a positive number of days.
    #[error("interp_days must be a positive number of days, got {interp_days}")]
    InvalidWindow {
        /// The rejected value.
        interp_days: i64,
    },

    /// Returned when a band name is not recognised.
    #[error("unknown band: {value:?}")]
    UnknownBand {
        /// The rejected band name.
        value: String,
    },

    /// Returned when target series dates are not strictly consecutive days.
    #[error("target series is not contiguous: {previous} is followed by {next}")]
    NonContiguousTarget {
        /// The last accepted date.
        previous: NaiveDate,
        /// The date that broke the sequence.
        next: NaiveDate,
    },
}
