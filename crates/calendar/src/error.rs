//! Error types for the sims-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the sims-calendar crate.
///
/// Covers date parsing, malformed ranges, unknown interval names and date
/// arithmetic that leaves the representable calendar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a date string is not a valid ISO `YYYY-MM-DD` date.
    #[error("invalid date: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The string that failed to parse.
        value: String,
    },

    /// Returned when a range does not satisfy `start < end`.
    #[error("empty date range: start {start} must be before end {end}")]
    EmptyRange {
        /// Inclusive start of the rejected range.
        start: NaiveDate,
        /// Exclusive end of the rejected range.
        end: NaiveDate,
    },

    /// Returned when an interval name is not one of the supported values.
    #[error("unsupported interval: {value:?} (must be daily, monthly, annual or custom)")]
    UnknownInterval {
        /// The unrecognised interval name.
        value: String,
    },

    /// Returned when date arithmetic leaves the supported calendar.
    #[error("date arithmetic overflowed at {date}")]
    Overflow {
        /// The date the failing operation started from.
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn error_invalid_date() {
        let err = CalendarError::InvalidDate {
            value: "1/1/2000".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date: \"1/1/2000\" (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn error_empty_range() {
        let err = CalendarError::EmptyRange {
            start: ymd(2017, 8, 1),
            end: ymd(2017, 7, 1),
        };
        assert_eq!(
            err.to_string(),
            "empty date range: start 2017-08-01 must be before end 2017-07-01"
        );
    }

    #[test]
    fn error_unknown_interval() {
        let err = CalendarError::UnknownInterval {
            value: "weekly".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported interval: \"weekly\" (must be daily, monthly, annual or custom)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
