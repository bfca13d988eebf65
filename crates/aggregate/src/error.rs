//! Error types for the sims-aggregate crate.

use chrono::NaiveDate;
use sims_calendar::CalendarError;
use sims_interpolate::Band;

/// Error type for all fallible operations in the sims-aggregate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// Date handling error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Returned for an interval name other than daily, monthly, annual or custom.
    #[error("unsupported granularity: {value:?} (must be daily, monthly, annual or custom)")]
    UnsupportedGranularity {
        /// The rejected interval name.
        value: String,
    },

    /// Returned for an output type name that is not recognised.
    #[error(
        "unsupported output type: {value:?} (must be int8, uint8, int16, uint16, float or double)"
    )]
    UnsupportedOutputType {
        /// The rejected type name.
        value: String,
    },

    /// Returned when a requested variable has no period aggregation rule.
    #[error("variable {band} cannot be aggregated")]
    UnsupportedVariable {
        /// The rejected band.
        band: Band,
    },

    /// Returned when no output variables are requested.
    #[error("no output variables requested")]
    NoVariables,

    /// Returned when a daily entry lacks a band needed by a requested variable.
    #[error("daily entry {date} is missing the {band} band")]
    MissingBand {
        /// The band that was expected.
        band: Band,
        /// Date of the incomplete entry.
        date: NaiveDate,
    },

    /// Returned when a reporting period contains no daily entries.
    #[error("no daily entries between {start} and {end}")]
    EmptyPeriod {
        /// Inclusive period start.
        start: NaiveDate,
        /// Exclusive period end.
        end: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unsupported_granularity() {
        let err = AggregateError::UnsupportedGranularity {
            value: "weekly".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported granularity: \"weekly\" (must be daily, monthly, annual or custom)"
        );
    }

    #[test]
    fn error_unsupported_output_type() {
        let err = AggregateError::UnsupportedOutputType {
            value: "int32".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported output type: \"int32\" (must be int8, uint8, int16, uint16, float or double)"
        );
    }

    #[test]
    fn error_unsupported_variable() {
        let err = AggregateError::UnsupportedVariable { band: Band::De };
        assert_eq!(err.to_string(), "variable de cannot be aggregated");
    }

    #[test]
    fn error_empty_period() {
        let err = AggregateError::EmptyPeriod {
            start: NaiveDate::from_ymd_opt(2017, 7, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2017, 8, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "no daily entries between 2017-07-01 and 2017-08-01"
        );
    }

    #[test]
    fn error_is_std_error() {
        let err = AggregateError::NoVariables;
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AggregateError>();
    }
}
