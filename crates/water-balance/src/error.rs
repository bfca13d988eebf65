//! Error types for the sims-water-balance crate.

use chrono::NaiveDate;
use sims_interpolate::Band;

/// Error type for all fallible operations in the sims-water-balance crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaterBalanceError {
    /// Returned when a configuration value is out of range.
    #[error("invalid {name}: {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Accepted range.
        reason: &'static str,
    },

    /// Returned when a daily entry lacks a band the recurrence reads.
    #[error("daily entry {date} is missing the {band} band")]
    MissingBand {
        /// The band that was expected.
        band: Band,
        /// Date of the incomplete entry.
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_parameter() {
        let err = WaterBalanceError::InvalidParameter {
            name: "ke_max",
            value: -1.0,
            reason: "must be finite and positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid ke_max: -1 (must be finite and positive)"
        );
    }

    #[test]
    fn error_missing_band() {
        let err = WaterBalanceError::MissingBand {
            band: Band::EtReference,
            date: NaiveDate::from_ymd_opt(2017, 7, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "daily entry 2017-07-01 is missing the et_reference band"
        );
    }

    #[test]
    fn error_is_std_error() {
        let err = WaterBalanceError::MissingBand {
            band: Band::Ke,
            date: NaiveDate::from_ymd_opt(2017, 7, 1).unwrap(),
        };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WaterBalanceError>();
    }
}
