//! Error types for the sims-pipeline crate.

use sims_aggregate::AggregateError;
use sims_calendar::CalendarError;
use sims_interpolate::InterpolateError;
use sims_raster::RasterError;
use sims_water_balance::WaterBalanceError;

/// Broad class of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request parameter is malformed or unsupported. Unsupported
    /// granularities, output types and methods, and invalid windows all
    /// fall here.
    InvalidParameter,
    /// No usable observations or daily entries.
    InsufficientData,
    /// Reference ET, precipitation or soil data is unavailable.
    MissingForcing,
    /// Materializing a raster failed.
    Evaluation,
}

/// Error type for all fallible operations in the sims-pipeline crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// Date handling error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Raster evaluation error.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Interpolation error.
    #[error(transparent)]
    Interpolate(#[from] InterpolateError),

    /// Water balance error.
    #[error(transparent)]
    WaterBalance(#[from] WaterBalanceError),

    /// Aggregation error.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Returned for a request parameter outside its valid domain.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Returned when a forcing dataset cannot supply the requested days.
    #[error("missing {forcing} forcing from {source_id}: {reason}")]
    MissingForcing {
        /// Which forcing was missing.
        forcing: &'static str,
        /// Identifier of the source that was asked.
        source_id: String,
        /// What was missing.
        reason: String,
    },
}

impl PipelineError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Calendar(_) | Self::InvalidParameter { .. } => ErrorKind::InvalidParameter,
            Self::Raster(_) => ErrorKind::Evaluation,
            Self::MissingForcing { .. } => ErrorKind::MissingForcing,
            Self::Interpolate(err) => match err {
                InterpolateError::InsufficientData { .. } => ErrorKind::InsufficientData,
                InterpolateError::NonContiguousTarget { .. } => ErrorKind::MissingForcing,
                InterpolateError::Raster(_) => ErrorKind::Evaluation,
                InterpolateError::Calendar(_)
                | InterpolateError::UnsupportedMethod { .. }
                | InterpolateError::InvalidWindow { .. }
                | InterpolateError::UnknownBand { .. } => ErrorKind::InvalidParameter,
            },
            Self::WaterBalance(err) => match err {
                WaterBalanceError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
                WaterBalanceError::MissingBand { .. } => ErrorKind::InsufficientData,
            },
            Self::Aggregate(err) => match err {
                AggregateError::MissingBand { .. } | AggregateError::EmptyPeriod { .. } => {
                    ErrorKind::InsufficientData
                }
                AggregateError::Calendar(_)
                | AggregateError::UnsupportedGranularity { .. }
                | AggregateError::UnsupportedOutputType { .. }
                | AggregateError::UnsupportedVariable { .. }
                | AggregateError::NoVariables => ErrorKind::InvalidParameter,
            },
        }
    }
}
