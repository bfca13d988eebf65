//! Output type selection and granularity parsing.

use std::fmt;
use std::str::FromStr;

use sims_calendar::{CalendarError, Interval};
use sims_raster::PixelType;

use crate::error::AggregateError;

/// Storage type for flux-like outputs (`et`, `et_reference`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// 32-bit float.
    #[default]
    Float,
    /// 64-bit float.
    Double,
}

impl OutputType {
    /// Returns the raster pixel type.
    pub fn pixel_type(self) -> PixelType {
        match self {
            Self::Int8 => PixelType::Int8,
            Self::UInt8 => PixelType::UInt8,
            Self::Int16 => PixelType::Int16,
            Self::UInt16 => PixelType::UInt16,
            Self::Float => PixelType::Float,
            Self::Double => PixelType::Double,
        }
    }

    /// Returns `true` for integer types.
    pub fn is_integer(self) -> bool {
        self.pixel_type().is_integer()
    }
}

impl FromStr for OutputType {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int8" => Ok(Self::Int8),
            "uint8" => Ok(Self::UInt8),
            "int16" => Ok(Self::Int16),
            "uint16" => Ok(Self::UInt16),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            _ => Err(AggregateError::UnsupportedOutputType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pixel_type().as_str())
    }
}

/// Parses a reporting granularity.
///
/// # Errors
///
/// Returns [`AggregateError::UnsupportedGranularity`] for unknown names.
pub fn parse_interval(value: &str) -> Result<Interval, AggregateError> {
    value.parse().map_err(|e| match e {
        CalendarError::UnknownInterval { value } => AggregateError::UnsupportedGranularity { value },
        other => AggregateError::Calendar(other),
    })
}
