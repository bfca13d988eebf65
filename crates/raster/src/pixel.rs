//! Output pixel types.

use std::fmt;

/// Storage type a band is cast to before it leaves the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl PixelType {
    /// Returns `true` for the integer types.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int8 | Self::UInt8 | Self::Int16 | Self::UInt16)
    }

    /// Returns the lowercase type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Converts a single value to this type.
    ///
    /// Integer types truncate toward zero and saturate at the type bounds.
    /// `Float` rounds through `f32`. Masked (NaN) values stay masked.
    pub fn convert(self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        match self {
            Self::Int8 => saturate(value, f64::from(i8::MIN), f64::from(i8::MAX)),
            Self::UInt8 => saturate(value, f64::from(u8::MIN), f64::from(u8::MAX)),
            Self::Int16 => saturate(value, f64::from(i16::MIN), f64::from(i16::MAX)),
            Self::UInt16 => saturate(value, f64::from(u16::MIN), f64::from(u16::MAX)),
            Self::Float => f64::from(value as f32),
            Self::Double => value,
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn saturate(value: f64, low: f64, high: f64) -> f64 {
    value.trunc().clamp(low, high)
}
