//! Named per-day channels.

use std::fmt;
use std::str::FromStr;

use crate::error::InterpolateError;

/// A named channel carried by scenes, daily entries and period records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// Days since 1970-01-01 of the entry.
    Time,
    /// Ratio of actual to reference ET.
    EtFraction,
    /// Vegetation index.
    Ndvi,
    /// Reference ET.
    EtReference,
    /// Actual ET.
    Et,
    /// Number of valid scenes.
    Count,
    /// Stage-2 depletion of the total evaporable zone.
    De,
    /// Stage-1 depletion of the readily evaporable zone.
    DeRew,
    /// Skin-layer efficiency.
    CEff,
    /// Soil evaporation coefficient.
    Ke,
    /// Bare-soil evaporation.
    Ete,
    /// Precipitation on the day.
    Precip,
    /// Crop coefficient.
    Kc,
    /// Crop ET from the crop coefficient.
    Etc,
}

impl Band {
    /// Every band in canonical order.
    pub const ALL: [Band; 14] = [
        Band::Time,
        Band::EtFraction,
        Band::Ndvi,
        Band::EtReference,
        Band::Et,
        Band::Count,
        Band::De,
        Band::DeRew,
        Band::CEff,
        Band::Ke,
        Band::Ete,
        Band::Precip,
        Band::Kc,
        Band::Etc,
    ];

    /// Returns the band name used in inputs and outputs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::EtFraction => "et_fraction",
            Self::Ndvi => "ndvi",
            Self::EtReference => "et_reference",
            Self::Et => "et",
            Self::Count => "count",
            Self::De => "de",
            Self::DeRew => "de_rew",
            Self::CEff => "c_eff",
            Self::Ke => "ke",
            Self::Ete => "ete",
            Self::Precip => "pr",
            Self::Kc => "kc",
            Self::Etc => "etc",
        }
    }
}

impl FromStr for Band {
    type Err = InterpolateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|band| band.name() == s)
            .ok_or_else(|| InterpolateError::UnknownBand {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
