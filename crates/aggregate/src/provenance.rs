//! Provenance attached to every period record.

use sims_interpolate::InterpMethod;

/// Model name and version stamped on outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    name: String,
    version: String,
}

impl ModelInfo {
    /// Creates model information.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the model version.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Inputs and parameters that produced a set of period records.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    /// Identifiers of the scenes used.
    pub collections: Vec<String>,
    /// Interpolation method.
    pub interp_method: InterpMethod,
    /// Lookback/lookahead in days.
    pub interp_days: u32,
    /// Model name and version.
    pub model: ModelInfo,
    /// Reference ET source identifier, if it was a named collection.
    pub et_reference_source: Option<String>,
    /// Multiplier applied to the reference series.
    pub et_reference_factor: f64,
    /// Whether the soil water balance was run.
    pub water_balance: bool,
}

impl Provenance {
    /// Creates provenance with no scenes, linear interpolation over 32
    /// days, a reference factor of 1 and no water balance.
    pub fn new(model: ModelInfo) -> Self {
        Self {
            collections: Vec::new(),
            interp_method: InterpMethod::Linear,
            interp_days: 32,
            model,
            et_reference_source: None,
            et_reference_factor: 1.0,
            water_balance: false,
        }
    }
}
