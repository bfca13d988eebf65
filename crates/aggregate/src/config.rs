//! Configuration for period aggregation.

use sims_calendar::Interval;
use sims_interpolate::Band;

use crate::error::AggregateError;
use crate::output::OutputType;

/// Variables with a period aggregation rule.
pub const AGGREGATED_BANDS: [Band; 5] = [
    Band::Et,
    Band::EtReference,
    Band::EtFraction,
    Band::Ndvi,
    Band::Count,
];

/// Configuration for [`aggregate`](crate::aggregate).
///
/// # Example
///
/// ```
/// use sims_aggregate::{AggregateConfig, OutputType};
/// use sims_calendar::Interval;
/// use sims_interpolate::Band;
///
/// let config = AggregateConfig::new(Interval::Monthly)
///     .with_variables(vec![Band::Et, Band::EtFraction])
///     .with_output_type(OutputType::UInt16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateConfig {
    interval: Interval,
    variables: Vec<Band>,
    output_type: OutputType,
}

impl AggregateConfig {
    /// Creates a configuration for `interval`.
    ///
    /// Defaults: variables `et`, `et_reference`, `et_fraction`; output
    /// type `float`.
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            variables: vec![Band::Et, Band::EtReference, Band::EtFraction],
            output_type: OutputType::Float,
        }
    }

    /// Sets the output variables.
    pub fn with_variables(mut self, variables: Vec<Band>) -> Self {
        self.variables = variables;
        self
    }

    /// Sets the output type for flux-like variables.
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Returns the reporting interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the output variables.
    pub fn variables(&self) -> &[Band] {
        &self.variables
    }

    /// Returns `true` if `band` was requested.
    pub fn wants(&self, band: Band) -> bool {
        self.variables.contains(&band)
    }

    /// Returns the output type.
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), AggregateError> {
        if self.variables.is_empty() {
            return Err(AggregateError::NoVariables);
        }
        if let Some(&band) = self
            .variables
            .iter()
            .find(|b| !AGGREGATED_BANDS.contains(b))
        {
            return Err(AggregateError::UnsupportedVariable { band });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = AggregateConfig::new(Interval::Custom);
        assert_eq!(cfg.interval(), Interval::Custom);
        assert!(cfg.wants(Band::Et));
        assert!(!cfg.wants(Band::Count));
        assert_eq!(cfg.output_type(), OutputType::Float);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_empty_variables() {
        let cfg = AggregateConfig::new(Interval::Daily).with_variables(Vec::new());
        assert_eq!(cfg.validate(), Err(AggregateError::NoVariables));
    }

    #[test]
    fn rejects_state_bands() {
        let cfg = AggregateConfig::new(Interval::Daily).with_variables(vec![Band::Et, Band::Ke]);
        assert_eq!(
            cfg.validate(),
            Err(AggregateError::UnsupportedVariable { band: Band::Ke })
        );
    }
}
