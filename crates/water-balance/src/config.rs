//! Configuration for the soil water balance.

use crate::error::WaterBalanceError;

/// How the crop coefficient is assembled from the evaporation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientMode {
    /// `kc = ke + kcb`, with the interpolated ET fraction as `kcb`.
    Dual,
    /// `kc = ke`.
    BareSoil,
}

/// Configuration for the two-stage evaporation recurrence.
///
/// # Example
///
/// ```
/// use sims_water_balance::{CoefficientMode, WaterBalanceConfig};
///
/// let config = WaterBalanceConfig::new()
///     .with_coefficient_mode(CoefficientMode::BareSoil);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaterBalanceConfig {
    ke_max: f64,
    c0: f64,
    frac_day_evap: f64,
    evaporable_depth: f64,
    coefficient_mode: Option<CoefficientMode>,
}

impl WaterBalanceConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `ke_max = 1.2`, `c0 = 0.8`, `frac_day_evap = 0.5`,
    /// `evaporable_depth = 0.1` m, no crop coefficient output.
    pub fn new() -> Self {
        Self {
            ke_max: 1.2,
            c0: 0.8,
            frac_day_evap: 0.5,
            evaporable_depth: 0.1,
            coefficient_mode: None,
        }
    }

    /// Sets the maximum soil evaporation coefficient.
    pub fn with_ke_max(mut self, ke_max: f64) -> Self {
        self.ke_max = ke_max;
        self
    }

    /// Sets the skin-layer base efficiency.
    pub fn with_c0(mut self, c0: f64) -> Self {
        self.c0 = c0;
        self
    }

    /// Sets the fraction of tomorrow's precipitation evaporating today.
    pub fn with_frac_day_evap(mut self, frac: f64) -> Self {
        self.frac_day_evap = frac;
        self
    }

    /// Sets the evaporable layer depth in metres.
    pub fn with_evaporable_depth(mut self, depth: f64) -> Self {
        self.evaporable_depth = depth;
        self
    }

    /// Also emits `kc` and `etc` using `mode`.
    pub fn with_coefficient_mode(mut self, mode: CoefficientMode) -> Self {
        self.coefficient_mode = Some(mode);
        self
    }

    // --- Accessors ---

    /// Returns the maximum soil evaporation coefficient.
    pub fn ke_max(&self) -> f64 {
        self.ke_max
    }

    /// Returns the skin-layer base efficiency.
    pub fn c0(&self) -> f64 {
        self.c0
    }

    /// Returns the skin-layer depletion slope, `2 * (1 - c0)`.
    pub fn c1(&self) -> f64 {
        2.0 * (1.0 - self.c0)
    }

    /// Returns the fraction of tomorrow's precipitation evaporating today.
    pub fn frac_day_evap(&self) -> f64 {
        self.frac_day_evap
    }

    /// Returns the evaporable layer depth in metres.
    pub fn evaporable_depth(&self) -> f64 {
        self.evaporable_depth
    }

    /// Returns the crop coefficient mode, if any.
    pub fn coefficient_mode(&self) -> Option<CoefficientMode> {
        self.coefficient_mode
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), WaterBalanceError> {
        if !self.ke_max.is_finite() || self.ke_max <= 0.0 {
            return Err(WaterBalanceError::InvalidParameter {
                name: "ke_max",
                value: self.ke_max,
                reason: "must be finite and positive",
            });
        }
        if !(0.0..=1.0).contains(&self.c0) {
            return Err(WaterBalanceError::InvalidParameter {
                name: "c0",
                value: self.c0,
                reason: "must be in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.frac_day_evap) {
            return Err(WaterBalanceError::InvalidParameter {
                name: "frac_day_evap",
                value: self.frac_day_evap,
                reason: "must be in [0, 1]",
            });
        }
        if !self.evaporable_depth.is_finite() || self.evaporable_depth <= 0.0 {
            return Err(WaterBalanceError::InvalidParameter {
                name: "evaporable_depth",
                value: self.evaporable_depth,
                reason: "must be finite and positive",
            });
        }
        Ok(())
    }
}

impl Default for WaterBalanceConfig {
    fn default() -> Self {
        Self::new()
    }
}
