use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level SIMS configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimsConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Dates, variables and reporting interval.
    pub request: RequestToml,

    /// Interpolation settings.
    #[serde(default)]
    pub interpolate: InterpolateToml,

    /// Reference ET and model metadata.
    #[serde(default)]
    pub model: ModelToml,

    /// Soil water balance parameters.
    #[serde(default)]
    pub water_balance: WaterBalanceToml,
}

impl SimsConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            pretty: true,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestToml {
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_variables")]
    pub variables: Vec<String>,
    #[serde(default = "default_interval")]
    pub interval: String,
    #[serde(default = "default_output_type")]
    pub output_type: String,
}

fn default_variables() -> Vec<String> {
    vec![
        "et".to_string(),
        "et_reference".to_string(),
        "et_fraction".to_string(),
    ]
}
fn default_interval() -> String {
    "custom".to_string()
}
fn default_output_type() -> String {
    "float".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpolateToml {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_interp_days")]
    pub interp_days: i64,
    #[serde(default)]
    pub water_balance: bool,
}

impl Default for InterpolateToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            interp_days: default_interp_days(),
            water_balance: false,
        }
    }
}

fn default_method() -> String {
    "linear".to_string()
}
fn default_interp_days() -> i64 {
    32
}

/// Reference ET selection. Without `et_reference_source` the input's
/// inline `et_reference` series is used.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default)]
    pub et_reference_source: Option<String>,
    #[serde(default = "default_factor")]
    pub et_reference_factor: f64,
    #[serde(default = "default_model_name")]
    pub name: String,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            et_reference_source: None,
            et_reference_factor: default_factor(),
            name: default_model_name(),
        }
    }
}

fn default_factor() -> f64 {
    1.0
}
fn default_model_name() -> String {
    "SIMS".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaterBalanceToml {
    #[serde(default = "default_ke_max")]
    pub ke_max: f64,
    #[serde(default = "default_c0")]
    pub c0: f64,
    #[serde(default = "default_frac_day_evap")]
    pub frac_day_evap: f64,
    #[serde(default = "default_evaporable_depth")]
    pub evaporable_depth: f64,
    #[serde(default)]
    pub coefficient_mode: Option<String>,
}

impl Default for WaterBalanceToml {
    fn default() -> Self {
        Self {
            ke_max: default_ke_max(),
            c0: default_c0(),
            frac_day_evap: default_frac_day_evap(),
            evaporable_depth: default_evaporable_depth(),
            coefficient_mode: None,
        }
    }
}

fn default_ke_max() -> f64 {
    1.2
}
fn default_c0() -> f64 {
    0.8
}
fn default_frac_day_evap() -> f64 {
    0.5
}
fn default_evaporable_depth() -> f64 {
    0.1
}
