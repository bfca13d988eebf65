//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use sims_aggregate::{ModelInfo, OutputType, parse_interval};
use sims_calendar::DateRange;
use sims_interpolate::{Band, InterpMethod};
use sims_pipeline::{InterpolateRequest, ReferenceSource};
use sims_water_balance::{CoefficientMode, WaterBalanceConfig};

/// Parses output variable names into bands.
pub fn parse_variables(names: &[String]) -> Result<Vec<Band>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Band>()
                .with_context(|| format!("invalid request.variables entry {name:?}"))
        })
        .collect()
}

/// Parses a crop coefficient mode name.
pub fn parse_coefficient_mode(s: &str) -> Result<CoefficientMode> {
    match s.to_lowercase().as_str() {
        "dual" => Ok(CoefficientMode::Dual),
        "bare_soil" | "bare-soil" => Ok(CoefficientMode::BareSoil),
        other => bail!("unknown coefficient mode: {other:?} (must be dual or bare_soil)"),
    }
}

/// Builds a [`WaterBalanceConfig`] from the TOML water balance section.
pub fn build_water_balance_config(wb: &WaterBalanceToml) -> Result<WaterBalanceConfig> {
    let mut cfg = WaterBalanceConfig::new()
        .with_ke_max(wb.ke_max)
        .with_c0(wb.c0)
        .with_frac_day_evap(wb.frac_day_evap)
        .with_evaporable_depth(wb.evaporable_depth);
    if let Some(ref mode) = wb.coefficient_mode {
        cfg = cfg.with_coefficient_mode(parse_coefficient_mode(mode)?);
    }
    Ok(cfg)
}

/// Builds an [`InterpolateRequest`] from the configuration.
///
/// Names are parsed here; range checks are left to
/// [`InterpolateRequest::validate`].
pub fn build_request(config: &SimsConfig, reference: ReferenceSource) -> Result<InterpolateRequest> {
    let req = &config.request;
    let range = DateRange::parse(&req.start_date, &req.end_date).context("invalid request dates")?;
    let interval = parse_interval(&req.interval).context("invalid request.interval")?;
    let output_type: OutputType = req
        .output_type
        .parse()
        .context("invalid request.output_type")?;
    let method: InterpMethod = config
        .interpolate
        .method
        .parse()
        .context("invalid interpolate.method")?;

    Ok(InterpolateRequest::new(range, reference)
        .with_variables(parse_variables(&req.variables)?)
        .with_interval(interval)
        .with_output_type(output_type)
        .with_method(method)
        .with_interp_days(config.interpolate.interp_days)
        .with_water_balance(config.interpolate.water_balance)
        .with_water_balance_config(build_water_balance_config(&config.water_balance)?)
        .with_et_reference_factor(config.model.et_reference_factor)
        .with_model(ModelInfo::new(&config.model.name, env!("CARGO_PKG_VERSION"))))
}
