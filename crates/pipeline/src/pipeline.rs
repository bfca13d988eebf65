//! Scene ET fraction to period ET.

use sims_aggregate::{PeriodRecord, Provenance, aggregate};
use sims_calendar::DateRange;
use sims_interpolate::{Band, DailySeries, SceneSet, TargetSeries, interpolate_daily};
use sims_water_balance::{PrecipForcing, SoilParams, apply_evaporation, simulate};
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::request::{InterpolateRequest, RunPlan};
use crate::supply::{ReferenceSource, ReferenceSupply, SoilSupply};

/// External data sources available to a run.
///
/// Reference supply is only needed for [`ReferenceSource::NamedCollection`];
/// precipitation and soil only when the water balance is enabled.
#[derive(Clone, Copy, Default)]
pub struct Supplies<'a> {
    reference: Option<&'a dyn ReferenceSupply>,
    precip: Option<&'a dyn PrecipForcing>,
    soil: Option<&'a dyn SoilSupply>,
}

impl<'a> Supplies<'a> {
    /// Creates an empty set of supplies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference ET supply.
    pub fn with_reference(mut self, reference: &'a dyn ReferenceSupply) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets the precipitation forcing.
    pub fn with_precip(mut self, precip: &'a dyn PrecipForcing) -> Self {
        self.precip = Some(precip);
        self
    }

    /// Sets the soil supply.
    pub fn with_soil(mut self, soil: &'a dyn SoilSupply) -> Self {
        self.soil = Some(soil);
        self
    }
}

/// A reconstructed daily series and the scenes that went into it.
#[derive(Debug, Clone)]
pub struct DailyRun {
    /// Daily entries over the interval-expanded range.
    pub daily: DailySeries,
    /// Identifiers of the scenes inside the interpolation window.
    pub scene_ids: Vec<String>,
}

/// Interpolates `scenes` to daily ET and aggregates it into periods.
///
/// Every request parameter is validated before any data is read. The
/// requested range is expanded to whole periods, reference ET is resolved
/// over the expanded range, scenes inside the padded window are
/// interpolated, the water balance runs when enabled, and `et` is derived
/// as `et_fraction * et_reference` before aggregation.
///
/// # Errors
///
/// See [`PipelineError::kind`] for the error classes.
#[tracing::instrument(skip_all, fields(scenes = scenes.len(), interval = %request.interval()))]
pub fn from_scene_et_fraction(
    scenes: &SceneSet,
    request: &InterpolateRequest,
    supplies: &Supplies<'_>,
) -> Result<Vec<PeriodRecord>, PipelineError> {
    let plan = request.plan()?;
    let run = run_daily(scenes, request, &plan, supplies)?;

    let provenance = Provenance {
        collections: run.scene_ids,
        interp_method: request.method(),
        interp_days: plan.window.interp_days(),
        model: request.model().clone(),
        et_reference_source: request.reference().collection_id().map(str::to_string),
        et_reference_factor: request.et_reference_factor(),
        water_balance: request.water_balance(),
    };
    let records = aggregate(&run.daily, request.range(), &plan.aggregate, provenance)?;
    info!(periods = records.len(), "period records built");
    Ok(records)
}

/// Builds the daily series [`from_scene_et_fraction`] aggregates.
///
/// # Errors
///
/// Same as [`from_scene_et_fraction`], minus aggregation errors.
pub fn reconstruct_daily(
    scenes: &SceneSet,
    request: &InterpolateRequest,
    supplies: &Supplies<'_>,
) -> Result<DailyRun, PipelineError> {
    let plan = request.plan()?;
    run_daily(scenes, request, &plan, supplies)
}

fn run_daily(
    scenes: &SceneSet,
    request: &InterpolateRequest,
    plan: &RunPlan,
    supplies: &Supplies<'_>,
) -> Result<DailyRun, PipelineError> {
    let water_balance = if request.water_balance() {
        let precip = supplies.precip.ok_or_else(|| missing_supply("precipitation"))?;
        let soil = supplies.soil.ok_or_else(|| missing_supply("soil"))?;
        Some((precip, soil))
    } else {
        None
    };
    let target = resolve_reference(request, plan.expanded, supplies)?;

    let in_window = scenes.filter_window(plan.window.padded()?);
    debug!(
        scenes = in_window.len(),
        bands = ?plan.interp_bands,
        "scenes in interpolation window"
    );
    let daily = interpolate_daily(
        &in_window,
        &target,
        &plan.window,
        &plan.interp_bands,
        request.method(),
    )?;

    let daily = match water_balance {
        Some((precip, soil)) => {
            let config = request.water_balance_config();
            let params =
                SoilParams::from_rasters(&soil.field_capacity(), &soil.wilting_point(), config);
            let simulated = simulate(&daily, precip, &params, config)?;
            apply_evaporation(&simulated, config.ke_max())?
        }
        None => with_et(&daily),
    };

    Ok(DailyRun {
        daily,
        scene_ids: in_window.ids().into_iter().map(str::to_string).collect(),
    })
}

/// Resolves the reference series over `range` and applies the factor.
fn resolve_reference(
    request: &InterpolateRequest,
    range: DateRange,
    supplies: &Supplies<'_>,
) -> Result<TargetSeries, PipelineError> {
    let source = request.reference();
    let series = match source {
        ReferenceSource::NamedCollection(id) => {
            let supply = supplies.reference.ok_or_else(|| PipelineError::MissingForcing {
                forcing: "et_reference",
                source_id: id.clone(),
                reason: "no reference supply configured".to_string(),
            })?;
            supply
                .daily(id, range)
                .ok_or_else(|| PipelineError::MissingForcing {
                    forcing: "et_reference",
                    source_id: id.clone(),
                    reason: "unknown collection".to_string(),
                })?
                .filter(range)
        }
        ReferenceSource::InMemory(series) => series.filter(range),
    };
    if !series.covers(range) {
        return Err(PipelineError::MissingForcing {
            forcing: "et_reference",
            source_id: source.label().to_string(),
            reason: format!(
                "{} of {} days available between {} and {}",
                series.len(),
                range.len_days(),
                range.start(),
                range.end()
            ),
        });
    }

    let factor = request.et_reference_factor();
    Ok(if factor == 1.0 {
        series
    } else {
        series.scaled(factor)
    })
}

/// Adds `et = et_fraction * et_reference` to every entry carrying both.
fn with_et(daily: &DailySeries) -> DailySeries {
    daily.map(|entry| match (entry.band(Band::EtFraction), entry.band(Band::EtReference)) {
        (Some(fraction), Some(reference)) => {
            let et = fraction.multiply(reference);
            entry.clone().with_band(Band::Et, et)
        }
        _ => entry.clone(),
    })
}

fn missing_supply(forcing: &'static str) -> PipelineError {
    PipelineError::MissingForcing {
        forcing,
        source_id: "supplies".to_string(),
        reason: "water balance enabled without a source".to_string(),
    }
}
