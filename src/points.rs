//! JSON point-series input and period output.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sims_aggregate::PeriodRecord;
use sims_calendar::parse_date;
use sims_interpolate::{Band, Scene, SceneSet, TargetSeries};
use sims_pipeline::{ReferenceCatalog, StaticSoil};
use sims_raster::{Evaluator, Image};
use sims_water_balance::DailyPrecip;

/// Single-pixel inputs for one run.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointInput {
    pub scenes: Vec<ScenePoint>,
    /// Inline reference ET, used when no collection is named.
    #[serde(default)]
    pub et_reference: Vec<DayValue>,
    /// Named reference ET collections.
    #[serde(default)]
    pub reference_collections: BTreeMap<String, Vec<DayValue>>,
    #[serde(default)]
    pub precip: Vec<DayValue>,
    #[serde(default)]
    pub soil: Option<SoilPoint>,
}

/// One scene observation; `null` values are masked.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenePoint {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub et_fraction: Option<f64>,
    #[serde(default)]
    pub ndvi: Option<f64>,
    /// `false` when the pixel is cloudy or otherwise unusable.
    #[serde(default = "default_true")]
    pub clear: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DayValue {
    pub date: String,
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilPoint {
    pub field_capacity: f64,
    pub wilting_point: f64,
}

fn default_true() -> bool {
    true
}

impl PointInput {
    /// Reads a point input JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse input: {}", path.display()))
    }

    /// Builds the scene set.
    pub fn scene_set(&self) -> Result<SceneSet> {
        let scenes = self
            .scenes
            .iter()
            .map(|s| -> Result<Scene> {
                let date = day(&s.date).with_context(|| format!("scene {}", s.id))?;
                let mut scene = Scene::new(s.id.as_str(), date)
                    .with_mask(Image::constant(if s.clear { 1.0 } else { 0.0 }));
                if let Some(v) = s.et_fraction {
                    scene = scene.with_band(Band::EtFraction, Image::constant(v));
                }
                if let Some(v) = s.ndvi {
                    scene = scene.with_band(Band::Ndvi, Image::constant(v));
                }
                Ok(scene)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SceneSet::new(scenes))
    }

    /// Builds the inline reference ET series.
    pub fn inline_reference(&self) -> Result<TargetSeries> {
        target_series(&self.et_reference).context("et_reference")
    }

    /// Builds the named reference collections.
    pub fn catalog(&self) -> Result<ReferenceCatalog> {
        let mut catalog = ReferenceCatalog::new();
        for (id, days) in &self.reference_collections {
            let series = target_series(days).with_context(|| format!("collection {id}"))?;
            catalog = catalog.with_collection(id.as_str(), series);
        }
        Ok(catalog)
    }

    /// Builds the precipitation forcing; `null` days are left out.
    pub fn daily_precip(&self) -> Result<DailyPrecip> {
        let mut precip = DailyPrecip::new();
        for d in &self.precip {
            if let Some(v) = d.value {
                precip = precip.with_day(day(&d.date).context("precip")?, Image::constant(v));
            }
        }
        Ok(precip)
    }

    /// Returns the soil properties, if given.
    pub fn static_soil(&self) -> Option<StaticSoil> {
        self.soil
            .as_ref()
            .map(|s| StaticSoil::new(s.field_capacity, s.wilting_point))
    }
}

fn day(value: &str) -> Result<NaiveDate> {
    Ok(parse_date(value)?)
}

/// Sorts `days` by date and builds a contiguous series.
fn target_series(days: &[DayValue]) -> Result<TargetSeries> {
    let mut entries = days
        .iter()
        .map(|d| -> Result<(NaiveDate, Image)> {
            Ok((day(&d.date)?, Image::constant(d.value.unwrap_or(f64::NAN))))
        })
        .collect::<Result<Vec<_>>>()?;
    entries.sort_by_key(|(date, _)| *date);
    Ok(TargetSeries::new(entries)?)
}

/// Materialized run output.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub model: String,
    pub version: String,
    pub interval: String,
    pub interp_method: String,
    pub interp_days: u32,
    pub et_reference_source: Option<String>,
    pub et_reference_factor: f64,
    pub water_balance: bool,
    pub collections: Vec<String>,
    pub periods: Vec<PeriodOutput>,
}

/// One period; masked values are `null`.
#[derive(Debug, Serialize)]
pub struct PeriodOutput {
    pub label: String,
    pub start: String,
    pub end: String,
    pub values: BTreeMap<String, Option<f64>>,
}

impl RunOutput {
    /// Materializes `records` for a single pixel.
    pub fn from_records(records: &[PeriodRecord]) -> Result<Self> {
        let Some(first) = records.first() else {
            bail!("no period records to write");
        };
        let provenance = first.provenance();

        let mut evaluator = Evaluator::new(1)?;
        let periods = records
            .iter()
            .map(|record| -> Result<PeriodOutput> {
                let values = record.materialize(&mut evaluator)?;
                Ok(PeriodOutput {
                    label: values.label().to_string(),
                    start: values.range().start().to_string(),
                    end: values.range().end().to_string(),
                    values: values
                        .iter()
                        .map(|(band, raster)| (band.to_string(), raster.get(0)))
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            model: provenance.model.name().to_string(),
            version: provenance.model.version().to_string(),
            interval: first.interval().to_string(),
            interp_method: provenance.interp_method.to_string(),
            interp_days: provenance.interp_days,
            et_reference_source: provenance.et_reference_source.clone(),
            et_reference_factor: provenance.et_reference_factor,
            water_balance: provenance.water_balance,
            collections: provenance.collections.clone(),
            periods,
        })
    }

    /// Writes this output as JSON.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<()> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        std::fs::write(path, text)
            .with_context(|| format!("failed to write output: {}", path.display()))
    }
}
