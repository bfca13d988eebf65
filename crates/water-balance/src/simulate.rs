//! Day-over-day soil evaporation recurrence.

use chrono::NaiveDate;
use sims_interpolate::{Band, DailyImage, DailySeries};
use sims_raster::{Image, scan};
use tracing::{debug, warn};

use crate::config::{CoefficientMode, WaterBalanceConfig};
use crate::error::WaterBalanceError;
use crate::forcing::PrecipForcing;
use crate::soil::SoilParams;
use crate::state::{MIN_DENOMINATOR, WaterBalanceState, skin_efficiency};

/// Inputs of one simulated day, gathered before the fold starts.
struct DayInput<'a> {
    entry: &'a DailyImage,
    eto: Image,
    kcb: Option<Image>,
    precip_today: Image,
    precip_tomorrow: Image,
}

/// Runs the two-stage evaporation recurrence over `daily`.
///
/// Days are folded strictly in order from the field-capacity state. Each
/// output entry is the input entry augmented with `de`, `de_rew`, `c_eff`,
/// `ke`, `ete` and `pr`, plus `kc` and `etc` when a coefficient mode is
/// configured. The output has exactly one entry per input entry.
///
/// Missing precipitation, for a whole day or individual pixels, counts as
/// zero wetting.
///
/// # Errors
///
/// Returns [`WaterBalanceError::InvalidParameter`] for an invalid config and
/// [`WaterBalanceError::MissingBand`] if an entry lacks `et_reference`, or
/// `et_fraction` when the dual coefficient is requested.
#[tracing::instrument(skip_all, fields(days = daily.len()))]
pub fn simulate(
    daily: &DailySeries,
    precip: &dyn PrecipForcing,
    soil: &SoilParams,
    config: &WaterBalanceConfig,
) -> Result<DailySeries, WaterBalanceError> {
    config.validate()?;

    let mut missing: Vec<NaiveDate> = Vec::new();
    let mut precip_on = |date: NaiveDate| match precip.precip(date) {
        Some(image) => image.unmask(0.0),
        None => {
            missing.push(date);
            Image::constant(0.0)
        }
    };

    let mut inputs = Vec::with_capacity(daily.len());
    for entry in daily.iter() {
        let date = entry.date();
        let eto = required(entry, Band::EtReference)?;
        let kcb = match config.coefficient_mode() {
            Some(CoefficientMode::Dual) => Some(required(entry, Band::EtFraction)?),
            _ => None,
        };
        let tomorrow = date.succ_opt().unwrap_or(date);
        inputs.push(DayInput {
            entry,
            eto,
            kcb,
            precip_today: precip_on(date),
            precip_tomorrow: precip_on(tomorrow),
        });
    }

    missing.sort();
    missing.dedup();
    if !missing.is_empty() {
        warn!(
            days = missing.len(),
            first = %missing[0],
            "precipitation missing, treating as zero"
        );
    }

    let seed = WaterBalanceState::initial(soil, config);
    let entries = scan(seed, inputs, |state, day| step(state, &day, soil, config));

    debug!(days = entries.len(), "water balance graph built");
    Ok(DailySeries::new(entries))
}

fn required(entry: &DailyImage, band: Band) -> Result<Image, WaterBalanceError> {
    entry
        .band(band)
        .cloned()
        .ok_or(WaterBalanceError::MissingBand {
            band,
            date: entry.date(),
        })
}

/// One day of the recurrence.
fn step(
    prev: &WaterBalanceState,
    day: &DayInput<'_>,
    soil: &SoilParams,
    config: &WaterBalanceConfig,
) -> (WaterBalanceState, DailyImage) {
    let ke_max = config.ke_max();
    let frac = config.frac_day_evap();
    let (tew, rew) = (soil.tew(), soil.rew());

    let ft = rew
        .subtract(&prev.de_rew)
        .divide(day.eto.multiply(ke_max).max(MIN_DENOMINATOR))
        .clamp(0.0, 1.0);
    let kr = tew
        .subtract(&prev.de)
        .divide(tew.subtract(rew).max(MIN_DENOMINATOR))
        .clamp(0.0, 1.0);
    let ke = ft
        .add(Image::constant(1.0).subtract(&ft).multiply(&kr))
        .multiply(ke_max);
    let ete = ke.multiply(&day.eto);

    let wetting = day
        .precip_tomorrow
        .multiply(frac)
        .add(day.precip_today.multiply(1.0 - frac));

    let de = prev.de.subtract(&wetting).add(&ete).max(0.0).min(tew);
    let de_rew = prev
        .de_rew
        .subtract(wetting.multiply(&prev.c_eff))
        .add(&ete)
        .max(0.0)
        .min(rew);
    let c_eff = skin_efficiency(&de, soil, config);

    let mut entry = day
        .entry
        .clone()
        .with_band(Band::De, de.clone())
        .with_band(Band::DeRew, de_rew.clone())
        .with_band(Band::CEff, c_eff.clone())
        .with_band(Band::Ke, ke.clone())
        .with_band(Band::Ete, ete)
        .with_band(Band::Precip, day.precip_today.clone());

    if let Some(mode) = config.coefficient_mode() {
        let kc = match (&day.kcb, mode) {
            (Some(kcb), CoefficientMode::Dual) => ke.add(kcb),
            _ => ke,
        };
        let etc = kc.multiply(&day.eto);
        entry = entry.with_band(Band::Kc, kc).with_band(Band::Etc, etc);
    }

    (WaterBalanceState { de, de_rew, c_eff }, entry)
}
