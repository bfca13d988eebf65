//! Folding bare-soil evaporation back into ET.

use sims_interpolate::{Band, DailySeries};

use crate::error::WaterBalanceError;

/// Adds the soil evaporation coefficient to the ET fraction and recomputes
/// ET.
///
/// The adjusted fraction is `clamp(et_fraction + ke, 0, ke_max)`, but never
/// below the original fraction, so the adjusted ET is never lower than
/// `et_fraction * et_reference`. Every entry must carry `et_fraction`, `ke`
/// and `et_reference`.
///
/// # Errors
///
/// Returns [`WaterBalanceError::MissingBand`] for an incomplete entry.
pub fn apply_evaporation(daily: &DailySeries, ke_max: f64) -> Result<DailySeries, WaterBalanceError> {
    let mut entries = Vec::with_capacity(daily.len());
    for entry in daily.iter() {
        let get = |band: Band| {
            entry
                .band(band)
                .cloned()
                .ok_or(WaterBalanceError::MissingBand {
                    band,
                    date: entry.date(),
                })
        };
        let etf = get(Band::EtFraction)?;
        let ke = get(Band::Ke)?;
        let eto = get(Band::EtReference)?;

        let adjusted = etf.add(&ke).clamp(0.0, ke_max).max(&etf);
        let et = adjusted.multiply(&eto);
        entries.push(
            entry
                .clone()
                .with_band(Band::EtFraction, adjusted)
                .with_band(Band::Et, et),
        );
    }
    Ok(DailySeries::new(entries))
}
