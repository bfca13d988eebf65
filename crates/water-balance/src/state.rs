//! Per-pixel recurrence state.

use sims_raster::Image;

use crate::config::WaterBalanceConfig;
use crate::soil::SoilParams;

/// Smallest denominator used in the daily update.
pub(crate) const MIN_DENOMINATOR: f64 = 1e-6;

/// Depletion and skin-layer state carried from one day to the next.
#[derive(Debug, Clone)]
pub struct WaterBalanceState {
    /// Stage-2 depletion of the total evaporable zone.
    pub de: Image,
    /// Stage-1 depletion of the readily evaporable zone.
    pub de_rew: Image,
    /// Skin-layer efficiency.
    pub c_eff: Image,
}

impl WaterBalanceState {
    /// Soil at field capacity: no depletion.
    pub fn initial(soil: &SoilParams, config: &WaterBalanceConfig) -> Self {
        let de = Image::constant(0.0);
        let c_eff = skin_efficiency(&de, soil, config);
        Self {
            de,
            de_rew: Image::constant(0.0),
            c_eff,
        }
    }
}

/// `min(1, c0 + c1 * (1 - de / TEW))`.
pub(crate) fn skin_efficiency(de: &Image, soil: &SoilParams, config: &WaterBalanceConfig) -> Image {
    Image::constant(1.0)
        .subtract(de.divide(soil.tew().max(MIN_DENOMINATOR)))
        .multiply(config.c1())
        .add(config.c0())
        .min(1.0)
}
