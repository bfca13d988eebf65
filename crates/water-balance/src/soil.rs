//! Static soil evaporation capacities.

use sims_raster::Image;

use crate::config::WaterBalanceConfig;

/// Total and readily evaporable water (mm), fixed for a run.
#[derive(Debug, Clone)]
pub struct SoilParams {
    tew: Image,
    rew: Image,
}

impl SoilParams {
    /// Derives capacities from volumetric field capacity and wilting point.
    ///
    /// `TEW = 1000 * (fc - 0.5 * wp) * z_e` and
    /// `REW = 0.8 + 54.4 * (fc - wp)`, both floored at zero, with `REW`
    /// capped at `TEW`.
    pub fn from_rasters(
        field_capacity: &Image,
        wilting_point: &Image,
        config: &WaterBalanceConfig,
    ) -> Self {
        let tew = field_capacity
            .subtract(wilting_point.multiply(0.5))
            .multiply(1000.0 * config.evaporable_depth());
        let rew = field_capacity.subtract(wilting_point).multiply(54.4).add(0.8);
        Self::new(tew, rew)
    }

    /// Creates parameters from explicit capacities.
    pub fn new(tew: Image, rew: Image) -> Self {
        let tew = tew.max(0.0);
        let rew = rew.max(0.0).min(&tew);
        Self { tew, rew }
    }

    /// Total evaporable water.
    pub fn tew(&self) -> &Image {
        &self.tew
    }

    /// Readily evaporable water.
    pub fn rew(&self) -> &Image {
        &self.rew
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use sims_raster::Evaluator;

    #[test]
    fn loam_capacities() {
        let soil = SoilParams::from_rasters(
            &Image::constant(0.3),
            &Image::constant(0.1),
            &WaterBalanceConfig::new(),
        );
        let mut ev = Evaluator::new(1).unwrap();
        let tew = ev.evaluate(soil.tew()).unwrap().get(0).unwrap();
        let rew = ev.evaluate(soil.rew()).unwrap().get(0).unwrap();
        assert_abs_diff_eq!(tew, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rew, 0.8 + 54.4 * 0.2, epsilon = 1e-9);
    }

    #[test]
    fn rew_capped_at_tew() {
        let soil = SoilParams::new(Image::constant(5.0), Image::constant(9.0));
        let mut ev = Evaluator::new(1).unwrap();
        assert_eq!(ev.evaluate(soil.rew()).unwrap().get(0), Some(5.0));
    }

    #[test]
    fn negative_capacities_floor_at_zero() {
        let soil = SoilParams::new(Image::constant(-2.0), Image::constant(-1.0));
        let mut ev = Evaluator::new(1).unwrap();
        assert_eq!(ev.evaluate(soil.tew()).unwrap().get(0), Some(0.0));
        assert_eq!(ev.evaluate(soil.rew()).unwrap().get(0), Some(0.0));
    }
}
