use chrono::NaiveDate;
use sims_calendar::DateRange;
use sims_interpolate::{Band, DailyImage, DailySeries};
use sims_raster::{Evaluator, Image};
use sims_water_balance::{
    CoefficientMode, DailyPrecip, SoilParams, WaterBalanceConfig, apply_evaporation, simulate,
};

const PIXELS: usize = 4;

fn season() -> DateRange {
    DateRange::parse("2017-04-01", "2017-10-01").unwrap()
}

/// Deterministic, uneven daily forcing: reference ET between 1 and 9 mm and
/// a storm every eleventh day.
fn daily_series() -> DailySeries {
    season()
        .days()
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            let eto: Vec<f64> = (0..PIXELS)
                .map(|p| 1.0 + ((i * 7 + p * 3) % 9) as f64)
                .collect();
            let etf: Vec<f64> = (0..PIXELS).map(|p| 0.1 + 0.2 * p as f64).collect();
            DailyImage::new(date)
                .with_band(Band::EtReference, Image::from_pixels(eto))
                .with_band(Band::EtFraction, Image::from_pixels(etf))
        })
        .collect()
}

fn precip() -> DailyPrecip {
    season()
        .days()
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % 11 == 0)
        .map(|(i, date)| {
            let depth: Vec<f64> = (0..PIXELS).map(|p| ((i + p) % 5) as f64 * 6.0).collect();
            (date, Image::from_pixels(depth))
        })
        .collect()
}

fn soil(config: &WaterBalanceConfig) -> SoilParams {
    SoilParams::from_rasters(
        &Image::from_pixels(vec![0.30, 0.25, 0.40, 0.12]),
        &Image::from_pixels(vec![0.10, 0.12, 0.20, 0.10]),
        config,
    )
}

#[test]
fn state_bounds_hold_every_day() {
    let config = WaterBalanceConfig::new();
    let soil = soil(&config);
    let daily = daily_series();
    let out = simulate(&daily, &precip(), &soil, &config).unwrap();
    assert_eq!(out.len(), daily.len());

    let mut ev = Evaluator::new(PIXELS).unwrap();
    let tew = ev.evaluate(soil.tew()).unwrap();
    let rew = ev.evaluate(soil.rew()).unwrap();

    for entry in out.iter() {
        let values = entry.materialize(&mut ev).unwrap();
        for p in 0..PIXELS {
            let (tew, rew) = (tew.get(p).unwrap(), rew.get(p).unwrap());
            let de = values.value(Band::De, p).unwrap();
            let de_rew = values.value(Band::DeRew, p).unwrap();
            let c_eff = values.value(Band::CEff, p).unwrap();
            let ke = values.value(Band::Ke, p).unwrap();
            let date = entry.date();
            assert!((0.0..=tew).contains(&de), "{date} pixel {p}: de {de} outside [0, {tew}]");
            assert!(
                (0.0..=rew).contains(&de_rew),
                "{date} pixel {p}: de_rew {de_rew} outside [0, {rew}]"
            );
            assert!(c_eff <= 1.0, "{date} pixel {p}: c_eff {c_eff} > 1");
            assert!((0.0..=1.2 + 1e-12).contains(&ke), "{date} pixel {p}: ke {ke}");
        }
    }
}

#[test]
fn evaporation_never_lowers_et() {
    let config = WaterBalanceConfig::new();
    let daily = daily_series();
    let augmented = simulate(&daily, &precip(), &soil(&config), &config).unwrap();
    let adjusted = apply_evaporation(&augmented, config.ke_max()).unwrap();

    let mut ev = Evaluator::new(PIXELS).unwrap();
    for (plain, wb) in daily.iter().zip(adjusted.iter()) {
        let plain_et = plain
            .band(Band::EtFraction)
            .unwrap()
            .multiply(plain.band(Band::EtReference).unwrap());
        let plain_et = ev.evaluate(&plain_et).unwrap();
        let wb_et = ev.evaluate(wb.band(Band::Et).unwrap()).unwrap();
        for p in 0..PIXELS {
            assert!(
                wb_et.get(p).unwrap() >= plain_et.get(p).unwrap() - 1e-12,
                "{}: pixel {p}",
                plain.date()
            );
        }
    }
}

#[test]
fn dual_coefficient_over_full_season() {
    let config = WaterBalanceConfig::new().with_coefficient_mode(CoefficientMode::Dual);
    let out = simulate(&daily_series(), &precip(), &soil(&config), &config).unwrap();
    let mut ev = Evaluator::new(PIXELS).unwrap();
    let last = out.entries().last().unwrap().materialize(&mut ev).unwrap();
    for p in 0..PIXELS {
        let kc = last.value(Band::Kc, p).unwrap();
        let ke = last.value(Band::Ke, p).unwrap();
        let etf = last.value(Band::EtFraction, p).unwrap();
        assert!((kc - (ke + etf)).abs() < 1e-12);
    }
    assert_eq!(last.date(), NaiveDate::from_ymd_opt(2017, 9, 30).unwrap());
}

#[test]
fn rebuilding_the_graph_is_idempotent() {
    let config = WaterBalanceConfig::new();
    let run = || {
        let out = simulate(&daily_series(), &precip(), &soil(&config), &config).unwrap();
        let mut ev = Evaluator::new(PIXELS).unwrap();
        out.materialize(&mut ev).unwrap()
    };
    assert_eq!(run(), run());
}
