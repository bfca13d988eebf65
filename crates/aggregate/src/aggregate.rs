//! Reduction of a daily series into reporting periods.

use std::collections::BTreeMap;
use std::sync::Arc;

use sims_calendar::{DateRange, expand_to_interval, period_bounds};
use sims_interpolate::{Band, DailySeries};
use sims_raster::{Image, PixelType};
use tracing::debug;

use crate::config::AggregateConfig;
use crate::error::AggregateError;
use crate::provenance::Provenance;
use crate::record::PeriodRecord;

/// Reduces `daily` into one record per reporting period of `range`.
///
/// The range is first expanded to whole periods of the configured
/// interval, so `daily` must cover the expanded range. Per variable:
///
/// - `et` and `et_reference` are summed and cast to the output type; a
///   pixel with no valid day in the period stays masked;
/// - `et_fraction` is `sum(et) / sum(et_reference)`, always `Float`;
/// - `ndvi` is the mean, always `Float`;
/// - `count` is the number of days whose scene tally is above zero,
///   cast to `UInt8`.
///
/// With an integer output type the sums are rounded first and the
/// fraction is recomputed from the rounded sums with the denominator
/// floored at 1. Low bit-depth types therefore bias the fraction.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a period has no
/// daily entries, or an entry lacks a band a requested variable needs.
#[tracing::instrument(skip_all, fields(interval = %config.interval(), days = daily.len()))]
pub fn aggregate(
    daily: &DailySeries,
    range: DateRange,
    config: &AggregateConfig,
    provenance: Provenance,
) -> Result<Vec<PeriodRecord>, AggregateError> {
    config.validate()?;
    let expanded = expand_to_interval(range, config.interval())?;
    let periods = period_bounds(expanded, config.interval())?;
    let provenance = Arc::new(provenance);
    let inputs = required_bands(config);

    let records = periods
        .into_iter()
        .map(|period| {
            let days = daily.filter(period);
            if days.is_empty() {
                return Err(AggregateError::EmptyPeriod {
                    start: period.start(),
                    end: period.end(),
                });
            }
            for entry in days.iter() {
                if let Some(&band) = inputs.iter().find(|b| entry.band(**b).is_none()) {
                    return Err(AggregateError::MissingBand {
                        band,
                        date: entry.date(),
                    });
                }
            }
            let bands = reduce_period(&days, config);
            Ok(PeriodRecord::new(
                period,
                config.interval(),
                bands,
                Arc::clone(&provenance),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(periods = records.len(), "aggregated daily series");
    Ok(records)
}

/// Daily bands read by the requested variables.
fn required_bands(config: &AggregateConfig) -> Vec<Band> {
    let mut bands = Vec::new();
    let mut need = |band: Band| {
        if !bands.contains(&band) {
            bands.push(band);
        }
    };
    for &variable in config.variables() {
        match variable {
            Band::EtFraction => {
                need(Band::Et);
                need(Band::EtReference);
            }
            other => need(other),
        }
    }
    bands
}

fn reduce_period(days: &DailySeries, config: &AggregateConfig) -> BTreeMap<Band, Image> {
    let output = config.output_type();
    let mut bands = BTreeMap::new();

    let needs_fluxes = config.wants(Band::Et)
        || config.wants(Band::EtReference)
        || config.wants(Band::EtFraction);
    if needs_fluxes {
        let mut et = Image::valid_sum(&days.band_images(Band::Et));
        let mut et_reference = Image::valid_sum(&days.band_images(Band::EtReference));
        let fraction = if output.is_integer() {
            et = et.round();
            et_reference = et_reference.round();
            et.divide(et_reference.max(1.0))
        } else {
            et.divide(&et_reference)
        };

        if config.wants(Band::Et) {
            bands.insert(Band::Et, et.cast(output.pixel_type()));
        }
        if config.wants(Band::EtReference) {
            bands.insert(Band::EtReference, et_reference.cast(output.pixel_type()));
        }
        if config.wants(Band::EtFraction) {
            bands.insert(Band::EtFraction, fraction.cast(PixelType::Float));
        }
    }

    if config.wants(Band::Ndvi) {
        let ndvi = Image::mean(&days.band_images(Band::Ndvi));
        bands.insert(Band::Ndvi, ndvi.cast(PixelType::Float));
    }

    if config.wants(Band::Count) {
        let observed: Vec<Image> = days
            .band_images(Band::Count)
            .iter()
            .map(|tally| tally.gt(0.0))
            .collect();
        bands.insert(Band::Count, Image::sum(&observed).cast(PixelType::UInt8));
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputType;
    use crate::provenance::ModelInfo;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use sims_calendar::Interval;
    use sims_interpolate::DailyImage;
    use sims_raster::Evaluator;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn provenance() -> Provenance {
        Provenance::new(ModelInfo::new("SIMS", "0.1.0"))
    }

    /// One pixel; each day carries `(et, et_reference, ndvi, count)`.
    fn series(start: NaiveDate, days: &[(f64, f64, f64, f64)]) -> DailySeries {
        days.iter()
            .enumerate()
            .map(|(i, &(et, eto, ndvi, count))| {
                DailyImage::new(start + chrono::Days::new(i as u64))
                    .with_band(Band::Et, Image::constant(et))
                    .with_band(Band::EtReference, Image::constant(eto))
                    .with_band(Band::Ndvi, Image::constant(ndvi))
                    .with_band(Band::Count, Image::constant(count))
            })
            .collect()
    }

    #[test]
    fn fraction_is_ratio_of_sums() {
        let daily = series(
            ymd(2017, 7, 1),
            &[(1.0, 10.0, 0.5, 1.0), (1.0, 2.0, 0.7, 0.0)],
        );
        let range = DateRange::parse("2017-07-01", "2017-07-03").unwrap();
        let config = AggregateConfig::new(Interval::Custom).with_variables(vec![
            Band::Et,
            Band::EtReference,
            Band::EtFraction,
            Band::Ndvi,
            Band::Count,
        ]);
        let records = aggregate(&daily, range, &config, provenance()).unwrap();
        assert_eq!(records.len(), 1);

        let mut ev = Evaluator::new(1).unwrap();
        let values = records[0].materialize(&mut ev).unwrap();
        assert_abs_diff_eq!(values.value(Band::Et, 0).unwrap(), 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(values.value(Band::EtReference, 0).unwrap(), 12.0, epsilon = 1e-6);
        // Mean of daily fractions would be 0.3.
        assert_abs_diff_eq!(
            values.value(Band::EtFraction, 0).unwrap(),
            2.0 / 12.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(values.value(Band::Ndvi, 0).unwrap(), 0.6, epsilon = 1e-6);
        assert_eq!(values.value(Band::Count, 0), Some(1.0));
    }

    #[test]
    fn integer_output_rounds_before_fraction() {
        let daily = series(
            ymd(2017, 7, 1),
            &[(0.2, 0.3, 0.5, 1.0), (0.2, 0.0, 0.5, 1.0)],
        );
        let range = DateRange::parse("2017-07-01", "2017-07-03").unwrap();
        let config = AggregateConfig::new(Interval::Custom).with_output_type(OutputType::UInt8);
        let records = aggregate(&daily, range, &config, provenance()).unwrap();

        let mut ev = Evaluator::new(1).unwrap();
        let values = records[0].materialize(&mut ev).unwrap();
        // 0.4 rounds to 0 and 0.3 rounds to 0; the denominator is floored at 1.
        assert_eq!(values.value(Band::Et, 0), Some(0.0));
        assert_eq!(values.value(Band::EtReference, 0), Some(0.0));
        assert_eq!(values.value(Band::EtFraction, 0), Some(0.0));
    }

    #[test]
    fn integer_output_fraction_uses_rounded_sums() {
        let daily = series(ymd(2017, 7, 1), &[(2.4, 3.6, 0.5, 1.0)]);
        let range = DateRange::parse("2017-07-01", "2017-07-02").unwrap();
        let config = AggregateConfig::new(Interval::Daily).with_output_type(OutputType::Int16);
        let records = aggregate(&daily, range, &config, provenance()).unwrap();

        let mut ev = Evaluator::new(1).unwrap();
        let values = records[0].materialize(&mut ev).unwrap();
        assert_eq!(values.value(Band::Et, 0), Some(2.0));
        assert_eq!(values.value(Band::EtReference, 0), Some(4.0));
        assert_abs_diff_eq!(values.value(Band::EtFraction, 0).unwrap(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn monthly_periods_cover_expanded_range() {
        let start = ymd(2017, 6, 1);
        let days: Vec<_> = (0..61).map(|_| (1.0, 2.0, 0.5, 0.0)).collect();
        let daily = series(start, &days);
        let range = DateRange::parse("2017-06-10", "2017-07-20").unwrap();
        let config = AggregateConfig::new(Interval::Monthly);
        let records = aggregate(&daily, range, &config, provenance()).unwrap();
        let labels: Vec<String> = records.iter().map(PeriodRecord::index_label).collect();
        assert_eq!(labels, vec!["201706", "201707"]);

        let mut ev = Evaluator::new(1).unwrap();
        let july = records[1].materialize(&mut ev).unwrap();
        assert_abs_diff_eq!(july.value(Band::Et, 0).unwrap(), 31.0, epsilon = 1e-6);
    }

    #[test]
    fn missing_days_fail() {
        let daily = series(ymd(2017, 7, 1), &[(1.0, 2.0, 0.5, 1.0)]);
        let range = DateRange::parse("2017-07-01", "2017-07-03").unwrap();
        let config = AggregateConfig::new(Interval::Daily);
        assert_eq!(
            aggregate(&daily, range, &config, provenance()).unwrap_err(),
            AggregateError::EmptyPeriod {
                start: ymd(2017, 7, 2),
                end: ymd(2017, 7, 3)
            }
        );
    }

    #[test]
    fn missing_band_fails() {
        let daily: DailySeries = std::iter::once(
            DailyImage::new(ymd(2017, 7, 1)).with_band(Band::Et, Image::constant(1.0)),
        )
        .collect();
        let range = DateRange::parse("2017-07-01", "2017-07-02").unwrap();
        let config = AggregateConfig::new(Interval::Custom).with_variables(vec![Band::EtFraction]);
        assert_eq!(
            aggregate(&daily, range, &config, provenance()).unwrap_err(),
            AggregateError::MissingBand {
                band: Band::EtReference,
                date: ymd(2017, 7, 1)
            }
        );
    }

    #[test]
    fn records_share_provenance() {
        let daily = series(ymd(2017, 7, 1), &[(1.0, 2.0, 0.5, 1.0), (1.0, 2.0, 0.5, 1.0)]);
        let range = DateRange::parse("2017-07-01", "2017-07-03").unwrap();
        let config = AggregateConfig::new(Interval::Daily);
        let records = aggregate(&daily, range, &config, provenance()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].provenance().model.name(), "SIMS");
        assert_eq!(records[1].index_label(), "20170702");
        assert!(records[0].band(Band::Ndvi).is_none());
    }
}
