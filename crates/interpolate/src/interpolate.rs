//! Sparse-to-daily linear interpolation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sims_calendar::day_number;
use sims_raster::Image;
use tracing::debug;

use crate::band::Band;
use crate::daily::{DailyImage, DailySeries};
use crate::error::InterpolateError;
use crate::method::{InterpMethod, InterpWindow};
use crate::scene::SceneSet;
use crate::target::TargetSeries;

/// Bands that come from the target series or are derived per day rather
/// than interpolated from scenes.
const NON_INTERPOLATED: [Band; 3] = [Band::Time, Band::EtReference, Band::Count];

/// The nearest observation on one side of a day: its value and its time.
#[derive(Debug, Clone)]
struct Anchor {
    value: Image,
    time: Image,
}

impl Anchor {
    fn empty() -> Self {
        Self {
            value: Image::masked(),
            time: Image::masked(),
        }
    }

    /// Overlays today's observations on the running anchor; the last valid
    /// observation in `group` wins, then the running anchor.
    fn overlay(&self, group: &[Anchor]) -> Self {
        if group.is_empty() {
            return self.clone();
        }
        let values: Vec<Image> = std::iter::once(&self.value)
            .chain(group.iter().map(|a| &a.value))
            .cloned()
            .collect();
        let times: Vec<Image> = std::iter::once(&self.time)
            .chain(group.iter().map(|a| &a.time))
            .cloned()
            .collect();
        Self {
            value: Image::mosaic(&values),
            time: Image::mosaic(&times),
        }
    }
}

/// Interpolates `scenes` onto the daily grid of `target`.
///
/// For each target day inside the padded window, every requested band is
/// interpolated per pixel between the nearest earlier-or-same-day and the
/// nearest later-or-same-day scene that carries a valid value for that
/// band. Days outside the observed span take the nearest observation's
/// value; a single observation yields a flat series. Neighbours are searched
/// across the whole padded window, so `interp_days` bounds the window and
/// not the distance from each day. Each entry also
/// carries the target's `et_reference`, a `time` band holding the day
/// number and, when requested, the raw `count` of valid scenes on that day.
///
/// # Errors
///
/// Returns [`InterpolateError::InsufficientData`] if no scene falls in the
/// padded window.
#[tracing::instrument(skip(scenes, target, window), fields(scenes = scenes.len(), target_days = target.len()))]
pub fn interpolate_daily(
    scenes: &SceneSet,
    target: &TargetSeries,
    window: &InterpWindow,
    bands: &[Band],
    method: InterpMethod,
) -> Result<DailySeries, InterpolateError> {
    let InterpMethod::Linear = method;

    let padded = window.padded()?;
    let scenes = scenes.filter_window(padded);
    if scenes.is_empty() {
        return Err(InterpolateError::InsufficientData {
            start: padded.start(),
            end: padded.end(),
        });
    }

    let mut interp_bands: Vec<Band> = bands
        .iter()
        .copied()
        .filter(|b| !NON_INTERPOLATED.contains(b))
        .collect();
    interp_bands.sort();
    interp_bands.dedup();
    let with_count = bands.contains(&Band::Count);

    let days = padded.days();
    let tracks: Vec<(Band, Vec<Image>)> = interp_bands
        .iter()
        .map(|&band| (band, interpolate_band(&scenes, band, &days)))
        .collect();

    let mut entries = Vec::new();
    for (i, &day) in days.iter().enumerate() {
        let Some(reference) = target.get(day) else {
            continue;
        };
        let mut entry = DailyImage::new(day)
            .with_band(Band::Time, Image::constant(day_number(day) as f64))
            .with_band(Band::EtReference, reference.clone());
        for (band, images) in &tracks {
            entry = entry.with_band(*band, images[i].clone());
        }
        if with_count {
            entry = entry.with_band(Band::Count, daily_count(&scenes, day));
        }
        entries.push(entry);
    }

    debug!(
        days = entries.len(),
        bands = ?interp_bands,
        window_start = %padded.start(),
        window_end = %padded.end(),
        "interpolated daily series"
    );
    Ok(DailySeries::new(entries))
}

/// Number of valid scenes acquired on exactly `date`, per pixel.
///
/// This is a raw tally with no interpolation; days without scenes are 0.
pub fn daily_count(scenes: &SceneSet, date: NaiveDate) -> Image {
    let validity: Vec<Image> = scenes.on_day(date).map(|s| s.validity()).collect();
    Image::sum(&validity)
}

/// Builds one interpolated image per day of `days` for `band`.
fn interpolate_band(scenes: &SceneSet, band: Band, days: &[NaiveDate]) -> Vec<Image> {
    let mut groups: BTreeMap<NaiveDate, Vec<Anchor>> = BTreeMap::new();
    for scene in scenes.iter() {
        let value = scene.valid(band);
        let time = Image::constant(day_number(scene.date()) as f64).update_mask(value.mask());
        groups
            .entry(scene.date())
            .or_default()
            .push(Anchor { value, time });
    }

    let overlay_day = |anchor: &Anchor, day: &NaiveDate| match groups.get(day) {
        Some(group) => anchor.overlay(group),
        None => anchor.clone(),
    };

    let mut before = Vec::with_capacity(days.len());
    let mut running = Anchor::empty();
    for day in days {
        running = overlay_day(&running, day);
        before.push(running.clone());
    }

    let mut after = Vec::with_capacity(days.len());
    let mut running = Anchor::empty();
    for day in days.iter().rev() {
        running = overlay_day(&running, day);
        after.push(running.clone());
    }
    after.reverse();

    days.iter()
        .zip(before.iter().zip(&after))
        .map(|(day, (prev, next))| blend(day_number(*day) as f64, prev, next))
        .collect()
}

/// Linear blend between two anchors with flat fill when one side is empty.
fn blend(day: f64, prev: &Anchor, next: &Anchor) -> Image {
    let v0 = prev.value.coalesce(&next.value);
    let v1 = next.value.coalesce(&prev.value);
    let t0 = prev.time.coalesce(&next.time);
    let t1 = next.time.coalesce(&prev.time);
    let weight = Image::constant(day)
        .subtract(&t0)
        .divide(t1.subtract(&t0).max(1.0));
    v0.add(v1.subtract(&v0).multiply(&weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use approx::assert_abs_diff_eq;
    use sims_calendar::DateRange;
    use sims_raster::Evaluator;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fraction_scene(id: &str, date: NaiveDate, value: f64) -> Scene {
        Scene::new(id, date).with_band(Band::EtFraction, Image::constant(value))
    }

    fn july_window(days: i64) -> (InterpWindow, TargetSeries) {
        let range = DateRange::parse("2017-07-01", "2017-08-01").unwrap();
        let window = InterpWindow::new(range, days).unwrap();
        let target = TargetSeries::uniform(window.padded().unwrap(), &Image::constant(2.0));
        (window, target)
    }

    fn value_on(series: &DailySeries, date: NaiveDate, band: Band) -> Option<f64> {
        let mut ev = Evaluator::new(1).unwrap();
        let entry = series.get(date).unwrap();
        ev.evaluate(entry.band(band).unwrap()).unwrap().get(0)
    }

    #[test]
    fn linear_between_bracketing_scenes() {
        let scenes = SceneSet::new(vec![
            fraction_scene("a", ymd(2017, 7, 8), 0.2),
            fraction_scene("b", ymd(2017, 7, 16), 0.6),
        ]);
        let (window, target) = july_window(32);
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();

        let v = value_on(&series, ymd(2017, 7, 10), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(v, 0.2 + 0.4 * 2.0 / 8.0, epsilon = 1e-12);
        let v = value_on(&series, ymd(2017, 7, 8), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(v, 0.2, epsilon = 1e-12);
        let v = value_on(&series, ymd(2017, 7, 16), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(v, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn flat_extrapolation_at_both_ends() {
        let scenes = SceneSet::new(vec![
            fraction_scene("a", ymd(2017, 7, 8), 0.2),
            fraction_scene("b", ymd(2017, 7, 16), 0.6),
        ]);
        let (window, target) = july_window(32);
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();

        assert_eq!(value_on(&series, ymd(2017, 6, 1), Band::EtFraction), Some(0.2));
        assert_eq!(value_on(&series, ymd(2017, 7, 7), Band::EtFraction), Some(0.2));
        assert_eq!(value_on(&series, ymd(2017, 7, 17), Band::EtFraction), Some(0.6));
        assert_eq!(value_on(&series, ymd(2017, 9, 1), Band::EtFraction), Some(0.6));
    }

    #[test]
    fn neighbours_are_not_bounded_per_day() {
        // both scenes sit at the edges of the padded window, 23 and 26 days
        // away from 07-15, well beyond interp_days
        let scenes = SceneSet::new(vec![
            fraction_scene("a", ymd(2017, 6, 22), 0.2),
            fraction_scene("b", ymd(2017, 8, 10), 0.6),
        ]);
        let (window, target) = july_window(10);
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();

        let v = value_on(&series, ymd(2017, 7, 15), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(v, 0.2 + 0.4 * 23.0 / 49.0, epsilon = 1e-12);
    }

    #[test]
    fn single_observation_is_flat() {
        let scenes = SceneSet::new(vec![fraction_scene("a", ymd(2017, 7, 20), 0.7)]);
        let (window, target) = july_window(10);
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();

        assert_eq!(series.len(), 31 + 20);
        let mut ev = Evaluator::new(1).unwrap();
        for entry in series.iter() {
            let r = ev.evaluate(entry.band(Band::EtFraction).unwrap()).unwrap();
            assert_abs_diff_eq!(r.get(0).unwrap(), 0.7, epsilon = 1e-12);
        }
    }

    #[test]
    fn no_scene_in_window() {
        let scenes = SceneSet::new(vec![fraction_scene("a", ymd(2017, 1, 1), 0.5)]);
        let (window, target) = july_window(32);
        let err =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap_err();
        assert_eq!(
            err,
            InterpolateError::InsufficientData {
                start: ymd(2017, 5, 30),
                end: ymd(2017, 9, 2),
            }
        );
    }

    #[test]
    fn bands_use_their_own_validity() {
        let scenes = SceneSet::new(vec![
            Scene::new("a", ymd(2017, 7, 8))
                .with_band(Band::EtFraction, Image::constant(0.2))
                .with_band(Band::Ndvi, Image::constant(0.3)),
            Scene::new("b", ymd(2017, 7, 12))
                .with_band(Band::EtFraction, Image::constant(0.6))
                .with_band(Band::Ndvi, Image::masked()),
            Scene::new("c", ymd(2017, 7, 16))
                .with_band(Band::EtFraction, Image::constant(0.2))
                .with_band(Band::Ndvi, Image::constant(0.7)),
        ]);
        let (window, target) = july_window(32);
        let series = interpolate_daily(
            &scenes,
            &target,
            &window,
            &[Band::EtFraction, Band::Ndvi],
            InterpMethod::Linear,
        )
        .unwrap();

        let etf = value_on(&series, ymd(2017, 7, 12), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(etf, 0.6, epsilon = 1e-12);
        // ndvi skips the masked scene on 07-12 and bridges 07-08 to 07-16
        let ndvi = value_on(&series, ymd(2017, 7, 12), Band::Ndvi).unwrap();
        assert_abs_diff_eq!(ndvi, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn scene_mask_limits_pixels() {
        let scenes = SceneSet::new(vec![
            Scene::new("a", ymd(2017, 7, 8))
                .with_band(Band::EtFraction, Image::from_pixels(vec![0.2, 0.9]))
                .with_mask(Image::from_pixels(vec![1.0, 0.0])),
            fraction_scene("b", ymd(2017, 7, 16), 0.6),
        ]);
        let (window, target) = july_window(32);
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();
        let mut ev = Evaluator::new(2).unwrap();
        let entry = series.get(ymd(2017, 7, 8)).unwrap();
        let r = ev.evaluate(entry.band(Band::EtFraction).unwrap()).unwrap();
        assert_abs_diff_eq!(r.get(0).unwrap(), 0.2, epsilon = 1e-12);
        // pixel 1 has only the 07-16 observation: flat
        assert_abs_diff_eq!(r.get(1).unwrap(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn same_day_scenes_are_all_counted() {
        let scenes = SceneSet::new(vec![
            fraction_scene("a1", ymd(2017, 7, 8), 0.2),
            fraction_scene("a2", ymd(2017, 7, 8), 0.4),
            fraction_scene("b", ymd(2017, 7, 16), 0.6),
        ]);
        let (window, target) = july_window(32);
        let series = interpolate_daily(
            &scenes,
            &target,
            &window,
            &[Band::EtFraction, Band::Count],
            InterpMethod::Linear,
        )
        .unwrap();
        assert_eq!(value_on(&series, ymd(2017, 7, 8), Band::Count), Some(2.0));
        assert_eq!(value_on(&series, ymd(2017, 7, 9), Band::Count), Some(0.0));
        assert_eq!(value_on(&series, ymd(2017, 7, 16), Band::Count), Some(1.0));
        // the later-listed scene of the day wins
        let v = value_on(&series, ymd(2017, 7, 8), Band::EtFraction).unwrap();
        assert_abs_diff_eq!(v, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn time_and_reference_always_present() {
        let scenes = SceneSet::new(vec![fraction_scene("a", ymd(2017, 7, 20), 0.7)]);
        let (window, target) = july_window(32);
        let series = interpolate_daily(&scenes, &target, &window, &[], InterpMethod::Linear).unwrap();
        let day = ymd(2017, 7, 10);
        assert_eq!(value_on(&series, day, Band::Time), Some(day_number(day) as f64));
        assert_eq!(value_on(&series, day, Band::EtReference), Some(2.0));
        assert!(series.get(day).unwrap().band(Band::EtFraction).is_none());
    }

    #[test]
    fn only_target_days_are_emitted() {
        let scenes = SceneSet::new(vec![fraction_scene("a", ymd(2017, 7, 20), 0.7)]);
        let range = DateRange::parse("2017-07-01", "2017-08-01").unwrap();
        let window = InterpWindow::new(range, 32).unwrap();
        let target = TargetSeries::uniform(range, &Image::constant(2.0));
        let series =
            interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)
                .unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(series.entries()[0].date(), ymd(2017, 7, 1));
    }
}
