use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use sims_aggregate::OutputType;
use sims_calendar::{DateRange, Interval};
use sims_interpolate::{Band, InterpMethod, Scene, SceneSet, TargetSeries};
use sims_pipeline::{
    ErrorKind, InterpolateRequest, PipelineError, ReferenceCatalog, ReferenceSource, StaticSoil,
    Supplies, from_scene_et_fraction, reconstruct_daily,
};
use sims_raster::{Evaluator, Image};
use sims_water_balance::DailyPrecip;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn july() -> DateRange {
    DateRange::parse("2017-07-01", "2017-08-01").unwrap()
}

fn july_scenes() -> SceneSet {
    [8, 16, 24]
        .into_iter()
        .map(|d| {
            Scene::new(format!("LC08_043033_201707{d:02}"), ymd(2017, 7, d))
                .with_band(Band::EtFraction, Image::constant(0.4))
                .with_band(Band::Ndvi, Image::constant(0.6))
        })
        .collect()
}

fn gridmet() -> ReferenceCatalog {
    let season = DateRange::parse("2017-04-01", "2017-10-01").unwrap();
    ReferenceCatalog::new().with_collection("gridmet", TargetSeries::uniform(season, &Image::constant(2.0)))
}

fn request() -> InterpolateRequest {
    InterpolateRequest::new(july(), ReferenceSource::NamedCollection("gridmet".to_string()))
        .with_interval(Interval::Monthly)
        .with_variables(vec![Band::Et, Band::EtReference, Band::EtFraction, Band::Count])
}

#[test]
fn july_2017_monthly() {
    let catalog = gridmet();
    let supplies = Supplies::new().with_reference(&catalog);
    let records = from_scene_et_fraction(&july_scenes(), &request(), &supplies).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].index_label(), "201707");

    let provenance = records[0].provenance();
    assert_eq!(provenance.collections.len(), 3);
    assert_eq!(provenance.interp_days, 32);
    assert_eq!(provenance.et_reference_source.as_deref(), Some("gridmet"));
    assert!(!provenance.water_balance);

    let mut ev = Evaluator::new(1).unwrap();
    let values = records[0].materialize(&mut ev).unwrap();
    assert_abs_diff_eq!(values.value(Band::EtReference, 0).unwrap(), 62.0, epsilon = 1e-4);
    assert_abs_diff_eq!(values.value(Band::Et, 0).unwrap(), 24.8, epsilon = 1e-4);
    assert_abs_diff_eq!(values.value(Band::EtFraction, 0).unwrap(), 0.4, epsilon = 1e-4);
    assert_eq!(values.value(Band::Count, 0), Some(3.0));
}

#[test]
fn july_10_daily_values() {
    let catalog = gridmet();
    let supplies = Supplies::new().with_reference(&catalog);
    let run = reconstruct_daily(&july_scenes(), &request(), &supplies).unwrap();
    assert_eq!(run.daily.len(), 31);

    let mut ev = Evaluator::new(1).unwrap();
    let values = run
        .daily
        .get(ymd(2017, 7, 10))
        .unwrap()
        .materialize(&mut ev)
        .unwrap();
    assert_abs_diff_eq!(values.value(Band::EtFraction, 0).unwrap(), 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(values.value(Band::EtReference, 0).unwrap(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(values.value(Band::Et, 0).unwrap(), 0.8, epsilon = 1e-9);
}

#[test]
fn zero_interp_days_fails_before_reading_data() {
    // No reference supply: validation must fail first.
    let err = from_scene_et_fraction(
        &july_scenes(),
        &request().with_interp_days(0),
        &Supplies::new(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn cubic_is_an_invalid_parameter() {
    let err: PipelineError = "cubic".parse::<InterpMethod>().unwrap_err().into();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[test]
fn empty_window_is_insufficient_data() {
    let scenes = SceneSet::new(vec![
        Scene::new("old", ymd(2016, 7, 8)).with_band(Band::EtFraction, Image::constant(0.4)),
    ]);
    let catalog = gridmet();
    let supplies = Supplies::new().with_reference(&catalog);
    let err = from_scene_et_fraction(&scenes, &request(), &supplies).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
}

#[test]
fn reference_gaps_are_missing_forcing() {
    let half = DateRange::parse("2017-07-01", "2017-07-16").unwrap();
    let catalog = ReferenceCatalog::new()
        .with_collection("gridmet", TargetSeries::uniform(half, &Image::constant(2.0)));
    let supplies = Supplies::new().with_reference(&catalog);
    let err = from_scene_et_fraction(&july_scenes(), &request(), &supplies).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingForcing {
            forcing: "et_reference",
            ..
        }
    ));

    let unknown = InterpolateRequest::new(july(), ReferenceSource::NamedCollection("cimis".into()));
    let err = from_scene_et_fraction(&july_scenes(), &unknown, &supplies).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingForcing);
}

#[test]
fn in_memory_reference_and_factor() {
    let request = InterpolateRequest::new(
        july(),
        ReferenceSource::InMemory(TargetSeries::uniform(july(), &Image::constant(4.0))),
    )
    .with_et_reference_factor(0.5);
    let records = from_scene_et_fraction(&july_scenes(), &request, &Supplies::new()).unwrap();
    assert_eq!(records[0].index_label(), "20170701");
    assert_eq!(records[0].provenance().et_reference_source, None);

    let mut ev = Evaluator::new(1).unwrap();
    let values = records[0].materialize(&mut ev).unwrap();
    assert_abs_diff_eq!(values.value(Band::EtReference, 0).unwrap(), 62.0, epsilon = 1e-4);
}

#[test]
fn repeated_runs_are_identical() {
    let catalog = gridmet();
    let supplies = Supplies::new().with_reference(&catalog);
    let scenes = SceneSet::new(vec![
        Scene::new("a", ymd(2017, 7, 3)).with_band(Band::EtFraction, Image::from_pixels(vec![0.1, 0.9])),
        Scene::new("b", ymd(2017, 7, 27)).with_band(Band::EtFraction, Image::from_pixels(vec![0.5, 0.3])),
    ]);
    let request = request().with_interval(Interval::Daily);

    let run = || {
        let records = from_scene_et_fraction(&scenes, &request, &supplies).unwrap();
        let mut ev = Evaluator::new(2).unwrap();
        records
            .iter()
            .map(|r| r.materialize(&mut ev).unwrap())
            .collect::<Vec<_>>()
    };
    let first = run();
    assert_eq!(first.len(), 31);
    assert_eq!(first, run());
}

#[test]
fn integer_output() {
    let catalog = gridmet();
    let supplies = Supplies::new().with_reference(&catalog);
    let request = request().with_output_type(OutputType::UInt16);
    let records = from_scene_et_fraction(&july_scenes(), &request, &supplies).unwrap();
    let mut ev = Evaluator::new(1).unwrap();
    let values = records[0].materialize(&mut ev).unwrap();
    assert_eq!(values.value(Band::Et, 0), Some(25.0));
    assert_eq!(values.value(Band::EtReference, 0), Some(62.0));
}

fn precip() -> DailyPrecip {
    let season = DateRange::parse("2017-04-01", "2017-10-01").unwrap();
    season
        .days()
        .into_iter()
        .map(|d| {
            let mm = if d == ymd(2017, 7, 5) || d == ymd(2017, 7, 20) { 15.0 } else { 0.0 };
            (d, Image::constant(mm))
        })
        .collect()
}

#[test]
fn water_balance_never_lowers_et() {
    let catalog = gridmet();
    let rain = precip();
    let soil = StaticSoil::new(0.3, 0.15);
    let supplies = Supplies::new()
        .with_reference(&catalog)
        .with_precip(&rain)
        .with_soil(&soil);

    let plain = from_scene_et_fraction(&july_scenes(), &request(), &supplies).unwrap();
    let wet = from_scene_et_fraction(&july_scenes(), &request().with_water_balance(true), &supplies)
        .unwrap();
    assert!(wet[0].provenance().water_balance);

    let mut ev = Evaluator::new(1).unwrap();
    let plain = plain[0].materialize(&mut ev).unwrap();
    let wet = wet[0].materialize(&mut ev).unwrap();
    let (plain_et, wet_et) = (
        plain.value(Band::Et, 0).unwrap(),
        wet.value(Band::Et, 0).unwrap(),
    );
    assert!(wet_et >= plain_et - 1e-4, "{wet_et} < {plain_et}");
    // Rain on July 5 and 20 wets the surface, so soil evaporation adds ET.
    assert!(wet_et > plain_et + 1.0);
    assert_eq!(wet.value(Band::EtReference, 0), plain.value(Band::EtReference, 0));
}

#[test]
fn water_balance_without_precip_is_missing_forcing() {
    let catalog = gridmet();
    let soil = StaticSoil::new(0.3, 0.15);
    let supplies = Supplies::new().with_reference(&catalog).with_soil(&soil);
    let err = from_scene_et_fraction(&july_scenes(), &request().with_water_balance(true), &supplies)
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingForcing {
            forcing: "precipitation",
            ..
        }
    ));
}
