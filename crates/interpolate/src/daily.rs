//! Reconstructed daily series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sims_calendar::DateRange;
use sims_raster::{Evaluator, Image, Raster, RasterError};

use crate::band::Band;

/// One day of the reconstructed series.
#[derive(Debug, Clone)]
pub struct DailyImage {
    date: NaiveDate,
    bands: BTreeMap<Band, Image>,
}

impl DailyImage {
    /// Creates an entry with no bands.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            bands: BTreeMap::new(),
        }
    }

    /// Adds or replaces a band.
    pub fn with_band(mut self, band: Band, image: Image) -> Self {
        self.bands.insert(band, image);
        self
    }

    /// Returns the date of this entry.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the image for `band`, if present.
    pub fn band(&self, band: Band) -> Option<&Image> {
        self.bands.get(&band)
    }

    /// Materializes every band.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn materialize(&self, evaluator: &mut Evaluator) -> Result<DailyValues, RasterError> {
        let mut bands = BTreeMap::new();
        for (band, image) in &self.bands {
            bands.insert(*band, evaluator.evaluate(image)?);
        }
        Ok(DailyValues {
            date: self.date,
            bands,
        })
    }
}

/// An ordered daily series, one entry per consecutive day.
#[derive(Debug, Clone, Default)]
pub struct DailySeries {
    entries: Vec<DailyImage>,
}

impl DailySeries {
    /// Creates a series from entries in date order.
    pub fn new(entries: Vec<DailyImage>) -> Self {
        Self { entries }
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = &DailyImage> {
        self.entries.iter()
    }

    /// Returns the entries.
    pub fn entries(&self) -> &[DailyImage] {
        &self.entries
    }

    /// Returns the entry for `date`, if present.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyImage> {
        self.entries.iter().find(|e| e.date == date)
    }

    /// Returns the entries whose date falls in `range`.
    pub fn filter(&self, range: DateRange) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| range.contains(e.date))
                .cloned()
                .collect(),
        }
    }

    /// Returns the images of `band` on each day that carries it.
    pub fn band_images(&self, band: Band) -> Vec<Image> {
        self.entries
            .iter()
            .filter_map(|e| e.band(band).cloned())
            .collect()
    }

    /// Applies `f` to every entry, preserving order.
    pub fn map(&self, f: impl FnMut(&DailyImage) -> DailyImage) -> Self {
        Self {
            entries: self.entries.iter().map(f).collect(),
        }
    }

    /// Materializes every entry.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn materialize(&self, evaluator: &mut Evaluator) -> Result<Vec<DailyValues>, RasterError> {
        self.entries
            .iter()
            .map(|e| e.materialize(evaluator))
            .collect()
    }
}

impl FromIterator<DailyImage> for DailySeries {
    fn from_iter<I: IntoIterator<Item = DailyImage>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Materialized values of one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyValues {
    date: NaiveDate,
    bands: BTreeMap<Band, Raster>,
}

impl DailyValues {
    /// Returns the date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the raster for `band`, if present.
    pub fn band(&self, band: Band) -> Option<&Raster> {
        self.bands.get(&band)
    }

    /// Returns the value of `band` at `pixel`; `None` if the band is absent
    /// or the pixel masked.
    pub fn value(&self, band: Band, pixel: usize) -> Option<f64> {
        self.band(band).and_then(|r| r.get(pixel))
    }

    /// Iterates `(band, raster)` pairs in band order.
    pub fn iter(&self) -> impl Iterator<Item = (Band, &Raster)> {
        self.bands.iter().map(|(b, r)| (*b, r))
    }
}
