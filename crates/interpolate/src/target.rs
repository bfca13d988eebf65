//! Dense daily reference series.

use chrono::NaiveDate;
use sims_calendar::DateRange;
use sims_raster::Image;

use crate::error::InterpolateError;

/// A dense daily series of reference ET images on consecutive days.
#[derive(Debug, Clone, Default)]
pub struct TargetSeries {
    entries: Vec<(NaiveDate, Image)>,
}

impl TargetSeries {
    /// Creates a series from `(date, image)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`InterpolateError::NonContiguousTarget`] unless every date
    /// is exactly one day after the previous one.
    pub fn new(entries: Vec<(NaiveDate, Image)>) -> Result<Self, InterpolateError> {
        for pair in entries.windows(2) {
            let (previous, next) = (pair[0].0, pair[1].0);
            if previous.succ_opt() != Some(next) {
                return Err(InterpolateError::NonContiguousTarget { previous, next });
            }
        }
        Ok(Self { entries })
    }

    /// Creates a series with the same image on every day of `range`.
    pub fn uniform(range: DateRange, image: &Image) -> Self {
        Self {
            entries: range.days().into_iter().map(|d| (d, image.clone())).collect(),
        }
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(date, image)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, Image)> {
        self.entries.iter()
    }

    /// Returns the image for `date`, if present.
    pub fn get(&self, date: NaiveDate) -> Option<&Image> {
        let first = self.entries.first()?.0;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.entries.get(offset).map(|(_, image)| image)
    }

    /// Returns `true` if every day of `range` is present.
    pub fn covers(&self, range: DateRange) -> bool {
        match (self.entries.first(), self.entries.last()) {
            (Some((first, _)), Some((last, _))) => {
                *first <= range.start() && range.end() <= last.succ_opt().unwrap_or(*last)
            }
            _ => false,
        }
    }

    /// Returns the days that fall in `range`.
    pub fn filter(&self, range: DateRange) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(d, _)| range.contains(*d))
                .cloned()
                .collect(),
        }
    }

    /// Multiplies every day by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(d, image)| (*d, image.multiply(factor)))
                .collect(),
        }
    }
}
