//! Daily precipitation forcing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sims_raster::Image;

/// Supplies daily precipitation (mm) by date.
pub trait PrecipForcing {
    /// Returns precipitation for `date`, or `None` if the source has no
    /// value for that day.
    fn precip(&self, date: NaiveDate) -> Option<Image>;
}

/// In-memory daily precipitation keyed by date.
#[derive(Debug, Clone, Default)]
pub struct DailyPrecip {
    days: BTreeMap<NaiveDate, Image>,
}

impl DailyPrecip {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value for `date`.
    pub fn with_day(mut self, date: NaiveDate, image: Image) -> Self {
        self.days.insert(date, image);
        self
    }

    /// Returns the number of days with a value.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns `true` if no day has a value.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(NaiveDate, Image)> for DailyPrecip {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Image)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl PrecipForcing for DailyPrecip {
    fn precip(&self, date: NaiveDate) -> Option<Image> {
        self.days.get(&date).cloned()
    }
}
