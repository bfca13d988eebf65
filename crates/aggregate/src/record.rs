//! Period records.

use std::collections::BTreeMap;
use std::sync::Arc;

use sims_calendar::{DateRange, Interval};
use sims_interpolate::Band;
use sims_raster::{Evaluator, Image, Raster, RasterError};

use crate::provenance::Provenance;

/// One reporting period: its date range, per-variable images and the
/// provenance shared by every record of the same call.
#[derive(Debug, Clone)]
pub struct PeriodRecord {
    range: DateRange,
    interval: Interval,
    bands: BTreeMap<Band, Image>,
    provenance: Arc<Provenance>,
}

impl PeriodRecord {
    pub(crate) fn new(
        range: DateRange,
        interval: Interval,
        bands: BTreeMap<Band, Image>,
        provenance: Arc<Provenance>,
    ) -> Self {
        Self {
            range,
            interval,
            bands,
            provenance,
        }
    }

    /// Returns the period range (end exclusive).
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the interval the period belongs to.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the image for `band`, if it was requested.
    pub fn band(&self, band: Band) -> Option<&Image> {
        self.bands.get(&band)
    }

    /// Returns the provenance.
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Returns the period label: `YYYYMMDD` for daily and custom periods,
    /// `YYYYMM` for monthly and `YYYY` for annual.
    pub fn index_label(&self) -> String {
        self.range
            .start()
            .format(self.interval.label_format())
            .to_string()
    }

    /// Materializes every band.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn materialize(&self, evaluator: &mut Evaluator) -> Result<PeriodValues, RasterError> {
        let mut bands = BTreeMap::new();
        for (band, image) in &self.bands {
            bands.insert(*band, evaluator.evaluate(image)?);
        }
        Ok(PeriodValues {
            label: self.index_label(),
            range: self.range,
            bands,
        })
    }
}

/// Materialized values of one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodValues {
    label: String,
    range: DateRange,
    bands: BTreeMap<Band, Raster>,
}

impl PeriodValues {
    /// Returns the period label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the period range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the value of `band` at `pixel`.
    pub fn value(&self, band: Band, pixel: usize) -> Option<f64> {
        self.bands.get(&band).and_then(|r| r.get(pixel))
    }

    /// Iterates `(band, raster)` pairs in band order.
    pub fn iter(&self) -> impl Iterator<Item = (Band, &Raster)> {
        self.bands.iter().map(|(b, r)| (*b, r))
    }
}
