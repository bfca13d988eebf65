//! Scene observations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sims_calendar::DateRange;
use sims_raster::Image;

use crate::band::Band;

/// One satellite overpass: a day-resolution date, per-band values and a
/// validity mask.
///
/// Band values are only valid where the mask is non-zero and the band
/// itself is unmasked, so each band may have its own set of valid pixels.
#[derive(Debug, Clone)]
pub struct Scene {
    id: String,
    date: NaiveDate,
    bands: BTreeMap<Band, Image>,
    mask: Image,
}

impl Scene {
    /// Creates a scene with no bands and an all-valid mask.
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            bands: BTreeMap::new(),
            mask: Image::constant(1.0),
        }
    }

    /// Adds or replaces a band.
    pub fn with_band(mut self, band: Band, image: Image) -> Self {
        self.bands.insert(band, image);
        self
    }

    /// Sets the validity mask.
    pub fn with_mask(mut self, mask: Image) -> Self {
        self.mask = mask;
        self
    }

    /// Returns the stable scene identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the acquisition date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the raw validity mask.
    pub fn mask(&self) -> &Image {
        &self.mask
    }

    /// Returns `true` if the scene carries `band`.
    pub fn has_band(&self, band: Band) -> bool {
        self.bands.contains_key(&band)
    }

    /// Returns `band` with the scene mask applied; fully masked if the scene
    /// does not carry it.
    pub fn valid(&self, band: Band) -> Image {
        match self.bands.get(&band) {
            Some(image) => image.update_mask(&self.mask),
            None => Image::masked(),
        }
    }

    /// 1 where the scene is valid, 0 elsewhere.
    pub fn validity(&self) -> Image {
        Image::constant(1.0).update_mask(&self.mask).mask()
    }
}

/// An ordered, immutable collection of scenes.
///
/// Scenes are kept in date order; scenes sharing a day keep their insertion
/// order and are never deduplicated.
#[derive(Debug, Clone, Default)]
pub struct SceneSet {
    scenes: Vec<Scene>,
}

impl SceneSet {
    /// Creates a set from scenes in any order.
    pub fn new(mut scenes: Vec<Scene>) -> Self {
        scenes.sort_by_key(Scene::date);
        Self { scenes }
    }

    /// Returns the number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns `true` if there are no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Iterates scenes in date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Returns the scenes acquired on `date`, in insertion order.
    pub fn on_day(&self, date: NaiveDate) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(move |s| s.date == date)
    }

    /// Returns the scenes whose date falls in `range`.
    pub fn filter_window(&self, range: DateRange) -> Self {
        Self {
            scenes: self
                .scenes
                .iter()
                .filter(|s| range.contains(s.date))
                .cloned()
                .collect(),
        }
    }

    /// Returns the scene identifiers in date order.
    pub fn ids(&self) -> Vec<&str> {
        self.scenes.iter().map(Scene::id).collect()
    }
}

impl FromIterator<Scene> for SceneSet {
    fn from_iter<I: IntoIterator<Item = Scene>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
