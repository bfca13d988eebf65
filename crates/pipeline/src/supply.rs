//! External data collaborators: reference ET and soil properties.

use std::collections::HashMap;

use sims_calendar::DateRange;
use sims_interpolate::TargetSeries;
use sims_raster::Image;

/// Supplies daily reference ET series by collection identifier.
pub trait ReferenceSupply {
    /// Returns the daily series of collection `id` restricted to `range`,
    /// or `None` if the collection is unknown.
    fn daily(&self, id: &str, range: DateRange) -> Option<TargetSeries>;
}

/// Supplies static soil properties as volumetric fractions.
pub trait SoilSupply {
    /// Field capacity.
    fn field_capacity(&self) -> Image;
    /// Permanent wilting point.
    fn wilting_point(&self) -> Image;
}

/// Where the reference ET series comes from.
#[derive(Debug, Clone)]
pub enum ReferenceSource {
    /// A collection identifier resolved through a [`ReferenceSupply`].
    NamedCollection(String),
    /// A series supplied directly by the caller.
    InMemory(TargetSeries),
}

impl ReferenceSource {
    /// Returns the collection identifier, if any.
    pub fn collection_id(&self) -> Option<&str> {
        match self {
            Self::NamedCollection(id) => Some(id),
            Self::InMemory(_) => None,
        }
    }

    /// Returns a short label for logs and errors.
    pub fn label(&self) -> &str {
        self.collection_id().unwrap_or("in-memory series")
    }
}

/// Reference series held in memory, keyed by collection identifier.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    collections: HashMap<String, TargetSeries>,
}

impl ReferenceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `series` under `id`, replacing any previous entry.
    pub fn with_collection(mut self, id: impl Into<String>, series: TargetSeries) -> Self {
        self.collections.insert(id.into(), series);
        self
    }

    /// Returns the number of registered collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Returns `true` if no collection is registered.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl ReferenceSupply for ReferenceCatalog {
    fn daily(&self, id: &str, range: DateRange) -> Option<TargetSeries> {
        self.collections.get(id).map(|series| series.filter(range))
    }
}

/// Soil properties fixed for a whole run.
#[derive(Debug, Clone)]
pub struct StaticSoil {
    field_capacity: Image,
    wilting_point: Image,
}

impl StaticSoil {
    /// Creates soil properties from field capacity and wilting point.
    pub fn new(field_capacity: impl Into<Image>, wilting_point: impl Into<Image>) -> Self {
        Self {
            field_capacity: field_capacity.into(),
            wilting_point: wilting_point.into(),
        }
    }
}

impl SoilSupply for StaticSoil {
    fn field_capacity(&self) -> Image {
        self.field_capacity.clone()
    }

    fn wilting_point(&self) -> Image {
        self.wilting_point.clone()
    }
}
