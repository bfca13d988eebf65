//! # sims-pipeline
//!
//! Turns sparse scene ET fraction observations into period ET records:
//! interpolation to daily values, an optional soil water balance and
//! period aggregation, wired to external reference, precipitation and
//! soil data through collaborator traits.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     R["InterpolateRequest"] -->|"validate()"| P["plan"]
//!     S["SceneSet"] --> I["interpolate_daily()"]
//!     E["ReferenceSupply"] -->|"expanded range"| I
//!     P --> I
//!     I -->|"water balance on"| W["simulate() + apply_evaporation()"]
//!     I -->|"water balance off"| X["et = et_fraction * et_reference"]
//!     W --> A["aggregate()"]
//!     X --> A
//!     A --> O["Vec&lt;PeriodRecord&gt;"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_calendar::{DateRange, Interval};
//! use sims_pipeline::{InterpolateRequest, ReferenceCatalog, ReferenceSource, Supplies, from_scene_et_fraction};
//!
//! let range = DateRange::parse("2017-07-01", "2017-08-01")?;
//! let catalog = ReferenceCatalog::new().with_collection("gridmet", eto_series);
//! let request = InterpolateRequest::new(range, ReferenceSource::NamedCollection("gridmet".into()))
//!     .with_interval(Interval::Monthly);
//!
//! let supplies = Supplies::new().with_reference(&catalog);
//! let records = from_scene_et_fraction(&scenes, &request, &supplies)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `request` | Request builder and up-front validation |
//! | `supply` | Reference and soil collaborators |
//! | `pipeline` | End-to-end run |
//! | `error` | Error types and classification |

mod error;
mod pipeline;
mod request;
mod supply;

pub use error::{ErrorKind, PipelineError};
pub use pipeline::{DailyRun, Supplies, from_scene_et_fraction, reconstruct_daily};
pub use request::InterpolateRequest;
pub use supply::{ReferenceCatalog, ReferenceSource, ReferenceSupply, SoilSupply, StaticSoil};
