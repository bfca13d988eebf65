//! # sims-interpolate
//!
//! Reconstructs a complete daily series from sparse, irregularly timed
//! scene observations.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["SceneSet"] -->|"filter_window()"| B["scenes in padded window"]
//!     C["TargetSeries (et_reference)"] --> D["interpolate_daily()"]
//!     B --> D
//!     E["InterpWindow"] --> D
//!     D --> F["DailySeries"]
//!     B -->|"daily_count()"| F
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_calendar::DateRange;
//! use sims_interpolate::{Band, InterpMethod, InterpWindow, Scene, SceneSet, TargetSeries, interpolate_daily};
//! use sims_raster::Image;
//!
//! let range = DateRange::parse("2017-07-01", "2017-08-01")?;
//! let window = InterpWindow::new(range, 32)?;
//! let target = TargetSeries::uniform(window.padded()?, &Image::constant(2.0));
//!
//! let scenes = SceneSet::new(vec![
//!     Scene::new("LC08_030036_20170708", date).with_band(Band::EtFraction, Image::constant(0.4)),
//! ]);
//!
//! let daily = interpolate_daily(&scenes, &target, &window, &[Band::EtFraction], InterpMethod::Linear)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `band` | Named channels |
//! | `scene` | Scene observations and ordered scene sets |
//! | `target` | Dense daily reference series |
//! | `method` | Interpolation method and padded window |
//! | `interpolate` | Linear interpolation and per-day scene tally |
//! | `daily` | Daily series entries and materialized values |
//! | `error` | Error types |

mod band;
mod daily;
mod error;
mod interpolate;
mod method;
mod scene;
mod target;

pub use band::Band;
pub use daily::{DailyImage, DailySeries, DailyValues};
pub use error::InterpolateError;
pub use interpolate::{daily_count, interpolate_daily};
pub use method::{DEFAULT_INTERP_DAYS, InterpMethod, InterpWindow};
pub use scene::{Scene, SceneSet};
pub use target::TargetSeries;
