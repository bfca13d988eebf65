//! # sims-raster
//!
//! Deferred single-band map algebra with a memoizing in-memory evaluator.
//!
//! Images are immutable expression graphs. Builders such as [`Image::add`]
//! or [`Image::mosaic`] only describe work; an [`Evaluator`] materializes
//! them on a fixed pixel grid. Masked pixels are NaN and propagate through
//! elementwise operations; reductions skip them.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Image::from_pixels / constant"] --> B["add, multiply, clamp, ..."]
//!     B --> C["sum, valid_sum, mean, count, mosaic"]
//!     C --> D["Evaluator::evaluate()"]
//!     D --> E["Raster"]
//!     F["scan()"] -->|"threads state"| B
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_raster::{Evaluator, Image, PixelType};
//!
//! let fraction = Image::from_pixels(vec![0.4, f64::NAN]);
//! let reference = Image::constant(2.0);
//! let et = fraction.multiply(&reference).cast(PixelType::Float);
//!
//! let mut evaluator = Evaluator::new(2)?;
//! let raster = evaluator.evaluate(&et)?;
//! assert_eq!(raster.get(1), None);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `image` | Deferred image handle, elementwise ops, reductions |
//! | `eval` | Memoizing evaluator and materialized rasters |
//! | `pixel` | Output pixel types and casting |
//! | `scan` | Ordered fold primitive |
//! | `error` | Error types |

mod error;
mod eval;
mod image;
mod pixel;
mod scan;

pub use error::RasterError;
pub use eval::{Evaluator, Raster};
pub use image::Image;
pub use pixel::PixelType;
pub use scan::scan;
