//! # sims-aggregate
//!
//! Reduces a daily ET series into non-overlapping reporting periods.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DailySeries"] --> C["aggregate()"]
//!     B["AggregateConfig"] -->|"expand_to_interval() + period_bounds()"| C
//!     D["Provenance"] --> C
//!     C --> E["Vec&lt;PeriodRecord&gt;"]
//!     E -->|"materialize()"| F["PeriodValues"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_aggregate::{AggregateConfig, ModelInfo, OutputType, Provenance, aggregate};
//! use sims_calendar::{DateRange, Interval};
//! use sims_raster::Evaluator;
//!
//! let range = DateRange::parse("2017-07-01", "2017-08-01")?;
//! let config = AggregateConfig::new(Interval::Monthly).with_output_type(OutputType::Float);
//! let provenance = Provenance::new(ModelInfo::new("SIMS", "0.1.0"));
//!
//! let records = aggregate(&daily, range, &config, provenance)?;
//! let mut evaluator = Evaluator::new(n_pixels)?;
//! for record in &records {
//!     let values = record.materialize(&mut evaluator)?;
//!     println!("{}: {:?}", values.label(), values.value(Band::Et, 0));
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `aggregate` | Per-variable period reduction |
//! | `config` | Interval, variables and output type |
//! | `output` | Output types and granularity parsing |
//! | `provenance` | Model and input metadata |
//! | `record` | Period records and their values |
//! | `error` | Error types |

mod aggregate;
mod config;
mod error;
mod output;
mod provenance;
mod record;

pub use aggregate::aggregate;
pub use config::{AGGREGATED_BANDS, AggregateConfig};
pub use error::AggregateError;
pub use output::{OutputType, parse_interval};
pub use provenance::{ModelInfo, Provenance};
pub use record::{PeriodRecord, PeriodValues};
