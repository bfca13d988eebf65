//! # sims-calendar
//!
//! Date ranges, reporting intervals and the interpolation window.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["start, end (YYYY-MM-DD)"] -->|"DateRange::parse()"| B["DateRange"]
//!     B -->|"expand_to_interval()"| C["expanded DateRange"]
//!     C -->|"interp_window()"| D["interpolation window"]
//!     C -->|"period_bounds()"| E["Vec of DateRange"]
//!     B -->|".days()"| F["Vec of NaiveDate"]
//!     F -->|"day_number()"| G["days since 1970-01-01"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_calendar::{DateRange, Interval, expand_to_interval, interp_window, period_bounds};
//!
//! let range = DateRange::parse("2017-07-10", "2017-08-05")?;
//! let interval: Interval = "monthly".parse()?;
//!
//! // Snap to whole months: 2017-07-01 .. 2017-09-01
//! let expanded = expand_to_interval(range, interval)?;
//!
//! // Scenes are gathered from a window padded on both sides
//! let window = interp_window(expanded, 32)?;
//!
//! // One reporting period per month
//! let periods = period_bounds(expanded, interval)?;
//! assert_eq!(periods.len(), 2);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `range` | Half-open date ranges, window padding, numeric day axis |
//! | `interval` | Reporting intervals, interval expansion, period boundaries |
//! | `error` | Error types |

mod error;
mod interval;
mod range;

pub use error::CalendarError;
pub use interval::{Interval, expand_to_interval, month_start, period_bounds, year_start};
pub use range::{DateRange, day_number, interp_window, parse_date};
