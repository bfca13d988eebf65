//! # sims-water-balance
//!
//! FAO-56 two-stage bare-soil evaporation, folded day by day over a
//! reconstructed daily series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["field capacity, wilting point"] -->|"SoilParams::from_rasters()"| B["TEW, REW"]
//!     B --> C["WaterBalanceState::initial()"]
//!     C -->|"scan over days"| D["simulate()"]
//!     E["DailySeries"] --> D
//!     F["PrecipForcing"] --> D
//!     D --> G["augmented DailySeries"]
//!     G -->|"apply_evaporation()"| H["ET with soil evaporation"]
//! ```
//!
//! Each day, pixel-wise, from the previous `(de, de_rew, c_eff)`:
//!
//! ```text
//! ft     = clamp((REW - de_rew) / (ke_max * ETo), 0, 1)
//! kr     = clamp((TEW - de) / (TEW - REW), 0, 1)
//! ke     = (ft + (1 - ft) * kr) * ke_max
//! ete    = ke * ETo
//! wet    = f * P(tomorrow) + (1 - f) * P(today)
//! de     = clamp(de - wet + ete, 0, TEW)
//! de_rew = clamp(de_rew - wet * c_eff + ete, 0, REW)
//! c_eff  = min(1, c0 + c1 * (1 - de / TEW))
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use sims_water_balance::{DailyPrecip, SoilParams, WaterBalanceConfig, apply_evaporation, simulate};
//!
//! let config = WaterBalanceConfig::new();
//! let soil = SoilParams::from_rasters(&field_capacity, &wilting_point, &config);
//! let augmented = simulate(&daily, &precip, &soil, &config)?;
//! let with_evaporation = apply_evaporation(&augmented, config.ke_max())?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Recurrence constants and coefficient mode |
//! | `soil` | TEW/REW derivation |
//! | `forcing` | Precipitation supply |
//! | `state` | Carried state and initial conditions |
//! | `simulate` | The ordered daily fold |
//! | `evaporation` | ET adjusted by the soil evaporation coefficient |
//! | `error` | Error types |

mod config;
mod error;
mod evaporation;
mod forcing;
mod simulate;
mod soil;
mod state;

pub use config::{CoefficientMode, WaterBalanceConfig};
pub use error::WaterBalanceError;
pub use evaporation::apply_evaporation;
pub use forcing::{DailyPrecip, PrecipForcing};
pub use simulate::simulate;
pub use soil::SoilParams;
pub use state::WaterBalanceState;
