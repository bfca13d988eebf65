//! Interpolation requests and their validation.

use sims_aggregate::{AggregateConfig, ModelInfo, OutputType};
use sims_calendar::{DateRange, Interval, expand_to_interval};
use sims_interpolate::{Band, DEFAULT_INTERP_DAYS, InterpMethod, InterpWindow};
use sims_water_balance::WaterBalanceConfig;

use crate::error::PipelineError;
use crate::supply::ReferenceSource;

/// Variables that are interpolated from scenes rather than derived.
const SCENE_BANDS: [Band; 2] = [Band::EtFraction, Band::Ndvi];

/// A complete request for [`from_scene_et_fraction`](crate::from_scene_et_fraction).
///
/// # Example
///
/// ```
/// use sims_calendar::{DateRange, Interval};
/// use sims_interpolate::Band;
/// use sims_pipeline::{InterpolateRequest, ReferenceSource};
///
/// let range = DateRange::parse("2017-07-01", "2017-08-01").unwrap();
/// let request = InterpolateRequest::new(range, ReferenceSource::NamedCollection("gridmet".into()))
///     .with_interval(Interval::Monthly)
///     .with_variables(vec![Band::Et, Band::Count]);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.interp_days(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolateRequest {
    range: DateRange,
    reference: ReferenceSource,
    variables: Vec<Band>,
    interval: Interval,
    method: InterpMethod,
    interp_days: i64,
    water_balance: bool,
    water_balance_config: WaterBalanceConfig,
    et_reference_factor: f64,
    output_type: OutputType,
    model: ModelInfo,
}

/// A validated request, resolved into component configs.
#[derive(Debug, Clone)]
pub(crate) struct RunPlan {
    /// Requested range widened to whole periods.
    pub(crate) expanded: DateRange,
    /// Interpolation window around the expanded range.
    pub(crate) window: InterpWindow,
    /// Bands passed to the interpolator.
    pub(crate) interp_bands: Vec<Band>,
    pub(crate) aggregate: AggregateConfig,
}

impl InterpolateRequest {
    /// Creates a request for `range` using `reference` for daily ET.
    ///
    /// Defaults: variables `et`, `et_reference`, `et_fraction`; custom
    /// interval; linear interpolation over 32 days; no water balance;
    /// reference factor 1.0; `float` output.
    pub fn new(range: DateRange, reference: ReferenceSource) -> Self {
        Self {
            range,
            reference,
            variables: vec![Band::Et, Band::EtReference, Band::EtFraction],
            interval: Interval::Custom,
            method: InterpMethod::Linear,
            interp_days: DEFAULT_INTERP_DAYS,
            water_balance: false,
            water_balance_config: WaterBalanceConfig::default(),
            et_reference_factor: 1.0,
            output_type: OutputType::Float,
            model: ModelInfo::new("SIMS", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the output variables.
    pub fn with_variables(mut self, variables: Vec<Band>) -> Self {
        self.variables = variables;
        self
    }

    /// Sets the reporting interval.
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the interpolation method.
    pub fn with_method(mut self, method: InterpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the lookback/lookahead in days.
    pub fn with_interp_days(mut self, interp_days: i64) -> Self {
        self.interp_days = interp_days;
        self
    }

    /// Enables or disables the soil water balance.
    pub fn with_water_balance(mut self, enabled: bool) -> Self {
        self.water_balance = enabled;
        self
    }

    /// Sets the water balance parameters.
    pub fn with_water_balance_config(mut self, config: WaterBalanceConfig) -> Self {
        self.water_balance_config = config;
        self
    }

    /// Sets the reference ET multiplier.
    pub fn with_et_reference_factor(mut self, factor: f64) -> Self {
        self.et_reference_factor = factor;
        self
    }

    /// Sets the output type for flux-like variables.
    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    /// Sets the model information stamped on every record.
    pub fn with_model(mut self, model: ModelInfo) -> Self {
        self.model = model;
        self
    }

    // --- Accessors ---

    /// Returns the requested range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the reference source.
    pub fn reference(&self) -> &ReferenceSource {
        &self.reference
    }

    /// Returns the output variables.
    pub fn variables(&self) -> &[Band] {
        &self.variables
    }

    /// Returns the reporting interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the interpolation method.
    pub fn method(&self) -> InterpMethod {
        self.method
    }

    /// Returns the lookback/lookahead in days.
    pub fn interp_days(&self) -> i64 {
        self.interp_days
    }

    /// Returns `true` if the water balance is enabled.
    pub fn water_balance(&self) -> bool {
        self.water_balance
    }

    /// Returns the water balance parameters.
    pub fn water_balance_config(&self) -> &WaterBalanceConfig {
        &self.water_balance_config
    }

    /// Returns the reference ET multiplier.
    pub fn et_reference_factor(&self) -> f64 {
        self.et_reference_factor
    }

    /// Returns the output type.
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Returns the model information.
    pub fn model(&self) -> &ModelInfo {
        &self.model
    }

    /// Validates every parameter without touching any data.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.plan().map(|_| ())
    }

    pub(crate) fn plan(&self) -> Result<RunPlan, PipelineError> {
        let aggregate = AggregateConfig::new(self.interval)
            .with_variables(self.variables.clone())
            .with_output_type(self.output_type);
        aggregate.validate()?;

        if let ReferenceSource::NamedCollection(id) = &self.reference {
            if id.trim().is_empty() {
                return Err(PipelineError::InvalidParameter {
                    name: "et_reference_source",
                    reason: "collection identifier is empty".to_string(),
                });
            }
        }
        if !self.et_reference_factor.is_finite() || self.et_reference_factor <= 0.0 {
            return Err(PipelineError::InvalidParameter {
                name: "et_reference_factor",
                reason: format!("must be finite and positive, got {}", self.et_reference_factor),
            });
        }
        if self.water_balance {
            self.water_balance_config.validate()?;
        }

        let expanded = expand_to_interval(self.range, self.interval)?;
        let window = InterpWindow::new(expanded, self.interp_days)?;
        window.padded()?;

        Ok(RunPlan {
            expanded,
            window,
            interp_bands: self.interp_bands(),
            aggregate,
        })
    }

    /// Bands to interpolate: requested scene bands, `et_fraction` whenever
    /// ET is derived, `time` always and `count` when requested.
    fn interp_bands(&self) -> Vec<Band> {
        let mut bands: Vec<Band> = SCENE_BANDS
            .into_iter()
            .filter(|b| self.variables.contains(b))
            .collect();
        let derives_et = self.water_balance
            || self
                .variables
                .iter()
                .any(|b| matches!(b, Band::Et | Band::EtReference));
        if derives_et && !bands.contains(&Band::EtFraction) {
            bands.push(Band::EtFraction);
        }
        bands.push(Band::Time);
        if self.variables.contains(&Band::Count) {
            bands.push(Band::Count);
        }
        bands
    }
}
