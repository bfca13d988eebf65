use anyhow::{Context, Result};
use tracing::info;

use sims_interpolate::TargetSeries;
use sims_pipeline::{ReferenceSource, Supplies, from_scene_et_fraction};

use crate::cli::{CheckArgs, RunArgs};
use crate::config::SimsConfig;
use crate::convert;
use crate::points::{PointInput, RunOutput};

/// Run interpolation, water balance and aggregation on a point input.
pub fn run(args: RunArgs) -> Result<()> {
    let mut config = SimsConfig::load(&args.config)?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }

    // Step 1: Resolve paths
    let input_path = config.io.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let output_path = config.io.output.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].output in config or use --output")
    })?;

    // Step 2: Read inputs
    info!(path = %input_path.display(), "reading point input");
    let input = PointInput::load(input_path)?;
    let scenes = input.scene_set()?;
    let catalog = input.catalog()?;
    let precip = input.daily_precip()?;
    let soil = input.static_soil();
    info!(
        scenes = scenes.len(),
        collections = catalog.len(),
        precip_days = precip.len(),
        "point input loaded"
    );

    // Step 3: Build and validate the request
    let reference = match config.model.et_reference_source {
        Some(ref id) => ReferenceSource::NamedCollection(id.clone()),
        None => ReferenceSource::InMemory(input.inline_reference()?),
    };
    let request = convert::build_request(&config, reference)?;

    // Step 4: Run the pipeline
    let mut supplies = Supplies::new().with_reference(&catalog).with_precip(&precip);
    if let Some(ref soil) = soil {
        supplies = supplies.with_soil(soil);
    }
    let records = from_scene_et_fraction(&scenes, &request, &supplies)
        .with_context(|| format!("run failed for {}", input_path.display()))?;

    // Step 5: Materialize and write
    let output = RunOutput::from_records(&records)?;
    output.write(output_path, config.io.pretty)?;
    info!(
        path = %output_path.display(),
        periods = output.periods.len(),
        "period records written"
    );
    Ok(())
}

/// Validate a configuration without reading any input data.
pub fn check(args: CheckArgs) -> Result<()> {
    let config = SimsConfig::load(&args.config)?;
    let reference = match config.model.et_reference_source {
        Some(ref id) => ReferenceSource::NamedCollection(id.clone()),
        None => ReferenceSource::InMemory(TargetSeries::default()),
    };
    let request = convert::build_request(&config, reference)?;
    request
        .validate()
        .with_context(|| format!("invalid configuration: {}", args.config.display()))?;
    println!("{}: ok", args.config.display());
    Ok(())
}
