use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SIMS crop evapotranspiration model.
#[derive(Parser)]
#[command(
    name = "sims",
    version,
    about = "Daily ET interpolation, soil water balance and period aggregation"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Interpolate scene ET fractions and aggregate them into periods.
    Run(RunArgs),
    /// Validate a configuration file without reading any data.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sims.toml")]
    pub config: PathBuf,

    /// Override input JSON path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "sims.toml")]
    pub config: PathBuf,
}
