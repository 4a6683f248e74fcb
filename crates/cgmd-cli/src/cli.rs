use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "cgmd - a coarse-grained molecular dynamics engine for Langevin simulations of Go-model polymer systems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation described by a TOML input file.
    Run(RunArgs),
    /// Validate a TOML input file and print a summary of the system it builds.
    Check(CheckArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the TOML input file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Number of timesteps to simulate.
    #[arg(short = 'n', long, required = true, value_name = "INT")]
    pub steps: u64,

    /// Write an XYZ trajectory to this path.
    #[arg(short, long, value_name = "PATH")]
    pub trajectory: Option<PathBuf>,

    /// Write a CSV energy time-series to this path.
    #[arg(short, long, value_name = "PATH")]
    pub energies: Option<PathBuf>,

    /// Steps between trajectory/energy samples.
    #[arg(long, value_name = "INT", default_value_t = 100)]
    pub sample_interval: u64,

    /// Override the RNG seed from the input file.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the TOML input file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}
