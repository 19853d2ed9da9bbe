use chemcomp_loader::core::models::planet::BodyPart;
use clap::{Args, Parser, Subcommand, ValueEnum};
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
    about = "chemcomp CLI - Inspect and export the planet record of a chemcomp planet-formation run.",
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
    /// List every attribute of a planet: stored fields, configured options and compositions.
    Inspect(InspectArgs),
    /// Write the element or molecule masses of the atmosphere or core as CSV.
    Export(ExportArgs),
    /// Print the mass of one species over time.
    Series(SeriesArgs),
}

/// Inputs shared by every subcommand.
#[derive(Args, Debug)]
pub struct PlanetArgs {
    /// Path to the chemcomp output file (HDF5).
    #[arg(value_name = "PLANET")]
    pub planet: PathBuf,

    /// Path to the configuration file the run was started with (YAML or TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Override the element names labelling the composition arrays, in column order.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub elements: Option<Vec<String>>,

    /// Override the molecule names labelling the composition arrays, in column order.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub molecules: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub planet: PlanetArgs,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub planet: PlanetArgs,

    /// Body part to export ('atmo' or 'core').
    #[arg(short, long, value_name = "PART")]
    pub part: BodyPart,

    /// Composition layer to export.
    #[arg(short, long, value_enum)]
    pub layer: Layer,

    /// Output CSV file. Writes to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub planet: PlanetArgs,

    /// Body part to read ('atmo' or 'core').
    #[arg(short, long, value_name = "PART")]
    pub part: BodyPart,

    /// Species name, e.g. 'Fe' or 'H2O'.
    #[arg(short, long, value_name = "NAME")]
    pub species: String,

    /// Restrict the lookup to one layer. Elements are searched first otherwise.
    #[arg(short, long, value_enum)]
    pub layer: Option<Layer>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Elements,
    Molecules,
}
