use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use dcel::OverlapScan;

/// Planar DCEL builder and checker
#[derive(Parser, Debug)]
#[command(name = "dcelcheck", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the DCEL of a mesh and write it if it is a valid planar subdivision
    Check(CheckArgs),

    /// Write a JSON report on a mesh (counts, tolerated anomalies, verdict)
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// 1-based indexed layout
    #[default]
    Text,
    /// DCEL records as JSON
    Json,
}

/// Overlap candidate search.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, ValueEnum)]
pub enum ScanStrategy {
    /// R-tree over segment bounding boxes
    #[default]
    Indexed,
    /// Every pair of half-edges
    BruteForce,
}

impl From<ScanStrategy> for OverlapScan {
    fn from(scan: ScanStrategy) -> Self {
        match scan {
            ScanStrategy::Indexed    => OverlapScan::Indexed,
            ScanStrategy::BruteForce => OverlapScan::BruteForce,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Input mesh description ("-" reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file for the DCEL (stdout if omitted or "-").  A rejected mesh
    /// always reports on stdout and leaves this untouched.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Encoding of the written DCEL
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Strategy for the overlap check
    #[arg(long, value_enum, default_value_t = ScanStrategy::Indexed)]
    pub overlap_scan: ScanStrategy,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input mesh description ("-" reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output file for the report (stdout if omitted or "-")
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Strategy for the overlap check
    #[arg(long, value_enum, default_value_t = ScanStrategy::Indexed)]
    pub overlap_scan: ScanStrategy,

    /// Include the DCEL records in the report
    #[arg(long)]
    pub records: bool,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}
