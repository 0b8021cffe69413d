use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

use dcelcheck::cli::{Cli, Commands};
use dcelcheck::commands::{check, inspect};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Check(args) => check::run(&cli, args),
        Commands::Inspect(args) => inspect::run(&cli, args),
    }
}
