//! paoding command-line entry point

use anyhow::Result;
use clap::Parser;
use paoding_cli::commands::Commands;

/// Dictionary-based Chinese word segmentation
#[derive(Debug, Parser)]
#[command(name = "paoding", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
