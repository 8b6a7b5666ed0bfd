//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod check;
pub mod segment;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Segment text into words
    Segment(segment::SegmentArgs),

    /// Load a dictionary and report on it
    Check(check::CheckArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Segment(args) => args.execute(),
            Commands::Check(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second initialization (tests calling execute twice) is harmless.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
