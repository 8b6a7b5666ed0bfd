//! paoding CLI library
//!
//! Command-line harness over `paoding-core`: segments text arguments, files
//! or stdin and prints the words, and checks dictionaries.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
