//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use paoding_core::Token;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs one object per input as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    inputs: Vec<SegmentationData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentationData {
    /// Where the text came from
    pub source: String,
    /// Tokens with character offsets
    pub tokens: Vec<Token>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            inputs: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_tokens(&mut self, label: &str, tokens: &[Token]) -> Result<()> {
        self.inputs.push(SegmentationData {
            source: label.to_string(),
            tokens: tokens.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.inputs)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
