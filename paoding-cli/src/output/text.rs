//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use paoding_core::{Token, TokenType};
use std::io::Write;

/// Separator between words on a line
pub const WORD_SEPARATOR: &str = "/";

/// Plain text formatter - one line of `/`-separated words per input
pub struct TextFormatter<W: Write> {
    writer: W,
    labels: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            labels: false,
        }
    }

    /// Prefix each line with the input it came from
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_tokens(&mut self, label: &str, tokens: &[Token]) -> Result<()> {
        if self.labels {
            write!(self.writer, "{label}: ")?;
        }
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.token_type != TokenType::Whitespace)
            .map(|t| t.text.as_str())
            .collect();
        writeln!(self.writer, "{}", words.join(WORD_SEPARATOR))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
