//! Analyzer facade
//!
//! An [`Analyzer`] is the factory an indexing integration keeps around: it
//! owns the shared dictionary and the settings, and hands out a fresh
//! [`Segmenter`] per stream.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::config::{Config, Mode};
use crate::dictionary::{registry, Dictionary};
use crate::error::{InitializationError, Result};
use crate::segmenter::{check_capacity, Segmenter};
use crate::source::{CharSource, StrSource, Utf8Source};
use crate::token::Token;

/// Segmenter factory sharing one dictionary
#[derive(Debug, Clone)]
pub struct Analyzer {
    dictionary: Arc<Dictionary>,
    mode: Mode,
    window_capacity: usize,
}

impl Analyzer {
    /// Create an analyzer, loading the dictionary through the registry
    pub fn new(config: &Config) -> std::result::Result<Self, InitializationError> {
        config.validate()?;
        let dictionary = registry::get_or_load(config.dictionary())?;
        Self::with_dictionary(dictionary, config.mode(), config.window_capacity())
    }

    /// Create an analyzer over an already loaded dictionary
    pub fn with_dictionary(
        dictionary: Arc<Dictionary>,
        mode: Mode,
        window_capacity: usize,
    ) -> std::result::Result<Self, InitializationError> {
        check_capacity(&dictionary, window_capacity)?;
        Ok(Self {
            dictionary,
            mode,
            window_capacity,
        })
    }

    /// Create an analyzer from string options.
    ///
    /// See [`Config::from_options`] for the recognised keys.
    pub fn from_options(
        options: &HashMap<String, String>,
    ) -> std::result::Result<Self, InitializationError> {
        Self::new(&Config::from_options(options)?)
    }

    /// A new segmenter over `source`
    pub fn tokenizer<S: CharSource>(&self, source: S) -> Segmenter<S> {
        Segmenter::from_checked(
            Arc::clone(&self.dictionary),
            self.mode,
            self.window_capacity,
            source,
        )
    }

    /// Segment a whole string
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        self.tokenizer(StrSource::new(text)).collect()
    }

    /// Segment UTF-8 text from a reader
    pub fn analyze_reader<R: Read>(&self, reader: R) -> Result<Vec<Token>> {
        self.tokenizer(Utf8Source::new(reader)).collect()
    }

    /// Shared dictionary
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Resolution mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Window capacity handed to each segmenter
    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }
}
