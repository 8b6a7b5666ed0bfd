//! Pull-based tokenization driver
//!
//! Each refill runs one push phase (matcher into collector) and materializes
//! the settled batch; tokens are then handed out one at a time with offsets
//! rebased to the start of the input.

use std::sync::Arc;

use crate::collector::Collector;
use crate::config::{defaults, Config, Mode};
use crate::dictionary::{registry, Dictionary};
use crate::error::{InitializationError, Result};
use crate::matcher::Matcher;
use crate::source::CharSource;
use crate::token::Token;
use crate::window::Window;

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The window must be refilled before anything can be emitted
    NeedsRefill,
    /// A finalized batch is being handed out
    HasPendingTokens,
    /// Input exhausted and every token emitted
    EndOfStream,
}

/// Streaming segmenter over a [`CharSource`].
///
/// One instance serves one stream at a time. Create one per consumer; once
/// the dictionary is cached that only costs the window allocation.
#[derive(Debug)]
pub struct Segmenter<S> {
    source: S,
    window: Window,
    matcher: Matcher,
    collector: Collector,
    pending: std::vec::IntoIter<Token>,
    state: State,
}

impl<S: CharSource> Segmenter<S> {
    /// Build a segmenter from configuration, loading the dictionary through
    /// the process-wide registry
    pub fn new(config: &Config, source: S) -> std::result::Result<Self, InitializationError> {
        config.validate()?;
        let dictionary = registry::get_or_load(config.dictionary())?;
        Self::with_dictionary(dictionary, config.mode(), config.window_capacity(), source)
    }

    /// Build a segmenter over an already loaded dictionary
    pub fn with_dictionary(
        dictionary: Arc<Dictionary>,
        mode: Mode,
        window_capacity: usize,
        source: S,
    ) -> std::result::Result<Self, InitializationError> {
        check_capacity(&dictionary, window_capacity)?;
        Ok(Self::from_checked(dictionary, mode, window_capacity, source))
    }

    /// Assemble a segmenter whose capacity was already checked
    pub(crate) fn from_checked(
        dictionary: Arc<Dictionary>,
        mode: Mode,
        window_capacity: usize,
        source: S,
    ) -> Self {
        Self {
            source,
            window: Window::new(window_capacity),
            matcher: Matcher::new(dictionary),
            collector: Collector::new(mode),
            pending: Vec::new().into_iter(),
            state: State::NeedsRefill,
        }
    }

    /// Next token, `Ok(None)` once the input is exhausted.
    ///
    /// Errors from the source are returned unchanged and the read is not
    /// retried. After end of stream every call returns `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            if let Some(token) = self.pending.next() {
                return Ok(Some(token));
            }
            match self.state {
                State::EndOfStream => return Ok(None),
                State::HasPendingTokens | State::NeedsRefill => {
                    self.state = State::NeedsRefill;
                    self.fill_batch()?;
                }
            }
        }
    }

    fn fill_batch(&mut self) -> Result<()> {
        if self.window.is_drained() {
            self.state = State::EndOfStream;
            return Ok(());
        }

        let cursor = self.window.cursor();
        let read = self.window.shift_and_refill(cursor, &mut self.source)?;
        if read == 0 && !self.window.is_full() {
            self.window.mark_end();
        }

        let resolution = self.matcher.scan(&self.window, &mut self.collector);
        let offset = self.window.offset();
        let batch: Vec<Token> = self
            .collector
            .finalize(self.window.chars(), resolution.from, resolution.resolved)
            .into_iter()
            .map(|token| token.shifted(offset))
            .collect();
        self.window.resolve_to(resolution.resolved);

        log::trace!(
            "scan at offset {offset}: resolved {}..{} of {}, {} tokens",
            resolution.from,
            resolution.resolved,
            resolution.valid,
            batch.len()
        );

        self.state = if !batch.is_empty() {
            State::HasPendingTokens
        } else if self.window.is_drained() {
            State::EndOfStream
        } else {
            State::NeedsRefill
        };
        self.pending = batch.into_iter();
        Ok(())
    }

    /// Restart on a new input, keeping dictionary and buffers
    pub fn reset(&mut self, source: S) {
        self.source = source;
        self.window.reset();
        self.collector.clear();
        self.pending = Vec::new().into_iter();
        self.state = State::NeedsRefill;
    }

    /// Current driver state
    pub fn state(&self) -> State {
        self.state
    }

    /// Resolution mode
    pub fn mode(&self) -> Mode {
        self.collector.mode()
    }

    /// Shared dictionary
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        self.matcher.dictionary()
    }

    /// Window capacity in characters
    pub fn window_capacity(&self) -> usize {
        self.window.capacity()
    }

    /// Input source
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: CharSource> Iterator for Segmenter<S> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

pub(crate) fn check_capacity(
    dictionary: &Dictionary,
    window_capacity: usize,
) -> std::result::Result<(), InitializationError> {
    if window_capacity < defaults::MIN_WINDOW_CAPACITY {
        return Err(InitializationError::InvalidConfig(format!(
            "window_capacity must be at least {}",
            defaults::MIN_WINDOW_CAPACITY
        )));
    }
    if window_capacity < dictionary.max_word_len() {
        return Err(InitializationError::WindowTooSmall {
            capacity: window_capacity,
            longest: dictionary.max_word_len(),
        });
    }
    Ok(())
}
