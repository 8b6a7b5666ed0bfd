//! Error types for dictionary construction and segmentation

use std::path::PathBuf;
use thiserror::Error;

/// Failures that prevent a segmenter from being built.
///
/// These surface once, when the dictionary is first requested or the
/// segmenter is constructed. No partially built dictionary is ever exposed.
#[derive(Debug, Error)]
pub enum InitializationError {
    /// The dictionary path does not exist
    #[error("dictionary not found: {}", path.display())]
    DictionaryNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The dictionary exists but could not be read
    #[error("failed to read dictionary {}: {source}", path.display())]
    DictionaryUnreadable {
        /// The file or directory being read
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line could not be parsed
    #[error("malformed dictionary entry in {origin} at line {line}: {reason}")]
    MalformedEntry {
        /// Name of the dictionary file or resource
        origin: String,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// A dictionary directory held no `.dic` files
    #[error("no dictionary files found in {}", path.display())]
    EmptySource {
        /// The directory that was scanned
        path: PathBuf,
    },

    /// The window cannot hold the longest dictionary word
    #[error("window capacity {capacity} is smaller than the longest dictionary word ({longest} chars)")]
    WindowTooSmall {
        /// Configured window capacity
        capacity: usize,
        /// Longest word in the dictionary
        longest: usize,
    },

    /// Configuration could not be parsed or failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors returned by the segmentation API
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Construction failed
    #[error("initialization failed: {0}")]
    Initialization(#[from] InitializationError),

    /// The input source failed; passed through unmodified
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SegmentError {
    /// Whether this error came from the input stream rather than construction
    pub fn is_io(&self) -> bool {
        matches!(self, SegmentError::Io(_))
    }
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;
