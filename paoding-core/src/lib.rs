//! Streaming dictionary-based Chinese word segmentation
//!
//! Text is pulled through a fixed-capacity window. A trie matcher reports
//! every dictionary word it sees, a collector resolves the overlaps into a
//! gap-free token sequence, and a small driver hands the tokens out one at a
//! time with global character offsets. Input of any length is processed in
//! bounded memory.
//!
//! # Architecture
//!
//! - [`dictionary`]: immutable trie-indexed word list, cached per source
//! - [`window`]: sliding character buffer with a resolved cursor
//! - [`matcher`]: candidate discovery and the resolved-length decision
//! - [`collector`]: the Most-Words and Max-Word-Length policies
//! - [`segmenter`]: the pull-based driver
//! - [`analyzer`]: segmenter factory for indexing integrations
//!
//! # Example
//!
//! ```rust
//! use paoding_core::{Analyzer, Dictionary, Mode};
//! use std::sync::Arc;
//!
//! let dictionary = Arc::new(Dictionary::from_words([
//!     "中华", "华人", "人民", "共和国", "共和", "国",
//! ]));
//!
//! let analyzer = Analyzer::with_dictionary(dictionary, Mode::MaxWordLength, 128).unwrap();
//! let words: Vec<String> = analyzer
//!     .analyze("中华人民共和国")
//!     .unwrap()
//!     .into_iter()
//!     .map(|token| token.text)
//!     .collect();
//! assert_eq!(words, ["中华", "人民", "共和国"]);
//! ```

pub mod analyzer;
mod chars;
pub mod collector;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod matcher;
pub mod segmenter;
pub mod source;
pub mod token;
pub mod window;

pub use analyzer::Analyzer;
pub use chars::CharClass;
pub use config::{Config, ConfigBuilder, Mode};
pub use dictionary::{Dictionary, DictionaryBuilder, DictionarySource, Entry, WordType};
pub use error::{InitializationError, Result, SegmentError};
pub use segmenter::{Segmenter, State};
pub use source::{CharSource, StrSource, Utf8Source};
pub use token::{Token, TokenType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dictionary_segments() {
        let analyzer = Analyzer::new(&Config::default()).unwrap();
        let words: Vec<String> = analyzer
            .analyze("中华人民共和国")
            .unwrap()
            .into_iter()
            .map(|token| token.text)
            .collect();
        assert_eq!(words.concat(), "中华人民共和国");
        assert!(words.len() >= 3);
    }

    #[test]
    fn test_crate_exports() {
        let _ = Mode::default();
        let _ = TokenType::Word;
        let _ = DictionarySource::Bundled;
        let _ = CharClass::of('中');
    }
}
