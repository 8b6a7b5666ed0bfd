//! Tokens emitted by the segmenter

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dictionary::WordType;

/// Coarse type label of an emitted token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Dictionary word
    Word,
    /// Dictionary numeral or a run of digits
    Numeral,
    /// Dictionary letter word or a run of Latin letters
    Letter,
    /// Run mixing Latin letters and digits
    Alphanumeric,
    /// Punctuation, from the dictionary or a single character
    Punctuation,
    /// A single whitespace character
    Whitespace,
    /// Any other character no dictionary word covered
    Character,
}

impl TokenType {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Word => "word",
            TokenType::Numeral => "numeral",
            TokenType::Letter => "letter",
            TokenType::Alphanumeric => "alphanumeric",
            TokenType::Punctuation => "punctuation",
            TokenType::Whitespace => "whitespace",
            TokenType::Character => "character",
        }
    }
}

impl From<WordType> for TokenType {
    fn from(word_type: WordType) -> Self {
        match word_type {
            WordType::Word => TokenType::Word,
            WordType::Numeral => TokenType::Numeral,
            WordType::Letter => TokenType::Letter,
            WordType::Punctuation => TokenType::Punctuation,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One indexable unit of the input.
///
/// Offsets count characters and are global to the input stream: `start` is
/// inclusive, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Token text
    pub text: String,
    /// Offset of the first character
    pub start: usize,
    /// Offset one past the last character
    pub end: usize,
    /// Positions advanced from the previous token; always 1
    pub position_increment: u32,
    /// Type label
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Token {
    /// Create a token with a position increment of 1
    pub fn new(text: impl Into<String>, start: usize, end: usize, token_type: TokenType) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            position_increment: 1,
            token_type,
        }
    }

    /// Number of characters covered
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    /// The same token moved `delta` characters forward
    pub(crate) fn shifted(mut self, delta: usize) -> Self {
        self.start += delta;
        self.end += delta;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}-{})", self.text, self.start, self.end)
    }
}
