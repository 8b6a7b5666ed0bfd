//! Immutable word dictionary shared by every segmenter
//!
//! A [`Dictionary`] is built once per [`DictionarySource`] (see [`registry`])
//! and never mutated afterwards, so lookups need no locking.

mod loader;
pub mod registry;
mod trie;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub use loader::BUNDLED_IDENTIFIER;
pub use trie::{NodeId, Trie};

/// Coarse type tag carried by a dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WordType {
    /// Ordinary vocabulary word
    #[default]
    Word,
    /// Numeral such as 一百 or 第三
    Numeral,
    /// Latin-letter word
    Letter,
    /// Punctuation sequence
    Punctuation,
}

impl WordType {
    /// Tag used in dictionary files
    pub fn tag(&self) -> &'static str {
        match self {
            WordType::Word => "word",
            WordType::Numeral => "numeral",
            WordType::Letter => "letter",
            WordType::Punctuation => "punctuation",
        }
    }
}

impl FromStr for WordType {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "word" | "w" => Ok(WordType::Word),
            "numeral" | "num" | "m" => Ok(WordType::Numeral),
            "letter" | "x" => Ok(WordType::Letter),
            "punctuation" | "punct" | "p" => Ok(WordType::Punctuation),
            other => Err(format!("unknown type tag '{other}'")),
        }
    }
}

impl fmt::Display for WordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A word known to the dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    word: Arc<str>,
    word_type: WordType,
    char_len: usize,
}

impl Entry {
    /// Create an entry
    pub fn new(word: &str, word_type: WordType) -> Self {
        Self {
            word: Arc::from(word),
            word_type,
            char_len: word.chars().count(),
        }
    }

    /// The word text
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Shared handle to the word text
    pub fn word_arc(&self) -> Arc<str> {
        Arc::clone(&self.word)
    }

    /// Type tag
    pub fn word_type(&self) -> WordType {
        self.word_type
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.char_len
    }
}

/// Where a dictionary comes from; also its identity in the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DictionarySource {
    /// The dictionary compiled into the crate
    #[default]
    Bundled,
    /// A `.dic` file, or a directory of them
    Path(PathBuf),
}

impl DictionarySource {
    /// Parse a resource identifier.
    ///
    /// Empty strings and `"bundled"` (optionally `"bundled:"`-prefixed) select
    /// the bundled dictionary; a `file:` prefix is stripped; anything else is a
    /// filesystem path.
    pub fn from_identifier(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if identifier.is_empty()
            || identifier.eq_ignore_ascii_case(BUNDLED_IDENTIFIER)
            || identifier.starts_with("bundled:")
        {
            return DictionarySource::Bundled;
        }
        let path = identifier.strip_prefix("file:").unwrap_or(identifier);
        DictionarySource::Path(PathBuf::from(path))
    }
}

impl From<&str> for DictionarySource {
    fn from(identifier: &str) -> Self {
        Self::from_identifier(identifier)
    }
}

impl From<PathBuf> for DictionarySource {
    fn from(path: PathBuf) -> Self {
        DictionarySource::Path(path)
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Bundled => f.write_str(BUNDLED_IDENTIFIER),
            DictionarySource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read-only dictionary indexed for prefix lookup
#[derive(Debug, Clone)]
pub struct Dictionary {
    trie: Trie,
    entries: Vec<Entry>,
    max_word_len: usize,
    origin: String,
}

impl Dictionary {
    /// Build a dictionary from `(word, type)` pairs; empty words are skipped
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, WordType)>,
    {
        let mut builder = DictionaryBuilder::new("inline");
        for (word, word_type) in entries {
            builder.insert(word, word_type);
        }
        builder.build()
    }

    /// Build a dictionary of plain words
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_entries(words.into_iter().map(|w| (w, WordType::Word)))
    }

    /// Parse dictionary text; `origin` names it in error messages
    pub fn parse(text: &str, origin: &str) -> Result<Self, crate::InitializationError> {
        let mut builder = DictionaryBuilder::new(origin);
        builder.load_text(text, origin)?;
        Ok(builder.build())
    }

    /// Load a dictionary from its source, bypassing the registry
    pub fn load(source: &DictionarySource) -> Result<Self, crate::InitializationError> {
        loader::load(source)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no words
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in characters of the longest word
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Name of the file or resource this dictionary was read from
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Look up a whole word
    pub fn entry(&self, word: &str) -> Option<&Entry> {
        self.trie
            .find(word)
            .and_then(|node| self.trie.entry_at(node))
            .map(|index| &self.entries[index as usize])
    }

    /// Whether `word` is a dictionary word
    pub fn contains(&self, word: &str) -> bool {
        self.entry(word).is_some()
    }

    /// Iterate all entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// The underlying trie, for prefix walks
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Entry terminating at `node`, if any
    #[inline]
    pub fn entry_at(&self, node: NodeId) -> Option<&Entry> {
        self.trie
            .entry_at(node)
            .map(|index| &self.entries[index as usize])
    }
}

/// Incremental dictionary construction
#[derive(Debug)]
pub struct DictionaryBuilder {
    trie: Trie,
    entries: Vec<Entry>,
    max_word_len: usize,
    origin: String,
}

impl DictionaryBuilder {
    /// Start an empty dictionary named `origin`
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            trie: Trie::new(),
            entries: Vec::new(),
            max_word_len: 0,
            origin: origin.into(),
        }
    }

    /// Add or retype a word; a later insert of the same word wins
    pub fn insert(&mut self, word: &str, word_type: WordType) -> &mut Self {
        if word.is_empty() {
            return self;
        }

        let entry = Entry::new(word, word_type);
        let existing = self
            .trie
            .find(word)
            .and_then(|node| self.trie.entry_at(node));
        match existing {
            Some(index) => self.entries[index as usize] = entry,
            None => {
                self.trie.insert(word, self.entries.len() as u32);
                self.max_word_len = self.max_word_len.max(entry.char_len());
                self.entries.push(entry);
            }
        }
        self
    }

    /// Parse dictionary text into this builder
    pub fn load_text(
        &mut self,
        text: &str,
        origin: &str,
    ) -> Result<&mut Self, crate::InitializationError> {
        loader::parse_into(self, text, origin)?;
        Ok(self)
    }

    /// Number of words so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into a dictionary
    pub fn build(self) -> Dictionary {
        Dictionary {
            trie: self.trie,
            entries: self.entries,
            max_word_len: self.max_word_len,
            origin: self.origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        let dictionary = Dictionary::from_words(["中华", "华人", "共和国"]);
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.max_word_len(), 3);
        assert!(dictionary.contains("华人"));
        assert!(!dictionary.contains("华"));
        assert_eq!(dictionary.entry("共和国").unwrap().char_len(), 3);
    }

    #[test]
    fn test_duplicate_word_keeps_latest_type() {
        let dictionary = Dictionary::from_entries([
            ("一百", WordType::Word),
            ("一百", WordType::Numeral),
            ("", WordType::Word),
        ]);
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.entry("一百").unwrap().word_type(), WordType::Numeral);
    }

    #[test]
    fn test_word_type_tags() {
        assert_eq!("word".parse::<WordType>(), Ok(WordType::Word));
        assert_eq!("Numeral".parse::<WordType>(), Ok(WordType::Numeral));
        assert_eq!("x".parse::<WordType>(), Ok(WordType::Letter));
        assert_eq!("punct".parse::<WordType>(), Ok(WordType::Punctuation));
        assert!("verb".parse::<WordType>().is_err());
        assert_eq!(WordType::Letter.to_string(), "letter");
    }

    #[test]
    fn test_source_identifiers() {
        assert_eq!(DictionarySource::from_identifier(""), DictionarySource::Bundled);
        assert_eq!(DictionarySource::from_identifier("bundled"), DictionarySource::Bundled);
        assert_eq!(
            DictionarySource::from_identifier("bundled:default"),
            DictionarySource::Bundled
        );
        assert_eq!(
            DictionarySource::from_identifier("file:/opt/dic"),
            DictionarySource::Path(PathBuf::from("/opt/dic"))
        );
        assert_eq!(
            DictionarySource::from_identifier(" dic/words.dic "),
            DictionarySource::Path(PathBuf::from("dic/words.dic"))
        );
        assert_eq!(DictionarySource::Bundled.to_string(), "bundled");
    }

    #[test]
    fn test_entry_at_walk() {
        let dictionary = Dictionary::from_words(["人民"]);
        let trie = dictionary.trie();
        let node = trie.step(trie.root(), '人').unwrap();
        assert!(dictionary.entry_at(node).is_none());
        let node = trie.step(node, '民').unwrap();
        assert_eq!(dictionary.entry_at(node).unwrap().word(), "人民");
    }
}
