//! Segmenter configuration
//!
//! A configuration is a dictionary source plus a resolution mode and window
//! capacity. It can be built in code, read from a TOML file, or assembled
//! from a string option map as an indexing framework would pass it.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dictionary::DictionarySource;
use crate::InitializationError;

/// Default configuration constants
pub mod defaults {
    /// Default window capacity in characters
    pub const WINDOW_CAPACITY: usize = 128;

    /// Smallest window the builder accepts
    pub const MIN_WINDOW_CAPACITY: usize = 2;

    /// Mode name used when none is given
    pub const MODE: &str = "most-words";
}

/// Option-map keys understood by [`Config::from_options`]
pub mod keys {
    /// Dictionary resource identifier
    pub const DICTIONARY: &str = "dictionary";
    /// Legacy alias for [`DICTIONARY`]
    pub const PROPERTIES_PATH: &str = "propertiesPath";
    /// Resolution mode name
    pub const MODE: &str = "mode";
    /// Path of a TOML configuration file used as the base
    pub const CONFIG: &str = "config";
    /// Window capacity in characters
    pub const WINDOW_CAPACITY: &str = "window_capacity";
}

/// How overlapping dictionary matches are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Favour more, shorter words
    #[default]
    MostWords,
    /// Favour the longest word at each position
    MaxWordLength,
}

impl Mode {
    /// Resolve a mode name.
    ///
    /// Matching is case-insensitive. `"default"`, an empty name and any
    /// unrecognised name all select [`Mode::MostWords`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "most-words" | "most_words" | "mostwords" | "default" => Mode::MostWords,
            "max-word-length" | "max_word_length" | "maxwordlength" | "max" => {
                Mode::MaxWordLength
            }
            other => {
                log::debug!("unknown segmentation mode '{other}', using most-words");
                Mode::MostWords
            }
        }
    }

    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Mode::MostWords => "most-words",
            Mode::MaxWordLength => "max-word-length",
        }
    }

    /// All modes
    pub fn all() -> [Mode; 2] {
        [Mode::MostWords, Mode::MaxWordLength]
    }
}

impl FromStr for Mode {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(Mode::from_name(name))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Segmenter configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) dictionary: DictionarySource,
    pub(crate) mode: Mode,
    pub(crate) window_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionarySource::default(),
            mode: Mode::default(),
            window_capacity: defaults::WINDOW_CAPACITY,
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Dictionary source
    pub fn dictionary(&self) -> &DictionarySource {
        &self.dictionary
    }

    /// Resolution mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Window capacity in characters
    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<(), InitializationError> {
        if self.window_capacity < defaults::MIN_WINDOW_CAPACITY {
            return Err(InitializationError::InvalidConfig(format!(
                "window_capacity must be at least {}",
                defaults::MIN_WINDOW_CAPACITY
            )));
        }
        Ok(())
    }

    /// Parse TOML configuration text; relative dictionary paths are kept as-is
    pub fn from_toml_str(text: &str) -> Result<Self, InitializationError> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|e| InitializationError::InvalidConfig(e.to_string()))?;
        file.into_builder(None).build()
    }

    /// Read a TOML configuration file.
    ///
    /// A relative dictionary path is resolved against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitializationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            InitializationError::InvalidConfig(format!(
                "failed to read {}: {e}",
                path.display()
            ))
        })?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| {
            InitializationError::InvalidConfig(format!("{}: {e}", path.display()))
        })?;
        file.into_builder(path.parent()).build()
    }

    /// Assemble a configuration from string options.
    ///
    /// Recognised keys are listed in [`keys`]. When `config` is present the
    /// file is loaded first and the other keys override it. Unknown keys are
    /// ignored.
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, InitializationError> {
        let mut builder = match options.get(keys::CONFIG) {
            Some(path) => ConfigBuilder::from(Config::from_file(path)?),
            None => ConfigBuilder::new(),
        };

        if let Some(identifier) = options
            .get(keys::DICTIONARY)
            .or_else(|| options.get(keys::PROPERTIES_PATH))
        {
            builder = builder.dictionary(DictionarySource::from_identifier(identifier));
        }
        if let Some(name) = options.get(keys::MODE) {
            builder = builder.mode_name(name);
        }
        if let Some(capacity) = options.get(keys::WINDOW_CAPACITY) {
            let capacity = capacity.trim().parse::<usize>().map_err(|e| {
                InitializationError::InvalidConfig(format!(
                    "window_capacity '{capacity}' is not a number: {e}"
                ))
            })?;
            builder = builder.window_capacity(capacity);
        }

        builder.build()
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    dictionary: Option<DictionarySource>,
    mode: Option<Mode>,
    window_capacity: Option<usize>,
}

impl From<Config> for ConfigBuilder {
    fn from(config: Config) -> Self {
        Self {
            dictionary: Some(config.dictionary),
            mode: Some(config.mode),
            window_capacity: Some(config.window_capacity),
        }
    }
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dictionary source
    pub fn dictionary(mut self, source: impl Into<DictionarySource>) -> Self {
        self.dictionary = Some(source.into());
        self
    }

    /// Set the resolution mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the resolution mode by name; unknown names fall back to most-words
    pub fn mode_name(self, name: &str) -> Self {
        self.mode(Mode::from_name(name))
    }

    /// Set the window capacity in characters
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = Some(capacity);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config, InitializationError> {
        let mut config = Config::default();

        if let Some(source) = self.dictionary {
            config.dictionary = source;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(capacity) = self.window_capacity {
            config.window_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }
}

/// TOML schema of a configuration file
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Dictionary settings
    pub dictionary: DictionarySection,
    /// Segmenter settings
    pub segmenter: SegmenterSection,
}

/// `[dictionary]` table
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictionarySection {
    /// Resource identifier: `bundled`, or a file or directory path
    pub source: Option<String>,
}

/// `[segmenter]` table
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterSection {
    /// Mode name
    pub mode: Option<String>,
    /// Window capacity in characters
    pub window_capacity: Option<usize>,
}

impl ConfigFile {
    fn into_builder(self, base: Option<&Path>) -> ConfigBuilder {
        let mut builder = ConfigBuilder::new();

        if let Some(identifier) = self.dictionary.source {
            let source = match DictionarySource::from_identifier(&identifier) {
                DictionarySource::Path(path) if path.is_relative() => match base {
                    Some(base) => DictionarySource::Path(base.join(path)),
                    None => DictionarySource::Path(path),
                },
                other => other,
            };
            builder = builder.dictionary(source);
        }
        if let Some(name) = self.segmenter.mode {
            builder = builder.mode_name(&name);
        }
        if let Some(capacity) = self.segmenter.window_capacity {
            builder = builder.window_capacity(capacity);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::from_name("most-words"), Mode::MostWords);
        assert_eq!(Mode::from_name("MAX-WORD-LENGTH"), Mode::MaxWordLength);
        assert_eq!(Mode::from_name("max"), Mode::MaxWordLength);
        assert_eq!(Mode::from_name("default"), Mode::MostWords);
        assert_eq!(Mode::from_name(""), Mode::MostWords);
        assert_eq!(Mode::MaxWordLength.to_string(), "max-word-length");
    }

    #[test]
    fn test_unknown_mode_falls_back_to_most_words() {
        assert_eq!(Mode::from_name("fastest"), Mode::MostWords);
        assert_eq!("complex".parse::<Mode>(), Ok(Mode::MostWords));
        let config = Config::builder().mode_name("no-such-mode").build().unwrap();
        assert_eq!(config.mode(), Mode::MostWords);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dictionary(), &DictionarySource::Bundled);
        assert_eq!(config.mode(), Mode::MostWords);
        assert_eq!(config.window_capacity(), defaults::WINDOW_CAPACITY);
    }

    #[test]
    fn test_builder_validation() {
        let err = Config::builder().window_capacity(1).build().unwrap_err();
        assert!(matches!(err, InitializationError::InvalidConfig(_)));

        let config = Config::builder()
            .dictionary("dic/words.dic")
            .mode(Mode::MaxWordLength)
            .window_capacity(16)
            .build()
            .unwrap();
        assert_eq!(
            config.dictionary(),
            &DictionarySource::Path(PathBuf::from("dic/words.dic"))
        );
        assert_eq!(config.window_capacity(), 16);
    }

    #[test]
    fn test_from_toml_str() {
        let config = Config::from_toml_str(
            r#"
[dictionary]
source = "bundled"

[segmenter]
mode = "max-word-length"
window_capacity = 64
"#,
        )
        .unwrap();
        assert_eq!(config.dictionary(), &DictionarySource::Bundled);
        assert_eq!(config.mode(), Mode::MaxWordLength);
        assert_eq!(config.window_capacity(), 64);

        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_fields() {
        let err = Config::from_toml_str("[segmenter]\nthreads = 4\n").unwrap_err();
        assert!(matches!(err, InitializationError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_file_resolves_relative_dictionary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paoding.toml");
        fs::write(&path, "[dictionary]\nsource = \"dic\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.dictionary(),
            &DictionarySource::Path(dir.path().join("dic"))
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file("/nonexistent/paoding.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/paoding.toml"));
    }

    #[test]
    fn test_from_options() {
        let mut options = HashMap::new();
        options.insert("propertiesPath".to_string(), "file:/opt/dic".to_string());
        options.insert("mode".to_string(), "max-word-length".to_string());
        options.insert("window_capacity".to_string(), "256".to_string());
        options.insert("unrelated".to_string(), "ignored".to_string());

        let config = Config::from_options(&options).unwrap();
        assert_eq!(
            config.dictionary(),
            &DictionarySource::Path(PathBuf::from("/opt/dic"))
        );
        assert_eq!(config.mode(), Mode::MaxWordLength);
        assert_eq!(config.window_capacity(), 256);
    }

    #[test]
    fn test_from_options_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paoding.toml");
        fs::write(&path, "[segmenter]\nmode = \"max\"\nwindow_capacity = 32\n").unwrap();

        let mut options = HashMap::new();
        options.insert("config".to_string(), path.display().to_string());
        options.insert("mode".to_string(), "most-words".to_string());

        let config = Config::from_options(&options).unwrap();
        assert_eq!(config.mode(), Mode::MostWords);
        assert_eq!(config.window_capacity(), 32);
    }

    #[test]
    fn test_from_options_bad_capacity() {
        let mut options = HashMap::new();
        options.insert("window_capacity".to_string(), "large".to_string());
        assert!(matches!(
            Config::from_options(&options),
            Err(InitializationError::InvalidConfig(_))
        ));
    }
}
