//! Segment command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use encoding_rs::Encoding;
use paoding_core::{Analyzer, Config, ConfigBuilder, Token};
use rayon::prelude::*;

use crate::input::{resolve_patterns, FileReader};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Text to segment; each argument is a separate input
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Input files or patterns (supports glob); stdin is read when neither
    /// text nor files are given
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Character encoding of input files and stdin
    #[arg(short, long, value_name = "ENCODING")]
    pub encoding: Option<String>,

    /// Resolution mode: most-words or max-word-length
    #[arg(short, long, value_name = "MODE", env = "PAODING_MODE")]
    pub mode: Option<String>,

    /// Dictionary file or directory, or `bundled`
    #[arg(short, long, value_name = "DICTIONARY", env = "PAODING_DICTIONARY")]
    pub dictionary: Option<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Window capacity in characters
    #[arg(short = 'w', long, value_name = "CHARS")]
    pub window_capacity: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Words separated by `/`, one line per input
    Text,
    /// JSON array of token lists with offsets and types
    Json,
}

/// Tokens of one input
#[derive(Debug)]
pub struct Segmented {
    /// Where the text came from
    pub label: String,
    /// Tokens in input order
    pub tokens: Vec<Token>,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = self.build_config()?;
        log::info!(
            "dictionary {}, mode {}, window {} chars",
            config.dictionary(),
            config.mode(),
            config.window_capacity()
        );
        let analyzer = Analyzer::new(&config)
            .with_context(|| format!("Failed to load dictionary {}", config.dictionary()))?;

        let results = self.segment_all(&analyzer)?;
        let token_count: usize = results.iter().map(|r| r.tokens.len()).sum();
        log::info!("segmented {} input(s) into {token_count} tokens", results.len());

        let mut formatter = self.create_formatter(results.len() > 1)?;
        for result in &results {
            formatter.format_tokens(&result.label, &result.tokens)?;
        }
        formatter.finish()
    }

    /// Configuration file first, then command-line overrides
    pub fn build_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        let mut builder = ConfigBuilder::from(base);
        if let Some(dictionary) = &self.dictionary {
            builder = builder.dictionary(dictionary.as_str());
        }
        if let Some(mode) = &self.mode {
            builder = builder.mode_name(mode);
        }
        if let Some(capacity) = self.window_capacity {
            builder = builder.window_capacity(capacity);
        }
        Ok(builder.build()?)
    }

    fn segment_all(&self, analyzer: &Analyzer) -> Result<Vec<Segmented>> {
        let encoding = FileReader::encoding(self.encoding.as_deref())?;
        let mut results = Vec::new();

        for (index, text) in self.text.iter().enumerate() {
            results.push(Segmented {
                label: format!("text #{}", index + 1),
                tokens: analyzer.analyze(text)?,
            });
        }

        if !self.input.is_empty() {
            let files = resolve_patterns(&self.input)?;
            log::info!("segmenting {} file(s)", files.len());

            // One segmenter per file, all sharing the analyzer's dictionary.
            let segmented = files
                .par_iter()
                .map(|path| segment_file(analyzer, path, encoding))
                .collect::<Result<Vec<_>>>()?;
            results.extend(segmented);
        }

        if self.text.is_empty() && self.input.is_empty() {
            let source = FileReader::from_reader(io::stdin(), encoding)
                .context("Failed to read stdin")?;
            let tokens = analyzer
                .tokenizer(source)
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to segment stdin")?;
            results.push(Segmented {
                label: "stdin".to_string(),
                tokens,
            });
        }

        Ok(results)
    }

    fn create_formatter(&self, labelled: bool) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer).with_labels(labelled)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        })
    }
}

fn segment_file(analyzer: &Analyzer, path: &Path, encoding: &'static Encoding) -> Result<Segmented> {
    let source = FileReader::open(path, encoding)?;
    let tokens = analyzer
        .tokenizer(source)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to segment {}", path.display()))?;
    log::debug!("{}: {} tokens", path.display(), tokens.len());
    Ok(Segmented {
        label: path.display().to_string(),
        tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paoding_core::{DictionarySource, Mode};
    use std::fs;
    use tempfile::TempDir;

    fn args() -> SegmentArgs {
        SegmentArgs {
            text: Vec::new(),
            input: Vec::new(),
            encoding: None,
            mode: None,
            dictionary: None,
            config: None,
            window_capacity: None,
            output: None,
            format: OutputFormat::Text,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_build_config_defaults() {
        let config = args().build_config().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_build_config_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paoding.toml");
        fs::write(&path, "[segmenter]\nmode = \"max\"\nwindow_capacity = 64\n").unwrap();

        let mut args = args();
        args.config = Some(path);
        args.window_capacity = Some(32);
        args.dictionary = Some("words.dic".to_string());

        let config = args.build_config().unwrap();
        assert_eq!(config.mode(), Mode::MaxWordLength);
        assert_eq!(config.window_capacity(), 32);
        assert_eq!(
            config.dictionary(),
            &DictionarySource::Path(PathBuf::from("words.dic"))
        );
    }

    #[test]
    fn test_unknown_mode_is_not_an_error() {
        let mut args = args();
        args.mode = Some("turbo".to_string());
        assert_eq!(args.build_config().unwrap().mode(), Mode::MostWords);
    }

    #[test]
    fn test_segment_files_keep_order() {
        let dir = TempDir::new().unwrap();
        for (name, text) in [("a.txt", "中华人民共和国"), ("b.txt", "你好"), ("c.txt", "")] {
            fs::write(dir.path().join(name), text).unwrap();
        }

        let mut args = args();
        args.input = vec![format!("{}/*.txt", dir.path().display())];
        let analyzer = Analyzer::new(&args.build_config().unwrap()).unwrap();
        let results = args.segment_all(&analyzer).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].label.ends_with("a.txt"));
        assert_eq!(results[1].tokens[0].text, "你好");
        assert!(results[2].tokens.is_empty());
    }
}
