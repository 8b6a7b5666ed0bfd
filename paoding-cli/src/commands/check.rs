//! Check command implementation

use anyhow::Result;
use clap::Args;
use paoding_core::config::defaults;
use paoding_core::{Dictionary, DictionarySource, WordType};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Dictionary file or directory to check, or `bundled`
    #[arg(short, long, value_name = "DICTIONARY", default_value = "bundled")]
    pub dictionary: String,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<()> {
        let source = DictionarySource::from_identifier(&self.dictionary);
        println!("Checking dictionary: {source}");

        match Dictionary::load(&source) {
            Ok(dictionary) => {
                println!("✓ Dictionary is valid!");
                println!("  Words: {}", dictionary.len());
                println!("  Longest word: {} chars", dictionary.max_word_len());
                for word_type in [WordType::Numeral, WordType::Letter, WordType::Punctuation] {
                    let count = dictionary
                        .entries()
                        .filter(|entry| entry.word_type() == word_type)
                        .count();
                    if count > 0 {
                        println!("  {word_type} entries: {count}");
                    }
                }
                if dictionary.max_word_len() > defaults::WINDOW_CAPACITY {
                    println!(
                        "  Note: needs a window capacity of at least {} (default {})",
                        dictionary.max_word_len(),
                        defaults::WINDOW_CAPACITY
                    );
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Dictionary is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Check failed: {}", e))
            }
        }
    }
}
