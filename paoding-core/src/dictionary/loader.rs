//! Dictionary text format and source loading
//!
//! One entry per line: `word` or `word <type>`. Blank lines and lines starting
//! with `#` are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Dictionary, DictionaryBuilder, DictionarySource, WordType};
use crate::InitializationError;

/// Identifier of the dictionary compiled into the crate
pub const BUNDLED_IDENTIFIER: &str = "bundled";

/// File extension of dictionary files inside a directory source
const DICTIONARY_EXTENSION: &str = "dic";

static BUNDLED: &str = include_str!("../../configs/dictionaries/default.dic");

pub(super) fn load(source: &DictionarySource) -> Result<Dictionary, InitializationError> {
    match source {
        DictionarySource::Bundled => Dictionary::parse(BUNDLED, BUNDLED_IDENTIFIER),
        DictionarySource::Path(path) => load_path(path),
    }
}

fn load_path(path: &Path) -> Result<Dictionary, InitializationError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InitializationError::DictionaryNotFound {
            path: path.to_path_buf(),
        },
        _ => InitializationError::DictionaryUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let files = if metadata.is_dir() {
        dictionary_files(path)?
    } else {
        vec![path.to_path_buf()]
    };

    let mut builder = DictionaryBuilder::new(path.display().to_string());
    for file in &files {
        let text = fs::read_to_string(file).map_err(|e| InitializationError::DictionaryUnreadable {
            path: file.clone(),
            source: e,
        })?;
        let origin = file.display().to_string();
        parse_into(&mut builder, &text, &origin)?;
    }

    log::debug!(
        "loaded {} dictionary words from {} file(s) under {}",
        builder.len(),
        files.len(),
        path.display()
    );
    Ok(builder.build())
}

/// `.dic` files directly inside `dir`, sorted by name
fn dictionary_files(dir: &Path) -> Result<Vec<PathBuf>, InitializationError> {
    let unreadable = |e| InitializationError::DictionaryUnreadable {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for item in fs::read_dir(dir).map_err(unreadable)? {
        let path = item.map_err(unreadable)?.path();
        let is_dic = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DICTIONARY_EXTENSION));
        if is_dic && path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(InitializationError::EmptySource {
            path: dir.to_path_buf(),
        });
    }
    files.sort();
    Ok(files)
}

pub(super) fn parse_into(
    builder: &mut DictionaryBuilder,
    text: &str,
    origin: &str,
) -> Result<(), InitializationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = |reason: String| InitializationError::MalformedEntry {
            origin: origin.to_string(),
            line: index + 1,
            reason,
        };

        let mut fields = line.split_whitespace();
        let word = fields.next().unwrap_or_default();
        let word_type = match fields.next() {
            Some(tag) => tag.parse::<WordType>().map_err(malformed)?,
            None => WordType::Word,
        };
        if fields.next().is_some() {
            return Err(malformed("expected `word [type]`".to_string()));
        }
        if word.chars().any(char::is_control) {
            return Err(malformed(format!("control character in word {word:?}")));
        }

        builder.insert(word, word_type);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_lines() {
        let text = "\u{feff}# comment\n中华\n\n  人民  word \n一百\tnumeral\nQQ letter\n";
        let dictionary = Dictionary::parse(text, "test.dic").unwrap();
        assert_eq!(dictionary.len(), 4);
        assert_eq!(dictionary.origin(), "test.dic");
        assert!(dictionary.contains("中华"));
        assert!(dictionary.contains("人民"));
        assert_eq!(dictionary.entry("一百").unwrap().word_type(), WordType::Numeral);
        assert_eq!(dictionary.entry("QQ").unwrap().word_type(), WordType::Letter);
    }

    #[test]
    fn test_parse_unknown_tag() {
        match Dictionary::parse("中华\n人民 verb\n", "bad.dic") {
            Err(InitializationError::MalformedEntry { origin, line, reason }) => {
                assert_eq!(origin, "bad.dic");
                assert_eq!(line, 2);
                assert!(reason.contains("verb"));
            }
            other => panic!("Expected MalformedEntry, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_too_many_fields() {
        let err = Dictionary::parse("中华 word extra\n", "bad.dic").unwrap_err();
        assert!(matches!(err, InitializationError::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn test_parse_control_character() {
        let err = Dictionary::parse("中\u{7}华\n", "bad.dic").unwrap_err();
        assert!(matches!(err, InitializationError::MalformedEntry { line: 1, .. }));
    }

    #[test]
    fn test_bundled_dictionary_loads() {
        let dictionary = load(&DictionarySource::Bundled).unwrap();
        assert!(!dictionary.is_empty());
        assert!(dictionary.contains("中华"));
        assert!(dictionary.contains("共和国"));
        assert!(dictionary.max_word_len() <= crate::config::defaults::WINDOW_CAPACITY);
    }

    #[test]
    fn test_load_missing_path() {
        let source = DictionarySource::Path(PathBuf::from("/nonexistent/paoding/words.dic"));
        assert!(matches!(
            load(&source),
            Err(InitializationError::DictionaryNotFound { .. })
        ));
    }

    #[test]
    fn test_load_directory_in_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.dic"), "人民 numeral\n").unwrap();
        fs::write(dir.path().join("a.dic"), "人民\n中华\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a dictionary\n").unwrap();

        let dictionary = load(&DictionarySource::Path(dir.path().to_path_buf())).unwrap();
        assert_eq!(dictionary.len(), 2);
        // b.dic is read after a.dic, so its type wins
        assert_eq!(dictionary.entry("人民").unwrap().word_type(), WordType::Numeral);
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load(&DictionarySource::Path(dir.path().to_path_buf())),
            Err(InitializationError::EmptySource { .. })
        ));
    }

    #[test]
    fn test_load_invalid_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.dic");
        fs::write(&path, [0xFF, 0xFE, 0x00]).unwrap();
        assert!(matches!(
            load(&DictionarySource::Path(path)),
            Err(InitializationError::DictionaryUnreadable { .. })
        ));
    }
}
