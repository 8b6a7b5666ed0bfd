//! Process-wide dictionary cache
//!
//! Each distinct [`DictionarySource`] is loaded at most once. Concurrent first
//! requests for the same source serialize on the registry lock and then all
//! observe the same `Arc<Dictionary>`. Failed loads are not cached.

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::{Dictionary, DictionarySource};
use crate::InitializationError;

static DICTIONARIES: OnceLock<Mutex<HashMap<DictionarySource, Arc<Dictionary>>>> =
    OnceLock::new();

/// Get the shared dictionary for `source`, loading it on first use
pub fn get_or_load(source: &DictionarySource) -> Result<Arc<Dictionary>, InitializationError> {
    let key = identity(source);
    let registry = DICTIONARIES.get_or_init(Default::default);
    let mut cache = registry.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(dictionary) = cache.get(&key) {
        log::trace!("dictionary cache hit for {key}");
        return Ok(Arc::clone(dictionary));
    }

    let dictionary = Arc::new(Dictionary::load(&key)?);
    log::debug!(
        "cached dictionary {key}: {} words, longest {} chars",
        dictionary.len(),
        dictionary.max_word_len()
    );
    cache.insert(key, Arc::clone(&dictionary));
    Ok(dictionary)
}

/// Sources currently held in the cache
pub fn cached_sources() -> Vec<DictionarySource> {
    DICTIONARIES
        .get()
        .map(|registry| {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .keys()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Paths that name the same file share one cache slot
fn identity(source: &DictionarySource) -> DictionarySource {
    match source {
        DictionarySource::Bundled => DictionarySource::Bundled,
        DictionarySource::Path(path) => {
            DictionarySource::Path(fs::canonicalize(path).unwrap_or_else(|_| path.clone()))
        }
    }
}
