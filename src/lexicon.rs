//! Lexical resources: the bridge dictionary, lemma tables and stop words.
//!
//! Resources are read through a [`ResourceLoader`] on first use and kept for
//! the lifetime of the [`LexicalResources`] value.

use std::sync::Arc;

use ahash::AHashMap;
use log::info;
use parking_lot::Mutex;

use crate::error::Result;
use crate::language::Language;

pub mod dictionary;
pub mod lemma;
pub mod loader;
pub mod stop_words;

pub use dictionary::{BilingualEntry, BridgeDictionary};
pub use lemma::LemmaTable;
pub use loader::{FileResourceLoader, MemoryResourceLoader, ResourceLoader};
pub use stop_words::StopWords;

/// Lazily loaded, memoised lexical resources.
pub struct LexicalResources {
    loader: Arc<dyn ResourceLoader>,
    dictionary: Mutex<Option<Arc<BridgeDictionary>>>,
    lemmas: Mutex<AHashMap<Language, Arc<LemmaTable>>>,
    stop_words: Mutex<AHashMap<Language, Arc<StopWords>>>,
}

impl LexicalResources {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        LexicalResources {
            loader,
            dictionary: Mutex::new(None),
            lemmas: Mutex::new(AHashMap::new()),
            stop_words: Mutex::new(AHashMap::new()),
        }
    }

    /// The bridge dictionary, loaded on first call.
    pub fn dictionary(&self) -> Result<Arc<BridgeDictionary>> {
        let mut slot = self.dictionary.lock();
        if let Some(dictionary) = slot.as_ref() {
            return Ok(Arc::clone(dictionary));
        }

        info!("Loading bridge dictionary");
        let dictionary = Arc::new(BridgeDictionary::from_entries(
            self.loader.dictionary_entries()?,
        ));
        info!(
            "Bridge dictionary loaded: {} entries, {} headwords",
            dictionary.entries().len(),
            dictionary.headwords().len()
        );
        *slot = Some(Arc::clone(&dictionary));
        Ok(dictionary)
    }

    /// The lemma table of a language, loaded on first call.
    pub fn lemmas(&self, language: Language) -> Result<Arc<LemmaTable>> {
        let mut tables = self.lemmas.lock();
        if let Some(table) = tables.get(&language) {
            return Ok(Arc::clone(table));
        }

        info!("Loading lemma dictionary for {language}");
        let table = Arc::new(LemmaTable::from_rows(self.loader.lemma_rows(language)?));
        tables.insert(language, Arc::clone(&table));
        Ok(table)
    }

    /// The stop words of a language, loaded on first call.
    pub fn stop_words(&self, language: Language) -> Result<Arc<StopWords>> {
        let mut sets = self.stop_words.lock();
        if let Some(set) = sets.get(&language) {
            return Ok(Arc::clone(set));
        }

        info!("Loading stop words for {language}");
        let set = Arc::new(StopWords::from_words(self.loader.stop_words(language)?));
        sets.insert(language, Arc::clone(&set));
        Ok(set)
    }
}
