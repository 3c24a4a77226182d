//! In-memory sources.

use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::Result;
use crate::language::Language;
use crate::source::{ContextSource, OccurrenceSource, Snippets};

/// Snippets registered up front; unknown words have none.
#[derive(Debug, Default)]
pub struct MemoryContextSource {
    snippets: RwLock<AHashMap<(Language, String), Snippets>>,
    fetches: AtomicUsize,
}

impl MemoryContextSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, word: &str, language: Language, snippets: Snippets) {
        self.snippets
            .write()
            .insert((language, word.to_string()), snippets);
    }

    /// Register body texts only.
    pub fn with_bodies<I, S>(self, word: &str, language: Language, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(
            word,
            language,
            Snippets::new(Vec::new(), bodies.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Number of fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContextSource for MemoryContextSource {
    fn fetch_snippets(&self, word: &str, language: Language) -> Result<Snippets> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .snippets
            .read()
            .get(&(language, word.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Occurrence counts registered up front; unknown words count 0.
#[derive(Debug, Default)]
pub struct MemoryOccurrenceSource {
    counts: RwLock<AHashMap<(Language, String), u64>>,
    fetches: AtomicUsize,
}

impl MemoryOccurrenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, word: &str, language: Language, count: u64) {
        self.counts.write().insert((language, word.to_string()), count);
    }

    pub fn with_count(self, word: &str, language: Language, count: u64) -> Self {
        self.insert(word, language, count);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl OccurrenceSource for MemoryOccurrenceSource {
    fn count(&self, word: &str, language: Language) -> Result<u64> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .counts
            .read()
            .get(&(language, word.to_string()))
            .copied()
            .unwrap_or(0))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_context_source() {
        let source = MemoryContextSource::new().with_bodies("вода", Language::Bg, ["студена вода"]);
        assert_eq!(
            source.fetch_snippets("вода", Language::Bg).unwrap().bodies,
            vec!["студена вода"]
        );
        assert!(source.fetch_snippets("вода", Language::Ru).unwrap().is_empty());
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn test_memory_occurrence_source() {
        let source = MemoryOccurrenceSource::new().with_count("beer", Language::En, 9);
        assert_eq!(source.count("beer", Language::En).unwrap(), 9);
        assert_eq!(source.count("wine", Language::En).unwrap(), 0);
        assert_eq!(source.fetch_count(), 2);
    }
}
