//! Cached, retried access to the external sources.

use std::sync::Arc;

use log::info;

use crate::config::RetryConfig;
use crate::error::Result;
use crate::language::Language;
use crate::source::{ContextSource, OccurrenceSource, RetryPolicy, Snippets};
use crate::storage::cache::{CacheKind, CacheStore};

/// Fetches snippets at most once per word and language.
pub struct SnippetFetcher {
    source: Arc<dyn ContextSource>,
    cache: Arc<CacheStore>,
    retry: RetryPolicy,
}

impl SnippetFetcher {
    pub fn new(source: Arc<dyn ContextSource>, cache: Arc<CacheStore>, retry: RetryPolicy) -> Self {
        SnippetFetcher {
            source,
            cache,
            retry,
        }
    }

    pub fn snippets(&self, word: &str, language: Language) -> Result<Snippets> {
        self.cache
            .get_or_compute(CacheKind::Snippets, language, word, || {
                info!(
                    "Fetching snippets of {word} ({language}) from {}",
                    self.source.name()
                );
                let what = format!("snippets of {word} ({language})");
                self.retry
                    .run(&what, || self.source.fetch_snippets(word, language))
            })
    }
}

/// Counts occurrences at most once per word and language.
///
/// Shared by the context builder and the prefetch workers.
pub struct OccurrenceCounter {
    source: Arc<dyn OccurrenceSource>,
    cache: Arc<CacheStore>,
    retry: RetryPolicy,
}

impl OccurrenceCounter {
    pub fn new(
        source: Arc<dyn OccurrenceSource>,
        cache: Arc<CacheStore>,
        retry: RetryPolicy,
    ) -> Self {
        OccurrenceCounter {
            source,
            cache,
            retry,
        }
    }

    pub fn from_config(
        source: Arc<dyn OccurrenceSource>,
        cache: Arc<CacheStore>,
        config: &RetryConfig,
    ) -> Self {
        Self::new(source, cache, RetryPolicy::from_config(config))
    }

    pub fn count(&self, word: &str, language: Language) -> Result<u64> {
        self.cache
            .get_or_compute(CacheKind::Occurrences, language, word, || {
                info!(
                    "Fetching occurrences of {word} ({language}) from {}",
                    self.source.name()
                );
                let what = format!("occurrences of {word} ({language})");
                self.retry.run(&what, || self.source.count(word, language))
            })
    }

    /// The count if it has already been fetched.
    pub fn cached_count(&self, word: &str, language: Language) -> Result<Option<u64>> {
        self.cache.get(CacheKind::Occurrences, language, word)
    }

    pub fn is_cached(&self, word: &str, language: Language) -> Result<bool> {
        self.cache.contains(CacheKind::Occurrences, language, word)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::FalseFriendsError;
    use crate::source::memory::{MemoryContextSource, MemoryOccurrenceSource};

    #[test]
    fn test_snippets_fetched_once() {
        let source =
            Arc::new(MemoryContextSource::new().with_bodies("вода", Language::Bg, ["студена вода"]));
        let fetcher = SnippetFetcher::new(
            source.clone(),
            Arc::new(CacheStore::in_memory()),
            RetryPolicy::immediate(3),
        );

        for _ in 0..3 {
            let snippets = fetcher.snippets("вода", Language::Bg).unwrap();
            assert_eq!(snippets.bodies.len(), 1);
        }
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_counts_fetched_once() {
        let source = Arc::new(MemoryOccurrenceSource::new().with_count("вода", Language::Bg, 5));
        let counter = OccurrenceCounter::new(
            source.clone(),
            Arc::new(CacheStore::in_memory()),
            RetryPolicy::immediate(3),
        );

        assert_eq!(counter.cached_count("вода", Language::Bg).unwrap(), None);
        assert_eq!(counter.count("вода", Language::Bg).unwrap(), 5);
        assert_eq!(counter.count("вода", Language::Bg).unwrap(), 5);
        assert_eq!(counter.cached_count("вода", Language::Bg).unwrap(), Some(5));
        assert!(counter.is_cached("вода", Language::Bg).unwrap());
        assert_eq!(source.fetch_count(), 1);
    }

    struct FlakySource {
        failures: usize,
        calls: AtomicUsize,
    }

    impl OccurrenceSource for FlakySource {
        fn count(&self, _word: &str, _language: Language) -> Result<u64> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(FalseFriendsError::source_failure("connection reset"))
            } else {
                Ok(3)
            }
        }

        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    #[test]
    fn test_transient_failures_are_retried() {
        let counter = OccurrenceCounter::new(
            Arc::new(FlakySource {
                failures: 2,
                calls: AtomicUsize::new(0),
            }),
            Arc::new(CacheStore::in_memory()),
            RetryPolicy::immediate(3),
        );
        assert_eq!(counter.count("бира", Language::Bg).unwrap(), 3);
    }

    #[test]
    fn test_exhausted_retries_surface() {
        let cache = Arc::new(CacheStore::in_memory());
        let counter = OccurrenceCounter::new(
            Arc::new(FlakySource {
                failures: 10,
                calls: AtomicUsize::new(0),
            }),
            Arc::clone(&cache),
            RetryPolicy::immediate(2),
        );
        assert!(matches!(
            counter.count("бира", Language::Bg),
            Err(FalseFriendsError::RetriesExhausted { attempts: 2, .. })
        ));
        assert!(!counter.is_cached("бира", Language::Bg).unwrap());
    }
}
