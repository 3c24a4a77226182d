//! Keyed cache of intermediate results on top of a [`Storage`] backend.
//!
//! Every entry is addressed by `(kind, language, word)`. The word is turned
//! into an ASCII key with [`cache_key`], and the payload is a bincode-encoded
//! serde value.
//!
//! [`CacheStore::get_or_compute`] holds a per-entry lock across the
//! read-compute-store sequence, so a value is computed at most once per
//! store even when several threads ask for it together.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::analysis::transliterate::cache_key;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::storage::memory::MemoryStorage;
use crate::storage::traits::Storage;

/// The kinds of cached results, each stored under its own directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    /// Raw titles and bodies returned by the context source
    Snippets,
    /// Plain context of a word
    Context,
    /// Context averaged over all word forms
    AllFormsContext,
    /// Context filtered by reverse evidence
    ReverseContext,
    /// Context expanded by one hop
    IndirectContext,
    /// Projection onto the bridge dictionary
    Vector,
    /// Number of occurrences reported by the occurrence source
    Occurrences,
}

impl CacheKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            CacheKind::Snippets => "snippets",
            CacheKind::Context => "context",
            CacheKind::AllFormsContext => "all-forms-context",
            CacheKind::ReverseContext => "reverse-context",
            CacheKind::IndirectContext => "indirect-context",
            CacheKind::Vector => "vectors",
            CacheKind::Occurrences => "occurrences",
        }
    }
}

/// Process-wide cache shared by all engine components.
#[derive(Debug)]
pub struct CacheStore {
    storage: Arc<dyn Storage>,
    locks: Mutex<AHashMap<String, Arc<Mutex<()>>>>,
}

impl CacheStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        CacheStore {
            storage,
            locks: Mutex::new(AHashMap::new()),
        }
    }

    /// A cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Storage name of an entry.
    pub fn entry_name(kind: CacheKind, language: Language, word: &str) -> Result<String> {
        Ok(format!("{}/{}.bin", kind.dir_name(), cache_key(word, language)?))
    }

    /// Storage name of an entry kept apart under `scope`, for results that
    /// are only valid for one variant of a kind.
    pub fn scoped_entry_name(
        kind: CacheKind,
        scope: &str,
        language: Language,
        word: &str,
    ) -> Result<String> {
        if scope.is_empty() || !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(FalseFriendsError::invalid_argument(format!(
                "Invalid cache scope: {scope:?}"
            )));
        }
        Ok(format!(
            "{}/{scope}/{}.bin",
            kind.dir_name(),
            cache_key(word, language)?
        ))
    }

    /// Run `f` with the entry `name` locked.
    ///
    /// The lock is dropped from the map once no other thread holds or waits
    /// for it.
    fn with_entry_lock<R>(&self, name: &str, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(locks.entry(name.to_string()).or_default())
        };

        let result = {
            let _guard = lock.lock();
            f()
        };

        let mut locks = self.locks.lock();
        drop(lock);
        if locks.get(name).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(name);
        }
        result
    }

    /// Number of entry locks currently held or awaited.
    pub fn active_locks(&self) -> usize {
        self.locks.lock().len()
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        if !self.storage.file_exists(name) {
            return Ok(None);
        }
        let bytes = self.storage.read(name)?;
        let value = bincode::deserialize(&bytes).map_err(|e| {
            FalseFriendsError::cache(format!("Corrupted cache entry {name}: {e}"))
        })?;
        Ok(Some(value))
    }

    fn store<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let bytes = bincode::serialize(value)?;
        self.storage.write(name, &bytes)
    }

    pub fn contains(&self, kind: CacheKind, language: Language, word: &str) -> Result<bool> {
        let name = Self::entry_name(kind, language, word)?;
        Ok(self.storage.file_exists(&name))
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        kind: CacheKind,
        language: Language,
        word: &str,
    ) -> Result<Option<T>> {
        let name = Self::entry_name(kind, language, word)?;
        self.with_entry_lock(&name, || self.load(&name))
    }

    pub fn put<T: Serialize>(
        &self,
        kind: CacheKind,
        language: Language,
        word: &str,
        value: &T,
    ) -> Result<()> {
        let name = Self::entry_name(kind, language, word)?;
        self.with_entry_lock(&name, || self.store(&name, value))
    }

    /// Return the cached value, or compute, store and return it.
    ///
    /// `compute` runs with the entry locked and must not ask for the same
    /// entry again.
    pub fn get_or_compute<T, F>(
        &self,
        kind: CacheKind,
        language: Language,
        word: &str,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        let name = Self::entry_name(kind, language, word)?;
        self.load_or_compute(&name, compute)
    }

    /// [`get_or_compute`](Self::get_or_compute) on an entry under `scope`.
    pub fn get_or_compute_scoped<T, F>(
        &self,
        kind: CacheKind,
        scope: &str,
        language: Language,
        word: &str,
        compute: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        let name = Self::scoped_entry_name(kind, scope, language, word)?;
        self.load_or_compute(&name, compute)
    }

    fn load_or_compute<T, F>(&self, name: &str, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        self.with_entry_lock(name, || {
            if let Some(value) = self.load(name)? {
                debug!("Cache hit: {name}");
                return Ok(value);
            }

            let value = compute()?;
            self.store(name, &value)?;
            Ok(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use super::*;

    #[test]
    fn test_get_put() {
        let cache = CacheStore::in_memory();
        assert_eq!(
            cache.get::<u64>(CacheKind::Occurrences, Language::Bg, "бира").unwrap(),
            None
        );

        cache
            .put(CacheKind::Occurrences, Language::Bg, "бира", &42u64)
            .unwrap();
        assert_eq!(
            cache.get::<u64>(CacheKind::Occurrences, Language::Bg, "бира").unwrap(),
            Some(42)
        );
        assert!(cache.contains(CacheKind::Occurrences, Language::Bg, "Бира").unwrap());
        assert!(!cache.contains(CacheKind::Occurrences, Language::Ru, "бира").unwrap());
    }

    #[test]
    fn test_kinds_are_separate() {
        let cache = CacheStore::in_memory();
        cache
            .put(CacheKind::Vector, Language::Ru, "пиво", &vec![1.0f64, 2.0])
            .unwrap();
        assert!(!cache.contains(CacheKind::Context, Language::Ru, "пиво").unwrap());
        assert_eq!(
            CacheStore::entry_name(CacheKind::Vector, Language::Ru, "пиво")
                .unwrap()
                .split('/')
                .next(),
            Some("vectors")
        );
    }

    #[test]
    fn test_get_or_compute_runs_once() {
        let cache = CacheStore::in_memory();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: String = cache
                .get_or_compute(CacheKind::Snippets, Language::En, "beer", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok("cold".to_string())
                })
                .unwrap();
            assert_eq!(value, "cold");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_requests_fetch_once() {
        let cache = Arc::new(CacheStore::in_memory());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_compute(CacheKind::Occurrences, Language::Bg, "вода", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(10));
                            Ok(7u64)
                        })
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.active_locks(), 0);
    }

    #[test]
    fn test_locks_released_after_use() {
        let cache = CacheStore::in_memory();
        for word in ["бира", "вода", "вино"] {
            let _: u64 = cache
                .get_or_compute(CacheKind::Occurrences, Language::Bg, word, || {
                    // nested lookup of another entry
                    cache.get::<u64>(CacheKind::Occurrences, Language::Ru, word)?;
                    Ok(1)
                })
                .unwrap();
        }
        cache.put(CacheKind::Vector, Language::Bg, "бира", &vec![1.0f64]).unwrap();
        assert_eq!(cache.active_locks(), 0);
    }

    #[test]
    fn test_scoped_entries_are_separate() {
        let cache = CacheStore::in_memory();
        let first: u64 = cache
            .get_or_compute_scoped(CacheKind::Vector, "a1", Language::Bg, "бира", || Ok(1))
            .unwrap();
        let second: u64 = cache
            .get_or_compute_scoped(CacheKind::Vector, "b2", Language::Bg, "бира", || Ok(2))
            .unwrap();
        assert_eq!((first, second), (1, 2));
        assert!(!cache.contains(CacheKind::Vector, Language::Bg, "бира").unwrap());
        assert!(
            CacheStore::scoped_entry_name(CacheKind::Vector, "a1", Language::Bg, "бира")
                .unwrap()
                .starts_with("vectors/a1/")
        );
        assert!(CacheStore::scoped_entry_name(CacheKind::Vector, "../x", Language::Bg, "бира").is_err());
    }

    #[test]
    fn test_failed_compute_is_not_stored() {
        let cache = CacheStore::in_memory();
        let result: Result<u64> =
            cache.get_or_compute(CacheKind::Occurrences, Language::Bg, "вода", || {
                Err(FalseFriendsError::source_failure("offline"))
            });
        assert!(result.is_err());
        assert!(!cache.contains(CacheKind::Occurrences, Language::Bg, "вода").unwrap());
    }

    #[test]
    fn test_corrupted_entry_is_cache_error() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = CacheStore::new(storage.clone());
        let name = CacheStore::entry_name(CacheKind::Vector, Language::Bg, "вода").unwrap();
        storage.write(&name, &[1, 2]).unwrap();

        assert!(matches!(
            cache.get::<Vec<f64>>(CacheKind::Vector, Language::Bg, "вода"),
            Err(FalseFriendsError::Cache(_))
        ));
    }
}
