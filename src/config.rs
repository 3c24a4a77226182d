//! Engine configuration.
//!
//! Every section has a default, so a JSON file only needs to name the
//! settings it changes:
//!
//! ```
//! use falsefriends::config::EngineConfig;
//!
//! let config: EngineConfig =
//!     serde_json::from_str(r#"{ "context": { "window_radius": 5 } }"#).unwrap();
//! assert_eq!(config.context.window_radius, 5);
//! assert_eq!(config.context.min_word_length, 3);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::ContextMode;
use crate::cooccurrence::FriendnessFormula;
use crate::error::{FalseFriendsError, Result};
use crate::similarity::vector::VectorMeasure;
use crate::source::ContextSourceKind;

/// Context vector construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub mode: ContextMode,
    /// Words on each side of a target occurrence that count as context.
    pub window_radius: usize,
    pub remove_short_and_stop_words: bool,
    pub min_word_length: usize,
    pub use_lemmatization: bool,
    pub use_tf_idf: bool,
    /// Clamp every bridge vector dimension by the reverse evidence, whatever
    /// the context mode. Reverse mode always does.
    pub reverse_vectors: bool,
    /// Context words below this weight are ignored by reverse and indirect modes.
    pub min_occurrences: f64,
    /// Document count used as the numerator of the IDF.
    pub total_corpus_size: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            mode: ContextMode::Plain,
            window_radius: 3,
            remove_short_and_stop_words: true,
            min_word_length: 3,
            use_lemmatization: false,
            use_tf_idf: false,
            reverse_vectors: false,
            min_occurrences: 0.0,
            total_corpus_size: 8_000_000_000.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub measure: VectorMeasure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicConfig {
    /// Also compare dictionary basic forms of both words.
    pub use_lemmatization: bool,
    /// Basic forms are only added when both words are at least this long.
    pub min_word_length: usize,
}

impl Default for OrthographicConfig {
    fn default() -> Self {
        OrthographicConfig {
            use_lemmatization: false,
            min_word_length: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub min_orthographic_similarity: f64,
    pub formula: FriendnessFormula,
    pub use_lemmatization: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            min_orthographic_similarity: 0.90,
            formula: FriendnessFormula::F2,
            use_lemmatization: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: usize,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 15,
            min_delay_ms: 1000,
            max_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
    /// Warm occurrence counts on a worker pool during TF-IDF weighting.
    pub enabled: bool,
    pub workers: usize,
    pub queue_capacity: usize,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        PrefetchConfig {
            enabled: true,
            workers: 10,
            queue_capacity: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub dictionary_path: PathBuf,
    /// Directory holding `Stop-Words-<lang>.csv` and `Lemma-Dictionary-<lang>.csv`.
    pub resource_dir: PathBuf,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        ResourceConfig {
            dictionary_path: PathBuf::from("resources/Dictionary-BG-RU.csv"),
            resource_dir: PathBuf::from("resources"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: ContextSourceKind,
    pub snippet_dir: PathBuf,
    pub occurrence_table: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            kind: ContextSourceKind::Directory,
            snippet_dir: PathBuf::from("snippets"),
            occurrence_table: None,
        }
    }
}

/// Top-level configuration shared by every engine component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub context: ContextConfig,
    pub similarity: SimilarityConfig,
    pub orthographic: OrthographicConfig,
    pub extraction: ExtractionConfig,
    pub retry: RetryConfig,
    pub prefetch: PrefetchConfig,
    pub resources: ResourceConfig,
    pub sources: SourceConfig,
    /// Persistent cache root; caching stays in memory when unset.
    pub cache_dir: Option<PathBuf>,
}

impl EngineConfig {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(FalseFriendsError::config("retry.max_attempts must be at least 1"));
        }
        if self.retry.min_delay_ms > self.retry.max_delay_ms {
            return Err(FalseFriendsError::config(
                "retry.min_delay_ms must not exceed retry.max_delay_ms",
            ));
        }
        if self.prefetch.workers == 0 || self.prefetch.queue_capacity == 0 {
            return Err(FalseFriendsError::config(
                "prefetch.workers and prefetch.queue_capacity must be positive",
            ));
        }
        if self.context.total_corpus_size.is_nan() || self.context.total_corpus_size <= 0.0 {
            return Err(FalseFriendsError::config(
                "context.total_corpus_size must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.extraction.min_orthographic_similarity) {
            return Err(FalseFriendsError::config(
                "extraction.min_orthographic_similarity must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}
