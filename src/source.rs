//! External sources of text snippets and occurrence counts.
//!
//! Both sources may fail transiently; callers go through [`RetryPolicy`]
//! and the cache via [`fetch::SnippetFetcher`] and [`fetch::OccurrenceCounter`].

use std::thread;
use std::time::Duration;

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::RetryConfig;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;

pub mod directory;
pub mod fetch;
pub mod memory;

pub use directory::{OccurrenceTableSource, SnippetDirectorySource};
pub use fetch::{OccurrenceCounter, SnippetFetcher};
pub use memory::{MemoryContextSource, MemoryOccurrenceSource};

/// Titles and bodies of the search results for one word.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippets {
    pub titles: Vec<String>,
    pub bodies: Vec<String>,
}

impl Snippets {
    pub fn new(titles: Vec<String>, bodies: Vec<String>) -> Self {
        Snippets { titles, bodies }
    }

    /// Titles first, then bodies.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.titles
            .iter()
            .chain(self.bodies.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.bodies.is_empty()
    }
}

/// Supplies text snippets surrounding a word.
pub trait ContextSource: Send + Sync {
    fn fetch_snippets(&self, word: &str, language: Language) -> Result<Snippets>;

    fn name(&self) -> &'static str;
}

/// Supplies the number of documents a word occurs in. Zero is a valid answer.
pub trait OccurrenceSource: Send + Sync {
    fn count(&self, word: &str, language: Language) -> Result<u64>;

    fn name(&self) -> &'static str;
}

/// Selects the context source built from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContextSourceKind {
    /// Snippet files under a directory
    #[default]
    Directory,
    /// Empty in-memory source, filled programmatically
    Memory,
}

impl ContextSourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ContextSourceKind::Directory => "directory",
            ContextSourceKind::Memory => "memory",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "directory" | "dir" => Ok(ContextSourceKind::Directory),
            "memory" => Ok(ContextSourceKind::Memory),
            _ => Err(FalseFriendsError::config(format!(
                "Unknown context source kind: {s}"
            ))),
        }
    }
}

/// Bounded retry with a random pause between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        RetryPolicy {
            max_attempts: config.max_attempts.max(1),
            min_delay: Duration::from_millis(config.min_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms.max(config.min_delay_ms)),
        }
    }

    /// Retry without pausing.
    pub fn immediate(max_attempts: usize) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    fn pause(&self) -> Duration {
        if self.max_delay <= self.min_delay {
            return self.min_delay;
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    /// Run `operation` until it succeeds or the attempts run out.
    pub fn run<T, F>(&self, what: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        for attempt in 1..=self.max_attempts {
            match operation() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Attempt {attempt}/{} to fetch {what} failed: {e}",
                        self.max_attempts
                    );
                    if attempt < self.max_attempts {
                        thread::sleep(self.pause());
                    }
                }
            }
        }

        Err(FalseFriendsError::RetriesExhausted {
            what: what.to_string(),
            attempts: self.max_attempts,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
