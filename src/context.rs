//! Context vectors: what words appear near a given word.
//!
//! - [`word_context::WordContext`] - the frequency map itself
//! - [`builder::ContextVectorBuilder`] - builds contexts from snippets in one of the [`ContextMode`]s
//! - [`tfidf::TfIdfWeighting`] - optional reweighting by web occurrence counts

use serde::{Deserialize, Serialize};

use crate::error::{FalseFriendsError, Result};
use crate::storage::cache::CacheKind;

pub mod builder;
pub mod tfidf;
pub mod word_context;

pub use builder::ContextVectorBuilder;
pub use tfidf::TfIdfWeighting;
pub use word_context::WordContext;

/// How a word's context is assembled from plain contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// Words found around the word itself
    #[default]
    Plain,
    /// Mean of the plain contexts of every word form
    AllWordForms,
    /// Plain context kept only where the context word points back
    Reverse,
    /// Plain context plus the plain contexts of its words
    Indirect,
}

impl ContextMode {
    pub fn name(&self) -> &'static str {
        match self {
            ContextMode::Plain => "plain",
            ContextMode::AllWordForms => "all_word_forms",
            ContextMode::Reverse => "reverse",
            ContextMode::Indirect => "indirect",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "plain" => Ok(ContextMode::Plain),
            "all_word_forms" | "all_forms" => Ok(ContextMode::AllWordForms),
            "reverse" => Ok(ContextMode::Reverse),
            "indirect" => Ok(ContextMode::Indirect),
            _ => Err(FalseFriendsError::config(format!(
                "Unknown context mode: {s}"
            ))),
        }
    }

    /// Cache directory holding contexts built in this mode.
    pub fn cache_kind(&self) -> CacheKind {
        match self {
            ContextMode::Plain => CacheKind::Context,
            ContextMode::AllWordForms => CacheKind::AllFormsContext,
            ContextMode::Reverse => CacheKind::ReverseContext,
            ContextMode::Indirect => CacheKind::IndirectContext,
        }
    }
}
