//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw snippet text before it is passed to the
//! tokenizer.
//!
//! # Available Filters
//!
//! - [`html::HtmlCharFilter`] - HTML entity decoding and tag removal

use crate::error::Result;

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> Result<String>;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod html;
