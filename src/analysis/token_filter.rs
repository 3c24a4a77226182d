//! Token filter implementations for token transformation.
//!
//! # Available Filters
//!
//! - [`context_word::ContextWordFilter`] - Removes short words and stop words
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use falsefriends::analysis::token::Token;
//! use falsefriends::analysis::token_filter::Filter;
//! use falsefriends::analysis::token_filter::context_word::ContextWordFilter;
//! use falsefriends::lexicon::stop_words::StopWords;
//!
//! let filter = ContextWordFilter::new(3, Arc::new(StopWords::from_words(["и"])));
//! let tokens = vec![Token::new("бира", 0), Token::new("и", 1), Token::new("вино", 2)];
//! let kept: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
//! assert_eq!(kept.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream. The trait
/// requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}

pub mod context_word;
