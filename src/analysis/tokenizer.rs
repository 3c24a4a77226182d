//! Tokenizer implementations for text analysis.
//!
//! # Available Tokenizers
//!
//! - [`alphabet::AlphabetTokenizer`] - Splits on every character outside one script
//!
//! # Examples
//!
//! ```
//! use falsefriends::analysis::tokenizer::Tokenizer;
//! use falsefriends::analysis::tokenizer::alphabet::AlphabetTokenizer;
//! use falsefriends::language::Script;
//!
//! let tokenizer = AlphabetTokenizer::for_script(Script::Cyrillic).unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("бира, вино и 3 ракии").unwrap().collect();
//! assert_eq!(tokens.len(), 4);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a tokenizer can be shared by the
/// context builder and the prefetch workers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphabet;
