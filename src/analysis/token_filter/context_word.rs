//! Filter that drops words unlikely to carry meaning in a context window.

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::lexicon::stop_words::StopWords;

/// Keeps a token if it is long enough and not a stop word.
///
/// Tokens equal to one of the protected target forms are always kept, since
/// they anchor the context windows.
#[derive(Clone, Debug)]
pub struct ContextWordFilter {
    min_length: usize,
    stop_words: Arc<StopWords>,
    protected: AHashSet<String>,
}

impl ContextWordFilter {
    pub fn new(min_length: usize, stop_words: Arc<StopWords>) -> Self {
        ContextWordFilter {
            min_length,
            stop_words,
            protected: AHashSet::new(),
        }
    }

    /// Never drop any of these forms.
    pub fn protecting<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected.extend(forms.into_iter().map(Into::into));
        self
    }

    /// Whether a single word survives the filter.
    pub fn keeps(&self, word: &str) -> bool {
        if self.protected.contains(word) {
            return true;
        }
        word.chars().count() >= self.min_length && !self.stop_words.contains(word)
    }
}

impl Filter for ContextWordFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens.filter(|t| self.keeps(&t.text)).collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "context_word"
    }
}
