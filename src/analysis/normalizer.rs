//! Turning raw sentences and snippets into lowercase word sequences.

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::html::HtmlCharFilter;
use crate::analysis::phrase::{PhraseEncoder, decode_phrase};
use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::alphabet::AlphabetTokenizer;
use crate::error::Result;
use crate::language::{Language, Script};

/// Splits text into lowercase words of one script.
#[derive(Clone, Debug)]
pub struct WordExtractor {
    html: HtmlCharFilter,
    tokenizer: AlphabetTokenizer,
}

impl WordExtractor {
    pub fn for_script(script: Script) -> Result<Self> {
        Ok(WordExtractor {
            html: HtmlCharFilter::new()?,
            tokenizer: AlphabetTokenizer::for_script(script)?,
        })
    }

    pub fn for_language(language: Language) -> Result<Self> {
        Self::for_script(language.script())
    }

    /// Lowercase a plain sentence and split it into words.
    pub fn extract_and_normalize(&self, sentence: &str) -> Result<Vec<String>> {
        Ok(self
            .tokenizer
            .tokenize(&sentence.to_lowercase())?
            .map(|t| t.text)
            .collect())
    }

    /// Tokenize one search-result snippet.
    ///
    /// HTML is decoded and stripped before lowercasing; phrases known to
    /// `phrases` come out as single tokens containing spaces.
    pub fn snippet_tokens(&self, snippet: &str, phrases: &PhraseEncoder) -> Result<TokenStream> {
        let text = self.html.filter(snippet)?.to_lowercase();
        let tokens = self.tokenizer.tokenize(&phrases.encode(&text))?;
        if phrases.is_empty() {
            return Ok(tokens);
        }
        let decoded: Vec<Token> = tokens
            .map(|t| {
                let text = decode_phrase(&t.text);
                t.with_text(text)
            })
            .collect();
        Ok(decoded.into_token_stream())
    }
}
