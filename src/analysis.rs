//! Text analysis for context extraction.
//!
//! Snippets and corpus sentences are turned into lowercase word sequences in
//! a few stages: character filters decode HTML, a phrase encoder protects
//! multi-word targets, an alphabet tokenizer splits on everything outside the
//! language's script and token filters drop short and stop words.

pub mod char_filter;
pub mod normalizer;
pub mod phrase;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
pub mod transliterate;
