//! Protection of multi-word target phrases during tokenization.
//!
//! A phrase such as `"hot dog"` would be split by the tokenizer, so every
//! occurrence is rewritten with [`PHRASE_MARKER`] in place of its spaces
//! before splitting and turned back afterwards.

/// Stand-in for a space inside an encoded phrase (BULLET OPERATOR).
pub const PHRASE_MARKER: char = '\u{2219}';

#[derive(Clone, Debug, Default)]
pub struct PhraseEncoder {
    phrases: Vec<String>,
}

impl PhraseEncoder {
    /// Build an encoder for the multi-word entries among `targets`.
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases: Vec<String> = targets
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .filter(|t| t.contains(' '))
            .collect();
        // Longer phrases first so that a phrase containing another wins.
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();
        PhraseEncoder { phrases }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Replace every protected phrase in `text` with its encoded form.
    pub fn encode(&self, text: &str) -> String {
        let mut encoded = text.to_string();
        for phrase in &self.phrases {
            if encoded.contains(phrase.as_str()) {
                encoded = encoded.replace(phrase.as_str(), &encode_phrase(phrase));
            }
        }
        encoded
    }
}

/// Encode a single phrase.
pub fn encode_phrase(phrase: &str) -> String {
    phrase.replace(' ', &PHRASE_MARKER.to_string())
}

/// Decode a token produced from encoded text.
pub fn decode_phrase(token: &str) -> String {
    token.replace(PHRASE_MARKER, " ")
}
