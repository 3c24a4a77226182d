//! Script-restricted gap tokenizer.

use std::sync::Arc;

use regex::Regex;

use crate::analysis::phrase::PHRASE_MARKER;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{FalseFriendsError, Result};
use crate::language::Script;

/// A tokenizer that keeps runs of letters from a single script.
///
/// Everything outside the alphabet (digits, punctuation, whitespace, letters
/// of other scripts) acts as a separator. The phrase marker is treated as a
/// letter so that encoded phrases survive as single tokens.
#[derive(Clone, Debug)]
pub struct AlphabetTokenizer {
    separators: Arc<Regex>,
    script: Script,
}

impl AlphabetTokenizer {
    /// Create a tokenizer for the given script.
    pub fn for_script(script: Script) -> Result<Self> {
        let letters = match script {
            Script::Cyrillic => "а-яА-ЯёЁ",
            Script::Latin => "A-Za-z",
        };
        let pattern = format!("[^{letters}{PHRASE_MARKER}]+");
        let regex = Regex::new(&pattern)
            .map_err(|e| FalseFriendsError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(AlphabetTokenizer {
            separators: Arc::new(regex),
            script,
        })
    }

    pub fn script(&self) -> Script {
        self.script
    }
}

impl Tokenizer for AlphabetTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut last_end = 0;
        let mut position = 0;

        for mat in self.separators.find_iter(text) {
            if mat.start() > last_end {
                tokens.push(Token::with_offsets(
                    &text[last_end..mat.start()],
                    position,
                    last_end,
                    mat.start(),
                ));
                position += 1;
            }
            last_end = mat.end();
        }

        if last_end < text.len() {
            tokens.push(Token::with_offsets(
                &text[last_end..],
                position,
                last_end,
                text.len(),
            ));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphabet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &AlphabetTokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_cyrillic_split() {
        let tokenizer = AlphabetTokenizer::for_script(Script::Cyrillic).unwrap();
        assert_eq!(
            texts(&tokenizer, "Студена бира, (2 чаши) и ёлка!"),
            vec!["Студена", "бира", "чаши", "и", "ёлка"]
        );
    }

    #[test]
    fn test_latin_letters_are_separators_for_cyrillic() {
        let tokenizer = AlphabetTokenizer::for_script(Script::Cyrillic).unwrap();
        assert_eq!(texts(&tokenizer, "водаwater вино"), vec!["вода", "вино"]);
    }

    #[test]
    fn test_latin_split() {
        let tokenizer = AlphabetTokenizer::for_script(Script::Latin).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("cold beer, 42 glasses").unwrap().collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "glasses");
        assert_eq!(tokens[2].position, 2);
        assert_eq!(tokens[1].start_offset, 5);
        assert_eq!(tokens[1].end_offset, 9);
    }

    #[test]
    fn test_phrase_marker_kept() {
        let tokenizer = AlphabetTokenizer::for_script(Script::Latin).unwrap();
        let text = format!("a hot{PHRASE_MARKER}dog stand");
        assert_eq!(
            texts(&tokenizer, &text),
            vec!["a".to_string(), format!("hot{PHRASE_MARKER}dog"), "stand".to_string()]
        );
    }

    #[test]
    fn test_name() {
        let tokenizer = AlphabetTokenizer::for_script(Script::Latin).unwrap();
        assert_eq!(tokenizer.name(), "alphabet");
        assert!(texts(&tokenizer, "  ,, 12 ").is_empty());
    }
}
