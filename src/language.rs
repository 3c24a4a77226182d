//! Supported languages and the bilingual bridge pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FalseFriendsError, Result};

/// Writing system used to split raw text into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Cyrillic,
    Latin,
}

/// A language handled by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Bulgarian, the source side of the bridge pair.
    Bg,
    /// Russian, the target side of the bridge pair.
    Ru,
    /// English, monolingual similarity only.
    En,
}

impl Language {
    /// Two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Bg => "bg",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }

    /// Script used by this language.
    pub fn script(&self) -> Script {
        match self {
            Language::Bg | Language::Ru => Script::Cyrillic,
            Language::En => Script::Latin,
        }
    }

    /// Parse a language from its code.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bg" => Ok(Language::Bg),
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            _ => Err(FalseFriendsError::config(format!("Unknown language: {s}"))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The two languages joined by the bridge dictionary.
///
/// Dictionary headwords belong to `source`, their translations to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: Language,
    pub target: Language,
}

impl Default for LanguagePair {
    fn default() -> Self {
        LanguagePair {
            source: Language::Bg,
            target: Language::Ru,
        }
    }
}
