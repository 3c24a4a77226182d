//! The bilingual bridge dictionary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One `(source, target)` row of the dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BilingualEntry {
    pub source: String,
    pub target: String,
}

impl BilingualEntry {
    pub fn new<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        BilingualEntry {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Many-to-many dictionary from source-language headwords to translations.
///
/// Headwords are kept in sorted order so that every vector indexed by them
/// uses the same dimension layout.
#[derive(Clone, Debug, Default)]
pub struct BridgeDictionary {
    entries: Vec<BilingualEntry>,
    translations: BTreeMap<String, Vec<String>>,
    headwords: Vec<String>,
}

impl BridgeDictionary {
    pub fn from_entries(entries: Vec<BilingualEntry>) -> Self {
        let mut translations: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in &entries {
            let targets = translations.entry(entry.source.clone()).or_default();
            if !targets.contains(&entry.target) {
                targets.push(entry.target.clone());
            }
        }
        let headwords = translations.keys().cloned().collect();

        BridgeDictionary {
            entries,
            translations,
            headwords,
        }
    }

    pub fn entries(&self) -> &[BilingualEntry] {
        &self.entries
    }

    /// Sorted, deduplicated source-language headwords.
    pub fn headwords(&self) -> &[String] {
        &self.headwords
    }

    /// Translations of a headword; empty for unknown words.
    pub fn translations(&self, source: &str) -> &[String] {
        self.translations
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, source: &str) -> bool {
        self.translations.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.headwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headwords.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headwords_sorted_and_unique() {
        let dictionary = BridgeDictionary::from_entries(vec![
            BilingualEntry::new("вода", "вода"),
            BilingualEntry::new("бира", "пиво"),
            BilingualEntry::new("вода", "водица"),
            BilingualEntry::new("бира", "пиво"),
        ]);
        assert_eq!(dictionary.headwords(), ["бира", "вода"]);
        assert_eq!(dictionary.translations("вода"), ["вода", "водица"]);
        assert_eq!(dictionary.translations("бира"), ["пиво"]);
        assert_eq!(dictionary.entries().len(), 4);
    }

    #[test]
    fn test_unknown_headword() {
        let dictionary = BridgeDictionary::default();
        assert!(dictionary.translations("мляко").is_empty());
        assert!(!dictionary.contains("мляко"));
        assert!(dictionary.is_empty());
    }
}
