//! Word form to basic form tables.

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::context::word_context::WordContext;

/// Bidirectional many-to-many mapping between word forms and basic forms.
///
/// Unknown words map to themselves in both directions.
#[derive(Clone, Debug, Default)]
pub struct LemmaTable {
    to_basic: AHashMap<String, Vec<String>>,
    to_forms: AHashMap<String, Vec<String>>,
}

impl LemmaTable {
    /// Build from `(word_form, basic_form)` rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = LemmaTable::default();
        for (form, basic) in rows {
            let basics = table.to_basic.entry(form.clone()).or_default();
            if !basics.contains(&basic) {
                basics.push(basic.clone());
            }
            let forms = table.to_forms.entry(basic).or_default();
            if !forms.contains(&form) {
                forms.push(form);
            }
        }
        table
    }

    pub fn basic_forms(&self, word: &str) -> Vec<String> {
        match self.to_basic.get(word) {
            Some(basics) => basics.clone(),
            None => vec![word.to_string()],
        }
    }

    pub fn word_forms(&self, basic_form: &str) -> Vec<String> {
        match self.to_forms.get(basic_form) {
            Some(forms) => forms.clone(),
            None => vec![basic_form.to_string()],
        }
    }

    /// Every form sharing a basic form with `word`, sorted.
    pub fn all_word_forms(&self, word: &str) -> Vec<String> {
        let mut forms = BTreeSet::new();
        for basic in self.basic_forms(word) {
            forms.extend(self.word_forms(&basic));
        }
        forms.into_iter().collect()
    }

    /// Map every context word to its basic forms.
    ///
    /// Each basic form receives the full count of the word it came from.
    pub fn collapse(&self, context: &WordContext) -> WordContext {
        let mut collapsed = WordContext::new();
        for (word, count) in context.iter() {
            for basic in self.basic_forms(word) {
                collapsed.add(&basic, count);
            }
        }
        collapsed
    }

    pub fn len(&self) -> usize {
        self.to_basic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_basic.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LemmaTable {
        LemmaTable::from_rows(
            [
                ("пива", "пиво"),
                ("пиво", "пиво"),
                ("пивом", "пиво"),
                ("стали", "стать"),
                ("стали", "сталь"),
                ("сталь", "сталь"),
            ]
            .into_iter()
            .map(|(f, b)| (f.to_string(), b.to_string())),
        )
    }

    #[test]
    fn test_unknown_word_is_identity() {
        let table = table();
        assert_eq!(table.basic_forms("вода"), vec!["вода"]);
        assert_eq!(table.word_forms("вода"), vec!["вода"]);
        assert_eq!(table.all_word_forms("вода"), vec!["вода"]);
    }

    #[test]
    fn test_many_to_many() {
        let table = table();
        assert_eq!(table.basic_forms("стали"), vec!["стать", "сталь"]);
        assert_eq!(table.word_forms("пиво"), vec!["пива", "пиво", "пивом"]);
        assert_eq!(
            table.all_word_forms("стали"),
            vec!["стали", "сталь", "стать"]
        );
    }

    #[test]
    fn test_collapse_sums_counts() {
        let table = table();
        let mut context = WordContext::new();
        context.add("пива", 2.0);
        context.add("пивом", 1.0);
        context.add("стали", 3.0);

        let collapsed = table.collapse(&context);
        assert_eq!(collapsed.get("пиво"), 3.0);
        assert_eq!(collapsed.get("стать"), 3.0);
        assert_eq!(collapsed.get("сталь"), 3.0);
        assert_eq!(collapsed.len(), 3);
    }
}
