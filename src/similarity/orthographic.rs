//! Modified minimum edit distance ratio (MMEDR) between Bulgarian and
//! Russian words.
//!
//! Both words are rewritten into a common spelling, Russian inflections are
//! reduced, and the remaining difference is measured with an edit distance
//! whose substitution cost is lower for letters that sound alike.
//!
//! # Examples
//!
//! ```
//! use falsefriends::config::OrthographicConfig;
//! use falsefriends::similarity::orthographic::OrthographicSimilarity;
//!
//! let mmedr = OrthographicSimilarity::new(OrthographicConfig::default());
//! assert_eq!(mmedr.similarity("вода", "вода").unwrap(), 1.0);
//! assert!(mmedr.similarity("бар", "пар").unwrap() > 0.79);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::config::OrthographicConfig;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::lexicon::LexicalResources;

/// Reduced substitution costs for letters that sound alike.
const CYRILLIC_COSTS: &[(char, char, f64)] = &[
    ('а', 'е', 0.7),
    ('а', 'и', 0.8),
    ('а', 'о', 0.7),
    ('а', 'у', 0.6),
    ('а', 'ъ', 0.5),
    ('а', 'ё', 0.8),
    ('а', 'ю', 0.8),
    ('а', 'я', 0.5),
    ('б', 'в', 0.8),
    ('б', 'п', 0.6),
    ('в', 'ф', 0.6),
    ('г', 'к', 0.6),
    ('г', 'х', 0.5),
    ('д', 'т', 0.6),
    ('е', 'и', 0.6),
    ('е', 'о', 0.7),
    ('е', 'у', 0.8),
    ('е', 'ъ', 0.5),
    ('е', 'ё', 0.6),
    ('е', 'ю', 0.8),
    ('е', 'я', 0.5),
    ('ж', 'з', 0.8),
    ('ж', 'ш', 0.6),
    ('з', 'с', 0.5),
    ('и', 'й', 0.6),
    ('и', 'о', 0.8),
    ('и', 'у', 0.8),
    ('и', 'ъ', 0.8),
    ('и', 'ё', 0.7),
    ('и', 'ю', 0.7),
    ('и', 'я', 0.7),
    ('й', 'ё', 0.7),
    ('й', 'ю', 0.7),
    ('й', 'я', 0.7),
    ('к', 'т', 0.8),
    ('к', 'х', 0.6),
    ('л', 'у', 0.6),
    ('м', 'н', 0.7),
    ('о', 'у', 0.6),
    ('о', 'ъ', 0.8),
    ('о', 'ё', 0.6),
    ('о', 'ю', 0.7),
    ('о', 'я', 0.8),
    ('п', 'ф', 0.8),
    ('п', 'х', 0.9),
    ('с', 'ц', 0.6),
    ('с', 'ш', 0.9),
    ('т', 'ф', 0.8),
    ('т', 'х', 0.9),
    ('т', 'ц', 0.9),
    ('у', 'ъ', 0.5),
    ('у', 'ё', 0.8),
    ('у', 'ю', 0.6),
    ('у', 'я', 0.8),
    ('ф', 'х', 0.8),
    ('х', 'ш', 0.9),
    ('ц', 'ч', 0.8),
    ('ч', 'ш', 0.9),
    ('ш', 'щ', 0.8),
    ('ъ', 'ё', 0.8),
    ('ъ', 'ю', 0.8),
    ('ъ', 'я', 0.8),
    ('ё', 'ю', 0.6),
    ('ё', 'я', 0.7),
    ('ю', 'я', 0.8),
];

/// Spelling rewrites applied in order before measuring distance.
const BULGARIAN_REWRITES: &[(&str, &str)] = &[("щ", "шт"), ("ьо", "ё"), ("йо", "ё"), ("зс", "с")];

const RUSSIAN_REWRITES: &[(&str, &str)] = &[
    ("э", "е"),
    ("щ", "сч"),
    ("ъ", ""),
    ("ы", "и"),
    ("ь", ""),
    ("бб", "б"),
    ("жж", "ж"),
    ("кк", "к"),
    ("лл", "л"),
    ("мм", "м"),
    ("пп", "п"),
    ("сс", "с"),
    ("фф", "ф"),
];

/// Russian adjective and verb endings mapped to their Bulgarian shape.
const RUSSIAN_SUFFIXES: &[(&str, &str)] = &[
    ("нный", "нен"),
    ("ный", "ен"),
    ("нний", "нен"),
    ("ний", "ен"),
    ("ий", "и"),
    ("ый", "и"),
    ("ься", "ь"),
    ("овать", "ам"),
    ("ить", "я"),
    ("ять", "я"),
    ("ать", "ам"),
    ("уть", "а"),
    ("еть", "ея"),
];

/// Symmetric substitution cost table, default cost 1.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionCosts {
    costs: AHashMap<(char, char), f64>,
}

impl SubstitutionCosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Cyrillic table shared by Bulgarian and Russian.
    pub fn cyrillic() -> Self {
        let mut costs = Self::new();
        for &(a, b, cost) in CYRILLIC_COSTS {
            costs.set(a, b, cost);
        }
        costs
    }

    /// Set the cost of replacing `a` with `b` and vice versa.
    pub fn set(&mut self, a: char, b: char, cost: f64) {
        self.costs.insert((a, b), cost);
        self.costs.insert((b, a), cost);
    }

    pub fn cost(&self, a: char, b: char) -> f64 {
        if a == b {
            return 0.0;
        }
        self.costs.get(&(a, b)).copied().unwrap_or(1.0)
    }
}

/// Apply a language's spelling rewrites.
pub fn rewrite(word: &str, language: Language) -> String {
    let rules = match language {
        Language::Bg => BULGARIAN_REWRITES,
        Language::Ru => RUSSIAN_REWRITES,
        Language::En => return word.to_string(),
    };
    rules
        .iter()
        .fold(word.to_string(), |w, (from, to)| w.replace(from, to))
}

/// Replace the longest matching Russian ending, once.
///
/// Among endings of equal length the earlier rule wins.
pub fn normalize_suffix(word: &str) -> String {
    let mut best: Option<&(&str, &str)> = None;
    for rule in RUSSIAN_SUFFIXES {
        if !word.ends_with(rule.0) {
            continue;
        }
        let longer = match best {
            Some(current) => rule.0.chars().count() > current.0.chars().count(),
            None => true,
        };
        if longer {
            best = Some(rule);
        }
    }

    match best {
        Some((suffix, replacement)) => {
            format!("{}{}", &word[..word.len() - suffix.len()], replacement)
        }
        None => word.to_string(),
    }
}

/// Edit distance with unit insert/delete cost and table substitution cost.
pub fn weighted_edit_distance(a: &[char], b: &[char], costs: &SubstitutionCosts) -> f64 {
    let mut previous: Vec<f64> = (0..=b.len()).map(|j| j as f64).collect();
    let mut current = vec![0.0; b.len() + 1];

    for i in 1..=a.len() {
        current[0] = i as f64;
        for j in 1..=b.len() {
            let delete = previous[j] + 1.0;
            let insert = current[j - 1] + 1.0;
            let replace = previous[j - 1] + costs.cost(a[i - 1], b[j - 1]);
            current[j] = delete.min(insert).min(replace);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// `(max_len - distance) / max_len`; two empty strings are identical.
pub fn edit_similarity(a: &str, b: &str, costs: &SubstitutionCosts) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    let distance = weighted_edit_distance(&a, &b, costs);
    (max_len as f64 - distance) / max_len as f64
}

/// MMEDR between a Bulgarian word and a Russian word.
pub struct OrthographicSimilarity {
    config: OrthographicConfig,
    costs: SubstitutionCosts,
    resources: Option<Arc<LexicalResources>>,
}

impl OrthographicSimilarity {
    pub fn new(config: OrthographicConfig) -> Self {
        OrthographicSimilarity {
            config,
            costs: SubstitutionCosts::cyrillic(),
            resources: None,
        }
    }

    /// Lemma tables used when lemmatization is enabled.
    pub fn with_resources(mut self, resources: Arc<LexicalResources>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn config(&self) -> &OrthographicConfig {
        &self.config
    }

    /// Candidate spellings of both words, before rewrites.
    pub fn candidate_forms(
        &self,
        bg_word: &str,
        ru_word: &str,
    ) -> Result<(BTreeSet<String>, BTreeSet<String>)> {
        let mut bg_forms = BTreeSet::from([bg_word.to_string()]);
        let mut ru_forms = BTreeSet::from([ru_word.to_string(), normalize_suffix(ru_word)]);

        let long_enough = bg_word.chars().count() >= self.config.min_word_length
            && ru_word.chars().count() >= self.config.min_word_length;
        if self.config.use_lemmatization && long_enough {
            let resources = self.resources.as_ref().ok_or_else(|| {
                FalseFriendsError::config("orthographic lemmatization needs lexical resources")
            })?;
            bg_forms.extend(resources.lemmas(Language::Bg)?.basic_forms(bg_word));
            for lemma in resources.lemmas(Language::Ru)?.basic_forms(ru_word) {
                ru_forms.insert(normalize_suffix(&lemma));
                ru_forms.insert(lemma);
            }
        }

        Ok((bg_forms, ru_forms))
    }

    /// Similarity in `[0, 1]`, the best score over all candidate form pairs.
    pub fn similarity(&self, bg_word: &str, ru_word: &str) -> Result<f64> {
        let bg_word = bg_word.to_lowercase();
        let ru_word = ru_word.to_lowercase();
        let (bg_forms, ru_forms) = self.candidate_forms(&bg_word, &ru_word)?;

        let mut best = 0.0_f64;
        for bg in &bg_forms {
            let bg = rewrite(bg, Language::Bg);
            for ru in &ru_forms {
                let ru = rewrite(ru, Language::Ru);
                best = best.max(edit_similarity(&bg, &ru, &self.costs));
            }
        }

        debug!("MMEDR({bg_word}, {ru_word}) = {best}");
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryResourceLoader;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_cost_table_is_symmetric() {
        let costs = SubstitutionCosts::cyrillic();
        assert_eq!(costs.cost('б', 'п'), 0.6);
        assert_eq!(costs.cost('п', 'б'), 0.6);
        assert_eq!(costs.cost('а', 'а'), 0.0);
        assert_eq!(costs.cost('а', 'б'), 1.0);
    }

    #[test]
    fn test_edit_distance_base_cases() {
        let costs = SubstitutionCosts::cyrillic();
        assert_eq!(weighted_edit_distance(&[], &[], &costs), 0.0);
        assert_eq!(weighted_edit_distance(&chars("абв"), &[], &costs), 3.0);
        assert_eq!(weighted_edit_distance(&[], &chars("аб"), &costs), 2.0);
        assert_eq!(edit_similarity("", "", &costs), 1.0);
        assert_eq!(edit_similarity("", "аб", &costs), 0.0);
    }

    #[test]
    fn test_edit_distance_prefers_cheap_substitution() {
        let costs = SubstitutionCosts::cyrillic();
        assert!((weighted_edit_distance(&chars("бар"), &chars("пар"), &costs) - 0.6).abs() < 1e-12);
        // substitution is cheaper than delete + insert
        assert_eq!(weighted_edit_distance(&chars("кот"), &chars("лот"), &costs), 1.0);
        assert_eq!(weighted_edit_distance(&chars("кот"), &chars("от"), &costs), 1.0);
    }

    #[test]
    fn test_rewrites() {
        assert_eq!(rewrite("щастие", Language::Bg), "штастие");
        assert_eq!(rewrite("шофьор", Language::Bg), "шофёр");
        assert_eq!(rewrite("объём", Language::Ru), "обём");
        assert_eq!(rewrite("касса", Language::Ru), "каса");
        assert_eq!(rewrite("мыло", Language::Ru), "мило");
    }

    #[test]
    fn test_longest_suffix_wins() {
        assert_eq!(normalize_suffix("красный"), "красен");
        assert_eq!(normalize_suffix("ранний"), "ранен");
        assert_eq!(normalize_suffix("рисовать"), "рисам");
        assert_eq!(normalize_suffix("говорить"), "говоря");
        assert_eq!(normalize_suffix("вода"), "вода");
    }

    #[test]
    fn test_similarity() {
        let mmedr = OrthographicSimilarity::new(OrthographicConfig::default());
        assert_eq!(mmedr.similarity("вода", "вода").unwrap(), 1.0);
        assert_eq!(mmedr.similarity("Вода", "ВОДА").unwrap(), 1.0);
        assert!((mmedr.similarity("бар", "пар").unwrap() - 0.8).abs() < 1e-12);
        assert_eq!(mmedr.similarity("красен", "красный").unwrap(), 1.0);
        assert_eq!(mmedr.similarity("каса", "касса").unwrap(), 1.0);
        let unrelated = mmedr.similarity("маса", "стол").unwrap();
        assert!((0.0..0.5).contains(&unrelated));
    }

    #[test]
    fn test_lemmatization_adds_basic_forms() {
        let resources = Arc::new(LexicalResources::new(Arc::new(
            MemoryResourceLoader::new()
                .with_lemma(Language::Bg, "водата", "вода")
                .with_lemma(Language::Ru, "воды", "вода"),
        )));
        let config = OrthographicConfig {
            use_lemmatization: true,
            min_word_length: 1,
        };
        let plain = OrthographicSimilarity::new(OrthographicConfig::default());
        let lemmatized = OrthographicSimilarity::new(config).with_resources(resources);

        assert!(plain.similarity("водата", "воды").unwrap() < 1.0);
        assert_eq!(lemmatized.similarity("водата", "воды").unwrap(), 1.0);
    }

    #[test]
    fn test_lemmatization_without_resources_is_config_error() {
        let config = OrthographicConfig {
            use_lemmatization: true,
            min_word_length: 1,
        };
        let mmedr = OrthographicSimilarity::new(config);
        assert!(matches!(
            mmedr.similarity("вода", "вода"),
            Err(FalseFriendsError::Config(_))
        ));
    }
}
