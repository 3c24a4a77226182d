//! Projection of monolingual contexts onto the bridge dictionary.
//!
//! Contexts of a Bulgarian and a Russian word share no keys, so both are
//! mapped to a dense vector indexed by the dictionary headwords. Dimension
//! `i` of a Bulgarian vector is the weight of headword `i`; dimension `i` of
//! a Russian vector is the summed weight of its translations.

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use crate::context::{ContextMode, ContextVectorBuilder, WordContext};
use crate::error::{FalseFriendsError, Result};
use crate::language::{Language, LanguagePair};
use crate::lexicon::BridgeDictionary;
use crate::storage::cache::{CacheKind, CacheStore};

/// The shared dimension space: a fixed ordering of dictionary headwords.
#[derive(Debug, Clone)]
pub struct BridgeSpace {
    dictionary: Arc<BridgeDictionary>,
    headwords: Vec<String>,
    layout: String,
}

impl BridgeSpace {
    /// Dimensions in sorted headword order.
    pub fn from_dictionary(dictionary: Arc<BridgeDictionary>) -> Self {
        let headwords = dictionary.headwords().to_vec();
        Self::build(dictionary, headwords)
    }

    /// Dimensions in a caller-chosen order. Every headword of the dictionary
    /// must appear exactly once.
    pub fn with_headwords(dictionary: Arc<BridgeDictionary>, headwords: Vec<String>) -> Result<Self> {
        let mut sorted = headwords.clone();
        sorted.sort();
        sorted.dedup();
        if sorted.len() != headwords.len() || sorted.as_slice() != dictionary.headwords() {
            return Err(FalseFriendsError::invalid_argument(
                "headword order must be a permutation of the dictionary headwords",
            ));
        }
        Ok(Self::build(dictionary, headwords))
    }

    fn build(dictionary: Arc<BridgeDictionary>, headwords: Vec<String>) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        for headword in &headwords {
            hasher.update(headword.as_bytes());
            hasher.update(b"\n");
        }
        let layout = format!("{}-{:08x}", headwords.len(), hasher.finalize());
        BridgeSpace {
            dictionary,
            headwords,
            layout,
        }
    }

    pub fn dimension(&self) -> usize {
        self.headwords.len()
    }

    pub fn headwords(&self) -> &[String] {
        &self.headwords
    }

    /// Fingerprint of the dimension order. Vectors built in different
    /// layouts are cached apart.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn dictionary(&self) -> &Arc<BridgeDictionary> {
        &self.dictionary
    }
}

/// Builds bridge vectors for words of either side of the language pair.
pub struct CrossLingualMapper {
    builder: Arc<ContextVectorBuilder>,
    space: Mutex<Option<Arc<BridgeSpace>>>,
    cache: Arc<CacheStore>,
    pair: LanguagePair,
}

impl CrossLingualMapper {
    pub fn new(
        builder: Arc<ContextVectorBuilder>,
        space: Arc<BridgeSpace>,
        cache: Arc<CacheStore>,
    ) -> Self {
        CrossLingualMapper {
            builder,
            space: Mutex::new(Some(space)),
            cache,
            pair: LanguagePair::default(),
        }
    }

    /// A mapper over the sorted headwords of the builder's bridge dictionary,
    /// loaded on the first projection.
    pub fn from_resources(builder: Arc<ContextVectorBuilder>, cache: Arc<CacheStore>) -> Self {
        CrossLingualMapper {
            builder,
            space: Mutex::new(None),
            cache,
            pair: LanguagePair::default(),
        }
    }

    pub fn space(&self) -> Result<Arc<BridgeSpace>> {
        let mut slot = self.space.lock();
        if let Some(space) = slot.as_ref() {
            return Ok(Arc::clone(space));
        }

        let space = Arc::new(BridgeSpace::from_dictionary(
            self.builder.resources().dictionary()?,
        ));
        info!("Bridge space ready: {} dimensions", space.dimension());
        *slot = Some(Arc::clone(&space));
        Ok(space)
    }

    pub fn pair(&self) -> LanguagePair {
        self.pair
    }

    /// Whether dimensions are clamped by reverse evidence.
    pub fn reverse_correction(&self) -> bool {
        let config = self.builder.config();
        config.reverse_vectors || config.mode == ContextMode::Reverse
    }

    /// Bridge vector of `word`, cached per word, language and dimension
    /// layout.
    pub fn project(&self, word: &str, language: Language) -> Result<Vec<f64>> {
        if language != self.pair.source && language != self.pair.target {
            return Err(FalseFriendsError::invalid_argument(format!(
                "cannot project {language} words, only {} and {}",
                self.pair.source, self.pair.target
            )));
        }

        let space = self.space()?;
        let word = word.to_lowercase();
        let vector: Vec<f64> = self.cache.get_or_compute_scoped(
            CacheKind::Vector,
            space.layout(),
            language,
            &word,
            || self.compute(&space, &word, language),
        )?;

        if vector.len() != space.dimension() {
            return Err(FalseFriendsError::cache(format!(
                "Cached vector of {word} ({language}) has {} dimensions, expected {}",
                vector.len(),
                space.dimension()
            )));
        }
        Ok(vector)
    }

    fn compute(&self, space: &BridgeSpace, word: &str, language: Language) -> Result<Vec<f64>> {
        let config = self.builder.config();
        let reverse = self.reverse_correction();
        // Reverse mode clamps here, on the bridge dimensions
        let mode = if config.mode == ContextMode::Reverse {
            ContextMode::Plain
        } else {
            config.mode
        };
        let context = self.builder.weighted_context(word, language, mode)?;

        let mut vector = Vec::with_capacity(space.dimension());
        for headword in space.headwords() {
            let mut value = self.forward_value(space, &context, headword, language);
            if reverse {
                value = if value >= config.min_occurrences && value > 0.0 {
                    value.min(self.reverse_value(space, word, headword, language)?)
                } else {
                    0.0
                };
            }
            vector.push(value);
        }

        debug!(
            "Projected {word} ({language}): {} non-zero of {} dimensions",
            vector.iter().filter(|v| **v != 0.0).count(),
            vector.len()
        );
        Ok(vector)
    }

    fn forward_value(
        &self,
        space: &BridgeSpace,
        context: &WordContext,
        headword: &str,
        language: Language,
    ) -> f64 {
        if language == self.pair.source {
            context.get(headword)
        } else {
            space
                .dictionary()
                .translations(headword)
                .iter()
                .map(|t| context.get(t))
                .sum()
        }
    }

    /// Weight of `word` in the plain contexts of the dimension's own words.
    fn reverse_value(
        &self,
        space: &BridgeSpace,
        word: &str,
        headword: &str,
        language: Language,
    ) -> Result<f64> {
        if language == self.pair.source {
            let context = self.builder.plain_context(headword, language)?;
            return self.builder.count_in_context(word, language, &context);
        }

        let mut total = 0.0;
        for translation in space.dictionary().translations(headword) {
            let context = self.builder.plain_context(translation, language)?;
            total += self.builder.count_in_context(word, language, &context)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextConfig;
    use crate::lexicon::{LexicalResources, MemoryResourceLoader};
    use crate::source::RetryPolicy;
    use crate::source::fetch::{OccurrenceCounter, SnippetFetcher};
    use crate::source::memory::{MemoryContextSource, MemoryOccurrenceSource};

    fn loader() -> MemoryResourceLoader {
        MemoryResourceLoader::new()
            .with_entry("бира", "пиво")
            .with_entry("студен", "холодный")
            .with_entry("студен", "студёный")
            .with_entry("вода", "вода")
    }

    fn source() -> MemoryContextSource {
        MemoryContextSource::new()
            .with_bodies("бира", Language::Bg, ["студен бира", "бира вода"])
            .with_bodies("студен", Language::Bg, ["студен бира"])
            .with_bodies("вода", Language::Bg, ["вода"])
            .with_bodies("пиво", Language::Ru, ["холодный пиво", "студёный пиво"])
            .with_bodies("холодный", Language::Ru, ["холодный чай"])
            .with_bodies("студёный", Language::Ru, ["студёный пиво"])
    }

    fn builder(config: ContextConfig, cache: &Arc<CacheStore>) -> Arc<ContextVectorBuilder> {
        let resources = Arc::new(LexicalResources::new(Arc::new(loader())));
        let fetcher = Arc::new(SnippetFetcher::new(
            Arc::new(source()),
            Arc::clone(cache),
            RetryPolicy::immediate(1),
        ));
        let counter = Arc::new(OccurrenceCounter::new(
            Arc::new(MemoryOccurrenceSource::new()),
            Arc::clone(cache),
            RetryPolicy::immediate(1),
        ));
        Arc::new(
            ContextVectorBuilder::new(config, resources, fetcher, counter, Arc::clone(cache))
                .unwrap(),
        )
    }

    fn mapper(config: ContextConfig) -> CrossLingualMapper {
        let cache = Arc::new(CacheStore::in_memory());
        CrossLingualMapper::from_resources(builder(config, &cache), cache)
    }

    #[test]
    fn test_space_is_sorted() {
        let mapper = mapper(ContextConfig::default());
        assert_eq!(mapper.space().unwrap().headwords(), ["бира", "вода", "студен"]);
    }

    #[test]
    fn test_custom_order_must_cover_dictionary() {
        let dictionary = Arc::new(BridgeDictionary::from_entries(vec![
            crate::lexicon::BilingualEntry::new("a", "b"),
            crate::lexicon::BilingualEntry::new("c", "d"),
        ]));
        assert!(BridgeSpace::with_headwords(Arc::clone(&dictionary), vec!["c".into(), "a".into()]).is_ok());
        assert!(BridgeSpace::with_headwords(Arc::clone(&dictionary), vec!["c".into()]).is_err());
        assert!(BridgeSpace::with_headwords(dictionary, vec!["a".into(), "a".into()]).is_err());
    }

    #[test]
    fn test_source_side_reads_headwords() {
        let mapper = mapper(ContextConfig::default());
        // context of "бира": студен 1, бира 2, вода 1
        assert_eq!(mapper.project("бира", Language::Bg).unwrap(), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_target_side_sums_translations() {
        let mapper = mapper(ContextConfig::default());
        // context of "пиво": холодный 1, студёный 1, пиво 2
        assert_eq!(mapper.project("Пиво", Language::Ru).unwrap(), vec![2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_reverse_correction() {
        let config = ContextConfig {
            mode: ContextMode::Reverse,
            ..ContextConfig::default()
        };
        let mapper = mapper(config);
        // "холодный" never mentions "пиво" in its own context
        assert_eq!(mapper.project("пиво", Language::Ru).unwrap(), vec![2.0, 0.0, 1.0]);
        // "вода" never mentions "бира"
        assert_eq!(mapper.project("бира", Language::Bg).unwrap(), vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rejects_language_outside_pair() {
        let mapper = mapper(ContextConfig::default());
        assert!(mapper.project("beer", Language::En).is_err());
    }

    #[test]
    fn test_layouts_cached_apart() {
        let cache = Arc::new(CacheStore::in_memory());
        let builder = builder(ContextConfig::default(), &cache);
        let dictionary = builder.resources().dictionary().unwrap();
        let sorted = Arc::new(BridgeSpace::from_dictionary(Arc::clone(&dictionary)));
        let reversed = Arc::new(
            BridgeSpace::with_headwords(
                dictionary,
                vec!["студен".into(), "вода".into(), "бира".into()],
            )
            .unwrap(),
        );
        assert_ne!(sorted.layout(), reversed.layout());

        let forward = CrossLingualMapper::new(Arc::clone(&builder), sorted, Arc::clone(&cache));
        let backward = CrossLingualMapper::new(builder, reversed, cache);
        assert_eq!(forward.project("бира", Language::Bg).unwrap(), vec![2.0, 1.0, 1.0]);
        assert_eq!(backward.project("бира", Language::Bg).unwrap(), vec![1.0, 1.0, 2.0]);
        assert_eq!(forward.project("бира", Language::Bg).unwrap(), vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_dictionary_loaded_on_first_projection() {
        let cache = Arc::new(CacheStore::in_memory());
        let builder = builder(ContextConfig::default(), &cache);
        let mapper = CrossLingualMapper::from_resources(Arc::clone(&builder), cache);
        assert_eq!(mapper.project("вода", Language::Bg).unwrap(), vec![0.0, 1.0, 0.0]);
        assert!(Arc::ptr_eq(
            mapper.space().unwrap().dictionary(),
            &builder.resources().dictionary().unwrap()
        ));
    }

    #[test]
    fn test_reverse_vectors_with_other_modes() {
        for mode in [ContextMode::Plain, ContextMode::AllWordForms] {
            let config = ContextConfig {
                mode,
                reverse_vectors: true,
                ..ContextConfig::default()
            };
            let mapper = mapper(config);
            assert!(mapper.reverse_correction());
            assert_eq!(mapper.project("пиво", Language::Ru).unwrap(), vec![2.0, 0.0, 1.0]);
            assert_eq!(mapper.project("бира", Language::Bg).unwrap(), vec![2.0, 0.0, 1.0]);
        }
        assert!(!mapper(ContextConfig::default()).reverse_correction());
    }
}
