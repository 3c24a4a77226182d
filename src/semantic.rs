//! Context-based semantic similarity.

use std::sync::Arc;

use crate::context::ContextVectorBuilder;
use crate::crosslingual::CrossLingualMapper;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::similarity::vector::VectorMeasure;

/// Compares words by the company they keep.
///
/// `sem_sim` compares two words of one language through their contexts.
/// `cross_sim` compares a Bulgarian and a Russian word through their bridge
/// vectors.
pub struct SemanticSimilarityEngine {
    builder: Arc<ContextVectorBuilder>,
    mapper: Arc<CrossLingualMapper>,
    measure: VectorMeasure,
}

impl SemanticSimilarityEngine {
    pub fn new(
        builder: Arc<ContextVectorBuilder>,
        mapper: Arc<CrossLingualMapper>,
        measure: VectorMeasure,
    ) -> Self {
        SemanticSimilarityEngine {
            builder,
            mapper,
            measure,
        }
    }

    pub fn measure(&self) -> VectorMeasure {
        self.measure
    }

    pub fn builder(&self) -> &Arc<ContextVectorBuilder> {
        &self.builder
    }

    pub fn mapper(&self) -> &Arc<CrossLingualMapper> {
        &self.mapper
    }

    /// Cosine of the contexts of two words of the same language.
    pub fn sem_sim(&self, first: &str, second: &str, language: Language) -> Result<f64> {
        if self.measure != VectorMeasure::Cosine {
            return Err(FalseFriendsError::config(format!(
                "Monolingual similarity supports only cosine, not {}",
                self.measure.name()
            )));
        }

        let first = self.builder.context(first, language)?;
        let second = self.builder.context(second, language)?;
        Ok(first.cosine(&second))
    }

    /// Similarity of a source-language word and a target-language word.
    pub fn cross_sim(&self, source_word: &str, target_word: &str) -> Result<f64> {
        let pair = self.mapper.pair();
        let source = self.mapper.project(source_word, pair.source)?;
        let target = self.mapper.project(target_word, pair.target)?;
        self.measure.similarity(&source, &target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextConfig;
    use crate::crosslingual::BridgeSpace;
    use crate::lexicon::{LexicalResources, MemoryResourceLoader};
    use crate::source::RetryPolicy;
    use crate::source::fetch::{OccurrenceCounter, SnippetFetcher};
    use crate::source::memory::{MemoryContextSource, MemoryOccurrenceSource};
    use crate::storage::cache::CacheStore;

    fn engine(measure: VectorMeasure) -> SemanticSimilarityEngine {
        let loader = MemoryResourceLoader::new()
            .with_entry("бира", "пиво")
            .with_entry("студен", "холодный")
            .with_entry("маса", "стол");
        let source = MemoryContextSource::new()
            .with_bodies("бира", Language::Bg, ["студен бира"])
            .with_bodies("пиво", Language::Ru, ["холодный пиво"])
            .with_bodies("стол", Language::Ru, ["большой стол"])
            .with_bodies("beer", Language::En, ["cold beer"])
            .with_bodies("ale", Language::En, ["cold ale"])
            .with_bodies("table", Language::En, ["wooden table"]);

        let cache = Arc::new(CacheStore::in_memory());
        let resources = Arc::new(LexicalResources::new(Arc::new(loader)));
        let fetcher = Arc::new(SnippetFetcher::new(
            Arc::new(source),
            Arc::clone(&cache),
            RetryPolicy::immediate(1),
        ));
        let counter = Arc::new(OccurrenceCounter::new(
            Arc::new(MemoryOccurrenceSource::new()),
            Arc::clone(&cache),
            RetryPolicy::immediate(1),
        ));
        let builder = Arc::new(
            ContextVectorBuilder::new(
                ContextConfig::default(),
                Arc::clone(&resources),
                fetcher,
                counter,
                Arc::clone(&cache),
            )
            .unwrap(),
        );
        let space = Arc::new(BridgeSpace::from_dictionary(resources.dictionary().unwrap()));
        let mapper = Arc::new(CrossLingualMapper::new(Arc::clone(&builder), space, cache));
        SemanticSimilarityEngine::new(builder, mapper, measure)
    }

    #[test]
    fn test_sem_sim() {
        let engine = engine(VectorMeasure::Cosine);
        // {cold, beer} against {cold, ale}
        let similarity = engine.sem_sim("beer", "ale", Language::En).unwrap();
        assert!((similarity - 0.5).abs() < 1e-9);
        assert_eq!(engine.sem_sim("beer", "table", Language::En).unwrap(), 0.0);
    }

    #[test]
    fn test_sem_sim_requires_cosine() {
        let engine = engine(VectorMeasure::Dice);
        assert!(matches!(
            engine.sem_sim("beer", "ale", Language::En),
            Err(FalseFriendsError::Config(_))
        ));
    }

    #[test]
    fn test_cross_sim() {
        for measure in [VectorMeasure::Cosine, VectorMeasure::Dice] {
            let engine = engine(measure);
            let related = engine.cross_sim("бира", "пиво").unwrap();
            let unrelated = engine.cross_sim("бира", "стол").unwrap();
            assert!((related - 1.0).abs() < 1e-9, "{}", measure.name());
            assert_eq!(unrelated, 0.0);
        }
    }
}
