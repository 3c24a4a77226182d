//! The extraction state machine.
//!
//! ```text
//! Loaded --compute_statistics--> StatsComputed --extract--> Extracted
//! ```
//!
//! Calling a step out of order fails with
//! [`FalseFriendsError::InvalidOperation`].

use std::sync::Arc;

use log::{debug, info};

use crate::config::ExtractionConfig;
use crate::cooccurrence::CooccurrenceStatistics;
use crate::error::{FalseFriendsError, Result};
use crate::extraction::corpus::{GoldJudgments, ParallelCorpus};
use crate::extraction::output::{FriendnessRecord, RecordSink};
use crate::language::Language;
use crate::lexicon::LexicalResources;
use crate::semantic::SemanticSimilarityEngine;
use crate::similarity::orthographic::OrthographicSimilarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    /// Corpus and judgments are loaded.
    Loaded,
    /// Co-occurrence counts are available.
    StatsComputed,
    /// Every candidate pair has been scored.
    Extracted,
}

impl ExtractionState {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionState::Loaded => "loaded",
            ExtractionState::StatsComputed => "stats_computed",
            ExtractionState::Extracted => "extracted",
        }
    }
}

/// Scores orthographically similar word pairs of a parallel corpus.
pub struct FalseFriendsExtractor {
    config: ExtractionConfig,
    resources: Arc<LexicalResources>,
    orthographic: Arc<OrthographicSimilarity>,
    semantic: Arc<SemanticSimilarityEngine>,
    corpus: ParallelCorpus,
    gold: GoldJudgments,
    statistics: Option<CooccurrenceStatistics>,
    state: ExtractionState,
}

impl FalseFriendsExtractor {
    pub fn new(
        config: ExtractionConfig,
        resources: Arc<LexicalResources>,
        orthographic: Arc<OrthographicSimilarity>,
        semantic: Arc<SemanticSimilarityEngine>,
        corpus: ParallelCorpus,
        gold: GoldJudgments,
    ) -> Self {
        info!(
            "Extractor loaded: {} sentence pairs, {} judgments",
            corpus.len(),
            gold.len()
        );
        FalseFriendsExtractor {
            config,
            resources,
            orthographic,
            semantic,
            corpus,
            gold,
            statistics: None,
            state: ExtractionState::Loaded,
        }
    }

    pub fn state(&self) -> ExtractionState {
        self.state
    }

    pub fn corpus(&self) -> &ParallelCorpus {
        &self.corpus
    }

    pub fn statistics(&self) -> Option<&CooccurrenceStatistics> {
        self.statistics.as_ref()
    }

    fn expect_state(&self, expected: ExtractionState, operation: &str) -> Result<()> {
        if self.state != expected {
            return Err(FalseFriendsError::invalid_operation(format!(
                "{operation} requires state {}, but the extractor is {}",
                expected.name(),
                self.state.name()
            )));
        }
        Ok(())
    }

    /// Count lemmas and lemma pairs over every sentence pair.
    pub fn compute_statistics(&mut self) -> Result<&CooccurrenceStatistics> {
        self.expect_state(ExtractionState::Loaded, "compute_statistics")?;

        let mut statistics = if self.config.use_lemmatization {
            CooccurrenceStatistics::with_lemmas(
                self.resources.lemmas(Language::Bg)?,
                self.resources.lemmas(Language::Ru)?,
            )
        } else {
            CooccurrenceStatistics::new()
        };
        statistics.add_all(self.corpus.pairs());

        self.state = ExtractionState::StatsComputed;
        info!(
            "Statistics computed over {} sentence pairs",
            statistics.sentence_count()
        );
        Ok(self.statistics.insert(statistics))
    }

    /// Score every judged pair whose orthographic similarity reaches the
    /// threshold and hand it to `sink`. Returns the number of records.
    pub fn extract(&mut self, sink: &mut dyn RecordSink) -> Result<usize> {
        self.expect_state(ExtractionState::StatsComputed, "extract")?;
        let statistics = self
            .statistics
            .as_ref()
            .ok_or_else(|| FalseFriendsError::invalid_operation("statistics are missing"))?;

        let mut written = 0;
        for bg_word in self.corpus.source_vocabulary() {
            debug!("Extracting words statistics: {bg_word}");
            for ru_word in self.corpus.target_vocabulary() {
                let similarity = self.orthographic.similarity(bg_word, ru_word)?;
                if similarity < self.config.min_orthographic_similarity {
                    continue;
                }
                let Some(label) = self.gold.label(bg_word, ru_word) else {
                    continue;
                };

                let counts = statistics.pair_counts(bg_word, ru_word);
                let record = FriendnessRecord {
                    bg_word: bg_word.clone(),
                    ru_word: ru_word.clone(),
                    label: label.to_string(),
                    orthographic_similarity: similarity,
                    bg_count: counts.source,
                    ru_count: counts.target,
                    joint_count: counts.joint,
                    friendness: self
                        .config
                        .formula
                        .score(counts.source, counts.target, counts.joint),
                    semantic_similarity: self.semantic.cross_sim(bg_word, ru_word)?,
                };
                sink.write_record(&record)?;
                written += 1;
            }
        }
        sink.finish()?;

        self.state = ExtractionState::Extracted;
        info!("Extraction finished: {written} records");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::cooccurrence::SentencePair;
    use crate::extraction::output::MemoryRecordSink;
    use crate::lexicon::MemoryResourceLoader;
    use crate::source::memory::{MemoryContextSource, MemoryOccurrenceSource};
    use crate::storage::MemoryStorage;
    use crate::toolkit::Toolkit;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn extractor() -> FalseFriendsExtractor {
        let toolkit = Toolkit::with_parts(
            EngineConfig::default(),
            Arc::new(MemoryResourceLoader::new().with_entry("вода", "вода")),
            Arc::new(MemoryContextSource::new()),
            Arc::new(MemoryOccurrenceSource::new()),
            Arc::new(MemoryStorage::new()),
        )
        .unwrap();

        let mut corpus = ParallelCorpus::default();
        corpus.push(SentencePair::new(words("вода"), words("вода")));
        let mut gold = GoldJudgments::default();
        gold.insert("вода", "вода", "yes");
        toolkit.extractor(corpus, gold)
    }

    #[test]
    fn test_steps_must_run_in_order() {
        let mut extractor = extractor();
        let mut sink = MemoryRecordSink::new();
        assert!(matches!(
            extractor.extract(&mut sink),
            Err(FalseFriendsError::InvalidOperation(_))
        ));

        extractor.compute_statistics().unwrap();
        assert_eq!(extractor.state(), ExtractionState::StatsComputed);
        assert!(matches!(
            extractor.compute_statistics(),
            Err(FalseFriendsError::InvalidOperation(_))
        ));

        assert_eq!(extractor.extract(&mut sink).unwrap(), 1);
        assert_eq!(extractor.state(), ExtractionState::Extracted);
        assert!(extractor.extract(&mut sink).is_err());
    }

    #[test]
    fn test_identical_words_are_scored() {
        let mut extractor = extractor();
        extractor.compute_statistics().unwrap();
        let mut sink = MemoryRecordSink::new();
        extractor.extract(&mut sink).unwrap();

        let record = &sink.records()[0];
        assert_eq!(record.orthographic_similarity, 1.0);
        assert_eq!(record.joint_count, 1.0);
        // F2: 2² / (1 · 1)
        assert_eq!(record.friendness, 4.0);
        // no snippets, so both bridge vectors are zero
        assert_eq!(record.semantic_similarity, 0.0);
    }
}
