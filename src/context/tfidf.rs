//! TF-IDF reweighting of context vectors.
//!
//! `tf = count / total` inside the context and
//! `idf = log2(corpus_size / (1 + occurrences))`, where `occurrences` is the
//! web occurrence count of the context word.

use std::sync::Arc;

use crate::context::word_context::WordContext;
use crate::error::Result;
use crate::language::Language;
use crate::prefetch::OccurrencePrefetcher;
use crate::source::fetch::OccurrenceCounter;

pub struct TfIdfWeighting {
    counter: Arc<OccurrenceCounter>,
    prefetcher: Option<Arc<OccurrencePrefetcher>>,
    total_corpus_size: f64,
}

impl TfIdfWeighting {
    pub fn new(counter: Arc<OccurrenceCounter>, total_corpus_size: f64) -> Self {
        TfIdfWeighting {
            counter,
            prefetcher: None,
            total_corpus_size,
        }
    }

    /// Queue every count on the pool before reading them one by one.
    pub fn with_prefetcher(mut self, prefetcher: Arc<OccurrencePrefetcher>) -> Self {
        self.prefetcher = Some(prefetcher);
        self
    }

    pub fn set_prefetcher(&mut self, prefetcher: Arc<OccurrencePrefetcher>) {
        self.prefetcher = Some(prefetcher);
    }

    pub fn idf(&self, occurrences: u64) -> f64 {
        (self.total_corpus_size / (1.0 + occurrences as f64)).log2()
    }

    /// A reweighted copy of `context`.
    pub fn weigh(&self, context: &WordContext, language: Language) -> Result<WordContext> {
        let total = context.total();
        if total == 0.0 {
            return Ok(context.clone());
        }

        if let Some(prefetcher) = &self.prefetcher {
            for word in context.words() {
                prefetcher.schedule(word, language)?;
            }
        }

        let mut weighted = WordContext::new();
        for (word, count) in context.iter() {
            let occurrences = self.counter.count(word, language)?;
            weighted.set(word, count / total * self.idf(occurrences));
        }
        Ok(weighted)
    }
}
