//! Building context vectors from search-result snippets.
//!
//! A plain context counts every word within `window_radius` positions of an
//! occurrence of the target word (the occurrence itself included). The other
//! [`ContextMode`]s are assembled from plain contexts. Every context is cached
//! per mode, word and language.

use std::sync::Arc;

use ahash::AHashSet;
use log::debug;

use crate::analysis::normalizer::WordExtractor;
use crate::analysis::phrase::PhraseEncoder;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::context_word::ContextWordFilter;
use crate::config::ContextConfig;
use crate::context::ContextMode;
use crate::context::tfidf::TfIdfWeighting;
use crate::context::word_context::WordContext;
use crate::error::Result;
use crate::language::{Language, Script};
use crate::lexicon::LexicalResources;
use crate::prefetch::OccurrencePrefetcher;
use crate::source::fetch::{OccurrenceCounter, SnippetFetcher};
use crate::storage::cache::CacheStore;

/// Add one to every word within `radius` of a target occurrence.
///
/// A word covered by several windows is still counted once per text.
pub fn count_window_words<F>(words: &[String], is_target: F, radius: usize, context: &mut WordContext)
where
    F: Fn(&str) -> bool,
{
    let mut in_context = vec![false; words.len()];
    for (i, word) in words.iter().enumerate() {
        if is_target(word) {
            let start = i.saturating_sub(radius);
            let end = (i + radius).min(words.len() - 1);
            in_context[start..=end].fill(true);
        }
    }

    for (word, marked) in words.iter().zip(in_context) {
        if marked {
            context.add(word, 1.0);
        }
    }
}

pub struct ContextVectorBuilder {
    config: ContextConfig,
    resources: Arc<LexicalResources>,
    fetcher: Arc<SnippetFetcher>,
    cache: Arc<CacheStore>,
    tfidf: TfIdfWeighting,
    cyrillic: WordExtractor,
    latin: WordExtractor,
}

impl ContextVectorBuilder {
    pub fn new(
        config: ContextConfig,
        resources: Arc<LexicalResources>,
        fetcher: Arc<SnippetFetcher>,
        counter: Arc<OccurrenceCounter>,
        cache: Arc<CacheStore>,
    ) -> Result<Self> {
        let tfidf = TfIdfWeighting::new(counter, config.total_corpus_size);
        Ok(ContextVectorBuilder {
            config,
            resources,
            fetcher,
            cache,
            tfidf,
            cyrillic: WordExtractor::for_script(Script::Cyrillic)?,
            latin: WordExtractor::for_script(Script::Latin)?,
        })
    }

    /// Warm occurrence counts on a worker pool during TF-IDF weighting.
    pub fn attach_prefetcher(&mut self, prefetcher: Arc<OccurrencePrefetcher>) {
        self.tfidf.set_prefetcher(prefetcher);
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn resources(&self) -> &Arc<LexicalResources> {
        &self.resources
    }

    fn extractor(&self, language: Language) -> &WordExtractor {
        match language.script() {
            Script::Cyrillic => &self.cyrillic,
            Script::Latin => &self.latin,
        }
    }

    /// Forms whose occurrences anchor a context window.
    pub fn target_forms(&self, word: &str, language: Language) -> Result<Vec<String>> {
        if self.config.use_lemmatization {
            Ok(self.resources.lemmas(language)?.all_word_forms(word))
        } else {
            Ok(vec![word.to_string()])
        }
    }

    fn extract_context(&self, word: &str, language: Language) -> Result<WordContext> {
        let forms = self.target_forms(word, language)?;
        let targets: AHashSet<&str> = forms.iter().map(String::as_str).collect();
        let phrases = PhraseEncoder::new(&forms);
        let extractor = self.extractor(language);

        let filter = if self.config.remove_short_and_stop_words {
            Some(
                ContextWordFilter::new(
                    self.config.min_word_length,
                    self.resources.stop_words(language)?,
                )
                .protecting(forms.iter().cloned()),
            )
        } else {
            None
        };

        let mut context = WordContext::new();
        for form in &forms {
            let snippets = self.fetcher.snippets(form, language)?;
            for text in snippets.texts() {
                let mut tokens: TokenStream = extractor.snippet_tokens(text, &phrases)?;
                if let Some(filter) = &filter {
                    tokens = filter.filter(tokens)?;
                }
                let words: Vec<String> = tokens.map(|t| t.text).collect();
                count_window_words(
                    &words,
                    |w| targets.contains(w),
                    self.config.window_radius,
                    &mut context,
                );
            }
        }

        if self.config.use_lemmatization {
            context = self.resources.lemmas(language)?.collapse(&context);
        }
        debug!(
            "Context of {word} ({language}): {} words, total {}",
            context.len(),
            context.total()
        );
        Ok(context)
    }

    /// Words around `word` itself.
    pub fn plain_context(&self, word: &str, language: Language) -> Result<WordContext> {
        let word = word.to_lowercase();
        self.cache
            .get_or_compute(ContextMode::Plain.cache_kind(), language, &word, || {
                self.extract_context(&word, language)
            })
    }

    /// Mean of the plain contexts of every word form of `word`.
    pub fn all_forms_context(&self, word: &str, language: Language) -> Result<WordContext> {
        let word = word.to_lowercase();
        self.cache.get_or_compute(
            ContextMode::AllWordForms.cache_kind(),
            language,
            &word,
            || {
                let forms = self.resources.lemmas(language)?.all_word_forms(&word);
                let mut context = WordContext::new();
                for form in &forms {
                    context.merge(&self.plain_context(form, language)?);
                }
                context.scale(1.0 / forms.len() as f64);
                Ok(context)
            },
        )
    }

    /// Plain context where every word is capped by how often `word` appears
    /// in that word's own context. Words below the threshold are dropped.
    pub fn reverse_context(&self, word: &str, language: Language) -> Result<WordContext> {
        let word = word.to_lowercase();
        self.cache
            .get_or_compute(ContextMode::Reverse.cache_kind(), language, &word, || {
                let mut context = self.plain_context(&word, language)?;
                let entries: Vec<(String, f64)> =
                    context.iter().map(|(w, c)| (w.to_string(), c)).collect();

                for (context_word, forward) in entries {
                    if forward < self.config.min_occurrences {
                        context.remove(&context_word);
                    } else {
                        let reverse = self.plain_context(&context_word, language)?.get(&word);
                        context.set(&context_word, forward.min(reverse));
                    }
                }
                Ok(context)
            })
    }

    /// Plain context plus the plain context of every word meeting the threshold.
    pub fn indirect_context(&self, word: &str, language: Language) -> Result<WordContext> {
        let word = word.to_lowercase();
        self.cache
            .get_or_compute(ContextMode::Indirect.cache_kind(), language, &word, || {
                let base = self.plain_context(&word, language)?;
                let mut context = base.clone();
                for (context_word, count) in base.iter() {
                    if count >= self.config.min_occurrences {
                        context.merge(&self.plain_context(context_word, language)?);
                    }
                }
                Ok(context)
            })
    }

    pub fn build_context(
        &self,
        word: &str,
        language: Language,
        mode: ContextMode,
    ) -> Result<WordContext> {
        match mode {
            ContextMode::Plain => self.plain_context(word, language),
            ContextMode::AllWordForms => self.all_forms_context(word, language),
            ContextMode::Reverse => self.reverse_context(word, language),
            ContextMode::Indirect => self.indirect_context(word, language),
        }
    }

    /// Context in `mode`, TF-IDF weighted when configured.
    pub fn weighted_context(
        &self,
        word: &str,
        language: Language,
        mode: ContextMode,
    ) -> Result<WordContext> {
        let context = self.build_context(word, language, mode)?;
        if self.config.use_tf_idf {
            self.tfidf.weigh(&context, language)
        } else {
            Ok(context)
        }
    }

    /// The configured mode, TF-IDF weighted when configured.
    pub fn context(&self, word: &str, language: Language) -> Result<WordContext> {
        self.weighted_context(word, language, self.config.mode)
    }

    /// Weight of `word` in `context`, summed over its word forms when
    /// lemmatization is enabled.
    pub fn count_in_context(
        &self,
        word: &str,
        language: Language,
        context: &WordContext,
    ) -> Result<f64> {
        if self.config.use_lemmatization {
            Ok(self
                .resources
                .lemmas(language)?
                .all_word_forms(word)
                .iter()
                .map(|form| context.get(form))
                .sum())
        } else {
            Ok(context.get(word))
        }
    }
}
