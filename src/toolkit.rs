//! Wiring of every engine component from one [`EngineConfig`].

use std::sync::Arc;

use log::{info, warn};

use crate::config::EngineConfig;
use crate::context::ContextVectorBuilder;
use crate::crosslingual::CrossLingualMapper;
use crate::error::Result;
use crate::extraction::corpus::{GoldJudgments, ParallelCorpus};
use crate::extraction::pipeline::FalseFriendsExtractor;
use crate::lexicon::{FileResourceLoader, LexicalResources, ResourceLoader};
use crate::prefetch::OccurrencePrefetcher;
use crate::semantic::SemanticSimilarityEngine;
use crate::similarity::orthographic::OrthographicSimilarity;
use crate::source::directory::{OccurrenceTableSource, SnippetDirectorySource};
use crate::source::fetch::{OccurrenceCounter, SnippetFetcher};
use crate::source::memory::{MemoryContextSource, MemoryOccurrenceSource};
use crate::source::{ContextSource, ContextSourceKind, OccurrenceSource, RetryPolicy};
use crate::storage::{CacheStore, FileStorage, MemoryStorage, Storage};

/// The engine components, sharing one cache and one set of resources.
pub struct Toolkit {
    config: EngineConfig,
    resources: Arc<LexicalResources>,
    cache: Arc<CacheStore>,
    counter: Arc<OccurrenceCounter>,
    prefetcher: Option<Arc<OccurrencePrefetcher>>,
    builder: Arc<ContextVectorBuilder>,
    orthographic: Arc<OrthographicSimilarity>,
    semantic: Arc<SemanticSimilarityEngine>,
}

impl Toolkit {
    /// Build file-backed sources, resources and cache as configured.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let loader = Arc::new(FileResourceLoader::new(
            config.resources.dictionary_path.clone(),
            config.resources.resource_dir.clone(),
        ));

        let context_source: Arc<dyn ContextSource> = match config.sources.kind {
            ContextSourceKind::Directory => {
                Arc::new(SnippetDirectorySource::new(config.sources.snippet_dir.clone()))
            }
            ContextSourceKind::Memory => Arc::new(MemoryContextSource::new()),
        };

        let occurrence_source: Arc<dyn OccurrenceSource> = match &config.sources.occurrence_table {
            Some(path) => Arc::new(OccurrenceTableSource::load(path)?),
            None => {
                if config.context.use_tf_idf {
                    warn!("TF-IDF is enabled without an occurrence table; every word counts 0");
                }
                Arc::new(MemoryOccurrenceSource::new())
            }
        };

        let storage: Arc<dyn Storage> = match &config.cache_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)?),
            None => Arc::new(MemoryStorage::new()),
        };

        Self::with_parts(config, loader, context_source, occurrence_source, storage)
    }

    /// Build from explicit collaborators.
    pub fn with_parts(
        config: EngineConfig,
        loader: Arc<dyn ResourceLoader>,
        context_source: Arc<dyn ContextSource>,
        occurrence_source: Arc<dyn OccurrenceSource>,
        storage: Arc<dyn Storage>,
    ) -> Result<Self> {
        config.validate()?;

        let resources = Arc::new(LexicalResources::new(loader));
        let cache = Arc::new(CacheStore::new(storage));
        let retry = RetryPolicy::from_config(&config.retry);

        let fetcher = Arc::new(SnippetFetcher::new(
            context_source,
            Arc::clone(&cache),
            retry.clone(),
        ));
        let counter = Arc::new(OccurrenceCounter::new(
            occurrence_source,
            Arc::clone(&cache),
            retry,
        ));

        let mut builder = ContextVectorBuilder::new(
            config.context.clone(),
            Arc::clone(&resources),
            fetcher,
            Arc::clone(&counter),
            Arc::clone(&cache),
        )?;
        let prefetcher = if config.context.use_tf_idf && config.prefetch.enabled {
            let prefetcher = Arc::new(OccurrencePrefetcher::start(
                Arc::clone(&counter),
                &config.prefetch,
            )?);
            builder.attach_prefetcher(Arc::clone(&prefetcher));
            Some(prefetcher)
        } else {
            None
        };
        let builder = Arc::new(builder);

        let mapper = Arc::new(CrossLingualMapper::from_resources(
            Arc::clone(&builder),
            Arc::clone(&cache),
        ));
        let semantic = Arc::new(SemanticSimilarityEngine::new(
            Arc::clone(&builder),
            mapper,
            config.similarity.measure,
        ));
        let orthographic = Arc::new(
            OrthographicSimilarity::new(config.orthographic.clone())
                .with_resources(Arc::clone(&resources)),
        );

        info!(
            "Toolkit ready: context mode {}, measure {}",
            config.context.mode.name(),
            config.similarity.measure.name()
        );

        Ok(Toolkit {
            config,
            resources,
            cache,
            counter,
            prefetcher,
            builder,
            orthographic,
            semantic,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resources(&self) -> &Arc<LexicalResources> {
        &self.resources
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub fn counter(&self) -> &Arc<OccurrenceCounter> {
        &self.counter
    }

    pub fn contexts(&self) -> &Arc<ContextVectorBuilder> {
        &self.builder
    }

    pub fn orthographic(&self) -> &Arc<OrthographicSimilarity> {
        &self.orthographic
    }

    pub fn semantic(&self) -> &Arc<SemanticSimilarityEngine> {
        &self.semantic
    }

    /// The pool attached to TF-IDF weighting, or a new one.
    pub fn prefetcher(&self) -> Result<Arc<OccurrencePrefetcher>> {
        match &self.prefetcher {
            Some(prefetcher) => Ok(Arc::clone(prefetcher)),
            None => Ok(Arc::new(OccurrencePrefetcher::start(
                Arc::clone(&self.counter),
                &self.config.prefetch,
            )?)),
        }
    }

    pub fn extractor(&self, corpus: ParallelCorpus, gold: GoldJudgments) -> FalseFriendsExtractor {
        FalseFriendsExtractor::new(
            self.config.extraction.clone(),
            Arc::clone(&self.resources),
            Arc::clone(&self.orthographic),
            Arc::clone(&self.semantic),
            corpus,
            gold,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::ContextConfig;
    use crate::language::Language;
    use crate::lexicon::MemoryResourceLoader;

    #[test]
    fn test_from_config_with_files() {
        let dir = TempDir::new().unwrap();
        let dictionary = dir.path().join("dictionary.csv");
        fs::write(&dictionary, "BG;RU\nбира;пиво\n").unwrap();
        fs::write(dir.path().join("Stop-Words-bg.csv"), "Word\nи\n").unwrap();
        let snippets = dir.path().join("snippets");
        fs::create_dir_all(snippets.join("bg")).unwrap();

        let mut config = EngineConfig::default();
        config.resources.dictionary_path = dictionary;
        config.resources.resource_dir = dir.path().to_path_buf();
        config.sources.snippet_dir = snippets.clone();
        config.cache_dir = Some(dir.path().join("cache"));

        let source = SnippetDirectorySource::new(&snippets);
        let path = source.snippet_path("бира", Language::Bg).unwrap();
        fs::write(&path, "text\tСтудена бира\n").unwrap();

        let toolkit = Toolkit::from_config(config).unwrap();
        let context = toolkit.contexts().plain_context("бира", Language::Bg).unwrap();
        assert_eq!(context.get("студена"), 1.0);
        assert!(dir.path().join("cache").join("context").is_dir());
        assert!(toolkit.orthographic().similarity("бира", "пиво").unwrap() < 0.9);
    }

    #[test]
    fn test_prefetcher_attached_for_tf_idf() {
        let config = EngineConfig {
            context: ContextConfig {
                use_tf_idf: true,
                ..ContextConfig::default()
            },
            ..EngineConfig::default()
        };
        let toolkit = Toolkit::with_parts(
            config,
            Arc::new(MemoryResourceLoader::new()),
            Arc::new(MemoryContextSource::new()),
            Arc::new(MemoryOccurrenceSource::new()),
            Arc::new(MemoryStorage::new()),
        )
        .unwrap();
        let first = toolkit.prefetcher().unwrap();
        let second = toolkit.prefetcher().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_dictionary_only_needed_for_projection() {
        let dir = TempDir::new().unwrap();
        let mut config = EngineConfig::default();
        config.resources.dictionary_path = dir.path().join("missing.csv");
        config.resources.resource_dir = dir.path().to_path_buf();
        config.sources.snippet_dir = dir.path().join("snippets");

        let toolkit = Toolkit::from_config(config).unwrap();
        assert_eq!(toolkit.orthographic().similarity("вода", "вода").unwrap(), 1.0);
        assert!(matches!(
            toolkit.semantic().cross_sim("бира", "пиво"),
            Err(crate::error::FalseFriendsError::Io(_))
        ));
    }
}
