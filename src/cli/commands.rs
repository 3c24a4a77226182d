//! Command implementations for the falsefriends CLI.

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{ContextConfig, EngineConfig};
use crate::context::ContextMode;
use crate::cooccurrence::FriendnessFormula;
use crate::error::Result;
use crate::extraction::{CsvRecordWriter, GoldJudgments, ParallelCorpus};
use crate::language::Language;
use crate::prefetch::OccurrencePrefetcher;
use crate::similarity::vector::VectorMeasure;
use crate::toolkit::Toolkit;

/// Execute a CLI command.
pub fn execute_command(args: FalseFriendsArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Mmedr(mmedr_args) => mmedr(mmedr_args, config, &args),
        Command::SemSim(sem_sim_args) => sem_sim(sem_sim_args, config, &args),
        Command::CrossSim(cross_sim_args) => cross_sim(cross_sim_args, config, &args),
        Command::Context(context_args) => show_context(context_args, config, &args),
        Command::Extract(extract_args) => extract(extract_args, config, &args),
        Command::Prefetch(prefetch_args) => prefetch(prefetch_args, config, &args),
    }
}

/// The configuration file if given, defaults otherwise, with global overrides.
pub fn load_config(args: &FalseFriendsArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    Ok(config)
}

/// Apply context overrides given on the command line.
pub fn apply_context_options(config: &mut ContextConfig, options: &ContextOptions) -> Result<()> {
    if let Some(mode) = &options.mode {
        config.mode = ContextMode::parse_str(mode)?;
    }
    if let Some(window) = options.window {
        config.window_radius = window;
    }
    config.use_tf_idf |= options.tf_idf;
    config.use_lemmatization |= options.lemmatize;
    config.reverse_vectors |= options.reverse_vectors;
    Ok(())
}

fn mmedr(args: &MmedrArgs, mut config: EngineConfig, cli_args: &FalseFriendsArgs) -> Result<()> {
    config.orthographic.use_lemmatization |= args.lemmatize;
    let toolkit = Toolkit::from_config(config)?;
    let similarity = toolkit
        .orthographic()
        .similarity(&args.bg_word, &args.ru_word)?;

    output_result(
        "Orthographic similarity",
        &SimilarityResult {
            measure: "MMEDR".to_string(),
            first: args.bg_word.clone(),
            second: args.ru_word.clone(),
            similarity,
        },
        cli_args,
    )
}

fn sem_sim(args: &SemSimArgs, mut config: EngineConfig, cli_args: &FalseFriendsArgs) -> Result<()> {
    let language = Language::parse_str(&args.language)?;
    apply_context_options(&mut config.context, &args.context)?;
    let toolkit = Toolkit::from_config(config)?;
    let similarity = toolkit
        .semantic()
        .sem_sim(&args.first, &args.second, language)?;

    output_result(
        "Monolingual semantic similarity",
        &SimilarityResult {
            measure: "SemSim".to_string(),
            first: args.first.clone(),
            second: args.second.clone(),
            similarity,
        },
        cli_args,
    )
}

fn cross_sim(
    args: &CrossSimArgs,
    mut config: EngineConfig,
    cli_args: &FalseFriendsArgs,
) -> Result<()> {
    if let Some(measure) = &args.measure {
        config.similarity.measure = VectorMeasure::parse_str(measure)?;
    }
    apply_context_options(&mut config.context, &args.context)?;
    let toolkit = Toolkit::from_config(config)?;
    let similarity = toolkit.semantic().cross_sim(&args.bg_word, &args.ru_word)?;

    output_result(
        "Cross-lingual semantic similarity",
        &SimilarityResult {
            measure: "CrossSim".to_string(),
            first: args.bg_word.clone(),
            second: args.ru_word.clone(),
            similarity,
        },
        cli_args,
    )
}

fn show_context(
    args: &ContextArgs,
    mut config: EngineConfig,
    cli_args: &FalseFriendsArgs,
) -> Result<()> {
    let language = Language::parse_str(&args.language)?;
    apply_context_options(&mut config.context, &args.context)?;
    let mode = config.context.mode;
    let toolkit = Toolkit::from_config(config)?;
    let context = toolkit.contexts().context(&args.word, language)?;

    let limit = args.limit.unwrap_or(usize::MAX);
    let entries = context
        .sorted_by_count()
        .into_iter()
        .take(limit)
        .map(|(word, count)| ContextEntry {
            word: word.to_string(),
            count,
        })
        .collect();

    output_result(
        "Context vector",
        &ContextResult {
            word: args.word.to_lowercase(),
            language: language.code().to_string(),
            mode: mode.name().to_string(),
            total_words: context.len(),
            entries,
        },
        cli_args,
    )
}

fn extract(args: &ExtractArgs, mut config: EngineConfig, cli_args: &FalseFriendsArgs) -> Result<()> {
    if let Some(formula) = &args.formula {
        config.extraction.formula = FriendnessFormula::parse_str(formula)?;
    }
    if let Some(min_similarity) = args.min_similarity {
        config.extraction.min_orthographic_similarity = min_similarity;
    }
    config.extraction.use_lemmatization |= args.lemmatize;

    let start_time = Instant::now();
    let toolkit = Toolkit::from_config(config)?;

    info!("Loading corpus...");
    let corpus = ParallelCorpus::read(&args.corpus)
        .with_context(|| format!("reading corpus {}", args.corpus.display()))?;
    let gold = GoldJudgments::read(&args.judgments)
        .with_context(|| format!("reading judgments {}", args.judgments.display()))?;
    let (sentence_pairs, bg_words, ru_words) = (
        corpus.len(),
        corpus.source_vocabulary().len(),
        corpus.target_vocabulary().len(),
    );

    let mut extractor = toolkit.extractor(corpus, gold);
    info!("Calculating statistics...");
    extractor.compute_statistics()?;

    info!("Extracting cognates and false friends...");
    let mut writer = CsvRecordWriter::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let records = extractor.extract(&mut writer)?;

    output_result(
        "Extraction finished",
        &ExtractionResult {
            output: args.output.to_string_lossy().to_string(),
            sentence_pairs,
            bg_words,
            ru_words,
            records,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

fn prefetch(args: &PrefetchArgs, mut config: EngineConfig, cli_args: &FalseFriendsArgs) -> Result<()> {
    let language = Language::parse_str(&args.language)?;
    if let Some(workers) = args.workers {
        config.prefetch.workers = workers;
    }

    let text = fs::read_to_string(&args.words)
        .with_context(|| format!("reading {}", args.words.display()))?;
    let words: Vec<String> = text
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    let start_time = Instant::now();
    let toolkit = Toolkit::from_config(config.clone())?;
    let prefetcher =
        OccurrencePrefetcher::start(Arc::clone(toolkit.counter()), &config.prefetch)?;

    let mut already_cached = 0;
    for word in &words {
        if !prefetcher.schedule(word, language)? {
            already_cached += 1;
        }
    }
    prefetcher.shutdown();
    let stats = prefetcher.stats();

    output_result(
        "Prefetch finished",
        &PrefetchResult {
            words: words.len(),
            already_cached,
            scheduled: stats.scheduled,
            completed: stats.completed,
            failed: stats.failed,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_context_options() {
        let mut config = ContextConfig::default();
        let options = ContextOptions {
            mode: Some("indirect".to_string()),
            tf_idf: true,
            lemmatize: false,
            reverse_vectors: true,
            window: Some(5),
        };
        apply_context_options(&mut config, &options).unwrap();
        assert_eq!(config.mode, ContextMode::Indirect);
        assert!(config.use_tf_idf);
        assert!(!config.use_lemmatization);
        assert!(config.reverse_vectors);
        assert_eq!(config.window_radius, 5);

        let options = ContextOptions {
            mode: Some("sideways".to_string()),
            ..ContextOptions::default()
        };
        assert!(apply_context_options(&mut config, &options).is_err());
    }
}
