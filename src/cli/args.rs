//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// falsefriends - similarity measures for Bulgarian-Russian false friends
#[derive(Parser, Debug, Clone)]
#[command(name = "falsefriends")]
#[command(about = "Orthographic, semantic and co-occurrence similarity of Bulgarian and Russian words")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FalseFriendsArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, env = "FALSEFRIENDS_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Persistent cache directory (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FalseFriendsArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Orthographic similarity (MMEDR) of a Bulgarian and a Russian word
    Mmedr(MmedrArgs),

    /// Semantic similarity of two words of the same language
    #[command(name = "sem-sim")]
    SemSim(SemSimArgs),

    /// Semantic similarity of a Bulgarian and a Russian word
    #[command(name = "cross-sim")]
    CrossSim(CrossSimArgs),

    /// Show the context vector of a word
    Context(ContextArgs),

    /// Extract false friends and cognates from a parallel corpus
    Extract(ExtractArgs),

    /// Fetch occurrence counts for a list of words into the cache
    Prefetch(PrefetchArgs),
}

/// Context construction overrides shared by the semantic commands.
#[derive(Parser, Debug, Clone, Default)]
pub struct ContextOptions {
    /// Context mode (plain, all-word-forms, reverse, indirect)
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Reweight contexts by TF-IDF
    #[arg(long)]
    pub tf_idf: bool,

    /// Build contexts from basic forms
    #[arg(long)]
    pub lemmatize: bool,

    /// Clamp bridge vectors by reverse evidence
    #[arg(long)]
    pub reverse_vectors: bool,

    /// Context window radius
    #[arg(long)]
    pub window: Option<usize>,
}

/// Arguments for MMEDR
#[derive(Parser, Debug, Clone)]
pub struct MmedrArgs {
    /// Bulgarian word
    #[arg(value_name = "BG_WORD")]
    pub bg_word: String,

    /// Russian word
    #[arg(value_name = "RU_WORD")]
    pub ru_word: String,

    /// Also compare basic forms
    #[arg(long)]
    pub lemmatize: bool,
}

/// Arguments for SemSim
#[derive(Parser, Debug, Clone)]
pub struct SemSimArgs {
    #[arg(value_name = "WORD1")]
    pub first: String,

    #[arg(value_name = "WORD2")]
    pub second: String,

    /// Language of both words (bg, ru, en)
    #[arg(short, long, default_value = "en")]
    pub language: String,

    #[command(flatten)]
    pub context: ContextOptions,
}

/// Arguments for CrossSim
#[derive(Parser, Debug, Clone)]
pub struct CrossSimArgs {
    /// Bulgarian word
    #[arg(value_name = "BG_WORD")]
    pub bg_word: String,

    /// Russian word
    #[arg(value_name = "RU_WORD")]
    pub ru_word: String,

    /// Vector measure (cosine, dice, rank_distance)
    #[arg(long)]
    pub measure: Option<String>,

    #[command(flatten)]
    pub context: ContextOptions,
}

/// Arguments for showing a context
#[derive(Parser, Debug, Clone)]
pub struct ContextArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Language of the word (bg, ru, en)
    #[arg(short, long, default_value = "bg")]
    pub language: String,

    /// Show at most this many context words
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub context: ContextOptions,
}

/// Arguments for extraction
#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    /// Parallel corpus: a Russian line followed by its Bulgarian line
    #[arg(value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Judgments file with `bg;ru;label` rows
    #[arg(value_name = "JUDGE_FILE")]
    pub judgments: PathBuf,

    /// Output table
    #[arg(short, long, default_value = "FalseFriendsFromParallelCorpus.csv")]
    pub output: PathBuf,

    /// Friendness formula (F1, F2, F6)
    #[arg(long)]
    pub formula: Option<String>,

    /// Minimum orthographic similarity of a candidate pair
    #[arg(long)]
    pub min_similarity: Option<f64>,

    /// Count basic forms instead of words
    #[arg(long)]
    pub lemmatize: bool,
}

/// Arguments for prefetching occurrence counts
#[derive(Parser, Debug, Clone)]
pub struct PrefetchArgs {
    /// File with one word per line
    #[arg(value_name = "WORDS_FILE")]
    pub words: PathBuf,

    /// Language of the words (bg, ru, en)
    #[arg(short, long, default_value = "bg")]
    pub language: String,

    /// Number of worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_mmedr_command() {
        let args =
            FalseFriendsArgs::try_parse_from(["falsefriends", "mmedr", "афектирахме", "аффектировались"])
                .unwrap();
        if let Command::Mmedr(mmedr) = args.command {
            assert_eq!(mmedr.bg_word, "афектирахме");
            assert_eq!(mmedr.ru_word, "аффектировались");
            assert!(!mmedr.lemmatize);
        } else {
            panic!("Expected mmedr command");
        }
    }

    #[test]
    fn test_sem_sim_with_context_options() {
        let args = FalseFriendsArgs::try_parse_from([
            "falsefriends",
            "sem-sim",
            "car",
            "automobile",
            "--mode",
            "reverse",
            "--tf-idf",
            "--window",
            "5",
        ])
        .unwrap();
        if let Command::SemSim(sem_sim) = args.command {
            assert_eq!(sem_sim.language, "en");
            assert_eq!(sem_sim.context.mode.as_deref(), Some("reverse"));
            assert!(sem_sim.context.tf_idf);
            assert_eq!(sem_sim.context.window, Some(5));
        } else {
            panic!("Expected sem-sim command");
        }
    }

    #[test]
    fn test_extract_defaults() {
        let args = FalseFriendsArgs::try_parse_from([
            "falsefriends",
            "-f",
            "json",
            "extract",
            "corpus.txt",
            "judge.csv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        if let Command::Extract(extract) = args.command {
            assert_eq!(extract.output, PathBuf::from("FalseFriendsFromParallelCorpus.csv"));
            assert!(extract.formula.is_none());
        } else {
            panic!("Expected extract command");
        }
    }

    #[test]
    fn test_verbosity() {
        let args = FalseFriendsArgs::try_parse_from(["falsefriends", "-vv", "mmedr", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            FalseFriendsArgs::try_parse_from(["falsefriends", "-q", "-vvv", "mmedr", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = FalseFriendsArgs::try_parse_from(["falsefriends", "mmedr", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }
}
