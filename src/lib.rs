//! # falsefriends
//!
//! Similarity measures for detecting false friends and cognates between
//! Bulgarian and Russian.
//!
//! ## Features
//!
//! - MMEDR: orthographic similarity by weighted edit distance
//! - Context vectors built from web snippets, in four modes, optionally TF-IDF weighted
//! - SemSim and CrossSim: semantic similarity within and across languages
//! - Co-occurrence statistics and friendness scores over a parallel corpus
//! - A persistent cache guaranteeing at most one external fetch per word

pub mod analysis;
pub mod cli;
pub mod config;
pub mod context;
pub mod cooccurrence;
pub mod crosslingual;
pub mod error;
pub mod extraction;
pub mod language;
pub mod lexicon;
pub mod prefetch;
pub mod semantic;
pub mod similarity;
pub mod source;
pub mod storage;
pub mod toolkit;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::context::{ContextMode, WordContext};
    pub use crate::cooccurrence::FriendnessFormula;
    pub use crate::error::{FalseFriendsError, Result};
    pub use crate::language::Language;
    pub use crate::similarity::vector::VectorMeasure;
    pub use crate::toolkit::Toolkit;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
