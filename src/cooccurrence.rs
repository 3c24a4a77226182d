//! Sentence-level co-occurrence counts over an aligned corpus and the
//! association ("friendness") formulas computed from them.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{FalseFriendsError, Result};
use crate::lexicon::LemmaTable;

/// Association strength of a word pair from its corpus counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FriendnessFormula {
    /// `(j+1)² / ((s+1)(t+1))`
    F1,
    /// `(j+1)² / ((s-j+1)(t-j+1))`
    #[default]
    F2,
    /// `(j+1) / max((s+1)/(t+1), (t+1)/(s+1))`
    F6,
}

impl FriendnessFormula {
    pub fn score(&self, source: f64, target: f64, joint: f64) -> f64 {
        match self {
            FriendnessFormula::F1 => (joint + 1.0).powi(2) / ((source + 1.0) * (target + 1.0)),
            FriendnessFormula::F2 => {
                (joint + 1.0).powi(2) / ((source - joint + 1.0) * (target - joint + 1.0))
            }
            FriendnessFormula::F6 => {
                let ratio = (source + 1.0) / (target + 1.0);
                (joint + 1.0) / ratio.max(1.0 / ratio)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FriendnessFormula::F1 => "F1",
            FriendnessFormula::F2 => "F2",
            FriendnessFormula::F6 => "F6",
        }
    }

    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "F1" => Ok(FriendnessFormula::F1),
            "F2" => Ok(FriendnessFormula::F2),
            "F6" => Ok(FriendnessFormula::F6),
            _ => Err(FalseFriendsError::config(format!(
                "Formula {s} is unavailable"
            ))),
        }
    }
}

/// One aligned line of the parallel corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

impl SentencePair {
    pub fn new(source: Vec<String>, target: Vec<String>) -> Self {
        SentencePair { source, target }
    }
}

/// Averaged corpus counts of one candidate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairCounts {
    pub source: f64,
    pub target: f64,
    pub joint: f64,
}

/// Per-sentence lemma counts of both sides and of every cross-language
/// lemma pair.
///
/// A lemma counts at most once per sentence. Without lemma tables every
/// word is its own lemma.
#[derive(Debug, Default)]
pub struct CooccurrenceStatistics {
    source_lemmas: Option<Arc<LemmaTable>>,
    target_lemmas: Option<Arc<LemmaTable>>,
    source_counts: AHashMap<String, u64>,
    target_counts: AHashMap<String, u64>,
    joint_counts: AHashMap<(String, String), u64>,
    sentences: usize,
}

impl CooccurrenceStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count basic forms instead of surface words.
    pub fn with_lemmas(source: Arc<LemmaTable>, target: Arc<LemmaTable>) -> Self {
        CooccurrenceStatistics {
            source_lemmas: Some(source),
            target_lemmas: Some(target),
            ..Self::default()
        }
    }

    fn lemmas_of(table: Option<&Arc<LemmaTable>>, word: &str) -> Vec<String> {
        match table {
            Some(table) => table.basic_forms(word),
            None => vec![word.to_string()],
        }
    }

    fn unique_lemmas(table: Option<&Arc<LemmaTable>>, words: &[String]) -> BTreeSet<String> {
        words
            .iter()
            .flat_map(|w| Self::lemmas_of(table, w))
            .collect()
    }

    pub fn source_lemmas(&self, word: &str) -> Vec<String> {
        Self::lemmas_of(self.source_lemmas.as_ref(), word)
    }

    pub fn target_lemmas(&self, word: &str) -> Vec<String> {
        Self::lemmas_of(self.target_lemmas.as_ref(), word)
    }

    pub fn add(&mut self, pair: &SentencePair) {
        let source = Self::unique_lemmas(self.source_lemmas.as_ref(), &pair.source);
        let target = Self::unique_lemmas(self.target_lemmas.as_ref(), &pair.target);

        for lemma in &source {
            *self.source_counts.entry(lemma.clone()).or_insert(0) += 1;
        }
        for lemma in &target {
            *self.target_counts.entry(lemma.clone()).or_insert(0) += 1;
        }
        for s in &source {
            for t in &target {
                *self
                    .joint_counts
                    .entry((s.clone(), t.clone()))
                    .or_insert(0) += 1;
            }
        }
        self.sentences += 1;
    }

    pub fn add_all<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = &'a SentencePair>,
    {
        for pair in pairs {
            self.add(pair);
        }
    }

    /// Number of sentences containing `lemma` on the source side.
    pub fn source_count(&self, lemma: &str) -> u64 {
        self.source_counts.get(lemma).copied().unwrap_or(0)
    }

    pub fn target_count(&self, lemma: &str) -> u64 {
        self.target_counts.get(lemma).copied().unwrap_or(0)
    }

    /// Number of sentence pairs containing both lemmas.
    pub fn joint_count(&self, source: &str, target: &str) -> u64 {
        self.joint_counts
            .get(&(source.to_string(), target.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences
    }

    /// Counts of a word pair, each averaged over the lemmas of the words.
    pub fn pair_counts(&self, source_word: &str, target_word: &str) -> PairCounts {
        let source = self.source_lemmas(source_word);
        let target = self.target_lemmas(target_word);

        let source_total: u64 = source.iter().map(|l| self.source_count(l)).sum();
        let target_total: u64 = target.iter().map(|l| self.target_count(l)).sum();
        let mut joint_total = 0;
        for s in &source {
            for t in &target {
                joint_total += self.joint_count(s, t);
            }
        }

        PairCounts {
            source: source_total as f64 / source.len() as f64,
            target: target_total as f64 / target.len() as f64,
            joint: joint_total as f64 / (source.len() * target.len()) as f64,
        }
    }
}
