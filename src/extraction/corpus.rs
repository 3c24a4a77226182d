//! Corpus and judgment file readers.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use log::{info, warn};

use crate::analysis::normalizer::WordExtractor;
use crate::cooccurrence::SentencePair;
use crate::error::Result;
use crate::language::Script;
use crate::lexicon::loader::read_delimited;

/// An aligned corpus with the vocabulary of each side.
///
/// Lines alternate: a Russian sentence, then its Bulgarian translation.
#[derive(Debug, Clone, Default)]
pub struct ParallelCorpus {
    pairs: Vec<SentencePair>,
    source_vocabulary: BTreeSet<String>,
    target_vocabulary: BTreeSet<String>,
}

impl ParallelCorpus {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading corpus {}", path.display());
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let extractor = WordExtractor::for_script(Script::Cyrillic)?;
        let mut corpus = ParallelCorpus::default();

        let mut lines = reader.lines();
        while let Some(ru_line) = lines.next() {
            let ru_words = extractor.extract_and_normalize(&ru_line?)?;
            let bg_words = match lines.next() {
                Some(bg_line) => extractor.extract_and_normalize(&bg_line?)?,
                None => {
                    warn!(
                        "Sentences not equal: line {} has no Bulgarian counterpart",
                        corpus.pairs.len() * 2 + 1
                    );
                    Vec::new()
                }
            };
            corpus.push(SentencePair::new(bg_words, ru_words));
        }

        info!(
            "Loaded {} sentence pairs, {} Bulgarian and {} Russian words",
            corpus.pairs.len(),
            corpus.source_vocabulary.len(),
            corpus.target_vocabulary.len()
        );
        Ok(corpus)
    }

    pub fn push(&mut self, pair: SentencePair) {
        self.source_vocabulary.extend(pair.source.iter().cloned());
        self.target_vocabulary.extend(pair.target.iter().cloned());
        self.pairs.push(pair);
    }

    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    /// Bulgarian words, sorted.
    pub fn source_vocabulary(&self) -> &BTreeSet<String> {
        &self.source_vocabulary
    }

    /// Russian words, sorted.
    pub fn target_vocabulary(&self) -> &BTreeSet<String> {
        &self.target_vocabulary
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Human labels of word pairs, usually "friends" or "false friends".
#[derive(Debug, Clone, Default)]
pub struct GoldJudgments {
    labels: AHashMap<(String, String), String>,
}

impl GoldJudgments {
    /// Read a `bg;ru;label` file with one header line.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let rows = read_delimited(path.as_ref(), 3)?;
        let mut judgments = GoldJudgments::default();
        for row in rows {
            let [bg, ru, label]: [String; 3] = match row.try_into() {
                Ok(fields) => fields,
                Err(_) => continue,
            };
            judgments.insert(bg, ru, label);
        }
        Ok(judgments)
    }

    pub fn insert<B, R, L>(&mut self, bg_word: B, ru_word: R, label: L)
    where
        B: Into<String>,
        R: Into<String>,
        L: Into<String>,
    {
        self.labels
            .insert((bg_word.into(), ru_word.into()), label.into());
    }

    pub fn label(&self, bg_word: &str, ru_word: &str) -> Option<&str> {
        self.labels
            .get(&(bg_word.to_string(), ru_word.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
