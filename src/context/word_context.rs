//! Frequency maps of words seen around a target word.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping from context word to a non-negative weight.
///
/// Keys are kept sorted so that iteration, serialization and the textual dump
/// are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WordContext {
    counts: BTreeMap<String, f64>,
}

impl WordContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to the weight of `word`.
    pub fn add(&mut self, word: &str, count: f64) {
        match self.counts.get_mut(word) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(word.to_string(), count);
            }
        }
    }

    /// Sum another context into this one.
    pub fn merge(&mut self, other: &WordContext) {
        for (word, count) in other.iter() {
            self.add(word, count);
        }
    }

    /// Weight of `word`, 0 when absent.
    pub fn get(&self, word: &str) -> f64 {
        self.counts.get(word).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn set(&mut self, word: &str, count: f64) {
        self.counts.insert(word.to_string(), count);
    }

    pub fn remove(&mut self, word: &str) -> Option<f64> {
        self.counts.remove(word)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Multiply every weight by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for count in self.counts.values_mut() {
            *count *= factor;
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Context words in key order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Entries by descending weight, ties broken by word.
    pub fn sorted_by_count(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Cosine similarity over the union of both key sets.
    pub fn cosine(&self, other: &WordContext) -> f64 {
        let dot: f64 = self
            .iter()
            .map(|(word, count)| count * other.get(word))
            .sum();
        let norm_a = self.counts.values().map(|c| c * c).sum::<f64>().sqrt();
        let norm_b = other.counts.values().map(|c| c * c).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            0.0
        } else {
            dot / (norm_a * norm_b)
        }
    }
}

impl<'a> IntoIterator for &'a WordContext {
    type Item = (&'a String, &'a f64);
    type IntoIter = btree_map::Iter<'a, String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl FromIterator<(String, f64)> for WordContext {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut context = WordContext::new();
        for (word, count) in iter {
            context.add(&word, count);
        }
        context
    }
}

/// `word; count` dump, heaviest words first.
impl fmt::Display for WordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "word; count")?;
        for (word, count) in self.sorted_by_count() {
            writeln!(f, "{word}; {count}")?;
        }
        Ok(())
    }
}
