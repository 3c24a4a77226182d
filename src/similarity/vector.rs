//! Similarity measures over dense numeric vectors.

use serde::{Deserialize, Serialize};

use crate::error::{FalseFriendsError, Result};

/// Measures available for comparing projected context vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VectorMeasure {
    /// Dot product over the product of magnitudes
    #[default]
    Cosine,
    /// Twice the summed minima over the summed totals
    Dice,
    /// Rank correlation with ties sharing the lowest rank
    RankDistance,
}

impl VectorMeasure {
    /// Similarity of two vectors of equal length.
    pub fn similarity(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        check_dimensions(a, b)?;

        let similarity = match self {
            VectorMeasure::Cosine => cosine(a, b),
            VectorMeasure::Dice => dice(a, b),
            VectorMeasure::RankDistance => rank_distance(a, b),
        };

        Ok(similarity)
    }

    /// Get the name of this measure.
    pub fn name(&self) -> &'static str {
        match self {
            VectorMeasure::Cosine => "cosine",
            VectorMeasure::Dice => "dice",
            VectorMeasure::RankDistance => "rank_distance",
        }
    }

    /// Parse a measure from a string.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Ok(VectorMeasure::Cosine),
            "dice" => Ok(VectorMeasure::Dice),
            "rank_distance" | "rank" => Ok(VectorMeasure::RankDistance),
            _ => Err(FalseFriendsError::config(format!(
                "Unknown vector measure: {s}"
            ))),
        }
    }
}

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(FalseFriendsError::invalid_operation(format!(
            "Vector dimensions must match: {} != {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Cosine of the angle between `a` and `b`; 0 if either has zero magnitude.
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Dice coefficient; 0 when both vectors sum to 0.
pub fn dice(a: &[f64], b: &[f64]) -> f64 {
    let common: f64 = a.iter().zip(b.iter()).map(|(x, y)| x.min(*y)).sum();
    let total: f64 = a.iter().sum::<f64>() + b.iter().sum::<f64>();

    if total == 0.0 {
        0.0
    } else {
        2.0 * common / total
    }
}

/// Rank of every element: one plus the number of strictly smaller elements.
pub fn ranks(values: &[f64]) -> Vec<usize> {
    values
        .iter()
        .map(|v| 1 + values.iter().filter(|other| *other < v).count())
        .collect()
}

/// `1 - 6 * sum(d^2) / (4n(n^2 - 1))` over the element ranks.
///
/// Vectors shorter than two elements have no rank spread and score 0.
pub fn rank_distance(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let denominator = 4.0 * n * (n * n - 1.0);
    if denominator == 0.0 {
        return 0.0;
    }

    let squared: f64 = ranks(a)
        .into_iter()
        .zip(ranks(b))
        .map(|(x, y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();

    1.0 - 6.0 * squared / denominator
}
