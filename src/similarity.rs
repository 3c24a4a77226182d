//! Similarity measures.
//!
//! - [`orthographic`] - weighted edit distance between a Bulgarian and a Russian word
//! - [`vector`] - cosine, Dice and rank distance over dense vectors

pub mod orthographic;
pub mod vector;
