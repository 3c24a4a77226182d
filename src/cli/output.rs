//! Output formatting for CLI commands.

use std::fmt;

use serde::Serialize;

use crate::cli::args::{FalseFriendsArgs, OutputFormat};
use crate::error::Result;

/// A similarity score between two words.
#[derive(Debug, Serialize)]
pub struct SimilarityResult {
    pub measure: String,
    pub first: String,
    pub second: String,
    pub similarity: f64,
}

impl fmt::Display for SimilarityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.measure, self.first, self.second, self.similarity
        )
    }
}

/// One context word and its weight.
#[derive(Debug, Serialize)]
pub struct ContextEntry {
    pub word: String,
    pub count: f64,
}

/// The context of one word.
#[derive(Debug, Serialize)]
pub struct ContextResult {
    pub word: String,
    pub language: String,
    pub mode: String,
    pub total_words: usize,
    pub entries: Vec<ContextEntry>,
}

impl fmt::Display for ContextResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Context of {} ({}, {} mode): {} words",
            self.word, self.language, self.mode, self.total_words
        )?;
        writeln!(f, "word; count")?;
        for entry in &self.entries {
            writeln!(f, "{}; {}", entry.word, entry.count)?;
        }
        Ok(())
    }
}

/// Summary of an extraction run.
#[derive(Debug, Serialize)]
pub struct ExtractionResult {
    pub output: String,
    pub sentence_pairs: usize,
    pub bg_words: usize,
    pub ru_words: usize,
    pub records: usize,
    pub duration_ms: u64,
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sentence pairs: {}", self.sentence_pairs)?;
        writeln!(f, "Vocabulary: {} BG, {} RU", self.bg_words, self.ru_words)?;
        writeln!(f, "Records written: {} to {}", self.records, self.output)?;
        write!(f, "Time: {}ms", self.duration_ms)
    }
}

/// Summary of a prefetch run.
#[derive(Debug, Serialize)]
pub struct PrefetchResult {
    pub words: usize,
    pub already_cached: usize,
    pub scheduled: u64,
    pub completed: u64,
    pub failed: u64,
    pub duration_ms: u64,
}

impl fmt::Display for PrefetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Words: {} ({} already cached)",
            self.words, self.already_cached
        )?;
        writeln!(
            f,
            "Fetched: {} of {} scheduled, {} failed",
            self.completed, self.scheduled, self.failed
        )?;
        write!(f, "Time: {}ms", self.duration_ms)
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &FalseFriendsArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_human<T: fmt::Display>(message: &str, result: &T, args: &FalseFriendsArgs) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
        println!();
    }
    println!("{result}");
    Ok(())
}

fn output_json<T: Serialize>(result: &T, args: &FalseFriendsArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_display() {
        let result = SimilarityResult {
            measure: "MMEDR".to_string(),
            first: "бира".to_string(),
            second: "пиво".to_string(),
            similarity: 0.5,
        };
        assert_eq!(result.to_string(), "MMEDR(бира, пиво) = 0.5");
    }

    #[test]
    fn test_context_display() {
        let result = ContextResult {
            word: "бира".to_string(),
            language: "bg".to_string(),
            mode: "plain".to_string(),
            total_words: 2,
            entries: vec![
                ContextEntry {
                    word: "бира".to_string(),
                    count: 2.0,
                },
                ContextEntry {
                    word: "студена".to_string(),
                    count: 1.0,
                },
            ],
        };
        let text = result.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "word; count");
        assert_eq!(lines[2], "бира; 2");
        assert_eq!(lines[3], "студена; 1");
    }

    #[test]
    fn test_json_shape() {
        let result = PrefetchResult {
            words: 3,
            already_cached: 1,
            scheduled: 2,
            completed: 2,
            failed: 0,
            duration_ms: 5,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["already_cached"], 1);
        assert_eq!(value["completed"], 2);
    }
}
