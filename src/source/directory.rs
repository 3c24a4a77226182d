//! File-backed sources: a directory of snippet files and an occurrence table.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use log::{debug, info};

use crate::analysis::transliterate::cache_key;
use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::source::{ContextSource, OccurrenceSource, Snippets};

/// Reads snippets from `<dir>/<lang>/<key>.txt`.
///
/// Each non-empty line is `title<TAB>text` or `text<TAB>text`. A word with no
/// file has no snippets.
#[derive(Debug, Clone)]
pub struct SnippetDirectorySource {
    directory: PathBuf,
}

impl SnippetDirectorySource {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        SnippetDirectorySource {
            directory: directory.into(),
        }
    }

    pub fn snippet_path(&self, word: &str, language: Language) -> Result<PathBuf> {
        Ok(self
            .directory
            .join(language.code())
            .join(format!("{}.txt", cache_key(word, language)?)))
    }

    /// Parse the contents of one snippet file.
    pub fn parse(content: &str, origin: &Path) -> Result<Snippets> {
        let mut snippets = Snippets::default();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some(("title", text)) => snippets.titles.push(text.to_string()),
                Some(("text", text)) => snippets.bodies.push(text.to_string()),
                _ => {
                    return Err(FalseFriendsError::resource(format!(
                        "{}: line {} is neither a title nor a text",
                        origin.display(),
                        index + 1
                    )));
                }
            }
        }
        Ok(snippets)
    }
}

impl ContextSource for SnippetDirectorySource {
    fn fetch_snippets(&self, word: &str, language: Language) -> Result<Snippets> {
        let path = self.snippet_path(word, language)?;
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No snippets for {word} ({language}) at {}", path.display());
                Ok(Snippets::default())
            }
            Err(e) => Err(FalseFriendsError::source_failure(format!(
                "{}: {e}",
                path.display()
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "directory"
    }
}

/// The query string under which a word's count is recorded.
pub fn occurrence_query(word: &str, language: Language) -> String {
    if word.contains(' ') {
        format!("\"{word}\" lang:{}", language.code())
    } else {
        format!("{word} lang:{}", language.code())
    }
}

/// Occurrence counts read from a `Query;Count` table.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceTableSource {
    counts: AHashMap<String, u64>,
}

impl OccurrenceTableSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading occurrence table {}", path.display());
        let file = fs::File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut counts = AHashMap::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let (Some(query), Some(count)) = (record.get(0), record.get(1)) else {
                return Err(FalseFriendsError::resource(format!(
                    "{}: line {} needs a query and a count",
                    path.display(),
                    index + 2
                )));
            };
            let count = count.parse::<u64>().map_err(|e| {
                FalseFriendsError::resource(format!(
                    "{}: line {}: invalid count {count:?}: {e}",
                    path.display(),
                    index + 2
                ))
            })?;
            counts.insert(query.to_string(), count);
        }
        Ok(OccurrenceTableSource { counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl OccurrenceSource for OccurrenceTableSource {
    fn count(&self, word: &str, language: Language) -> Result<u64> {
        Ok(self
            .counts
            .get(&occurrence_query(word, language))
            .copied()
            .unwrap_or(0))
    }

    fn name(&self) -> &'static str {
        "occurrence_table"
    }
}
