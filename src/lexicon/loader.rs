//! Loading lexical resources from delimited text files or memory.

use std::fs::File;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use log::debug;

use crate::error::{FalseFriendsError, Result};
use crate::language::Language;
use crate::lexicon::dictionary::BilingualEntry;

/// Source of raw resource rows.
pub trait ResourceLoader: Send + Sync {
    /// All `(source, target)` rows of the bridge dictionary.
    fn dictionary_entries(&self) -> Result<Vec<BilingualEntry>>;

    /// Stop words of a language.
    fn stop_words(&self, language: Language) -> Result<Vec<String>>;

    /// `(word_form, basic_form)` rows of a language's lemma dictionary.
    fn lemma_rows(&self, language: Language) -> Result<Vec<(String, String)>>;
}

/// Read the first `columns` fields of every row of a `;`-delimited file.
///
/// The first line is a header and is skipped. Rows with fewer fields are a
/// format error.
pub fn read_delimited(path: &Path, columns: usize) -> Result<Vec<Vec<String>>> {
    debug!("Reading {}", path.display());
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() < columns {
            return Err(FalseFriendsError::resource(format!(
                "{}: line {} has {} field(s), expected {columns}",
                path.display(),
                index + 2,
                record.len()
            )));
        }
        rows.push(record.iter().take(columns).map(str::to_string).collect());
    }
    Ok(rows)
}

/// Loads resources from files on disk.
///
/// Stop words and lemmas live in `<resource_dir>/Stop-Words-<lang>.csv` and
/// `<resource_dir>/Lemma-Dictionary-<lang>.csv`.
#[derive(Clone, Debug)]
pub struct FileResourceLoader {
    dictionary_path: PathBuf,
    resource_dir: PathBuf,
}

impl FileResourceLoader {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(dictionary_path: P, resource_dir: Q) -> Self {
        FileResourceLoader {
            dictionary_path: dictionary_path.into(),
            resource_dir: resource_dir.into(),
        }
    }

    pub fn stop_words_path(&self, language: Language) -> PathBuf {
        self.resource_dir
            .join(format!("Stop-Words-{}.csv", language.code()))
    }

    pub fn lemma_path(&self, language: Language) -> PathBuf {
        self.resource_dir
            .join(format!("Lemma-Dictionary-{}.csv", language.code()))
    }
}

impl ResourceLoader for FileResourceLoader {
    fn dictionary_entries(&self) -> Result<Vec<BilingualEntry>> {
        Ok(read_delimited(&self.dictionary_path, 2)?
            .into_iter()
            .map(|mut row| {
                let target = row.swap_remove(1);
                let source = row.swap_remove(0);
                BilingualEntry { source, target }
            })
            .collect())
    }

    fn stop_words(&self, language: Language) -> Result<Vec<String>> {
        Ok(read_delimited(&self.stop_words_path(language), 1)?
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect())
    }

    fn lemma_rows(&self, language: Language) -> Result<Vec<(String, String)>> {
        Ok(read_delimited(&self.lemma_path(language), 2)?
            .into_iter()
            .map(|mut row| {
                let basic = row.swap_remove(1);
                let form = row.swap_remove(0);
                (form, basic)
            })
            .collect())
    }
}

/// In-memory resources for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryResourceLoader {
    entries: Vec<BilingualEntry>,
    stop_words: AHashMap<Language, Vec<String>>,
    lemmas: AHashMap<Language, Vec<(String, String)>>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry<S: Into<String>, T: Into<String>>(mut self, source: S, target: T) -> Self {
        self.entries.push(BilingualEntry::new(source, target));
        self
    }

    pub fn with_stop_words<I, S>(mut self, language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words
            .entry(language)
            .or_default()
            .extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_lemma<F: Into<String>, B: Into<String>>(
        mut self,
        language: Language,
        form: F,
        basic: B,
    ) -> Self {
        self.lemmas
            .entry(language)
            .or_default()
            .push((form.into(), basic.into()));
        self
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn dictionary_entries(&self) -> Result<Vec<BilingualEntry>> {
        Ok(self.entries.clone())
    }

    fn stop_words(&self, language: Language) -> Result<Vec<String>> {
        Ok(self.stop_words.get(&language).cloned().unwrap_or_default())
    }

    fn lemma_rows(&self, language: Language) -> Result<Vec<(String, String)>> {
        Ok(self.lemmas.get(&language).cloned().unwrap_or_default())
    }
}
