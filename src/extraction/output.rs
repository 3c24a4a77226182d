//! Result rows of the extraction and the sinks they are written to.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{FalseFriendsError, Result};

/// Column names of the result table.
pub const OUTPUT_HEADER: [&str; 9] = [
    "BG Word",
    "RU Word",
    "Friends?",
    "MMED Similarity",
    "BG Count",
    "RU Count",
    "Corresponding Count",
    "Friendness",
    "Semantic Similarity",
];

/// One scored candidate pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendnessRecord {
    pub bg_word: String,
    pub ru_word: String,
    pub label: String,
    pub orthographic_similarity: f64,
    pub bg_count: f64,
    pub ru_count: f64,
    pub joint_count: f64,
    pub friendness: f64,
    pub semantic_similarity: f64,
}

impl FriendnessRecord {
    fn fields(&self) -> [String; 9] {
        [
            self.bg_word.clone(),
            self.ru_word.clone(),
            self.label.clone(),
            self.orthographic_similarity.to_string(),
            self.bg_count.to_string(),
            self.ru_count.to_string(),
            self.joint_count.to_string(),
            self.friendness.to_string(),
            self.semantic_similarity.to_string(),
        ]
    }
}

/// Receives records as soon as they are scored.
pub trait RecordSink {
    fn write_record(&mut self, record: &FriendnessRecord) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes a `;`-delimited table, flushing after every row so that an
/// interrupted run leaves a readable file.
pub struct CsvRecordWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvRecordWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvRecordWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(OUTPUT_HEADER)?;
        writer.flush()?;
        Ok(CsvRecordWriter { writer })
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| FalseFriendsError::Io(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvRecordWriter<W> {
    fn write_record(&mut self, record: &FriendnessRecord) -> Result<()> {
        self.writer.write_record(record.fields())?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemoryRecordSink {
    records: Vec<FriendnessRecord>,
}

impl MemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FriendnessRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FriendnessRecord> {
        self.records
    }
}

impl RecordSink for MemoryRecordSink {
    fn write_record(&mut self, record: &FriendnessRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
