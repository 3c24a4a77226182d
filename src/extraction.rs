//! False friend extraction from an aligned Russian-Bulgarian corpus.
//!
//! - [`corpus`] - the parallel corpus and the human judgments
//! - [`output`] - result rows and where they are written
//! - [`pipeline`] - the extraction state machine

pub mod corpus;
pub mod output;
pub mod pipeline;

pub use corpus::{GoldJudgments, ParallelCorpus};
pub use output::{CsvRecordWriter, FriendnessRecord, MemoryRecordSink, RecordSink};
pub use pipeline::{ExtractionState, FalseFriendsExtractor};
