//! Error types for the false friends toolkit.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`FalseFriendsError`] enum.
//!
//! # Examples
//!
//! ```
//! use falsefriends::error::{FalseFriendsError, Result};
//!
//! fn select_formula(name: &str) -> Result<()> {
//!     Err(FalseFriendsError::config(format!("unknown formula {name}")))
//! }
//!
//! match select_formula("F9") {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for the toolkit.
#[derive(Error, Debug)]
pub enum FalseFriendsError {
    /// I/O errors (resource files, cache files, output table).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (tokenization, transliteration).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Malformed resource or cache content.
    #[error("Resource format error: {0}")]
    Resource(String),

    /// Storage backend errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Cache errors.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Unknown selector or otherwise invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single failed attempt against an external source.
    #[error("Source error: {0}")]
    Source(String),

    /// An external lookup failed on every allowed attempt.
    #[error("After {attempts} attempts the lookup failed: {what}")]
    RetriesExhausted { what: String, attempts: usize },

    /// Invalid operation (pipeline called out of order, mismatched vectors).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Binary payload encoding errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited text errors.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FalseFriendsError.
pub type Result<T> = std::result::Result<T, FalseFriendsError>;

impl FalseFriendsError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Analysis(msg.into())
    }

    /// Create a new resource format error.
    pub fn resource<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Resource(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Storage(msg.into())
    }

    /// Create a new cache error.
    pub fn cache<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Cache(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Config(msg.into())
    }

    /// Create a new source error.
    pub fn source_failure<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Source(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::InvalidOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FalseFriendsError::Other(msg.into())
    }
}

impl From<bincode::Error> for FalseFriendsError {
    fn from(err: bincode::Error) -> Self {
        FalseFriendsError::Serialization(err.to_string())
    }
}
