//! In-memory storage implementation for testing and caching.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{FalseFriendsError, Result};
use crate::storage::traits::{Storage, validate_name};

/// An in-memory storage implementation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: Arc<Mutex<BTreeMap<String, Box<[u8]>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries stored.
    pub fn file_count(&self) -> usize {
        self.files.lock().len()
    }

    /// Get the total size of all entries.
    pub fn total_size(&self) -> u64 {
        self.files
            .lock()
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }

    pub fn clear(&self) {
        self.files.lock().clear();
    }
}

impl Storage for MemoryStorage {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .get(name)
            .map(|data| data.to_vec())
            .ok_or_else(|| FalseFriendsError::storage(format!("File not found: {name}")))
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        validate_name(name)?;
        self.files.lock().insert(name.to_string(), data.into());
        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        self.files.lock().contains_key(name)
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        self.files.lock().remove(name);
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        Ok(self.files.lock().keys().cloned().collect())
    }
}
