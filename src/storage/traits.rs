//! Storage abstraction trait.

use crate::error::{FalseFriendsError, Result};

/// A trait for storage backends that can store and retrieve whole entries.
pub trait Storage: Send + Sync + std::fmt::Debug {
    /// Read the full contents of an entry.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Replace the contents of an entry. Readers never observe a partial write.
    fn write(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Check if an entry exists.
    fn file_exists(&self, name: &str) -> bool;

    /// Delete an entry. Deleting a missing entry is not an error.
    fn delete_file(&self, name: &str) -> Result<()>;

    /// List all entry names, sorted.
    fn list_files(&self) -> Result<Vec<String>>;
}

/// Reject names that are empty, absolute or climb out of the storage root.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('/')
        || name.contains('\\')
        || name.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if invalid {
        return Err(FalseFriendsError::storage(format!(
            "Invalid entry name: {name:?}"
        )));
    }
    Ok(())
}
