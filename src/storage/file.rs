//! File-based storage implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{FalseFriendsError, Result};
use crate::storage::traits::{Storage, validate_name};

/// A file-based storage implementation rooted at one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// The root directory for storage.
    directory: PathBuf,
}

impl FileStorage {
    /// Create a new file storage in the given directory.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| {
                FalseFriendsError::storage(format!("Failed to create directory: {e}"))
            })?;
        }

        if !directory.is_dir() {
            return Err(FalseFriendsError::storage(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStorage { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.directory.join(name))
    }

    fn collect_files(&self, dir: &Path, prefix: &str, files: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let relative = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}/{name}")
            };

            if path.is_dir() {
                self.collect_files(&path, &relative, files)?;
            } else if path.is_file() && !name.contains(".tmp-") {
                files.push(relative);
            }
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(name)?;
        fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FalseFriendsError::storage(format!("File not found: {name}"))
            } else {
                FalseFriendsError::Io(e)
            }
        })
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.file_path(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write next to the target, then rename over it.
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FalseFriendsError::storage(format!("Invalid entry name: {name}")))?;
        let temp_path = path.with_file_name(format!(
            "{file_name}.tmp-{:08x}",
            rand::random::<u32>()
        ));

        let result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            fs::rename(&temp_path, &path)
        })();

        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(FalseFriendsError::storage(format!(
                "Failed to write {name}: {e}"
            )));
        }

        debug!("Stored {} ({} bytes)", name, data.len());
        Ok(())
    }

    fn file_exists(&self, name: &str) -> bool {
        match self.file_path(name) {
            Ok(path) => path.is_file(),
            Err(_) => false,
        }
    }

    fn delete_file(&self, name: &str) -> Result<()> {
        let path = self.file_path(name)?;
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                FalseFriendsError::storage(format!("Failed to delete file: {e}"))
            })?;
        }
        Ok(())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        self.collect_files(&self.directory, "", &mut files)?;
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn create_test_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_write_and_read() {
        let (_dir, storage) = create_test_storage();
        storage.write("context/bg-voda.bin", b"payload").unwrap();

        assert!(storage.file_exists("context/bg-voda.bin"));
        assert_eq!(storage.read("context/bg-voda.bin").unwrap(), b"payload");
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let (dir, storage) = create_test_storage();
        storage.write("v/a.bin", b"one").unwrap();
        storage.write("v/a.bin", b"two").unwrap();

        assert_eq!(storage.read("v/a.bin").unwrap(), b"two");
        let entries: Vec<_> = fs::read_dir(dir.path().join("v")).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_list_files_recursive_and_sorted() {
        let (_dir, storage) = create_test_storage();
        storage.write("b/x.bin", b"1").unwrap();
        storage.write("a/y.bin", b"2").unwrap();
        storage.write("top.bin", b"3").unwrap();

        assert_eq!(
            storage.list_files().unwrap(),
            vec!["a/y.bin", "b/x.bin", "top.bin"]
        );
    }

    #[test]
    fn test_missing_and_invalid_names() {
        let (_dir, storage) = create_test_storage();
        assert!(matches!(
            storage.read("none.bin"),
            Err(FalseFriendsError::Storage(_))
        ));
        assert!(storage.write("../escape.bin", b"x").is_err());
        assert!(!storage.file_exists("../escape.bin"));
        storage.delete_file("none.bin").unwrap();
    }
}
