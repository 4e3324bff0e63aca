//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with in-memory implementations.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

// ============================================================
// IN-MEMORY IMPLEMENTATION
// ============================================================

/// Filesystem backed by a map of path to content.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    ///
    /// # Errors
    /// Fails if a previous writer panicked while holding the file map.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> io::Result<()> {
        let mut files = self.files.write().map_err(|_| poisoned())?;
        files.insert(path.into(), content.into());
        Ok(())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self.files.read().map_err(|_| poisoned())?;
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "file map poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_memory_fs_when_reading_missing_file_then_not_found() {
        let fs = MemoryFileSystem::new();
        let err = fs.read_to_string(Path::new("/nope.toml")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn given_memory_fs_when_file_inserted_then_readable() {
        let fs = MemoryFileSystem::new();
        fs.insert("/a.toml", "x = 1").unwrap();
        fs.insert("/a.toml", "x = 2").unwrap();
        assert_eq!(fs.read_to_string(Path::new("/a.toml")).unwrap(), "x = 2");
    }

    #[test]
    fn given_poisoned_memory_fs_when_inserting_then_error_not_silent_drop() {
        // Arrange: panic while holding the write lock
        let fs = std::sync::Arc::new(MemoryFileSystem::new());
        let holder = std::sync::Arc::clone(&fs);
        let _ = std::thread::spawn(move || {
            let _guard = holder.files.write().unwrap();
            panic!("poison the file map");
        })
        .join();

        // Act
        let inserted = fs.insert("/a.toml", "x = 1");
        let read = fs.read_to_string(Path::new("/a.toml"));

        // Assert
        assert_eq!(inserted.unwrap_err().kind(), io::ErrorKind::Other);
        assert!(read.is_err());
    }
}
