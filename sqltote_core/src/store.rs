//! Runtime lookup of queries kept as loose files.
//!
//! For callers that would rather read a flat directory of query files at
//! startup than generate code. Subdirectories are ignored.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::collect::DEFAULT_EXTENSION;
use crate::error::{Error, Result};

/// Read access to queries by file name.
pub trait QueryStore {
    /// Content of `file_name` (e.g. `"query_all.sql"`).
    fn get(&self, file_name: &str) -> Option<&str>;

    /// All file names, sorted.
    fn files(&self) -> Vec<&str>;
}

/// Queries held in memory, loaded once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    queries: HashMap<String, String>,
}

impl MemoryStore {
    /// Load every `.sql` file directly inside `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::load_with_extension(dir, DEFAULT_EXTENSION)
    }

    /// Load every file with extension `ext` directly inside `dir`.
    pub fn load_with_extension<P: AsRef<Path>>(dir: P, ext: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let read_dir = fs::read_dir(dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: dir.to_path_buf(),
            },
            _ if dir.is_file() => Error::NotADirectory {
                path: dir.to_path_buf(),
            },
            _ => Error::read(dir, e),
        })?;

        let mut queries = HashMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| Error::read(dir, e))?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some(ext) {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|e| Error::read(&path, e))?;
            queries.insert(entry.file_name().to_string_lossy().into_owned(), content);
        }

        tracing::debug!("Loaded {} queries from {}", queries.len(), dir.display());
        Ok(Self { queries })
    }

    /// Number of loaded queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether no query was loaded.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl QueryStore for MemoryStore {
    fn get(&self, file_name: &str) -> Option<&str> {
        self.queries.get(file_name).map(String::as_str)
    }

    fn files(&self) -> Vec<&str> {
        let mut files: Vec<_> = self.queries.keys().map(String::as_str).collect();
        files.sort_unstable();
        files
    }
}
