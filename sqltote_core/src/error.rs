//! Error types for a generation run.
//!
//! Every error is terminal for the run that raised it. Variants carry the path
//! or identifier involved so the CLI can print something actionable.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while collecting, rendering or writing a tote.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be resolved (e.g. no module name available).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input root does not exist.
    #[error("Input directory not found: {}", path.display())]
    NotFound {
        /// Root as given.
        path: PathBuf,
    },

    /// The input root exists but is not a directory.
    #[error("Input path is not a directory: {}", path.display())]
    NotADirectory {
        /// Root as given.
        path: PathBuf,
    },

    /// A file or directory could not be read during the walk.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File or directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A query file name derived to an empty identifier.
    #[error("File name of {} contains no letters or digits", path.display())]
    EmptyIdentifier {
        /// The offending file.
        path: PathBuf,
    },

    /// Two files derived to the same identifier within one namespace.
    #[error(
        "Duplicate identifier {namespace}.{identifier}: {} and {} (use a prefix or rename one of them)",
        first.display(),
        second.display()
    )]
    DuplicateIdentifier {
        /// Namespace holding both files.
        namespace: String,
        /// Identifier both files derived to.
        identifier: String,
        /// File collected first.
        first: PathBuf,
        /// File that collided with it.
        second: PathBuf,
    },

    /// The symbol table could not be turned into valid Rust source.
    #[error("Render error: {0}")]
    Render(String),

    /// The output file could not be created or replaced.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
