//! Error types for runs and per-file items.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::ports::GenerationError;

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest of changed files could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Manifest {
        /// Manifest path given on the command line.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// The aggregate document could not be read or rewritten.
    #[error("failed to update {path}: {source}")]
    Readme {
        /// Path of the aggregate document.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// Settings are inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A cassette could not be loaded or written.
    #[error("cassette error: {0}")]
    Cassette(String),

    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
}

/// Why a single file in the batch failed.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The source file could not be read.
    #[error("failed to read {path}: {source}")]
    Fetch {
        /// Source file path from the manifest.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },

    /// The generation call failed.
    #[error(transparent)]
    Generate(#[from] GenerationError),

    /// The generated text could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
}
