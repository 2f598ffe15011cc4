//! Error types for the sift-extract crate.

use std::{io, path::PathBuf};

use sift_config::ConfigError;
use sift_document::DocumentError;
use thiserror::Error;

/// Errors that abort a batch extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The build output directory does not exist or is not a directory.
    #[error("output directory not found: {path}")]
    OutputDirMissing {
        /// The resolved output directory.
        path: PathBuf,
    },

    /// A page could not be read. Only raised when running fail-fast.
    #[error("failed to read page {path}: {source}")]
    ReadFile {
        /// Path to the page.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration could not be turned into a site description.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The page extractor could not be built.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
