//! Error types for page extraction.

use thiserror::Error;

/// Errors that can occur when building a page extractor.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The content-root selector could not be compiled.
    #[error("invalid content root selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector as configured.
        selector: String,
        /// Parser error message.
        message: String,
    },
}
