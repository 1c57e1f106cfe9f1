//! Error types for the Extractor

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during ingestion
///
/// Only [`ExtractorError::FileTooLarge`] is meant to reach callers as an
/// error; every other variant is absorbed into a page placeholder, a batch of
/// placeholders, or a fallback result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Payload exceeds the size precondition
    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge {
        /// Payload size held against the limit
        size: u64,
        /// Configured limit
        max: u64,
    },

    /// Document could not be opened (corrupt, encrypted, unsupported)
    #[error("Failed to load document: {0}")]
    Load(String),

    /// Embedded metadata could not be read
    #[error("Failed to read metadata: {0}")]
    Metadata(String),

    /// A single page could not be extracted
    #[error("Page {page} extraction failed: {reason}")]
    PageExtraction {
        /// 1-based page number
        page: u32,
        /// Underlying error message
        reason: String,
    },

    /// The concurrent join of a batch failed
    #[error("Batch for pages {first_page}-{last_page} failed: {reason}")]
    BatchJoin {
        /// First page of the batch
        first_page: u32,
        /// Last page of the batch
        last_page: u32,
        /// Underlying error message
        reason: String,
    },

    /// The per-document wall-clock budget ran out
    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the ingestion
    #[error("Extraction cancelled")]
    Cancelled,

    /// Unexpected failure inside the pipeline (e.g. a panicked task)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(e.to_string())
    }
}
