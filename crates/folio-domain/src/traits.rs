//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the ingestion pipeline and its
//! infrastructure. Implementations live in `folio-extractor` (or in tests).

use crate::event::ExtractionEvent;
use crate::source::{EmbeddedMetadata, LoaderOptions};
use std::fmt::Display;

/// Opens a binary payload as a page-addressable document
///
/// Implemented by the infrastructure layer (`folio-extractor::LopdfLoader`)
pub trait DocumentLoader: Send + Sync {
    /// Document handle produced by a successful load
    type Source: PageSource + 'static;

    /// Error type for load failures (corrupt, encrypted, unsupported)
    type Error: Display + Send;

    /// Parse the payload, honoring the resource limits in `options`
    fn load(&self, bytes: &[u8], options: &LoaderOptions) -> Result<Self::Source, Self::Error>;
}

/// A loaded document whose pages can be read independently
///
/// Page reads may run concurrently from several threads.
pub trait PageSource: Send + Sync {
    /// Error type for page and metadata reads
    type Error: Display + Send;

    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Ordered text fragments of a 1-based page
    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>, Self::Error>;

    /// Metadata embedded in the document
    fn embedded_metadata(&self) -> Result<EmbeddedMetadata, Self::Error>;
}

/// Derives bibliographic metadata from normalized document text
///
/// Each method is independent and must not fail; "nothing found" is `None`
/// or an empty vector.
pub trait MetadataHeuristics: Send + Sync {
    /// Likely document title
    fn title(&self, text: &str) -> Option<String>;

    /// Likely author names
    fn authors(&self, text: &str) -> Vec<String>;

    /// Abstract paragraph
    fn abstract_text(&self, text: &str) -> Option<String>;

    /// Keyword list
    fn keywords(&self, text: &str) -> Vec<String>;
}

/// Receives progress and diagnostic events
pub trait ExtractionObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: &ExtractionEvent);
}

impl<F> ExtractionObserver for F
where
    F: Fn(&ExtractionEvent) + Send + Sync,
{
    fn on_event(&self, event: &ExtractionEvent) {
        self(event)
    }
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&self, _event: &ExtractionEvent) {}
}
