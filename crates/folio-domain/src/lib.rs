//! Folio Domain Layer
//!
//! Value types and seam traits for the document ingestion pipeline. The
//! pipeline itself lives in `folio-extractor`; everything a consumer needs to
//! read an ingestion result lives here.
//!
//! ## Key Concepts
//!
//! - **ExtractionResult**: The sole output of an ingestion call. Either a
//!   `Success` or a diagnostic `Fallback`, never an error
//! - **PageRecord**: Text and word count for one physical page (1-based)
//! - **DocumentStructure**: Heuristic section presence flags plus header candidates
//! - **DocumentMetadata**: Embedded and heuristically derived document facts
//!
//! ## Architecture
//!
//! Infrastructure (PDF parsing, regex heuristics, logging) plugs in through the
//! traits in [`traits`]:
//! - [`DocumentLoader`] / [`PageSource`]: page-addressable document access
//! - [`MetadataHeuristics`]: title / authors / abstract / keywords derivation
//! - [`ExtractionObserver`]: progress and diagnostic events

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod event;
pub mod source;
pub mod structure;
pub mod traits;

// Re-exports for convenience
pub use document::{
    word_count, DocumentMetadata, ExtractedDocument, ExtractionResult, FallbackReport, PageRecord,
};
pub use event::{ExtractionEvent, Stage};
pub use source::{EmbeddedMetadata, LoaderOptions};
pub use structure::DocumentStructure;
pub use traits::{DocumentLoader, ExtractionObserver, MetadataHeuristics, NoopObserver, PageSource};
