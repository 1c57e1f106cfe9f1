//! Folio Extractor
//!
//! Turns an untrusted binary document (a PDF) into an [`ExtractionResult`]:
//! normalized full text, per-page text, metadata and a heuristic structure
//! profile.
//!
//! # Overview
//!
//! The public entry point never fails. Anything that goes wrong while
//! ingesting degrades the result instead: a failed page becomes a placeholder
//! page, a failed batch becomes a run of placeholders, and a document that
//! cannot be processed at all becomes a single-page diagnostic fallback. The
//! only hard failure is the size precondition, exposed separately through
//! [`Extractor::preflight`].
//!
//! # Architecture
//!
//! ```text
//! bytes → FileGuard → DocumentLoader → BatchedPageExtractor → normalize_text
//!       → StructureAnalyzer + MetadataHeuristics → ExtractionResult
//!                  (any failure) → FallbackResultBuilder
//! ```
//!
//! # Key Features
//!
//! - **Bounded Concurrency**: Pages are extracted in fixed-size batches on the blocking pool
//! - **Failure Isolation**: Page, batch and document failures degrade at increasing scope
//! - **Resource Limits**: Size cap, page cap, image stripping and a per-document timeout
//! - **Cancellation**: A shared [`CancellationFlag`] is checked before every batch
//! - **Diagnostics**: Progress events flow through an injectable observer
//!
//! # Example Usage
//!
//! ```no_run
//! use folio_extractor::{Extractor, ExtractorConfig, IngestRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::for_pdf(ExtractorConfig::default());
//!
//! let bytes = std::fs::read("paper.pdf")?;
//! extractor.preflight(bytes.len() as u64)?;
//!
//! let result = extractor.ingest(IngestRequest::new(bytes, "paper.pdf")).await;
//!
//! if let Some(reason) = result.fallback_reason() {
//!     println!("Degraded: {}", reason);
//! }
//! println!("Pages: {}", result.metadata().page_count);
//! println!("Title: {:?}", result.metadata().title);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod cancel;
mod config;
mod error;
mod extractor;
mod fallback;
mod guard;
mod heuristics;
mod loader;
mod normalize;
mod observer;
mod structure;


pub use batch::{batch_ranges, BatchedPageExtractor};
pub use cancel::CancellationFlag;
pub use config::{ExtractorConfig, DEFAULT_MAX_FILE_SIZE_BYTES};
pub use error::ExtractorError;
pub use extractor::{Extractor, IngestRequest};
pub use fallback::FallbackResultBuilder;
pub use guard::FileGuard;
pub use heuristics::RegexHeuristics;
pub use loader::{LopdfLoader, PdfError, PdfSource};
pub use normalize::{join_fragments, normalize_text};
pub use observer::TracingObserver;
pub use structure::StructureAnalyzer;

pub use folio_domain::ExtractionResult;
