//! Observer forwarding pipeline events to `tracing`

use folio_domain::{ExtractionEvent, ExtractionObserver};
use tracing::{debug, info, warn};

/// Default observer: every event becomes a structured `tracing` record
///
/// Stage transitions and batch completions log at `debug`, degradations at
/// `warn`, and load / completion summaries at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_event(&self, event: &ExtractionEvent) {
        match event {
            ExtractionEvent::StageEntered(stage) => {
                debug!(stage = %stage, "Entering stage");
            }
            ExtractionEvent::DocumentLoaded {
                page_count,
                pages_to_extract,
            } => {
                info!(page_count, pages_to_extract, "Document loaded");
            }
            ExtractionEvent::MetadataUnavailable { reason } => {
                warn!(%reason, "Embedded metadata unavailable, continuing without it");
            }
            ExtractionEvent::PageFailed {
                page_number,
                reason,
            } => {
                warn!(page_number, %reason, "Page extraction failed, using placeholder");
            }
            ExtractionEvent::BatchCompleted {
                batch_index,
                first_page,
                last_page,
            } => {
                debug!(batch_index, first_page, last_page, "Batch completed");
            }
            ExtractionEvent::BatchFailed {
                batch_index,
                first_page,
                last_page,
                reason,
            } => {
                warn!(
                    batch_index,
                    first_page,
                    last_page,
                    %reason,
                    "Batch failed, using placeholders for the whole batch"
                );
            }
            ExtractionEvent::Completed {
                page_count,
                word_count,
            } => {
                info!(page_count, word_count, "Extraction complete");
            }
            ExtractionEvent::FallbackProduced { reason } => {
                warn!(%reason, "Extraction failed, producing fallback result");
            }
        }
    }
}
