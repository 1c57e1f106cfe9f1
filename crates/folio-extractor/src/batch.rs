//! Batched, failure-isolated page text extraction
//!
//! Pages are split into fixed-size batches. Pages of one batch are extracted
//! concurrently on the blocking pool; batches run one after another with a
//! short pause in between, so at most `batch_size` page extractions are in
//! flight. Records are collected in page order, never completion order.

use crate::cancel::CancellationFlag;
use crate::error::ExtractorError;
use crate::normalize::join_fragments;
use folio_domain::{ExtractionEvent, ExtractionObserver, PageRecord, PageSource};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Extracts page records batch by batch
pub struct BatchedPageExtractor<'a> {
    batch_size: usize,
    pause: Duration,
    observer: &'a dyn ExtractionObserver,
    cancel: &'a CancellationFlag,
}

impl<'a> BatchedPageExtractor<'a> {
    /// Create an extractor; a zero batch size is treated as 1
    pub fn new(
        batch_size: usize,
        pause: Duration,
        observer: &'a dyn ExtractionObserver,
        cancel: &'a CancellationFlag,
    ) -> Self {
        Self {
            batch_size: batch_size.max(1),
            pause,
            observer,
            cancel,
        }
    }

    /// Extract pages `1..=max_pages`
    ///
    /// Failed pages and failed batches become placeholder records; the only
    /// error returned is `Cancelled`.
    pub async fn extract<S>(
        &self,
        source: Arc<S>,
        max_pages: usize,
    ) -> Result<Vec<PageRecord>, ExtractorError>
    where
        S: PageSource + 'static,
    {
        let mut pages = Vec::with_capacity(max_pages);

        for (batch_index, batch) in batch_ranges(max_pages, self.batch_size).into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(ExtractorError::Cancelled);
            }
            if batch_index > 0 {
                self.yield_between_batches().await;
            }

            let (first_page, last_page) = (*batch.start(), *batch.end());
            debug!("Extracting batch {} (pages {}-{})", batch_index, first_page, last_page);

            match self.run_batch(&source, batch.clone()).await {
                Ok(records) => {
                    pages.extend(records);
                    self.observer.on_event(&ExtractionEvent::BatchCompleted {
                        batch_index,
                        first_page,
                        last_page,
                    });
                }
                Err(e) => {
                    pages.extend(batch.map(PageRecord::placeholder));
                    self.observer.on_event(&ExtractionEvent::BatchFailed {
                        batch_index,
                        first_page,
                        last_page,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(pages)
    }

    /// Launch every page of the batch, then join them in page order
    async fn run_batch<S>(
        &self,
        source: &Arc<S>,
        batch: RangeInclusive<u32>,
    ) -> Result<Vec<PageRecord>, ExtractorError>
    where
        S: PageSource + 'static,
    {
        let (first_page, last_page) = (*batch.start(), *batch.end());

        let handles: Vec<(u32, JoinHandle<Result<String, String>>)> = batch
            .map(|page_number| {
                let source = Arc::clone(source);
                let handle = tokio::task::spawn_blocking(move || {
                    source
                        .page_fragments(page_number)
                        .map(|fragments| join_fragments(&fragments))
                        .map_err(|e| e.to_string())
                });
                (page_number, handle)
            })
            .collect();

        let mut records = Vec::with_capacity(handles.len());
        let mut join_failure: Option<String> = None;

        // Every handle is awaited, even after a failure, so no task outlives the batch
        for (page_number, handle) in handles {
            match handle.await {
                Ok(Ok(text)) => records.push(PageRecord::new(page_number, text)),
                Ok(Err(reason)) => {
                    let error = ExtractorError::PageExtraction {
                        page: page_number,
                        reason,
                    };
                    self.observer.on_event(&ExtractionEvent::PageFailed {
                        page_number,
                        reason: error.to_string(),
                    });
                    records.push(PageRecord::placeholder(page_number));
                }
                Err(join_error) => {
                    join_failure.get_or_insert_with(|| {
                        format!("page {} task failed: {}", page_number, join_error)
                    });
                }
            }
        }

        match join_failure {
            Some(reason) => Err(ExtractorError::BatchJoin {
                first_page,
                last_page,
                reason,
            }),
            None => Ok(records),
        }
    }

    async fn yield_between_batches(&self) {
        if self.pause.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.pause).await;
        }
    }
}

/// Split `1..=page_count` into consecutive inclusive ranges of `batch_size`
pub fn batch_ranges(page_count: usize, batch_size: usize) -> Vec<RangeInclusive<u32>> {
    let batch_size = batch_size.max(1) as u32;
    let page_count = page_count as u32;

    (0..page_count.div_ceil(batch_size))
        .map(|batch| {
            let first = batch * batch_size + 1;
            let last = (first + batch_size - 1).min(page_count);
            first..=last
        })
        .collect()
}
