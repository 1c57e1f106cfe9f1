//! Core Extractor implementation

use crate::batch::BatchedPageExtractor;
use crate::cancel::CancellationFlag;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fallback::FallbackResultBuilder;
use crate::guard::FileGuard;
use crate::heuristics::RegexHeuristics;
use crate::loader::LopdfLoader;
use crate::normalize::normalize_text;
use crate::observer::TracingObserver;
use crate::structure::StructureAnalyzer;
use folio_domain::{
    word_count, DocumentLoader, DocumentMetadata, EmbeddedMetadata, ExtractedDocument,
    ExtractionEvent, ExtractionObserver, ExtractionResult, MetadataHeuristics, PageRecord,
    PageSource, Stage,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};

/// A binary payload to ingest
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Raw document bytes
    pub bytes: Vec<u8>,

    /// Declared file name, echoed into the result
    pub file_name: String,

    /// Declared size in bytes, echoed into the result
    pub file_size: u64,
}

impl IngestRequest {
    /// Request whose declared size is the payload length
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>) -> Self {
        let file_size = bytes.len() as u64;
        Self {
            bytes,
            file_name: file_name.into(),
            file_size,
        }
    }

    /// Override the declared size (e.g. the size reported by an upload)
    pub fn with_declared_size(mut self, file_size: u64) -> Self {
        self.file_size = file_size;
        self
    }

    /// Size held against the limit: the declared size or the payload
    /// length, whichever is larger
    pub fn checked_size(&self) -> u64 {
        self.file_size.max(self.bytes.len() as u64)
    }
}

/// The Extractor turns a binary document into an [`ExtractionResult`]
pub struct Extractor<L = LopdfLoader>
where
    L: DocumentLoader,
{
    loader: Arc<L>,
    heuristics: Arc<dyn MetadataHeuristics>,
    observer: Arc<dyn ExtractionObserver>,
    config: ExtractorConfig,
}

impl<L: DocumentLoader> Clone for Extractor<L> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            heuristics: Arc::clone(&self.heuristics),
            observer: Arc::clone(&self.observer),
            config: self.config.clone(),
        }
    }
}

impl Extractor<LopdfLoader> {
    /// Create an Extractor for PDF payloads
    pub fn for_pdf(config: ExtractorConfig) -> Self {
        Self::new(LopdfLoader::new(), config)
    }
}

impl<L> Extractor<L>
where
    L: DocumentLoader + 'static,
{
    /// Create a new Extractor with regex heuristics and tracing diagnostics
    pub fn new(loader: L, config: ExtractorConfig) -> Self {
        Self {
            loader: Arc::new(loader),
            heuristics: Arc::new(RegexHeuristics::new()),
            observer: Arc::new(TracingObserver),
            config,
        }
    }

    /// Replace the event observer
    pub fn with_observer(mut self, observer: impl ExtractionObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Replace the metadata heuristics
    pub fn with_heuristics(mut self, heuristics: impl MetadataHeuristics + 'static) -> Self {
        self.heuristics = Arc::new(heuristics);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Size precondition; callers should not ingest a payload that fails it
    pub fn preflight(&self, file_size: u64) -> Result<(), ExtractorError> {
        FileGuard::new(self.config.max_file_size_bytes).check(file_size)
    }

    /// Check the size and open the document without extracting text
    ///
    /// Returns the document's page count.
    pub async fn probe(&self, request: IngestRequest) -> Result<usize, ExtractorError> {
        self.preflight(request.checked_size())?;
        let source = self.load(request.bytes).await?;
        Ok(source.page_count())
    }

    /// Ingest a document
    ///
    /// Never fails: anything that goes wrong past the size check yields a
    /// fallback result. An oversized payload also yields a fallback; use
    /// [`Extractor::preflight`] to reject it up front.
    pub async fn ingest(&self, request: IngestRequest) -> ExtractionResult {
        self.ingest_with_cancellation(request, CancellationFlag::new())
            .await
    }

    /// Ingest a document, stopping early once `cancel` is set
    pub async fn ingest_with_cancellation(
        &self,
        request: IngestRequest,
        cancel: CancellationFlag,
    ) -> ExtractionResult {
        let file_name = request.file_name.clone();
        let file_size = request.file_size;
        let checked_size = request.checked_size();

        info!(
            "Starting ingestion of '{}' ({} bytes)",
            file_name, file_size
        );

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Guard));
        if let Err(e) = self.preflight(checked_size) {
            return self.fallback(&file_name, file_size, &e);
        }

        // A panic anywhere in the pipeline surfaces as a join error
        let budget = self.config.document_timeout();
        let mut handle = tokio::spawn(self.clone().run(request, cancel.clone()));

        let outcome = match timeout(budget, &mut handle).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(join_error)) => Err(ExtractorError::Internal(format!(
                "extraction task failed: {}",
                join_error
            ))),
            Err(_) => {
                cancel.cancel();
                handle.abort();
                Err(ExtractorError::Timeout(budget))
            }
        };

        match outcome {
            Ok(document) => {
                self.observer.on_event(&ExtractionEvent::Completed {
                    page_count: document.metadata.page_count,
                    word_count: document.metadata.word_count,
                });
                ExtractionResult::Success(document)
            }
            Err(e) => self.fallback(&file_name, file_size, &e),
        }
    }

    /// The pipeline body, run in its own task
    async fn run(
        self,
        request: IngestRequest,
        cancel: CancellationFlag,
    ) -> Result<ExtractedDocument, ExtractorError> {
        if cancel.is_cancelled() {
            return Err(ExtractorError::Cancelled);
        }
        let IngestRequest {
            bytes,
            file_name,
            file_size,
        } = request;

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Load));
        let source = Arc::new(self.load(bytes).await?);
        let source_page_count = source.page_count();
        let pages_to_extract = source_page_count.min(self.config.max_pages);
        self.observer.on_event(&ExtractionEvent::DocumentLoaded {
            page_count: source_page_count,
            pages_to_extract,
        });

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Metadata));
        let embedded = self.embedded_metadata(source.as_ref());

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Pages));
        let pages = BatchedPageExtractor::new(
            self.config.batch_size,
            self.config.batch_pause(),
            &*self.observer,
            &cancel,
        )
        .extract(Arc::clone(&source), pages_to_extract)
        .await?;

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Normalize));
        let text = normalize_text(&concatenate_pages(&pages));
        debug!("Normalized text: {} chars", text.len());

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Analyze));
        let structure =
            StructureAnalyzer::new(self.config.section_scan_lines, self.config.max_sections)
                .analyze(&text);

        self.observer.on_event(&ExtractionEvent::StageEntered(Stage::Assemble));
        let mut metadata = self.build_metadata(&text, embedded, file_name, file_size);
        metadata.page_count = pages.len();
        metadata.source_page_count = source_page_count;
        metadata.truncated = source_page_count > pages.len();

        Ok(ExtractedDocument {
            text,
            metadata,
            pages,
            structure,
        })
    }

    async fn load(&self, bytes: Vec<u8>) -> Result<L::Source, ExtractorError> {
        let loader = Arc::clone(&self.loader);
        let options = self.config.loader.clone();

        tokio::task::spawn_blocking(move || {
            loader
                .load(&bytes, &options)
                .map_err(|e| ExtractorError::Load(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Load(format!("loader task failed: {}", e)))?
    }

    /// Embedded metadata, or empty metadata when it cannot be read
    fn embedded_metadata(&self, source: &L::Source) -> EmbeddedMetadata {
        match source.embedded_metadata() {
            Ok(embedded) => embedded,
            Err(e) => {
                let error = ExtractorError::Metadata(e.to_string());
                self.observer.on_event(&ExtractionEvent::MetadataUnavailable {
                    reason: error.to_string(),
                });
                EmbeddedMetadata::default()
            }
        }
    }

    /// Embedded values win; heuristics fill what the document leaves empty
    fn build_metadata(
        &self,
        text: &str,
        embedded: EmbeddedMetadata,
        file_name: String,
        file_size: u64,
    ) -> DocumentMetadata {
        let authors = self.heuristics.authors(text);
        let keywords = match embedded.keyword_list() {
            list if list.is_empty() => self.heuristics.keywords(text),
            list => list,
        };

        let mut metadata = DocumentMetadata::new(file_name, file_size);
        metadata.title = embedded.title.or_else(|| self.heuristics.title(text));
        metadata.author = embedded
            .author
            .or_else(|| (!authors.is_empty()).then(|| authors.join(", ")));
        metadata.authors = authors;
        metadata.subject = embedded.subject;
        metadata.keywords = keywords;
        metadata.abstract_text = self.heuristics.abstract_text(text);
        metadata.creator = embedded.creator;
        metadata.producer = embedded.producer;
        metadata.creation_date = embedded.creation_date;
        metadata.modification_date = embedded.modification_date;
        metadata.word_count = word_count(text);
        metadata
    }

    fn fallback(&self, file_name: &str, file_size: u64, error: &ExtractorError) -> ExtractionResult {
        self.observer.on_event(&ExtractionEvent::FallbackProduced {
            reason: error.to_string(),
        });
        FallbackResultBuilder.build(file_name, file_size, error)
    }
}

/// Page texts in page order, one paragraph per page
fn concatenate_pages(pages: &[PageRecord]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
