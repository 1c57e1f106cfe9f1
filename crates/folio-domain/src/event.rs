//! Progress and diagnostic events emitted during ingestion

use std::fmt;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input size precondition
    Guard,
    /// Opening the binary document
    Load,
    /// Reading embedded metadata
    Metadata,
    /// Batched page text extraction
    Pages,
    /// Full-text normalization
    Normalize,
    /// Structure and metadata heuristics
    Analyze,
    /// Building the final result
    Assemble,
}

impl Stage {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Guard => "guard",
            Stage::Load => "load",
            Stage::Metadata => "metadata",
            Stage::Pages => "pages",
            Stage::Normalize => "normalize",
            Stage::Analyze => "analyze",
            Stage::Assemble => "assemble",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something worth reporting while a document is ingested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    /// A stage started
    StageEntered(Stage),

    /// The document opened successfully
    DocumentLoaded {
        /// Pages in the source document
        page_count: usize,
        /// Pages that will be extracted after the cap
        pages_to_extract: usize,
    },

    /// Embedded metadata could not be read; extraction continues
    MetadataUnavailable {
        /// Underlying error message
        reason: String,
    },

    /// A single page was replaced by a placeholder
    PageFailed {
        /// 1-based page number
        page_number: u32,
        /// Underlying error message
        reason: String,
    },

    /// A batch finished joining
    BatchCompleted {
        /// 0-based batch index
        batch_index: usize,
        /// First page of the batch
        first_page: u32,
        /// Last page of the batch
        last_page: u32,
    },

    /// A batch join failed; every page in it became a placeholder
    BatchFailed {
        /// 0-based batch index
        batch_index: usize,
        /// First page of the batch
        first_page: u32,
        /// Last page of the batch
        last_page: u32,
        /// Underlying error message
        reason: String,
    },

    /// The pipeline produced a success result
    Completed {
        /// Page records produced
        page_count: usize,
        /// Words in the normalized text
        word_count: usize,
    },

    /// The pipeline gave up and produced a fallback result
    FallbackProduced {
        /// Underlying error message
        reason: String,
    },
}
