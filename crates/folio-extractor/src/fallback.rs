//! Diagnostic result used when the pipeline cannot complete

use crate::error::ExtractorError;
use folio_domain::{
    word_count, DocumentMetadata, DocumentStructure, ExtractedDocument, ExtractionResult,
    FallbackReport, PageRecord,
};

/// Builds the single-page "Error Report" result
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResultBuilder;

impl FallbackResultBuilder {
    /// Build a fallback result for `file_name` explaining `error`
    pub fn build(&self, file_name: &str, file_size: u64, error: &ExtractorError) -> ExtractionResult {
        let reason = error.to_string();
        let text = diagnostic_text(file_name, &reason);

        let mut metadata = DocumentMetadata::new(file_name, file_size);
        metadata.title = Some(format!("Processing failed: {}", file_name));
        metadata.page_count = 1;
        metadata.word_count = word_count(&text);

        ExtractionResult::Fallback(FallbackReport {
            reason,
            document: ExtractedDocument {
                pages: vec![PageRecord::new(1, text.clone())],
                text,
                metadata,
                structure: DocumentStructure::error_report(),
            },
        })
    }
}

fn diagnostic_text(file_name: &str, reason: &str) -> String {
    format!(
        "PDF Processing Error\n\
         \n\
         File: {file_name}\n\
         Error: {reason}\n\
         \n\
         The document could not be processed. Likely causes:\n\
         - The PDF contains only scanned images and needs OCR\n\
         - The PDF is password protected or encrypted\n\
         - The file is corrupted or is not a valid PDF\n\
         - The document is too large or too complex to process\n\
         \n\
         Try re-exporting the document as a text-based PDF, or check that it opens in a PDF viewer."
    )
}
