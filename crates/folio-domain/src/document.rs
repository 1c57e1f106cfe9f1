//! Document module - the ingestion result and its parts

use crate::structure::DocumentStructure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Count whitespace-delimited, non-empty tokens
///
/// # Examples
///
/// ```
/// use folio_domain::word_count;
///
/// assert_eq!(word_count("  two\twords \n"), 2);
/// assert_eq!(word_count(""), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Extracted text for one physical page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// 1-based page number
    pub page_number: u32,

    /// Page text, fragments joined by single spaces
    pub text: String,

    /// Whitespace token count of `text` (0 for placeholders)
    pub word_count: usize,
}

impl PageRecord {
    /// Build a record, computing the word count from the text
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        let word_count = word_count(&text);
        Self {
            page_number,
            text,
            word_count,
        }
    }

    /// Record standing in for a page whose extraction failed
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_domain::PageRecord;
    ///
    /// let page = PageRecord::placeholder(7);
    /// assert_eq!(page.text, "[Page 7 extraction failed]");
    /// assert_eq!(page.word_count, 0);
    /// ```
    pub fn placeholder(page_number: u32) -> Self {
        Self {
            page_number,
            text: format!("[Page {} extraction failed]", page_number),
            word_count: 0,
        }
    }

    /// Whether this record is a failure placeholder
    pub fn is_placeholder(&self) -> bool {
        self.word_count == 0 && self.text == Self::placeholder(self.page_number).text
    }
}

/// Embedded and derived facts about a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Document title (embedded, else heuristic)
    pub title: Option<String>,

    /// Author line (embedded, else heuristic authors joined by ", ")
    pub author: Option<String>,

    /// Heuristically detected author names
    #[serde(default)]
    pub authors: Vec<String>,

    /// Embedded subject
    pub subject: Option<String>,

    /// Keywords (embedded, else heuristic)
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Abstract text detected in the body
    pub abstract_text: Option<String>,

    /// Producing application
    pub creator: Option<String>,

    /// PDF producer library
    pub producer: Option<String>,

    /// Creation date (RFC 3339 when parseable)
    pub creation_date: Option<String>,

    /// Modification date (RFC 3339 when parseable)
    pub modification_date: Option<String>,

    /// Number of page records in the result
    pub page_count: usize,

    /// Real page count of the source before the page cap
    pub source_page_count: usize,

    /// True when pages beyond the cap were not extracted
    pub truncated: bool,

    /// Word count of the normalized full text
    pub word_count: usize,

    /// When the ingestion ran
    pub extracted_at: DateTime<Utc>,

    /// Declared payload size in bytes
    pub file_size: u64,

    /// Declared file name
    pub file_name: String,
}

impl DocumentMetadata {
    /// Metadata with only the ingestion facts filled in
    pub fn new(file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            title: None,
            author: None,
            authors: Vec::new(),
            subject: None,
            keywords: Vec::new(),
            abstract_text: None,
            creator: None,
            producer: None,
            creation_date: None,
            modification_date: None,
            page_count: 0,
            source_page_count: 0,
            truncated: false,
            word_count: 0,
            extracted_at: Utc::now(),
            file_size,
            file_name: file_name.into(),
        }
    }
}

/// Full text, pages, metadata and structure of one ingested document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    /// Normalized full document text
    pub text: String,

    /// Document metadata
    pub metadata: DocumentMetadata,

    /// Page records, ascending by page number
    pub pages: Vec<PageRecord>,

    /// Heuristic structural profile
    pub structure: DocumentStructure,
}

/// Payload of a fallback result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackReport {
    /// Message of the error that stopped the pipeline
    pub reason: String,

    /// Single-page diagnostic document
    pub document: ExtractedDocument,
}

/// Outcome of an ingestion call
///
/// Always well-formed: consumers can render `document()` whichever variant
/// they receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// The pipeline completed; some pages may still be placeholders
    Success(ExtractedDocument),

    /// The pipeline could not complete; the document is a diagnostic report
    Fallback(FallbackReport),
}

impl ExtractionResult {
    /// The document carried by either variant
    pub fn document(&self) -> &ExtractedDocument {
        match self {
            ExtractionResult::Success(document) => document,
            ExtractionResult::Fallback(report) => &report.document,
        }
    }

    /// Whether this is a fallback result
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExtractionResult::Fallback(_))
    }

    /// Error message behind a fallback result
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success(_) => None,
            ExtractionResult::Fallback(report) => Some(&report.reason),
        }
    }

    /// Shorthand for `document().text`
    pub fn text(&self) -> &str {
        &self.document().text
    }

    /// Shorthand for `document().pages`
    pub fn pages(&self) -> &[PageRecord] {
        &self.document().pages
    }

    /// Shorthand for `document().metadata`
    pub fn metadata(&self) -> &DocumentMetadata {
        &self.document().metadata
    }

    /// Shorthand for `document().structure`
    pub fn structure(&self) -> &DocumentStructure {
        &self.document().structure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ExtractedDocument {
        let pages = vec![PageRecord::new(1, "Hello world")];
        let mut metadata = DocumentMetadata::new("paper.pdf", 1024);
        metadata.page_count = pages.len();
        metadata.word_count = 2;
        ExtractedDocument {
            text: "Hello world".to_string(),
            metadata,
            pages,
            structure: DocumentStructure::default(),
        }
    }

    #[test]
    fn test_page_record_counts_words() {
        let page = PageRecord::new(3, "one two  three");
        assert_eq!(page.page_number, 3);
        assert_eq!(page.word_count, 3);
        assert!(!page.is_placeholder());
    }

    #[test]
    fn test_placeholder_is_detected() {
        let page = PageRecord::placeholder(12);
        assert!(page.is_placeholder());
        assert_eq!(page.text, "[Page 12 extraction failed]");
    }

    #[test]
    fn test_accessors_reach_fallback_document() {
        let result = ExtractionResult::Fallback(FallbackReport {
            reason: "broken".to_string(),
            document: sample_document(),
        });
        assert!(result.is_fallback());
        assert_eq!(result.fallback_reason(), Some("broken"));
        assert_eq!(result.pages().len(), 1);
        assert_eq!(result.text(), "Hello world");
    }

    #[test]
    fn test_serializes_with_status_tag_and_camel_case() {
        let result = ExtractionResult::Success(sample_document());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["metadata"]["pageCount"], 1);
        assert_eq!(json["pages"][0]["pageNumber"], 1);
        assert_eq!(json["metadata"]["fileName"], "paper.pdf");
    }

    #[test]
    fn test_json_round_trip_preserves_variant() {
        let result = ExtractionResult::Fallback(FallbackReport {
            reason: "load failed".to_string(),
            document: sample_document(),
        });
        let json = serde_json::to_string(&result).unwrap();
        let parsed: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
