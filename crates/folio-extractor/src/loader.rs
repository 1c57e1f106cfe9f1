//! PDF loading backed by lopdf
//!
//! Parses the payload once, strips oversized image streams, and exposes the
//! parsed document as a [`PageSource`]. Encrypted documents are rejected.

use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use flate2::read::ZlibDecoder;
use folio_domain::{DocumentLoader, EmbeddedMetadata, LoaderOptions, PageSource};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the lopdf-backed loader
#[derive(Error, Debug)]
pub enum PdfError {
    /// The payload is not a parseable PDF
    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    /// The document is encrypted or password protected
    #[error("PDF is encrypted or password protected")]
    Encrypted,

    /// The document has no page tree
    #[error("PDF has no pages")]
    NoPages,

    /// A page number outside the document was requested
    #[error("Page {0} not found")]
    PageNotFound(u32),

    /// Text extraction of a page failed
    #[error("Failed to extract text from page {page}: {reason}")]
    Text {
        /// 1-based page number
        page: u32,
        /// Underlying lopdf error
        reason: String,
    },

    /// The info dictionary is malformed
    #[error("Failed to read info dictionary: {0}")]
    Info(String),
}

/// [`DocumentLoader`] for PDF payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfLoader;

impl LopdfLoader {
    /// Create the loader
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for LopdfLoader {
    type Source = PdfSource;
    type Error = PdfError;

    fn load(&self, bytes: &[u8], options: &LoaderOptions) -> Result<PdfSource, PdfError> {
        let mut document = Document::load_mem(bytes).map_err(|e| PdfError::Parse(e.to_string()))?;

        if document.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let pages = document.get_pages();
        if pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        if options.strip_embedded_images {
            let stripped = strip_large_images(&mut document, options.max_embedded_image_bytes);
            if stripped > 0 {
                debug!("Dropped {} oversized image streams", stripped);
            }
        }

        Ok(PdfSource { document, pages })
    }
}

/// A parsed PDF ready for page-level text extraction
pub struct PdfSource {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PageSource for PdfSource {
    type Error = PdfError;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>, PdfError> {
        let page_id = *self
            .pages
            .get(&page_number)
            .ok_or(PdfError::PageNotFound(page_number))?;

        // extract_text reads an undecodable stream as empty, so check first
        self.check_content_streams(page_id)
            .map_err(|reason| PdfError::Text {
                page: page_number,
                reason,
            })?;

        let text = self
            .document
            .extract_text(&[page_number])
            .map_err(|e| PdfError::Text {
                page: page_number,
                reason: e.to_string(),
            })?;

        Ok(text.lines().map(str::to_string).collect())
    }

    fn embedded_metadata(&self) -> Result<EmbeddedMetadata, PdfError> {
        let info = match self.document.trailer.get(b"Info") {
            Ok(object) => object,
            // No info dictionary is not an error, just nothing to report
            Err(_) => return Ok(EmbeddedMetadata::default()),
        };

        let info = match info {
            Object::Reference(id) => self
                .document
                .get_object(*id)
                .map_err(|e| PdfError::Info(e.to_string()))?,
            other => other,
        };
        let dict = info.as_dict().map_err(|e| PdfError::Info(e.to_string()))?;

        Ok(EmbeddedMetadata {
            title: self.info_string(dict, b"Title"),
            author: self.info_string(dict, b"Author"),
            subject: self.info_string(dict, b"Subject"),
            keywords: self.info_string(dict, b"Keywords"),
            creator: self.info_string(dict, b"Creator"),
            producer: self.info_string(dict, b"Producer"),
            creation_date: self.info_string(dict, b"CreationDate").map(|d| normalize_pdf_date(&d)),
            modification_date: self.info_string(dict, b"ModDate").map(|d| normalize_pdf_date(&d)),
        })
    }
}

impl PdfSource {
    /// Fail when any of the page's content streams cannot be decompressed
    fn check_content_streams(&self, page_id: ObjectId) -> Result<(), String> {
        for stream_id in self.document.get_page_contents(page_id) {
            // Missing streams read as empty pages, as lopdf treats them
            let Ok(stream) = self.document.get_object(stream_id).and_then(Object::as_stream) else {
                continue;
            };
            check_stream(stream).map_err(|e| format!("content stream {:?}: {}", stream_id, e))?;
        }
        Ok(())
    }

    /// Read a text entry, resolving references; blank values become `None`
    fn info_string(&self, dict: &Dictionary, key: &[u8]) -> Option<String> {
        let object = match dict.get(key).ok()? {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };
        match object {
            Object::String(bytes, _) => {
                let value = decode_pdf_string(bytes);
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            _ => None,
        }
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, else UTF-8, else Latin-1
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Convert `D:YYYYMMDDHHmmSSOHH'mm'` to RFC 3339; unparseable dates pass through
fn normalize_pdf_date(raw: &str) -> String {
    let body = raw.trim().trim_start_matches("D:");
    let digits: String = body.chars().take_while(|c| c.is_ascii_digit()).collect();

    let padded = match digits.len() {
        8 => format!("{}000000", digits),
        12 => format!("{}00", digits),
        n if n >= 14 => digits[..14].to_string(),
        _ => return raw.to_string(),
    };
    let Ok(naive) = NaiveDateTime::parse_from_str(&padded, "%Y%m%d%H%M%S") else {
        return raw.to_string();
    };

    let offset = parse_pdf_offset(&body[digits.len()..]);
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| raw.to_string())
}

/// Parse the `Z` / `+HH'mm'` / `-HH'mm'` suffix of a PDF date; missing means UTC
fn parse_pdf_offset(suffix: &str) -> FixedOffset {
    let utc = Utc.fix();
    let sign = match suffix.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return utc,
    };
    let digits: Vec<i32> = suffix[1..]
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as i32)
        .collect();
    if digits.len() < 2 {
        return utc;
    }
    let hours = digits[0] * 10 + digits[1];
    let minutes = if digits.len() >= 4 { digits[2] * 10 + digits[3] } else { 0 };
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).unwrap_or(utc)
}

/// Decompress a stream's filters, discarding the output
fn check_stream(stream: &Stream) -> Result<(), String> {
    if !stream.dict.has(b"Filter") || stream.content.is_empty() {
        return Ok(());
    }
    let filters = stream.filters().map_err(|e| e.to_string())?;

    // lopdf logs zlib errors and returns what it inflated so far
    if filters.first().map(String::as_str) == Some("FlateDecode") {
        let mut decoder = ZlibDecoder::new(stream.content.as_slice());
        io::copy(&mut decoder, &mut io::sink()).map_err(|e| e.to_string())?;
        if filters.len() == 1 {
            return Ok(());
        }
    }
    stream.decompressed_content().map(|_| ()).map_err(|e| e.to_string())
}

/// Empty image XObject streams larger than `max_bytes`; returns how many
fn strip_large_images(document: &mut Document, max_bytes: usize) -> usize {
    let mut stripped = 0;
    for object in document.objects.values_mut() {
        if let Object::Stream(stream) = object {
            let is_image = matches!(
                stream.dict.get(b"Subtype"),
                Ok(Object::Name(name)) if name.as_slice() == b"Image"
            );
            if is_image && stream.content.len() > max_bytes {
                stream.set_content(Vec::new());
                stripped += 1;
            }
        }
    }
    stripped
}
