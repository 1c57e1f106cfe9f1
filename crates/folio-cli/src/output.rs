//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use folio_domain::{DocumentMetadata, DocumentStructure, ExtractionResult, PageRecord};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an ingestion result.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Text => Ok(result.text().to_string()),
        }
    }

    /// Summary table followed by a per-page table.
    fn format_result_table(&self, result: &ExtractionResult) -> String {
        let status = match result {
            ExtractionResult::Success(_) => self.colorize("success", "green"),
            ExtractionResult::Fallback(_) => self.colorize("fallback", "yellow"),
        };

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Status".to_string(), status]);
        for (field, value) in metadata_rows(result.metadata()) {
            builder.push_record([field.to_string(), value]);
        }
        builder.push_record(["Sections".to_string(), structure_summary(result.structure())]);

        let mut summary = builder.build();
        summary
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", summary, self.format_pages_table(result.pages()))
    }

    fn format_pages_table(&self, pages: &[PageRecord]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Page", "Words", "Preview"]);

        for page in pages {
            let preview = if page.is_placeholder() {
                self.colorize(&page.text, "red")
            } else {
                preview(&page.text)
            };
            builder.push_record([
                page.page_number.to_string(),
                page.word_count.to_string(),
                preview,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format the outcome of a `check` run.
    pub fn check_report(&self, file_name: &str, file_size: u64, page_count: usize) -> String {
        match self.format {
            OutputFormat::Json => serde_json::json!({
                "fileName": file_name,
                "fileSize": file_size,
                "pageCount": page_count,
                "ok": true,
            })
            .to_string(),
            _ => self.success(&format!(
                "{} ({} bytes) opens with {} page(s)",
                file_name, file_size, page_count
            )),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn metadata_rows(metadata: &DocumentMetadata) -> Vec<(&'static str, String)> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let pages = if metadata.truncated {
        format!(
            "{} (truncated from {})",
            metadata.page_count, metadata.source_page_count
        )
    } else {
        metadata.page_count.to_string()
    };

    vec![
        ("File", metadata.file_name.clone()),
        ("Size", format!("{} bytes", metadata.file_size)),
        ("Pages", pages),
        ("Words", metadata.word_count.to_string()),
        ("Title", optional(&metadata.title)),
        ("Author", optional(&metadata.author)),
        ("Subject", optional(&metadata.subject)),
        ("Keywords", list_or_dash(&metadata.keywords)),
        ("Abstract", optional(&metadata.abstract_text.as_deref().map(preview))),
        ("Producer", optional(&metadata.producer)),
        ("Created", optional(&metadata.creation_date)),
        ("Extracted", metadata.extracted_at.to_rfc3339()),
    ]
}

fn structure_summary(structure: &DocumentStructure) -> String {
    let flags = [
        ("abstract", structure.has_abstract),
        ("introduction", structure.has_introduction),
        ("methodology", structure.has_methodology),
        ("results", structure.has_results),
        ("conclusion", structure.has_conclusion),
        ("references", structure.has_references),
    ];
    let present: Vec<&str> = flags
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect();

    format!(
        "{} of {}: {}\nheaders: {}",
        structure.detected_section_count(),
        flags.len(),
        list_or_dash(&present),
        list_or_dash(&structure.sections)
    )
}

fn list_or_dash<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items
        .iter()
        .map(|item| item.as_ref())
        .collect::<Vec<&str>>()
        .join(", ")
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}…", head.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::ExtractedDocument;

    fn create_test_result() -> ExtractionResult {
        let pages = vec![
            PageRecord::new(1, "Sparse Attention Models"),
            PageRecord::placeholder(2),
        ];
        let mut metadata = DocumentMetadata::new("paper.pdf", 4096);
        metadata.title = Some("Sparse Attention Models".to_string());
        metadata.page_count = 2;
        metadata.source_page_count = 2;
        metadata.word_count = 7;
        ExtractionResult::Success(ExtractedDocument {
            text: "Sparse Attention Models\n\n[Page 2 extraction failed]".to_string(),
            metadata,
            pages,
            structure: DocumentStructure {
                has_abstract: true,
                sections: vec!["Sparse Attention Models".to_string()],
                ..DocumentStructure::default()
            },
        })
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_result(&create_test_result()).unwrap();
        assert!(output.contains("\"status\": \"success\""));
        assert!(output.contains("\"pageCount\": 2"));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_result(&create_test_result()).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains("Sparse Attention Models"));
        assert!(output.contains("[Page 2 extraction failed]"));
        assert!(output.contains("abstract"));
    }

    #[test]
    fn test_text_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let result = create_test_result();
        assert_eq!(formatter.format_result(&result).unwrap(), result.text());
    }

    #[test]
    fn test_structure_summary_counts_sections() {
        let structure = DocumentStructure {
            has_abstract: true,
            has_references: true,
            sections: vec!["1. Introduction".to_string()],
            ..DocumentStructure::default()
        };
        assert_eq!(
            structure_summary(&structure),
            "2 of 6: abstract, references\nheaders: 1. Introduction"
        );
        assert_eq!(
            structure_summary(&DocumentStructure::error_report()),
            "0 of 6: -\nheaders: Error Report"
        );
    }

    #[test]
    fn test_truncated_pages_shown() {
        let mut metadata = DocumentMetadata::new("big.pdf", 1);
        metadata.page_count = 100;
        metadata.source_page_count = 240;
        metadata.truncated = true;
        let rows = metadata_rows(&metadata);
        assert!(rows.contains(&("Pages", "100 (truncated from 240)".to_string())));
    }

    #[test]
    fn test_preview_shortens_long_text() {
        let long = "word ".repeat(40);
        let shortened = preview(&long);
        assert!(shortened.ends_with('…'));
        assert!(shortened.chars().count() <= PREVIEW_CHARS + 1);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_check_report() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let report = formatter.check_report("a.pdf", 10, 3);
        assert!(report.contains("\"pageCount\":3"));

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.check_report("a.pdf", 10, 3),
            "✓ a.pdf (10 bytes) opens with 3 page(s)"
        );
    }

    #[test]
    fn test_no_color_when_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("careful"), "⚠ careful");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }
}
