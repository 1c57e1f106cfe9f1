//! Heuristic section tagging and header detection

use folio_domain::DocumentStructure;

const ABSTRACT_TERMS: &[&str] = &["abstract", "summary"];
const INTRODUCTION_TERMS: &[&str] = &["introduction", "background"];
const METHODOLOGY_TERMS: &[&str] = &["method", "approach", "procedure"];
const RESULTS_TERMS: &[&str] = &["results", "findings", "outcomes"];
const CONCLUSION_TERMS: &[&str] = &["conclusion", "discussion"];
const REFERENCES_TERMS: &[&str] = &["references", "bibliography"];

/// Classifies normalized text into a [`DocumentStructure`]
#[derive(Debug, Clone, Copy)]
pub struct StructureAnalyzer {
    scan_lines: usize,
    max_sections: usize,
}

impl Default for StructureAnalyzer {
    fn default() -> Self {
        Self::new(50, 15)
    }
}

impl StructureAnalyzer {
    /// Create an analyzer scanning `scan_lines` lines for at most `max_sections` headers
    pub fn new(scan_lines: usize, max_sections: usize) -> Self {
        Self {
            scan_lines,
            max_sections,
        }
    }

    /// Analyze normalized document text
    pub fn analyze(&self, text: &str) -> DocumentStructure {
        let lower = text.to_lowercase();
        let contains_any = |terms: &[&str]| terms.iter().any(|term| lower.contains(term));

        DocumentStructure {
            has_abstract: contains_any(ABSTRACT_TERMS),
            has_introduction: contains_any(INTRODUCTION_TERMS),
            has_methodology: contains_any(METHODOLOGY_TERMS),
            has_results: contains_any(RESULTS_TERMS),
            has_conclusion: contains_any(CONCLUSION_TERMS),
            has_references: contains_any(REFERENCES_TERMS),
            sections: self.section_candidates(text),
        }
    }

    /// Header-shaped lines among the first `scan_lines` lines
    pub fn section_candidates(&self, text: &str) -> Vec<String> {
        let mut sections: Vec<String> = Vec::new();

        for line in text.lines().take(self.scan_lines) {
            if sections.len() >= self.max_sections {
                break;
            }
            let line = line.trim();
            if is_header_shaped(line) && !sections.iter().any(|s| s == line) {
                sections.push(line.to_string());
            }
        }

        sections
    }
}

fn is_header_shaped(line: &str) -> bool {
    let len = line.chars().count();
    len > 3
        && len < 100
        && line.chars().next().is_some_and(char::is_uppercase)
        && !line.contains('.')
}
