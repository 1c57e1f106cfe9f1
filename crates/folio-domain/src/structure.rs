//! Structural profile of a document

use serde::{Deserialize, Serialize};

/// Section label used by fallback results
pub const ERROR_REPORT_SECTION: &str = "Error Report";

/// Heuristic presence flags for canonical academic-paper sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStructure {
    /// "abstract" or "summary" appears
    pub has_abstract: bool,
    /// "introduction" or "background" appears
    pub has_introduction: bool,
    /// "method", "approach" or "procedure" appears
    pub has_methodology: bool,
    /// "results", "findings" or "outcomes" appears
    pub has_results: bool,
    /// "conclusion" or "discussion" appears
    pub has_conclusion: bool,
    /// "references" or "bibliography" appears
    pub has_references: bool,
    /// Section header candidates in order of first appearance
    pub sections: Vec<String>,
}

impl DocumentStructure {
    /// Structure of a fallback result: no flags, one "Error Report" section
    pub fn error_report() -> Self {
        Self {
            sections: vec![ERROR_REPORT_SECTION.to_string()],
            ..Self::default()
        }
    }

    /// Number of section flags that are set
    pub fn detected_section_count(&self) -> usize {
        [
            self.has_abstract,
            self.has_introduction,
            self.has_methodology,
            self.has_results,
            self.has_conclusion,
            self.has_references,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_structure() {
        let structure = DocumentStructure::error_report();
        assert_eq!(structure.sections, vec!["Error Report".to_string()]);
        assert_eq!(structure.detected_section_count(), 0);
    }

    #[test]
    fn test_detected_section_count() {
        let structure = DocumentStructure {
            has_abstract: true,
            has_references: true,
            ..DocumentStructure::default()
        };
        assert_eq!(structure.detected_section_count(), 2);
    }
}
