//! Regex-driven bibliographic heuristics
//!
//! Every heuristic is independent and total: "nothing found" is `None` or an
//! empty vector, never an error.

use folio_domain::MetadataHeuristics;
use regex::Regex;
use std::sync::LazyLock;

const TITLE_SCAN_LINES: usize = 5;
const MAX_ABSTRACT_CHARS: usize = 1000;
const MAX_AUTHORS: usize = 10;
const MAX_KEYWORDS: usize = 10;

/// "Author(s): ..." or "By ..." up to the end of the line
static AUTHOR_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)\b(?:authors?|by)\b[ \t]*:?[ \t]*([^\n]+)").expect("valid author label regex")
});

/// Line-start run of capitalized first/last name pairs
static AUTHOR_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Z][a-z]+ [A-Z][a-z]+(?:,[ \t]*[A-Z][a-z]+ [A-Z][a-z]+)*)")
        .expect("valid author names regex")
});

static ABSTRACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)abstract[\s:.\-]*(.*?)(?:\n[ \t]*\n|introduction|keywords|\b1\.|\z)")
        .expect("valid abstract regex")
});

static KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)keywords[\s:.\-]*(.*?)(?:\n[ \t]*\n|introduction|abstract|\z)")
        .expect("valid keywords regex")
});

/// Default [`MetadataHeuristics`] built on regular expressions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexHeuristics;

impl RegexHeuristics {
    /// Create the heuristics
    pub fn new() -> Self {
        Self
    }
}

impl MetadataHeuristics for RegexHeuristics {
    fn title(&self, text: &str) -> Option<String> {
        text.lines()
            .take(TITLE_SCAN_LINES)
            .map(str::trim)
            .find(|line| is_title_shaped(line))
            .map(str::to_string)
    }

    fn authors(&self, text: &str) -> Vec<String> {
        for pattern in [&*AUTHOR_LABEL, &*AUTHOR_NAMES] {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let names = split_bounded(&captures[1], &[','], 3, 50, MAX_AUTHORS);
            if !names.is_empty() {
                return names;
            }
        }
        Vec::new()
    }

    fn abstract_text(&self, text: &str) -> Option<String> {
        let captures = ABSTRACT.captures(text)?;
        let body = captures[1].trim();
        if body.is_empty() {
            return None;
        }
        Some(body.chars().take(MAX_ABSTRACT_CHARS).collect())
    }

    fn keywords(&self, text: &str) -> Vec<String> {
        KEYWORDS
            .captures(text)
            .map(|captures| split_bounded(&captures[1], &[',', ';'], 2, 50, MAX_KEYWORDS))
            .unwrap_or_default()
    }
}

fn is_title_shaped(line: &str) -> bool {
    let len = line.chars().count();
    len > 10
        && len < 200
        && !line.ends_with('.')
        && line.chars().next().is_some_and(char::is_uppercase)
        && !line.to_lowercase().contains("abstract")
}

/// Split on `separators`, trim, keep entries whose char length is strictly
/// between `min` and `max`, and cap the count
fn split_bounded(raw: &str, separators: &[char], min: usize, max: usize, cap: usize) -> Vec<String> {
    raw.split(separators)
        .map(str::trim)
        .filter(|entry| {
            let len = entry.chars().count();
            len > min && len < max
        })
        .take(cap)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: &str = "Sparse Attention for Long Documents\n\
        Authors: Ada Lovelace, Alan Turing, Al\n\
        \n\
        Abstract: We propose a sparse attention scheme. It scales linearly.\n\
        Keywords: attention; sparsity, transformers, ab\n\
        \n\
        Introduction\n\
        Long documents are common.";

    #[test]
    fn test_title_from_first_lines() {
        assert_eq!(
            RegexHeuristics.title(PAPER),
            Some("Sparse Attention for Long Documents".to_string())
        );
    }

    #[test]
    fn test_title_none_when_no_line_fits() {
        let text = "all lowercase heading here\nEnds with a period here.\nShort\nabstract only\nanother lowercase line";
        assert_eq!(RegexHeuristics.title(text), None);
    }

    #[test]
    fn test_title_skips_abstract_lines() {
        let text = "Abstract of the Proposal\nA Study of Things in Places";
        assert_eq!(
            RegexHeuristics.title(text),
            Some("A Study of Things in Places".to_string())
        );
    }

    #[test]
    fn test_title_only_scans_five_lines() {
        let text = "a\nb\nc\nd\ne\nA Perfectly Good Title";
        assert_eq!(RegexHeuristics.title(text), None);
    }

    #[test]
    fn test_authors_from_label() {
        assert_eq!(
            RegexHeuristics.authors(PAPER),
            vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()]
        );
    }

    #[test]
    fn test_authors_from_name_run() {
        let text = "some preamble\nGrace Hopper, Edsger Dijkstra\nmore text";
        assert_eq!(
            RegexHeuristics.authors(text),
            vec!["Grace Hopper".to_string(), "Edsger Dijkstra".to_string()]
        );
    }

    #[test]
    fn test_authors_falls_through_empty_label_match() {
        // The label pattern matches but yields only too-short entries
        let text = "By: A, B\nGrace Hopper";
        assert_eq!(RegexHeuristics.authors(text), vec!["Grace Hopper".to_string()]);
    }

    #[test]
    fn test_authors_capped_at_ten() {
        let names: Vec<String> = (0..15).map(|i| format!("Person Number{}", i)).collect();
        let text = format!("Authors: {}", names.join(", "));
        assert_eq!(RegexHeuristics.authors(&text).len(), 10);
    }

    #[test]
    fn test_authors_empty_without_patterns() {
        assert!(RegexHeuristics.authors("nothing to see here").is_empty());
    }

    #[test]
    fn test_abstract_stops_at_keywords() {
        assert_eq!(
            RegexHeuristics.abstract_text(PAPER),
            Some("We propose a sparse attention scheme. It scales linearly.".to_string())
        );
    }

    #[test]
    fn test_abstract_stops_at_blank_line() {
        let text = "ABSTRACT\nFirst part\nsecond part\n\nBody";
        assert_eq!(
            RegexHeuristics.abstract_text(text),
            Some("First part\nsecond part".to_string())
        );
    }

    #[test]
    fn test_abstract_truncated() {
        let text = format!("Abstract {}", "x".repeat(1500));
        let abstract_text = RegexHeuristics.abstract_text(&text).unwrap();
        assert_eq!(abstract_text.chars().count(), 1000);
    }

    #[test]
    fn test_abstract_none_without_marker() {
        assert_eq!(RegexHeuristics.abstract_text("Just a body of text"), None);
    }

    #[test]
    fn test_keywords_split_and_filtered() {
        assert_eq!(
            RegexHeuristics.keywords(PAPER),
            vec![
                "attention".to_string(),
                "sparsity".to_string(),
                "transformers".to_string()
            ]
        );
    }

    #[test]
    fn test_keywords_empty_without_marker() {
        assert!(RegexHeuristics.keywords("Abstract: nothing else").is_empty());
    }
}
