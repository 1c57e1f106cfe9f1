//! Full-text normalization
//!
//! Runs of horizontal whitespace collapse to one space, lines that hold only
//! digits (page-number artifacts) are removed, runs of blank lines collapse
//! to a single blank line, and the result is trimmed. Normalizing normalized
//! text is a no-op.

/// Normalize concatenated document text
pub fn normalize_text(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut pending_blank = false;

    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            // Leading blanks are dropped outright
            pending_blank = !lines.is_empty();
            continue;
        }
        if is_page_number_line(&collapsed) {
            continue;
        }
        if pending_blank {
            lines.push(String::new());
            pending_blank = false;
        }
        lines.push(collapsed);
    }

    lines.join("\n")
}

fn is_page_number_line(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

/// Join page fragments into one line of page text
///
/// Fragments without visible content are dropped, whitespace runs collapse
/// to single spaces and the result is trimmed.
pub fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .flat_map(|fragment| fragment.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_horizontal_whitespace() {
        assert_eq!(normalize_text("a  \t b\u{a0}c"), "a b c");
    }

    #[test]
    fn test_removes_page_number_lines() {
        let text = "Introduction\n12\nBody text\n  7  \nMore";
        assert_eq!(normalize_text(text), "Introduction\nBody text\nMore");
    }

    #[test]
    fn test_collapses_blank_line_runs() {
        let text = "\n\nFirst\n\n\n   \nSecond\n\n";
        assert_eq!(normalize_text(text), "First\n\nSecond");
    }

    #[test]
    fn test_page_number_between_blank_lines() {
        assert_eq!(normalize_text("a\n\n3\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_keeps_numbered_headings() {
        assert_eq!(normalize_text("1. Introduction\n2 Methods"), "1. Introduction\n2 Methods");
    }

    #[test]
    fn test_handles_crlf() {
        assert_eq!(normalize_text("a\r\n\r\nb\r\n"), "a\n\nb");
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t\n "), "");
    }

    #[test]
    fn test_join_fragments_drops_blank_fragments() {
        let fragments = vec!["  Deep ", "", "   ", "learning\tfor", "graphs  "];
        assert_eq!(join_fragments(&fragments), "Deep learning for graphs");
    }

    #[test]
    fn test_join_fragments_empty() {
        let fragments: Vec<String> = Vec::new();
        assert_eq!(join_fragments(&fragments), "");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in "[ a-zA-Z0-9.\t\r\n\u{a0}]{0,200}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn prop_normalize_preserves_non_numeric_words(s in "[ a-z\n]{0,120}") {
            let normalized = normalize_text(&s);
            prop_assert_eq!(
                normalized.split_whitespace().collect::<Vec<_>>(),
                s.split_whitespace().collect::<Vec<_>>()
            );
        }
    }
}
