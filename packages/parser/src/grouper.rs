//! Paragraph grouping: re-flows comment text into paragraphs and merges a
//! form's documentation pieces in their fixed order.

use crate::ast::DocContent;
use crate::lifter::LiftedFragment;

/// Split a comment block (markers already stripped) into paragraphs.
///
/// Runs of non-blank lines join with a single newline; blank lines
/// separate paragraphs and are dropped.
pub fn block_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Group lifted fragments into paragraphs.
///
/// Consecutive same-depth fragments on adjacent lines merge; a depth
/// change, a line gap (intervening code), or a blank fragment starts a
/// new paragraph.
pub fn fragment_paragraphs(fragments: &[LiftedFragment]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut previous: Option<&LiftedFragment> = None;

    for fragment in fragments {
        if fragment.text.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
            previous = Some(fragment);
            continue;
        }

        if let Some(prev) = previous {
            if (prev.depth != fragment.depth || fragment.line > prev.line + 1)
                && !current.is_empty()
            {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        }

        current.push(&fragment.text);
        previous = Some(fragment);
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

/// Merge a form's documentation pieces into the final docstring text.
///
/// Fixed order: attached docstring, prelude paragraphs, lifted paragraphs,
/// blank-line separated. A docstring directly followed by lifted text (no
/// prelude in between) gets a double blank line instead.
pub fn merge_doc(content: &DocContent) -> Option<String> {
    let mut out = String::new();

    if let Some(docstring) = &content.docstring {
        out.push_str(docstring);
    }

    if !content.prelude_paragraphs.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&content.prelude_paragraphs.join("\n\n"));
    }

    if !content.lifted_paragraphs.is_empty() {
        if !out.is_empty() {
            if content.prelude_paragraphs.is_empty() && content.docstring.is_some() {
                out.push_str("\n\n\n");
            } else {
                out.push_str("\n\n");
            }
        }
        out.push_str(&content.lifted_paragraphs.join("\n\n"));
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, depth: usize, line: usize) -> LiftedFragment {
        LiftedFragment {
            text: text.to_string(),
            depth,
            line,
        }
    }

    #[test]
    fn test_adjacent_lines_merge_into_one_paragraph() {
        assert_eq!(block_paragraphs("B\nC"), vec!["B\nC"]);
    }

    #[test]
    fn test_blank_line_starts_a_new_paragraph() {
        assert_eq!(block_paragraphs("B\n\nC"), vec!["B", "C"]);
    }

    #[test]
    fn test_fragments_merge_when_adjacent_and_same_depth() {
        let fragments = [fragment("a", 1, 2), fragment("b", 1, 3)];

        assert_eq!(fragment_paragraphs(&fragments), vec!["a\nb"]);
    }

    #[test]
    fn test_line_gap_splits_fragments() {
        let fragments = [fragment("a", 1, 2), fragment("b", 1, 5)];

        assert_eq!(fragment_paragraphs(&fragments), vec!["a", "b"]);
    }

    #[test]
    fn test_depth_change_splits_fragments() {
        let fragments = [fragment("a", 1, 2), fragment("b", 2, 3)];

        assert_eq!(fragment_paragraphs(&fragments), vec!["a", "b"]);
    }

    #[test]
    fn test_blank_fragment_separates_paragraphs() {
        let fragments = [fragment("a", 1, 2), fragment("", 1, 3), fragment("b", 1, 4)];

        assert_eq!(fragment_paragraphs(&fragments), vec!["a", "b"]);
    }

    #[test]
    fn test_merge_order_doc_prelude_lifted() {
        let content = DocContent {
            docstring: Some("doc".to_string()),
            prelude_paragraphs: vec!["A".to_string()],
            lifted_paragraphs: vec!["B".to_string()],
        };

        assert_eq!(merge_doc(&content).unwrap(), "doc\n\nA\n\nB");
    }

    #[test]
    fn test_merge_without_prelude_uses_double_blank_line() {
        let content = DocContent {
            docstring: Some("doc".to_string()),
            prelude_paragraphs: Vec::new(),
            lifted_paragraphs: vec!["B".to_string()],
        };

        assert_eq!(merge_doc(&content).unwrap(), "doc\n\n\nB");
    }

    #[test]
    fn test_merge_prelude_only() {
        let content = DocContent {
            docstring: None,
            prelude_paragraphs: vec!["A".to_string(), "B".to_string()],
            lifted_paragraphs: Vec::new(),
        };

        assert_eq!(merge_doc(&content).unwrap(), "A\n\nB");
    }

    #[test]
    fn test_merge_empty_is_none() {
        assert_eq!(merge_doc(&DocContent::default()), None);
    }
}
