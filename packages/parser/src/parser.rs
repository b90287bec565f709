//! Section assembler: walks the form list in source order with one-form
//! lookahead. A comment form is only resolved (prelude vs standalone) once
//! the next form's adjacency is known.

use crate::ast::{DocContent, Document, Form, FormKind, ParseConfig, Section, SectionKind};
use crate::docstring::{self, Extraction};
use crate::error::{ParseError, ParseResult};
use crate::grouper::{block_paragraphs, fragment_paragraphs, merge_doc};
use crate::lifter;
use crate::reader::read_forms;

/// Parse one compilation unit into its ordered section list.
pub fn parse(source: &str, config: &ParseConfig) -> ParseResult<Document> {
    let forms = read_forms(source)?;
    let mut sections = Vec::with_capacity(forms.len());
    let mut prelude: Option<Form> = None;

    let mut iter = forms.into_iter().peekable();
    while let Some(form) = iter.next() {
        match form.kind {
            FormKind::Comment => {
                let merges = matches!(
                    iter.peek(),
                    Some(next) if next.kind == FormKind::Expression
                        && next.start_line == form.end_line + 1
                );
                if merges {
                    prelude = Some(form);
                } else {
                    let paragraphs = block_paragraphs(&form.raw_text);
                    sections.push(Section {
                        kind: SectionKind::Comment,
                        raw: String::new(),
                        docstring: Some(paragraphs.join("\n\n")),
                    });
                }
            }

            FormKind::Expression => {
                let extraction = match docstring::extract(&form) {
                    Ok(extraction) => extraction,
                    // graceful degradation: no docstring, code unchanged
                    Err(ParseError::UnsupportedForm { .. }) => Extraction {
                        docstring: None,
                        code: form.raw_text.clone(),
                    },
                    Err(other) => return Err(other),
                };

                let lift = lifter::lift(&extraction.code, config);

                let content = DocContent {
                    docstring: extraction.docstring,
                    prelude_paragraphs: prelude
                        .take()
                        .map(|p| block_paragraphs(&p.raw_text))
                        .unwrap_or_default(),
                    lifted_paragraphs: fragment_paragraphs(&lift.fragments),
                };

                sections.push(Section {
                    kind: SectionKind::Code,
                    raw: lift.code,
                    docstring: merge_doc(&content),
                });
            }
        }
    }

    Ok(Document { sections })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_preserve_source_order() {
        let source = ";; standalone header\n\n(def a 1)\n\n(def b 2)\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].kind, SectionKind::Comment);
        assert_eq!(doc.sections[1].raw, "(def a 1)");
        assert_eq!(doc.sections[2].raw, "(def b 2)");
    }

    #[test]
    fn test_standalone_comment_section() {
        let source = ";; just a note\n\n(def x 1)\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(doc.sections[0].kind, SectionKind::Comment);
        assert_eq!(doc.sections[0].raw, "");
        assert_eq!(doc.sections[0].docstring.as_deref(), Some("just a note"));
    }

    #[test]
    fn test_adjacent_comment_becomes_prelude() {
        let source = ";; doubles the input\n(defn double [x] (* 2 x))\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].kind, SectionKind::Code);
        assert_eq!(
            doc.sections[0].docstring.as_deref(),
            Some("doubles the input")
        );
    }

    #[test]
    fn test_trailing_comment_at_eof_is_standalone() {
        let source = "(def x 1)\n\n;; the end\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[1].kind, SectionKind::Comment);
        assert_eq!(doc.sections[1].docstring.as_deref(), Some("the end"));
    }

    #[test]
    fn test_unsupported_definition_degrades_silently() {
        let source = "(defn)\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].docstring, None);
        assert_eq!(doc.sections[0].raw, "(defn)");
    }

    #[test]
    fn test_document_serializes_for_renderers() {
        let source = "(defn add \"Adds.\" [x y] (+ x y))\n";
        let doc = parse(source, &ParseConfig::default()).unwrap();
        let json = serde_json::to_string(&doc).unwrap();

        assert!(json.contains("\"Code\""));
        assert!(json.contains("Adds."));
    }
}
