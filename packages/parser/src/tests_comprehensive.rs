//! End-to-end behavior of the section pipeline, with emphasis on the
//! prelude merge boundary: several cases below differ from each other by
//! exactly one blank line.

use crate::ast::{ParseConfig, SectionKind};
use crate::parser::parse;

const LIFT: ParseConfig = ParseConfig {
    lift_inline_comments: true,
    exclude_lifted_comments: true,
};

const LIFT_KEEP: ParseConfig = ParseConfig {
    lift_inline_comments: true,
    exclude_lifted_comments: false,
};

#[test]
fn test_single_form_no_comments() {
    let doc = parse("(defn add [x y]\n  (+ x y))\n", &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].kind, SectionKind::Code);
    assert_eq!(doc.sections[0].docstring, None);
    assert_eq!(doc.sections[0].raw, "(defn add [x y]\n  (+ x y))");
}

#[test]
fn test_docstring_passes_through_unchanged() {
    let source = "(defn add\n  \"Adds two numbers.\"\n  [x y]\n  (+ x y))\n";
    let doc = parse(source, &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(
        doc.sections[0].docstring.as_deref(),
        Some("Adds two numbers.")
    );
    assert_eq!(doc.sections[0].raw, "(defn add\n  [x y]\n  (+ x y))");
}

#[test]
fn test_lifting_disabled_ignores_body_comments() {
    let with_comment = "(defn add [x y]\n  ;; fast path\n  (+ x y))\n";
    let without_comment = "(defn add [x y]\n  (+ x y))\n";

    let doc = parse(with_comment, &ParseConfig::default()).unwrap();
    let plain = parse(without_comment, &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), plain.sections.len());
    assert_eq!(doc.sections[0].docstring, None);
    // the comment stays in the displayed code
    assert!(doc.sections[0].raw.contains(";; fast path"));
}

#[test]
fn test_lifting_without_prelude_gets_double_blank_line() {
    let source =
        "(defn add\n  \"Adds two numbers.\"\n  [x y]\n  ;; fast path\n  (+ x y))\n";
    let doc = parse(source, &LIFT).unwrap();

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(
        doc.sections[0].docstring.as_deref(),
        Some("Adds two numbers.\n\n\nfast path")
    );
    assert_eq!(doc.sections[0].raw, "(defn add\n  [x y]\n  (+ x y))");
}

#[test]
fn test_adjacent_prelude_merges_into_definition_doc() {
    let source = "\
;; Utilities for tiny arithmetic.

;; Adds things together.
(defn add
  \"Adds two numbers.\"
  [x y]
  ;; fast path only
  (+ x y))
";
    let doc = parse(source, &LIFT).unwrap();

    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].kind, SectionKind::Comment);
    assert_eq!(
        doc.sections[0].docstring.as_deref(),
        Some("Utilities for tiny arithmetic.")
    );
    assert_eq!(doc.sections[1].kind, SectionKind::Code);
    assert_eq!(
        doc.sections[1].docstring.as_deref(),
        Some("Adds two numbers.\n\nAdds things together.\n\nfast path only")
    );
}

#[test]
fn test_separated_prelude_stays_standalone() {
    // identical to the adjacent case except for one blank line before the defn
    let source = "\
;; Utilities for tiny arithmetic.

;; Adds things together.

(defn add
  \"Adds two numbers.\"
  [x y]
  ;; fast path only
  (+ x y))
";
    let doc = parse(source, &LIFT).unwrap();

    assert_eq!(doc.sections.len(), 3);
    assert_eq!(doc.sections[1].kind, SectionKind::Comment);
    assert_eq!(
        doc.sections[1].docstring.as_deref(),
        Some("Adds things together.")
    );
    // the definition's doc no longer contains the separated block
    assert_eq!(
        doc.sections[2].docstring.as_deref(),
        Some("Adds two numbers.\n\n\nfast path only")
    );
}

#[test]
fn test_consecutive_comment_lines_form_one_paragraph() {
    let source = ";; B\n;; C\n\n(def x 1)\n";
    let doc = parse(source, &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].docstring.as_deref(), Some("B\nC"));
}

#[test]
fn test_blank_comment_line_joins_block_to_form() {
    // a bare `;;` keeps the block attached to the defn...
    let joined = ";; A\n;;\n;; B\n(defn f [] nil)\n";
    let doc = parse(joined, &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections[0].docstring.as_deref(), Some("A\n\nB"));

    // ...while a blank source line splits it off
    let split = ";; A\n\n;; B\n(defn f [] nil)\n";
    let doc = parse(split, &ParseConfig::default()).unwrap();

    assert_eq!(doc.sections.len(), 2);
    assert_eq!(doc.sections[0].docstring.as_deref(), Some("A"));
    assert_eq!(doc.sections[1].docstring.as_deref(), Some("B"));
}

#[test]
fn test_lifting_without_exclusion_keeps_comment_in_code() {
    let source = "(defn add [x y]\n  ;; fast path\n  (+ x y))\n";
    let doc = parse(source, &LIFT_KEEP).unwrap();

    assert_eq!(doc.sections[0].docstring.as_deref(), Some("fast path"));
    assert!(doc.sections[0].raw.contains(";; fast path"));
}

#[test]
fn test_parsing_is_idempotent() {
    let source = "\
;; Header block.

;; Doubles things.
(defn double
  \"Twice the input.\"
  [x]
  ;; cheap multiply
  (* 2 x))

(def origin \"0,0\")
";
    let first = parse(source, &LIFT).unwrap();
    let second = parse(source, &LIFT).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_configs_do_not_interfere() {
    let source = "(defn f [x]\n  ;; note\n  x)\n";

    let lifted = parse(source, &LIFT).unwrap();
    let plain = parse(source, &ParseConfig::default()).unwrap();
    let lifted_again = parse(source, &LIFT).unwrap();

    assert_eq!(lifted, lifted_again);
    assert_ne!(lifted, plain);
}

#[test]
fn test_realistic_file_end_to_end() {
    let source = "\
(ns demo.geometry
  \"Plane geometry helpers.\")

;; Perimeter support comes later.

;; Area of a rectangle.
(defn area
  \"Width times height.\"
  [w h]
  ;; no validation on purpose
  (* w h))

(def unit-square [1 1])
";
    let doc = parse(source, &LIFT).unwrap();

    assert_eq!(doc.sections.len(), 4);
    assert_eq!(doc.sections[0].kind, SectionKind::Code);
    assert_eq!(
        doc.sections[0].docstring.as_deref(),
        Some("Plane geometry helpers.")
    );
    assert_eq!(doc.sections[1].kind, SectionKind::Comment);
    assert_eq!(
        doc.sections[2].docstring.as_deref(),
        Some("Width times height.\n\nArea of a rectangle.\n\nno validation on purpose")
    );
    assert!(!doc.sections[2].raw.contains(";;"));
    assert_eq!(doc.sections[3].kind, SectionKind::Code);
    assert_eq!(doc.sections[3].docstring, None);
}
