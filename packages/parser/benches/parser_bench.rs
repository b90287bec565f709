use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gloss_parser::{parse, ParseConfig};

const LIFT: ParseConfig = ParseConfig {
    lift_inline_comments: true,
    exclude_lifted_comments: true,
};

fn parse_simple_definition(c: &mut Criterion) {
    let source = r#"
(defn add
  "Adds two numbers."
  [x y]
  (+ x y))
"#;

    c.bench_function("parse_simple_definition", |b| {
        b.iter(|| parse(black_box(source), &ParseConfig::default()))
    });
}

fn parse_commented_file(c: &mut Criterion) {
    let source = r#"
;; Geometry helpers.

;; Area of a rectangle.
(defn area
  "Width times height."
  [w h]
  ;; no validation on purpose
  (* w h))

;; Perimeter of a rectangle.
(defn perimeter
  "Twice the sum of the sides."
  [w h]
  ;; mirrors area above
  (* 2 (+ w h)))
"#;

    c.bench_function("parse_commented_file", |b| {
        b.iter(|| parse(black_box(source), &LIFT))
    });
}

fn parse_large_file(c: &mut Criterion) {
    // simulate a larger file with many documented definitions
    let mut source = String::new();

    for i in 0..100 {
        source.push_str(&format!(
            ";; Helper number {i}.\n(defn helper-{i}\n  \"Does thing {i}.\"\n  [x]\n  ;; step one\n  ;; step two\n  (+ x {i}))\n\n",
        ));
    }

    c.bench_function("parse_large_file_100_definitions", |b| {
        b.iter(|| parse(black_box(&source), &LIFT))
    });
}

fn tokenize_only(c: &mut Criterion) {
    use gloss_parser::tokenize;

    let source = r#"
(defn area
  "Width times height."
  [w h]
  ;; no validation on purpose
  (* w h))
"#;

    c.bench_function("tokenize_only", |b| {
        b.iter(|| tokenize(black_box(source)))
    });
}

criterion_group!(
    benches,
    parse_simple_definition,
    parse_commented_file,
    parse_large_file,
    tokenize_only
);
criterion_main!(benches);
