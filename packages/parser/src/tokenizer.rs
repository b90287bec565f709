//! Lexer for Clojure-style Lisp source using logos
//!
//! The token set is deliberately coarse: the parser only needs delimiter
//! structure, comments, and the literal syntaxes whose bodies could be
//! mistaken for them. Everything else folds into `Symbol`.

use logos::Logos;

/// Token types for the documented dialect
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n,]+")]
pub enum Token<'src> {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// `#{` set literal, closed by `}`
    #[token("#{")]
    HashBrace,

    /// `#(` anonymous fn literal, closed by `)`
    #[token("#(")]
    HashParen,

    // String literals. `\"` does not terminate; newlines are allowed inside.
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    Str(&'src str),

    // Regex literals share the string escape rule
    #[regex(r##"#"([^"\\]|\\.)*""##, |lex| lex.slice())]
    Regex(&'src str),

    // Character literals: `\(`, `\;`, `\"` are characters, not structure
    #[regex(r"\\(newline|space|tab|formfeed|backspace|return|u[0-9a-fA-F]{4}|o[0-7]{1,3}|.)", |lex| lex.slice())]
    Character(&'src str),

    // Line comment, marker included, up to (not including) the newline
    #[regex(r";[^\n]*", |lex| lex.slice())]
    Comment(&'src str),

    // Symbols, keywords, numbers, and sigil-prefixed atoms
    #[regex(r#"[^\s()\[\]{}",;\\]+"#, |lex| lex.slice())]
    Symbol(&'src str),
}

/// Tokenize a source string into spanned tokens.
///
/// Lex failures are preserved as `Err` entries so callers can report
/// unterminated literals instead of silently dropping them.
pub fn tokenize(source: &str) -> Vec<(Result<Token<'_>, ()>, std::ops::Range<usize>)> {
    Token::lexer(source).spanned().collect()
}

/// Byte-offset to 1-based line number lookup table.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self { starts }
    }

    /// Line containing the byte at `offset` (1-based).
    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }

    /// Byte offset where `line` starts.
    pub fn line_start(&self, line: usize) -> usize {
        self.starts[line - 1]
    }

    /// Byte offset just past `line`, including its newline if present.
    pub fn line_end(&self, line: usize, source_len: usize) -> usize {
        self.starts.get(line).copied().unwrap_or(source_len)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
