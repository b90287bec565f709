//! Lifts whole-line comments out of a form body into documentation
//! fragments, optionally stripping them from the displayed code.

use crate::ast::ParseConfig;
use crate::reader::strip_marker;
use crate::tokenizer::{LineIndex, Token};
use logos::Logos;

/// One comment found inside a form body, tagged with its nesting depth
/// and form-relative line (both used for paragraph grouping).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftedFragment {
    pub text: String,
    pub depth: usize,
    pub line: usize,
}

/// Result of scanning one form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lift {
    pub fragments: Vec<LiftedFragment>,
    pub code: String,
}

/// Scan a form's displayed code (docstring already removed) for embedded
/// comments. Comments trailing code on the same line are left alone.
///
/// With `exclude_lifted_comments` set, the returned code is byte-for-byte
/// the input minus the lifted comment lines.
pub fn lift(code: &str, config: &ParseConfig) -> Lift {
    if !config.lift_inline_comments {
        return Lift {
            fragments: Vec::new(),
            code: code.to_string(),
        };
    }

    let index = LineIndex::new(code);
    let mut fragments = Vec::new();
    let mut lifted_lines = Vec::new();
    let mut depth = 0usize;

    for (result, span) in Token::lexer(code).spanned() {
        // the reader already validated this text
        let Ok(token) = result else { continue };

        match token {
            Token::LParen
            | Token::LBracket
            | Token::LBrace
            | Token::HashBrace
            | Token::HashParen => depth += 1,

            Token::RParen | Token::RBracket | Token::RBrace => {
                depth = depth.saturating_sub(1);
            }

            Token::Comment(text) => {
                let line = index.line(span.start);
                let prefix = &code[index.line_start(line)..span.start];
                if prefix.chars().all(|c| c.is_whitespace() || c == ',') {
                    fragments.push(LiftedFragment {
                        text: strip_marker(text),
                        depth,
                        line,
                    });
                    lifted_lines.push(line);
                }
            }

            _ => {}
        }
    }

    let code = if config.exclude_lifted_comments && !lifted_lines.is_empty() {
        let mut out = String::with_capacity(code.len());
        for line in 1..=index.line_count() {
            if !lifted_lines.contains(&line) {
                out.push_str(&code[index.line_start(line)..index.line_end(line, code.len())]);
            }
        }
        out
    } else {
        code.to_string()
    };

    Lift { fragments, code }
}
