//! Docstring extraction for recognized definition shapes.
//!
//! Classification is structural: a fixed set of definition heads, each with
//! its own rule for where an attached doc string sits. Anything else is
//! displayed unchanged with no docstring.

use crate::ast::{Form, FormKind};
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::Token;
use logos::Logos;
use std::ops::Range;

/// Recognized definition shapes, each with its own docstring-position rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionShape {
    /// `defn`, `defn-`, `defmacro`: string right after the name, params follow
    Function,
    /// `def`, `defonce`: string after the name counts only when a value follows it
    Value,
    /// `ns`: string right after the namespace name
    Namespace,
    /// `defmulti`, `defprotocol`: string right after the name
    Dispatch,
}

impl DefinitionShape {
    pub fn classify(head: &str) -> Option<Self> {
        match head {
            "defn" | "defn-" | "defmacro" => Some(Self::Function),
            "def" | "defonce" => Some(Self::Value),
            "ns" => Some(Self::Namespace),
            "defmulti" | "defprotocol" => Some(Self::Dispatch),
            _ => None,
        }
    }
}

/// A form's docstring (if any) and its displayed code with the docstring
/// removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub docstring: Option<String>,
    pub code: String,
}

/// Inspect a form for an attached docstring.
///
/// Returns `UnsupportedForm` when a recognized definition head is present
/// but its docstring position cannot be navigated; callers treat that as
/// "no docstring" and never surface it.
pub fn extract(form: &Form) -> ParseResult<Extraction> {
    if form.kind != FormKind::Expression {
        return Ok(unchanged(form));
    }

    let tokens: Vec<(Token, Range<usize>)> = Token::lexer(form.raw_text.as_str())
        .spanned()
        .filter_map(|(r, s)| r.ok().map(|t| (t, s)))
        .filter(|(t, _)| !matches!(t, Token::Comment(_)))
        .collect();

    if !matches!(tokens.first(), Some((Token::LParen, _))) {
        return Ok(unchanged(form));
    }
    let Some((Token::Symbol(head), _)) = tokens.get(1) else {
        return Ok(unchanged(form));
    };
    let Some(shape) = DefinitionShape::classify(head) else {
        return Ok(unchanged(form));
    };
    let head = head.to_string();

    // locate the name, skipping metadata
    let mut k = 2;
    loop {
        match tokens.get(k) {
            Some((Token::Symbol(s), _)) if *s == "^" => {
                k = skip_form(&tokens, k + 1)
                    .ok_or_else(|| ParseError::unsupported_form("metadata with no target"))?;
            }
            Some((Token::Symbol(s), _)) if s.starts_with('^') => k += 1,
            _ => break,
        }
    }
    match tokens.get(k) {
        Some((Token::Symbol(_), _)) => k += 1,
        _ => {
            return Err(ParseError::unsupported_form(format!(
                "{} form with no name",
                head
            )))
        }
    }

    let Some((Token::Str(literal), span)) = tokens.get(k) else {
        return Ok(unchanged(form));
    };

    // for value definitions a trailing string IS the value
    if shape == DefinitionShape::Value && k + 2 >= tokens.len() {
        return Ok(unchanged(form));
    }

    let inner = &literal[1..literal.len() - 1];
    Ok(Extraction {
        docstring: Some(unescape(inner)),
        code: splice_out(&form.raw_text, span),
    })
}

fn unchanged(form: &Form) -> Extraction {
    Extraction {
        docstring: None,
        code: form.raw_text.clone(),
    }
}

/// Index just past the form starting at `start` (atom or balanced pair).
fn skip_form(tokens: &[(Token, Range<usize>)], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut j = start;
    loop {
        let (token, _) = tokens.get(j)?;
        match token {
            Token::LParen
            | Token::LBracket
            | Token::LBrace
            | Token::HashBrace
            | Token::HashParen => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth = depth.checked_sub(1)?,
            _ => {}
        }
        j += 1;
        if depth == 0 {
            return Some(j);
        }
    }
}

/// Decode the standard escapes so the docstring carries the literal's text.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Remove `span` from `raw`, dropping the line if the splice leaves it blank.
fn splice_out(raw: &str, span: &Range<usize>) -> String {
    let mut head = raw[..span.start].to_string();
    if head.ends_with(' ') && raw[span.end..].starts_with(' ') {
        head.pop();
    }
    let point = head.len();
    let mut out = head;
    out.push_str(&raw[span.end..]);

    let line_start = out[..point].rfind('\n').map(|p| p + 1).unwrap_or(0);
    let line_end = out[point..]
        .find('\n')
        .map(|p| point + p + 1)
        .unwrap_or(out.len());
    if out[line_start..line_end].trim().is_empty() {
        out.replace_range(line_start..line_end, "");
    }
    out
}
