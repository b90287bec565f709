//! Form reader: groups tokens into top-level forms.
//!
//! A maximal run of consecutive comment lines collapses into one comment
//! form; everything else becomes an expression form spanning its balanced
//! delimiters. No recovery: the first syntax error aborts the whole file.

use crate::ast::{Form, FormKind};
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{LineIndex, Token};
use logos::Logos;
use std::ops::Range;

/// Read source text into an ordered list of top-level forms.
pub fn read_forms(source: &str) -> ParseResult<Vec<Form>> {
    let index = LineIndex::new(source);
    let tokens: Vec<(Result<Token, ()>, Range<usize>)> =
        Token::lexer(source).spanned().collect();

    let mut forms = Vec::new();
    // reader-macro sigils (quote, deref, discard) glue onto the next form
    let mut pending: Option<Range<usize>> = None;
    let mut i = 0;

    while i < tokens.len() {
        let (result, span) = &tokens[i];
        let token = match result {
            Ok(t) => t.clone(),
            Err(()) => return Err(lex_error(source, span.start, &index)),
        };

        match token {
            Token::Comment(text) => {
                if let Some(range) = pending.take() {
                    forms.push(atom_form(source, range, &index));
                }

                let start_line = index.line(span.start);
                let mut end_line = start_line;
                let mut lines = vec![strip_marker(text)];

                while i + 1 < tokens.len() {
                    match &tokens[i + 1] {
                        (Ok(Token::Comment(next)), next_span)
                            if index.line(next_span.start) == end_line + 1 =>
                        {
                            lines.push(strip_marker(next));
                            end_line += 1;
                            i += 1;
                        }
                        _ => break,
                    }
                }

                forms.push(Form {
                    kind: FormKind::Comment,
                    raw_text: lines.join("\n"),
                    start_line,
                    end_line,
                });
            }

            Token::LParen
            | Token::LBracket
            | Token::LBrace
            | Token::HashBrace
            | Token::HashParen => {
                let start = pending.take().map(|r| r.start).unwrap_or(span.start);
                let (form, next) = read_expression(source, &tokens, i, start, &index)?;
                forms.push(form);
                i = next;
                continue;
            }

            Token::RParen | Token::RBracket | Token::RBrace => {
                return Err(ParseError::unmatched_delimiter(
                    index.line(span.start),
                    span.start,
                    closer_char(&token),
                ));
            }

            Token::Symbol(s) if is_reader_prefix(s) => {
                let start = pending.take().map(|r| r.start).unwrap_or(span.start);
                pending = Some(start..span.end);
            }

            Token::Symbol(_) | Token::Str(_) | Token::Regex(_) | Token::Character(_) => {
                let start = pending.take().map(|r| r.start).unwrap_or(span.start);
                forms.push(atom_form(source, start..span.end, &index));
            }
        }

        i += 1;
    }

    if let Some(range) = pending.take() {
        forms.push(atom_form(source, range, &index));
    }

    Ok(forms)
}

fn read_expression(
    source: &str,
    tokens: &[(Result<Token, ()>, Range<usize>)],
    open_index: usize,
    start_offset: usize,
    index: &LineIndex,
) -> ParseResult<(Form, usize)> {
    // stack of (expected closer, opener offset)
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut j = open_index;

    while j < tokens.len() {
        let (result, span) = &tokens[j];
        let token = match result {
            Ok(t) => t,
            Err(()) => return Err(lex_error(source, span.start, index)),
        };

        match token {
            Token::LParen | Token::HashParen => stack.push((')', span.start)),
            Token::LBracket => stack.push((']', span.start)),
            Token::LBrace | Token::HashBrace => stack.push(('}', span.start)),

            Token::RParen | Token::RBracket | Token::RBrace => {
                let found = closer_char(token);
                let line = index.line(span.start);
                let Some((expected, _)) = stack.pop() else {
                    return Err(ParseError::unmatched_delimiter(line, span.start, found));
                };
                if found != expected {
                    return Err(ParseError::mismatched_delimiter(
                        line, span.start, expected, found,
                    ));
                }
                if stack.is_empty() {
                    let form = Form {
                        kind: FormKind::Expression,
                        raw_text: source[start_offset..span.end].to_string(),
                        start_line: index.line(start_offset),
                        end_line: index.line(span.start),
                    };
                    return Ok((form, j + 1));
                }
            }

            _ => {}
        }

        j += 1;
    }

    // ran out of input with open delimiters; report the innermost one
    let (expected, open_pos) = stack.last().copied().unwrap_or((')', start_offset));
    Err(ParseError::unclosed_delimiter(
        index.line(open_pos),
        open_pos,
        opener_char(expected),
    ))
}

fn atom_form(source: &str, range: Range<usize>, index: &LineIndex) -> Form {
    let start_line = index.line(range.start);
    let end_line = index.line(range.end.saturating_sub(1)).max(start_line);
    Form {
        kind: FormKind::Expression,
        raw_text: source[range].to_string(),
        start_line,
        end_line,
    }
}

fn lex_error(source: &str, pos: usize, index: &LineIndex) -> ParseError {
    let line = index.line(pos);
    let rest = &source[pos..];
    if rest.starts_with('"') || rest.starts_with("#\"") {
        ParseError::unterminated_string(line, pos)
    } else {
        ParseError::invalid_token(line, pos)
    }
}

/// Strip the leading `;`+ marker and at most one following space.
pub(crate) fn strip_marker(line: &str) -> String {
    let stripped = line.trim_start_matches(';');
    stripped.strip_prefix(' ').unwrap_or(stripped).to_string()
}

fn closer_char(token: &Token) -> char {
    match token {
        Token::RParen => ')',
        Token::RBracket => ']',
        _ => '}',
    }
}

fn opener_char(closer: char) -> char {
    match closer {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

fn is_reader_prefix(symbol: &str) -> bool {
    matches!(symbol, "'" | "`" | "~" | "~@" | "@" | "#" | "#'" | "#_" | "^")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_form() {
        let forms = read_forms("(defn add [x y]\n  (+ x y))\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].kind, FormKind::Expression);
        assert_eq!(forms[0].raw_text, "(defn add [x y]\n  (+ x y))");
        assert_eq!(forms[0].start_line, 1);
        assert_eq!(forms[0].end_line, 2);
    }

    #[test]
    fn test_comment_run_collapses() {
        let forms = read_forms(";; first\n;; second\n(def x 1)\n").unwrap();

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].kind, FormKind::Comment);
        assert_eq!(forms[0].raw_text, "first\nsecond");
        assert_eq!(forms[0].start_line, 1);
        assert_eq!(forms[0].end_line, 2);
        assert_eq!(forms[1].start_line, 3);
    }

    #[test]
    fn test_blank_source_line_splits_comment_runs() {
        let forms = read_forms(";; first\n\n;; second\n").unwrap();

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].raw_text, "first");
        assert_eq!(forms[1].raw_text, "second");
    }

    #[test]
    fn test_blank_comment_line_stays_in_run() {
        let forms = read_forms(";; first\n;;\n;; second\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].raw_text, "first\n\nsecond");
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let forms = read_forms("(def greeting \"hello ;; not a comment\")\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].kind, FormKind::Expression);
    }

    #[test]
    fn test_character_literal_paren_does_not_close() {
        let forms = read_forms("(str \\) \\()\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].raw_text, "(str \\) \\()");
    }

    #[test]
    fn test_quoted_list_is_one_form() {
        let forms = read_forms("'(a b c)\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].raw_text, "'(a b c)");
    }

    #[test]
    fn test_top_level_atom() {
        let forms = read_forms(":keyword\n").unwrap();

        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].kind, FormKind::Expression);
        assert_eq!(forms[0].raw_text, ":keyword");
    }

    #[test]
    fn test_set_and_anon_fn_openers() {
        let forms = read_forms("#{1 2 3}\n#(inc %)\n").unwrap();

        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].raw_text, "#{1 2 3}");
        assert_eq!(forms[1].raw_text, "#(inc %)");
    }

    #[test]
    fn test_unterminated_string_reports_line() {
        let err = read_forms("(def x 1)\n(def y \"oops\n").unwrap_err();

        assert_eq!(err, ParseError::unterminated_string(2, 17));
    }

    #[test]
    fn test_unclosed_delimiter_reports_opening_line() {
        let err = read_forms("(defn f [x]\n  (g x)\n").unwrap_err();

        assert!(matches!(
            err,
            ParseError::UnclosedDelimiter {
                line: 1,
                delimiter: '(',
                ..
            }
        ));
    }

    #[test]
    fn test_mismatched_delimiter() {
        let err = read_forms("(def x [1 2)]\n").unwrap_err();

        assert!(matches!(
            err,
            ParseError::MismatchedDelimiter {
                expected: ']',
                found: ')',
                ..
            }
        ));
    }

    #[test]
    fn test_stray_closer() {
        let err = read_forms(")\n").unwrap_err();

        assert!(matches!(
            err,
            ParseError::UnmatchedDelimiter { line: 1, found: ')', .. }
        ));
    }
}
