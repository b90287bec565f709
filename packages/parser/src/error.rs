use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unterminated string literal at line {line}")]
    UnterminatedString { line: usize, pos: usize },

    #[error("Invalid token at line {line}")]
    InvalidToken { line: usize, pos: usize },

    #[error("Unmatched '{found}' at line {line}")]
    UnmatchedDelimiter { line: usize, pos: usize, found: char },

    #[error("Mismatched delimiter at line {line}: expected '{expected}', found '{found}'")]
    MismatchedDelimiter {
        line: usize,
        pos: usize,
        expected: char,
        found: char,
    },

    #[error("Unclosed '{delimiter}' opened at line {line}")]
    UnclosedDelimiter {
        line: usize,
        pos: usize,
        delimiter: char,
    },

    /// A definition whose docstring position cannot be determined.
    /// Non-fatal: callers fall back to no docstring and never surface it.
    #[error("Unsupported form: {message}")]
    UnsupportedForm { message: String },
}

impl ParseError {
    pub fn unterminated_string(line: usize, pos: usize) -> Self {
        Self::UnterminatedString { line, pos }
    }

    pub fn invalid_token(line: usize, pos: usize) -> Self {
        Self::InvalidToken { line, pos }
    }

    pub fn unmatched_delimiter(line: usize, pos: usize, found: char) -> Self {
        Self::UnmatchedDelimiter { line, pos, found }
    }

    pub fn mismatched_delimiter(line: usize, pos: usize, expected: char, found: char) -> Self {
        Self::MismatchedDelimiter {
            line,
            pos,
            expected,
            found,
        }
    }

    pub fn unclosed_delimiter(line: usize, pos: usize, delimiter: char) -> Self {
        Self::UnclosedDelimiter {
            line,
            pos,
            delimiter,
        }
    }

    pub fn unsupported_form(message: impl Into<String>) -> Self {
        Self::UnsupportedForm {
            message: message.into(),
        }
    }

    /// Line the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString { line, .. }
            | Self::InvalidToken { line, .. }
            | Self::UnmatchedDelimiter { line, .. }
            | Self::MismatchedDelimiter { line, .. }
            | Self::UnclosedDelimiter { line, .. } => Some(*line),
            Self::UnsupportedForm { .. } => None,
        }
    }

    /// Byte offset the error points at, when it has one
    pub fn pos(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString { pos, .. }
            | Self::InvalidToken { pos, .. }
            | Self::UnmatchedDelimiter { pos, .. }
            | Self::MismatchedDelimiter { pos, .. }
            | Self::UnclosedDelimiter { pos, .. } => Some(*pos),
            Self::UnsupportedForm { .. } => None,
        }
    }
}

/// Pretty-print an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let pos = error.pos().unwrap_or(source.len().saturating_sub(1));
    let end = (pos + 1).min(source.len());

    let mut output = Vec::new();

    let report = Report::build(ReportKind::Error, filename, pos)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, pos..end))
                .with_color(Color::Red)
                .with_message(match error {
                    ParseError::UnterminatedString { .. } => "string opened here",
                    ParseError::InvalidToken { .. } => "unrecognized input",
                    ParseError::UnmatchedDelimiter { .. } => "no matching opener",
                    ParseError::MismatchedDelimiter { .. } => "wrong closing delimiter",
                    ParseError::UnclosedDelimiter { .. } => "opened here",
                    ParseError::UnsupportedForm { .. } => "in this form",
                }),
        )
        .finish();

    report
        .write((filename, Source::from(source)), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}
