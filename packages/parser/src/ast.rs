use serde::{Deserialize, Serialize};

/// What kind of top-level unit a form is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Comment,
    Expression,
}

/// One top-level syntactic unit of source text.
///
/// Immutable once read. For comment forms `raw_text` holds the comment
/// lines with their markers stripped, joined by newlines; for expression
/// forms it is the exact source slice. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub kind: FormKind,
    pub raw_text: String,
    pub start_line: usize,
    pub end_line: usize,
}

/// The unmerged documentation pieces gathered for one form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocContent {
    pub docstring: Option<String>,
    pub prelude_paragraphs: Vec<String>,
    pub lifted_paragraphs: Vec<String>,
}

/// What kind of section a renderer receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Comment,
    Code,
}

/// The unit handed to rendering.
///
/// `raw` carries the displayed code for `Code` sections and is empty for
/// `Comment` sections; `docstring` carries the merged documentation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub raw: String,
    pub docstring: Option<String>,
}

/// Ordered sections for one logical compilation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse-time configuration, threaded explicitly into every parse call so
/// concurrent parses with different settings cannot interfere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Lift comments found inside a form's body into its documentation
    pub lift_inline_comments: bool,
    /// Also strip lifted comment lines from the displayed code
    pub exclude_lifted_comments: bool,
}
