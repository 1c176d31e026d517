//! Raw statement types shared by the passes.
//!
//! The preprocessor produces [`RawStatement`]s, the classifier tags them
//! with a [`StatementKind`]. Nothing here is interpreted yet -- that is the
//! statement parsers' job.

// ──────────────────────────────────────────────
// Raw statements
// ──────────────────────────────────────────────

/// One terminator-delimited statement, leading whitespace removed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatement {
    pub text: String,
    /// 1-based physical line on which the statement starts.
    pub line: u32,
}

impl RawStatement {
    pub fn new(text: impl Into<String>, line: u32) -> Self {
        RawStatement {
            text: text.into(),
            line,
        }
    }

    /// First whitespace-delimited word, if any.
    pub fn keyword(&self) -> Option<&str> {
        self.text.split_whitespace().next()
    }

    /// Statement text with the keyword removed.
    pub fn body(&self) -> &str {
        let trimmed = self.text.trim_start();
        match trimmed.find(char::is_whitespace) {
            Some(end) => trimmed[end..].trim_start(),
            None => "",
        }
    }
}

// ──────────────────────────────────────────────
// Classification
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Element,
    Function,
    Parameter,
    Phase,
    Constituent,
}

impl StatementKind {
    /// Canonical (unabbreviated) keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            StatementKind::Element => "ELEMENT",
            StatementKind::Function => "FUNCTION",
            StatementKind::Parameter => "PARAMETER",
            StatementKind::Phase => "PHASE",
            StatementKind::Constituent => "CONSTITUENT",
        }
    }
}

/// A raw statement whose keyword matched a modelled statement kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub raw: RawStatement,
}

impl Statement {
    pub fn body(&self) -> &str {
        self.raw.body()
    }

    pub fn line(&self) -> u32 {
        self.raw.line
    }
}
