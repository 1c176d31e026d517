//! Pass 2: Statement classification by leading keyword.

use crate::ast::{RawStatement, Statement, StatementKind};
use crate::error::{Diagnostic, TdbError};

/// Keyword lookup. Case-sensitive; full keywords and their standard
/// abbreviations only.
pub fn kind_of(keyword: &str) -> Option<StatementKind> {
    match keyword {
        "ELEMENT" => Some(StatementKind::Element),
        "FUNCTION" | "FUNCT" => Some(StatementKind::Function),
        "PARAMETER" | "PARAM" => Some(StatementKind::Parameter),
        "PHASE" => Some(StatementKind::Phase),
        "CONSTITUENT" | "CONST" => Some(StatementKind::Constituent),
        _ => None,
    }
}

/// Tag every statement with its kind. Unmodelled directives (TYPE_DEFINITION,
/// DATABASE_INFO, ...) come back as informational diagnostics.
pub fn classify(raw: Vec<RawStatement>) -> (Vec<Statement>, Vec<Diagnostic>) {
    let mut statements = Vec::with_capacity(raw.len());
    let mut diagnostics = Vec::new();

    for stmt in raw {
        match stmt.keyword().and_then(kind_of) {
            Some(kind) => statements.push(Statement { kind, raw: stmt }),
            None => {
                let keyword = stmt.keyword().unwrap_or_default().to_owned();
                tracing::debug!(line = stmt.line, %keyword, "skipping unclassified statement");
                diagnostics.push(Diagnostic::new(
                    stmt.line,
                    TdbError::UnclassifiedStatement(keyword),
                ));
            }
        }
    }

    (statements, diagnostics)
}
