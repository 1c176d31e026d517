//! Per-statement parsers for the independent statement kinds.
//! Each parser sees one statement body and returns a record or a
//! `TdbError`; nothing here looks at any other statement.

use crate::ast::{Statement, StatementKind};
use crate::error::{Diagnostic, TdbError};
use crate::options::ParseOptions;
use crate::records::{Element, Function, ParameterSpec};
use rayon::prelude::*;

mod element;
mod function;
mod parameter;

pub use element::parse_element;
pub use function::parse_function;
pub use parameter::parse_parameter;

/// A record tagged with the line its statement started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub line: u32,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Element(Element),
    Function(Function),
    Parameter(ParameterSpec),
}

/// Records from the independent statements, in statement order.
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub elements: Vec<Located<Element>>,
    pub functions: Vec<Located<Function>>,
    pub parameters: Vec<Located<ParameterSpec>>,
}

/// Parse one ELEMENT, FUNCTION or PARAMETER statement. PHASE and
/// CONSTITUENT statements are order-dependent and return `None`; the
/// pairer handles them.
pub fn parse_statement(stmt: &Statement, opts: &ParseOptions) -> Option<Result<Record, TdbError>> {
    let body = stmt.body();
    let marker = opts.continuation_marker;
    match stmt.kind {
        StatementKind::Element => Some(parse_element(body).map(Record::Element)),
        StatementKind::Function => Some(parse_function(body, marker).map(Record::Function)),
        StatementKind::Parameter => Some(parse_parameter(body, marker).map(Record::Parameter)),
        StatementKind::Phase | StatementKind::Constituent => None,
    }
}

/// Parse every independent statement. Runs on the rayon pool when
/// `opts.parallel` is set; the result order is the statement order either way.
pub fn parse_records(stmts: &[Statement], opts: &ParseOptions) -> (ParsedRecords, Vec<Diagnostic>) {
    let run = |stmt: &Statement| parse_statement(stmt, opts).map(|r| (stmt.line(), r));
    let results: Vec<(u32, Result<Record, TdbError>)> = if opts.parallel {
        stmts.par_iter().filter_map(run).collect()
    } else {
        stmts.iter().filter_map(run).collect()
    };

    let mut records = ParsedRecords::default();
    let mut diagnostics = Vec::new();
    for (line, result) in results {
        match result {
            Ok(Record::Element(value)) => records.elements.push(Located { line, value }),
            Ok(Record::Function(value)) => records.functions.push(Located { line, value }),
            Ok(Record::Parameter(value)) => records.parameters.push(Located { line, value }),
            Err(e) => {
                tracing::warn!(line, error = %e, "statement excluded");
                diagnostics.push(Diagnostic::new(line, e));
            }
        }
    }
    (records, diagnostics)
}
