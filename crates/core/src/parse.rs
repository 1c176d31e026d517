//! Pass orchestrator: TDB text -> [`Database`] plus diagnostics.
//!
//! A thin driver calling each pass module in order. Statement failures
//! never abort the run; they come back as diagnostics next to whatever
//! could be parsed.

use crate::error::{Diagnostic, Severity};
use crate::options::ParseOptions;
use crate::parser;
use crate::pass1_preprocess;
use crate::pass2_classify;
use crate::pass3_pair;
use crate::pass4_assemble;
use crate::records::Database;
use tracing::instrument;

/// Result of one parse: the assembled records and everything noticed on
/// the way, ordered by source line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub database: Database,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Diagnostics at `Error` severity (statements or phases left out).
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// The record contract plus a `diagnostics` array.
    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = crate::pass5_serialize::to_json(&self.database)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "diagnostics".to_owned(),
                serde_json::Value::Array(
                    self.diagnostics.iter().map(Diagnostic::to_json_value).collect(),
                ),
            );
        }
        Ok(value)
    }
}

/// Parse TDB text with the default (COST507R) conventions.
pub fn parse_tdb(text: &str) -> ParseOutcome {
    parse_tdb_with(text, &ParseOptions::default())
}

#[instrument(skip_all, fields(bytes = text.len()))]
pub fn parse_tdb_with(text: &str, opts: &ParseOptions) -> ParseOutcome {
    // Pass 1: comments, line joining, statement split
    let raw = pass1_preprocess::preprocess(text, opts);

    // Pass 2: keyword classification
    let (statements, mut diagnostics) = pass2_classify::classify(raw);

    // Independent statements, possibly in parallel
    let (records, parse_diags) = parser::parse_records(&statements, opts);
    diagnostics.extend(parse_diags);

    // Pass 3: PHASE/CONSTITUENT pairing (order-dependent, sequential)
    let (phases, pair_diags) = pass3_pair::pair_phases(&statements);
    diagnostics.extend(pair_diags);

    // Pass 4: join and cross-reference checks
    let (database, assemble_diags) = pass4_assemble::assemble(records, phases);
    diagnostics.extend(assemble_diags);

    diagnostics.sort_by_key(|d| d.line);

    tracing::info!(
        statements = statements.len(),
        elements = database.elements.len(),
        functions = database.functions.len(),
        phases = database.phases.len(),
        diagnostics = diagnostics.len(),
        "parsed TDB"
    );

    ParseOutcome {
        database,
        diagnostics,
    }
}
