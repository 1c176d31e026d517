//! tdb-core: CALPHAD thermodynamic database (TDB) parser.
//!
//! Turns the text of a `.TDB` file into typed element, function and phase
//! records, with parameters joined to their phases.
//!
//! # Public API
//!
//! - [`parse_tdb()`] / [`parse_tdb_with()`] -- run every pass
//! - [`ParseOutcome`] -- the [`Database`] plus its [`Diagnostic`]s
//! - [`ParseOptions`] -- dialect and execution settings
//! - Records: [`Element`], [`Function`], [`FunctionSegment`],
//!   [`ParameterSpec`], [`Phase`], [`SublatticeSite`], [`Constituent`]
//!
//! Individual pass entry functions are also re-exported for callers that
//! want to run part of the pipeline.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parse;
pub mod parser;
pub mod pass1_preprocess;
pub mod pass2_classify;
pub mod pass3_pair;
pub mod pass4_assemble;
pub mod pass5_serialize;
pub mod records;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{RawStatement, Statement, StatementKind};
pub use error::{Diagnostic, DiagnosticKind, Severity, TdbError};
pub use options::ParseOptions;
pub use parse::ParseOutcome;
pub use records::{
    Constituent, Database, Element, Function, FunctionSegment, ParameterSpec, Phase,
    SublatticeSite,
};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use parse::{parse_tdb, parse_tdb_with};
pub use parser::parse_records;
pub use pass1_preprocess::preprocess;
pub use pass2_classify::classify;
pub use pass3_pair::pair_phases;
pub use pass4_assemble::assemble;
pub use pass5_serialize::{to_json, write_database};
