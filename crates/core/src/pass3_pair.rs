//! Pass 3: PHASE/CONSTITUENT pairing -- positional join of each PHASE
//! declaration with the CONSTITUENT statement that immediately follows it
//! in the PHASE/CONSTITUENT stream.

use crate::ast::{Statement, StatementKind};
use crate::error::{Diagnostic, TdbError};
use crate::lexer::{parse_number, squeeze, words};
use crate::parser::Located;
use crate::records::{normalize_phase_name, Constituent, Phase, SublatticeSite};

/// Marker that flags the type-code field and major constituents.
const PERCENT: char = '%';

/// The PHASE half of a pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseHeader {
    /// Name as written, e.g. `LIQUID:L`.
    pub raw_name: String,
    pub name: String,
    pub stoichiometry: Vec<f64>,
}

fn malformed(phase: &str, reason: impl Into<String>) -> TdbError {
    TdbError::MalformedPhase {
        phase: phase.to_owned(),
        reason: reason.into(),
    }
}

/// `<name> <type code> <sublattice count> <coefficient>...`
///
/// The type-code field is the first token after the name containing `%`,
/// even when `%` is glued to other characters (`%&`, `2%3`). Without any
/// `%` the second token is taken positionally.
pub fn parse_phase_header(body: &str) -> Result<PhaseHeader, TdbError> {
    let tokens = words(body);
    let raw_name = *tokens
        .first()
        .ok_or_else(|| malformed("", "PHASE statement without a name"))?;

    let type_code = tokens
        .iter()
        .skip(1)
        .position(|t| t.contains(PERCENT))
        .map(|i| i + 1)
        .unwrap_or(1);

    let count_tok = tokens
        .get(type_code + 1)
        .ok_or_else(|| malformed(raw_name, "missing sublattice count"))?;
    let count: usize = count_tok
        .parse()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| malformed(raw_name, format!("invalid sublattice count '{}'", count_tok)))?;

    let coefficients = &tokens[(type_code + 2).min(tokens.len())..];
    if coefficients.len() < count {
        return Err(malformed(
            raw_name,
            format!(
                "declares {} sublattices but gives {} stoichiometric coefficients",
                count,
                coefficients.len()
            ),
        ));
    }
    let stoichiometry = coefficients[..count]
        .iter()
        .map(|t| {
            parse_number(t)
                .ok_or_else(|| malformed(raw_name, format!("invalid stoichiometry '{}'", t)))
        })
        .collect::<Result<Vec<f64>, _>>()?;

    Ok(PhaseHeader {
        raw_name: raw_name.to_owned(),
        name: normalize_phase_name(raw_name),
        stoichiometry,
    })
}

/// Name a CONSTITUENT statement refers to: everything before the first
/// `:` once whitespace is removed.
fn constituent_phase_name(body: &str) -> String {
    let squeezed = squeeze(body);
    match squeezed.split_once(':') {
        Some((name, _)) => name.to_owned(),
        None => squeezed,
    }
}

/// Complete `header` with the constituent groups of its CONSTITUENT
/// statement `<name> :<species>,...:<species>,...: `.
pub fn build_phase(header: &PhaseHeader, constituent_body: &str) -> Result<Phase, TdbError> {
    let squeezed = squeeze(constituent_body);
    let groups_text = [header.raw_name.as_str(), header.name.as_str()]
        .into_iter()
        .find_map(|n| {
            squeezed
                .strip_prefix(n)
                .filter(|rest| rest.is_empty() || rest.starts_with(':'))
        })
        .ok_or_else(|| {
            malformed(
                &header.name,
                format!(
                    "followed by CONSTITUENT for '{}'",
                    constituent_phase_name(constituent_body)
                ),
            )
        })?;

    let groups: Vec<&str> = groups_text.split(':').filter(|g| !g.is_empty()).collect();
    if groups.len() != header.stoichiometry.len() {
        return Err(malformed(
            &header.name,
            format!(
                "declares {} sublattices but CONSTITUENT lists {} groups",
                header.stoichiometry.len(),
                groups.len()
            ),
        ));
    }

    let sites = groups
        .iter()
        .zip(&header.stoichiometry)
        .enumerate()
        .map(|(idx, (group, &stoichiometry))| SublatticeSite {
            site: idx + 1,
            stoichiometry,
            constituents: group
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|s| Constituent {
                    species: s.replace(PERCENT, ""),
                    major: s.contains(PERCENT),
                })
                .collect(),
        })
        .collect();

    Ok(Phase::from_sites(header.name.clone(), sites))
}

/// A PHASE statement waiting for its CONSTITUENT.
struct Pending<'a> {
    stmt: &'a Statement,
    header: Result<PhaseHeader, TdbError>,
}

impl Pending<'_> {
    fn name(&self) -> String {
        match &self.header {
            Ok(h) => h.name.clone(),
            Err(_) => self
                .stmt
                .raw
                .body()
                .split_whitespace()
                .next()
                .map(normalize_phase_name)
                .unwrap_or_default(),
        }
    }
}

fn exclude(diagnostics: &mut Vec<Diagnostic>, line: u32, e: TdbError) {
    tracing::warn!(line, error = %e, "phase excluded");
    diagnostics.push(Diagnostic::new(line, e));
}

/// Walk the PHASE/CONSTITUENT stream in order and build one [`Phase`]
/// per well-formed pair.
///
/// The pairing is validated rather than assumed: a PHASE followed by
/// another PHASE, a CONSTITUENT with no PHASE before it, or a
/// CONSTITUENT naming another phase each cost that phase its record and
/// produce a `MalformedPhase` diagnostic. Pairing resumes with the next
/// statement, so one broken pair does not shift every later one.
pub fn pair_phases(stmts: &[Statement]) -> (Vec<Located<Phase>>, Vec<Diagnostic>) {
    let mut phases = Vec::new();
    let mut diagnostics = Vec::new();
    let mut pending: Option<Pending> = None;

    for stmt in stmts {
        match stmt.kind {
            StatementKind::Phase => {
                if let Some(prev) = pending.take() {
                    let e = malformed(&prev.name(), "PHASE is not followed by its CONSTITUENT statement");
                    exclude(&mut diagnostics, prev.stmt.line(), e);
                }
                pending = Some(Pending {
                    stmt,
                    header: parse_phase_header(stmt.body()),
                });
            }
            StatementKind::Constituent => match pending.take() {
                None => {
                    let e = malformed(
                        &normalize_phase_name(&constituent_phase_name(stmt.body())),
                        "CONSTITUENT without a preceding PHASE statement",
                    );
                    exclude(&mut diagnostics, stmt.line(), e);
                }
                Some(Pending { stmt: phase_stmt, header }) => {
                    match header.and_then(|h| build_phase(&h, stmt.body())) {
                        Ok(value) => phases.push(Located {
                            line: phase_stmt.line(),
                            value,
                        }),
                        Err(e) => exclude(&mut diagnostics, phase_stmt.line(), e),
                    }
                }
            },
            _ => {}
        }
    }

    if let Some(prev) = pending {
        let e = malformed(&prev.name(), "PHASE is not followed by its CONSTITUENT statement");
        exclude(&mut diagnostics, prev.stmt.line(), e);
    }

    (phases, diagnostics)
}
