//! Pass 4: Record assembly -- duplicate-name detection, temperature-range
//! checks, and the phase -> parameters join.

use crate::error::{Diagnostic, TdbError};
use crate::parser::{Located, ParsedRecords};
use crate::records::{Database, FunctionSegment, ParameterSpec, Phase};
use std::collections::HashMap;

/// Parameters grouped by phase name, in declaration order.
pub struct ParameterIndex {
    pub by_phase: HashMap<String, Vec<ParameterSpec>>,
}

/// Build the phase -> parameters index. Parameters naming a phase that is
/// not in `phases` are reported and left out.
pub fn build_parameter_index(
    parameters: Vec<Located<ParameterSpec>>,
    phases: &[Phase],
) -> (ParameterIndex, Vec<Diagnostic>) {
    let mut by_phase: HashMap<String, Vec<ParameterSpec>> = phases
        .iter()
        .map(|p| (p.name.clone(), Vec::new()))
        .collect();
    let mut diagnostics = Vec::new();

    for Located { line, value } in parameters {
        match by_phase.get_mut(&value.phase) {
            Some(list) => list.push(value),
            None => {
                let e = TdbError::ReferentialIntegrity {
                    parameter: value.descriptor(),
                    phase: value.phase.clone(),
                };
                tracing::warn!(line, error = %e, "parameter not joined");
                diagnostics.push(Diagnostic::new(line, e));
            }
        }
    }

    (ParameterIndex { by_phase }, diagnostics)
}

/// Keep the first record for each key, reporting later ones.
fn dedup<T>(
    items: Vec<Located<T>>,
    kind: &'static str,
    key: impl Fn(&T) -> &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Located<T>> {
    let mut first_seen: HashMap<String, u32> = HashMap::new();
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        let name = key(&item.value);
        if let Some(&first_line) = first_seen.get(name) {
            diagnostics.push(Diagnostic::new(
                item.line,
                TdbError::DuplicateName {
                    kind,
                    name: name.to_owned(),
                    first_line,
                },
            ));
            continue;
        }
        first_seen.insert(name.to_owned(), item.line);
        kept.push(item);
    }
    kept
}

/// Check a piecewise list: each interval non-empty, intervals ascending
/// and not overlapping. Bounds are closed, so a shared endpoint between
/// neighbours is allowed.
pub fn check_segments(owner: &str, segments: &[FunctionSegment]) -> Vec<TdbError> {
    let mut findings = Vec::new();
    let mut report = |reason: String| {
        findings.push(TdbError::TemperatureRange {
            owner: owner.to_owned(),
            reason,
        })
    };

    for (i, s) in segments.iter().enumerate() {
        if s.min_temp >= s.max_temp {
            report(format!(
                "segment {} has min_temp {} not below max_temp {}",
                i + 1,
                s.min_temp,
                s.max_temp
            ));
        }
    }
    for (i, pair) in segments.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.min_temp < prev.min_temp {
            report(format!(
                "segment {} starts at {} before segment {} at {}",
                i + 2,
                next.min_temp,
                i + 1,
                prev.min_temp
            ));
        } else if next.min_temp < prev.max_temp {
            report(format!(
                "segment {} [{}, {}] overlaps segment {} [{}, {}]",
                i + 2,
                next.min_temp,
                next.max_temp,
                i + 1,
                prev.min_temp,
                prev.max_temp
            ));
        }
    }
    findings
}

/// Merge the parsed records and the paired phases into a [`Database`].
pub fn assemble(records: ParsedRecords, phases: Vec<Located<Phase>>) -> (Database, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let elements = dedup(records.elements, "element", |e| e.symbol.as_str(), &mut diagnostics);
    let functions = dedup(records.functions, "function", |f| f.name.as_str(), &mut diagnostics);
    let phases = dedup(phases, "phase", |p| p.name.as_str(), &mut diagnostics);

    for f in &functions {
        for e in check_segments(&f.value.name, &f.value.segments) {
            diagnostics.push(Diagnostic::new(f.line, e));
        }
    }
    for p in &records.parameters {
        for e in check_segments(&p.value.descriptor(), &p.value.segments) {
            diagnostics.push(Diagnostic::new(p.line, e));
        }
    }

    let mut phases: Vec<Phase> = phases.into_iter().map(|p| p.value).collect();
    let (mut index, index_diags) = build_parameter_index(records.parameters, &phases);
    diagnostics.extend(index_diags);
    for phase in &mut phases {
        phase.parameters = index.by_phase.remove(&phase.name).unwrap_or_default();
    }

    let database = Database {
        elements: elements.into_iter().map(|e| e.value).collect(),
        phases,
        functions: functions.into_iter().map(|f| f.value).collect(),
    };
    (database, diagnostics)
}
