//! Pass 5: Serialization -- the JSON record contract, and a TDB writer
//! that renders records back into statements the parser reads unchanged.

use crate::ast::StatementKind;
use crate::records::{Database, Element, Function, FunctionSegment, ParameterSpec, Phase};
use serde_json::Value;
use std::fmt::Write;

/// `{"elements": [...], "phases": [...], "functions": [...]}` with floats
/// as numbers and absent optional fields as `null`.
pub fn to_json(db: &Database) -> Result<Value, serde_json::Error> {
    serde_json::to_value(db)
}

pub fn from_json(value: Value) -> Result<Database, serde_json::Error> {
    serde_json::from_value(value)
}

// ── TDB writer ────────────────────────────────────────────────────────────────

pub fn write_element(e: &Element) -> String {
    format!(
        "{} {} {} {} {} {} !",
        StatementKind::Element.keyword(),
        e.symbol, e.reference_phase, e.atomic_mass, e.h298_h0, e.s298
    )
}

/// `<t0> Y <expr0>; <t1> Y <expr1>; <t2> N`, with the marker always a
/// token of its own.
fn write_segments(out: &mut String, segments: &[FunctionSegment]) {
    for (i, s) in segments.iter().enumerate() {
        if i == 0 {
            let _ = write!(out, " {}", s.min_temp);
        }
        let _ = write!(out, " Y {}; {}", s.expression, s.max_temp);
    }
    out.push_str(" N");
}

pub fn write_function(f: &Function) -> String {
    let mut out = format!("{} {}", StatementKind::Function.keyword(), f.name);
    write_segments(&mut out, &f.segments);
    out.push_str(" !");
    out
}

pub fn write_parameter(p: &ParameterSpec) -> String {
    let mut out = format!("{} {}", StatementKind::Parameter.keyword(), p.descriptor());
    write_segments(&mut out, &p.segments);
    if let Some(reference) = &p.reference {
        let _ = write!(out, " {}", reference);
    }
    out.push_str(" !");
    out
}

/// PHASE and CONSTITUENT statements for `phase`, on two lines.
pub fn write_phase(phase: &Phase) -> String {
    let mut out = format!(
        "{} {} % {}",
        StatementKind::Phase.keyword(),
        phase.name,
        phase.sites.len()
    );
    for site in &phase.sites {
        let _ = write!(out, " {}", site.stoichiometry);
    }
    let _ = write!(
        out,
        " !\n{} {} :",
        StatementKind::Constituent.keyword(),
        phase.name
    );
    for site in &phase.sites {
        let species: Vec<String> = site
            .constituents
            .iter()
            .map(|c| {
                if c.major {
                    format!("{}%", c.species)
                } else {
                    c.species.clone()
                }
            })
            .collect();
        let _ = write!(out, "{}:", species.join(","));
    }
    out.push_str(" !");
    out
}

/// A whole database as TDB text: elements, functions, then each phase
/// followed by its parameters.
pub fn write_database(db: &Database) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.extend(db.elements.iter().map(write_element));
    lines.extend(db.functions.iter().map(write_function));
    for phase in &db.phases {
        lines.push(write_phase(phase));
        lines.extend(phase.parameters.iter().map(write_parameter));
    }
    lines.push(String::new());
    lines.join("\n")
}
