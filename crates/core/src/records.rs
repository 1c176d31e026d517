//! Typed records produced by a parse.
//!
//! Serde field names follow the consumer-facing JSON contract. Optional
//! fields are never skipped: an absent value is emitted as `null`.

use serde::{Deserialize, Serialize};

/// Canonical phase name: the liquid alias `LIQUID:L` becomes `LIQUID`.
pub fn normalize_phase_name(name: &str) -> String {
    match name {
        "LIQUID:L" => "LIQUID".to_owned(),
        other => other.to_owned(),
    }
}

/// A chemical element with its reference state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "element")]
    pub symbol: String,
    /// Stable element reference phase (SER).
    #[serde(rename = "phase")]
    pub reference_phase: String,
    pub atomic_mass: f64,
    #[serde(rename = "H298-H0")]
    pub h298_h0: f64,
    #[serde(rename = "S298")]
    pub s298: f64,
}

/// One temperature interval of a piecewise expression. Bounds are closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSegment {
    pub min_temp: f64,
    pub max_temp: f64,
    #[serde(rename = "function")]
    pub expression: String,
}

/// A named piecewise function (FUNCTION statement).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(rename = "functions")]
    pub segments: Vec<FunctionSegment>,
}

/// A PARAMETER statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub phase: String,
    /// Parameter-kind code in front of the descriptor (`G`, `L`, `TC`, ...).
    /// Vendor-defined; kept verbatim and never interpreted.
    #[serde(rename = "mixing")]
    pub kind: String,
    /// Species per sublattice site, in declaration order.
    pub species: Vec<Vec<String>>,
    /// Interaction order.
    #[serde(rename = "L")]
    pub order: u32,
    #[serde(rename = "functions")]
    pub segments: Vec<FunctionSegment>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

impl ParameterSpec {
    /// Descriptor in TDB notation, e.g. `G(FCC_A1,AL,CU:VA;0)`.
    pub fn descriptor(&self) -> String {
        let sites: Vec<String> = self.species.iter().map(|s| s.join(",")).collect();
        if sites.is_empty() {
            format!("{}({};{})", self.kind, self.phase, self.order)
        } else {
            format!(
                "{}({},{};{})",
                self.kind,
                self.phase,
                sites.join(":"),
                self.order
            )
        }
    }
}

/// A species allowed on a sublattice site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    pub species: String,
    /// Set when the species carried the `%` major-constituent marker.
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SublatticeSite {
    /// 1-based site index.
    pub site: usize,
    pub stoichiometry: f64,
    pub constituents: Vec<Constituent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    #[serde(rename = "phase")]
    pub name: String,
    #[serde(rename = "sublattice")]
    pub sites: Vec<SublatticeSite>,
    /// Distinct species over all sites, first occurrence order.
    pub constituents: Vec<String>,
    /// Species flagged major on any site; `None` when nothing is flagged.
    pub major_constituents: Option<Vec<String>>,
    pub parameters: Vec<ParameterSpec>,
}

impl Phase {
    /// Build a phase from its sites, deriving the flattened constituent
    /// lists. Parameters are joined in later by the assembler.
    pub fn from_sites(name: String, sites: Vec<SublatticeSite>) -> Self {
        let mut constituents: Vec<String> = Vec::new();
        let mut majors: Vec<String> = Vec::new();
        for c in sites.iter().flat_map(|s| s.constituents.iter()) {
            if !constituents.contains(&c.species) {
                constituents.push(c.species.clone());
            }
            if c.major && !majors.contains(&c.species) {
                majors.push(c.species.clone());
            }
        }
        Phase {
            name,
            sites,
            constituents,
            major_constituents: if majors.is_empty() { None } else { Some(majors) },
            parameters: Vec::new(),
        }
    }
}

/// The full parse result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub elements: Vec<Element>,
    pub phases: Vec<Phase>,
    pub functions: Vec<Function>,
}

impl Database {
    pub fn element(&self, symbol: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.symbol == symbol)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }
}
