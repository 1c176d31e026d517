use serde::Serialize;

/// A statement-level failure or finding. Statement parsers return these;
/// the pipeline wraps them in a [`Diagnostic`] carrying the source line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TdbError {
    /// ELEMENT statement with missing or non-numeric fields.
    #[error("malformed ELEMENT statement: {0}")]
    MalformedElement(String),

    /// FUNCTION statement whose piecewise list cannot be read.
    #[error("malformed FUNCTION statement: {0}")]
    MalformedFunction(String),

    /// PARAMETER statement with a broken descriptor or piecewise list.
    #[error("malformed PARAMETER statement: {0}")]
    MalformedParameter(String),

    /// PHASE/CONSTITUENT pair that breaks the pairing or sublattice contract.
    /// Fatal for the named phase only.
    #[error("malformed phase '{phase}': {reason}")]
    MalformedPhase { phase: String, reason: String },

    /// Statement whose keyword is not modelled. Informational.
    #[error("unclassified statement '{0}'")]
    UnclassifiedStatement(String),

    /// PARAMETER naming a phase that was never declared.
    #[error("parameter {parameter} references unknown phase '{phase}'")]
    ReferentialIntegrity { parameter: String, phase: String },

    /// Second declaration of an element, function or phase name.
    #[error("duplicate {kind} '{name}': first declared at line {first_line}")]
    DuplicateName {
        kind: &'static str,
        name: String,
        first_line: u32,
    },

    /// Piecewise segments that are empty, out of order or overlapping.
    #[error("temperature range of {owner}: {reason}")]
    TemperatureRange { owner: String, reason: String },
}

impl TdbError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            TdbError::MalformedElement(_) => DiagnosticKind::MalformedElement,
            TdbError::MalformedFunction(_) => DiagnosticKind::MalformedFunction,
            TdbError::MalformedParameter(_) => DiagnosticKind::MalformedParameter,
            TdbError::MalformedPhase { .. } => DiagnosticKind::MalformedPhase,
            TdbError::UnclassifiedStatement(_) => DiagnosticKind::UnclassifiedStatement,
            TdbError::ReferentialIntegrity { .. } => DiagnosticKind::ReferentialIntegrity,
            TdbError::DuplicateName { .. } => DiagnosticKind::DuplicateName,
            TdbError::TemperatureRange { .. } => DiagnosticKind::TemperatureRange,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            TdbError::UnclassifiedStatement(_) => Severity::Info,
            TdbError::TemperatureRange { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    MalformedElement,
    MalformedFunction,
    MalformedParameter,
    MalformedPhase,
    UnclassifiedStatement,
    ReferentialIntegrity,
    DuplicateName,
    TemperatureRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A [`TdbError`] located at the physical line where its statement starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub error: TdbError,
}

impl Diagnostic {
    pub fn new(line: u32, error: TdbError) -> Self {
        Diagnostic { line, error }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.error.kind()
    }

    pub fn severity(&self) -> Severity {
        self.error.severity()
    }

    /// Serialize with every field present, matching the record contract's
    /// explicit-field convention.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "kind":     self.kind(),
            "line":     self.line,
            "message":  self.error.to_string(),
            "severity": self.severity(),
        })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_kind() {
        assert_eq!(
            TdbError::UnclassifiedStatement("TYPE_DEFINITION".into()).severity(),
            Severity::Info
        );
        assert_eq!(
            TdbError::TemperatureRange {
                owner: "GHSERAL".into(),
                reason: "overlap".into()
            }
            .severity(),
            Severity::Warning
        );
        assert_eq!(
            TdbError::MalformedElement("too few fields".into()).severity(),
            Severity::Error
        );
    }

    #[test]
    fn diagnostic_json_has_all_fields() {
        let d = Diagnostic::new(
            12,
            TdbError::ReferentialIntegrity {
                parameter: "G(BCC_B2,AL:VA;0)".into(),
                phase: "BCC_B2".into(),
            },
        );
        let v = d.to_json_value();
        assert_eq!(v["kind"], "ReferentialIntegrity");
        assert_eq!(v["severity"], "error");
        assert_eq!(v["line"], 12);
        assert!(v["message"].as_str().unwrap().contains("BCC_B2"));
    }
}
