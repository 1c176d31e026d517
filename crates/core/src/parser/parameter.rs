//! PARAMETER statements:
//! `<kind>(<phase>,<species>:<species>...;<L>) <temp> <expr> <temp> [...] N <ref>`.

use crate::error::TdbError;
use crate::lexer::{piecewise, squeeze};
use crate::records::{normalize_phase_name, ParameterSpec};

fn malformed(msg: impl Into<String>) -> TdbError {
    TdbError::MalformedParameter(msg.into())
}

/// The parenthesised part of a parameter, already split apart.
#[derive(Debug, Clone, PartialEq)]
struct Descriptor {
    phase: String,
    species: Vec<Vec<String>>,
    order: u32,
}

pub fn parse_parameter(body: &str, marker: char) -> Result<ParameterSpec, TdbError> {
    let open = body
        .find('(')
        .ok_or_else(|| malformed(format!("no '(' in '{}'", body.trim())))?;
    let close = body[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| malformed(format!("unclosed descriptor in '{}'", body.trim())))?;

    let kind = body[..open].trim();
    if kind.is_empty() {
        return Err(malformed("missing parameter kind before '('"));
    }
    let descriptor = parse_descriptor(&body[open + 1..close])?;

    let list = piecewise(&body[close + 1..], marker).map_err(|e| {
        malformed(format!("{}({}): {}", kind, &body[open + 1..close], e))
    })?;
    let reference = list.trailing.into_iter().find(|t| t.contains("REF"));

    Ok(ParameterSpec {
        phase: descriptor.phase,
        kind: kind.to_owned(),
        species: descriptor.species,
        order: descriptor.order,
        segments: list.segments,
        reference,
    })
}

fn parse_descriptor(inner: &str) -> Result<Descriptor, TdbError> {
    let inner = squeeze(inner);
    let (constituents, order) = inner
        .split_once(';')
        .ok_or_else(|| malformed(format!("no ';' before the order in '({})'", inner)))?;

    let order: u32 = order.parse().map_err(|_| {
        malformed(format!(
            "interaction order '{}' is not a non-negative integer",
            order
        ))
    })?;

    let (phase, sites) = match constituents.split_once(',') {
        Some((phase, sites)) => (phase, Some(sites)),
        None => (constituents, None),
    };
    if phase.is_empty() {
        return Err(malformed(format!("missing phase name in '({})'", inner)));
    }

    let mut species = Vec::new();
    if let Some(sites) = sites {
        for (idx, group) in sites.split(':').enumerate() {
            let members: Vec<String> = group
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
            if members.is_empty() {
                return Err(malformed(format!(
                    "empty species list for site {} in '({})'",
                    idx + 1,
                    inner
                )));
            }
            species.push(members);
        }
    }

    Ok(Descriptor {
        phase: normalize_phase_name(phase),
        species,
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fcc_binary_interaction() {
        let p = parse_parameter(
            "G(FCC_A1,AL,CU:VA;0) 298.15 -53520+2*T; 6000 N REF0",
            'Y',
        )
        .unwrap();
        assert_eq!(p.phase, "FCC_A1");
        assert_eq!(p.kind, "G");
        assert_eq!(
            p.species,
            vec![vec!["AL".to_string(), "CU".to_string()], vec!["VA".to_string()]]
        );
        assert_eq!(p.order, 0);
        assert_eq!(p.segments.len(), 1);
        assert_eq!(p.segments[0].expression, "-53520+2*T");
        assert_eq!(p.reference.as_deref(), Some("REF0"));
    }

    #[test]
    fn reference_without_ref_marker_is_absent() {
        let p = parse_parameter("L(LIQUID,AL,CU;2) 298.15 +7.1; 6000 N 91DIN", 'Y').unwrap();
        assert_eq!(p.order, 2);
        assert_eq!(p.reference, None);
    }

    #[test]
    fn kind_code_is_kept_verbatim() {
        let p = parse_parameter("TC(BCC_A2,FE:VA;0) 298.15 1043; 6000 N REF1", 'Y').unwrap();
        assert_eq!(p.kind, "TC");
        assert_eq!(p.phase, "BCC_A2");
    }

    #[test]
    fn semicolon_glued_to_closing_paren() {
        let p = parse_parameter(
            "G(LIQUID,AL;0)  298.15 +11005.029-11.841867*T;700.00 Y+11005.03; 933.47 N REF0",
            'Y',
        )
        .unwrap();
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.segments[1].expression, "+11005.03");
    }

    #[test]
    fn descriptor_spaces_are_ignored() {
        let p = parse_parameter("G(FCC_A1, AL : VA ; 1) 298.15 +1; 6000 N", 'Y').unwrap();
        assert_eq!(p.species, vec![vec!["AL".to_string()], vec!["VA".to_string()]]);
        assert_eq!(p.order, 1);
    }

    #[test]
    fn liquid_alias_is_normalized() {
        let p = parse_parameter("G(LIQUID:L,AL;0) 298.15 +1; 6000 N", 'Y').unwrap();
        assert_eq!(p.phase, "LIQUID");
    }

    #[test]
    fn missing_parentheses() {
        assert!(matches!(
            parse_parameter("G FCC_A1 298.15 +1; 6000 N", 'Y'),
            Err(TdbError::MalformedParameter(_))
        ));
        assert!(matches!(
            parse_parameter("G(FCC_A1,AL:VA;0 298.15 +1; 6000 N", 'Y'),
            Err(TdbError::MalformedParameter(_))
        ));
    }

    #[test]
    fn non_integer_order() {
        let err = parse_parameter("G(FCC_A1,AL:VA;X) 298.15 +1; 6000 N", 'Y').unwrap_err();
        assert!(matches!(err, TdbError::MalformedParameter(ref m) if m.contains("'X'")));
    }

    #[test]
    fn missing_sentinel() {
        let err = parse_parameter("G(FCC_A1,AL:VA;0) 298.15 +1; 6000 REF0", 'Y').unwrap_err();
        assert!(matches!(err, TdbError::MalformedParameter(ref m) if m.contains("terminator")));
    }
}
