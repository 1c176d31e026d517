//! Token-level helpers shared by the statement parsers: whitespace
//! tokenization and the piecewise `<temp> <expr> <temp> ... N <ref>` list
//! used by FUNCTION and PARAMETER statements.

use crate::records::FunctionSegment;

/// Token that ends a piecewise list.
pub const SENTINEL: &str = "N";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PiecewiseError {
    #[error("missing 'N' terminator after the last temperature")]
    MissingSentinel,
    /// Token count before the sentinel is not `temp (expr temp)+`.
    #[error("expected alternating temperatures and expressions (odd count >= 3), got {0} tokens")]
    TokenCount(usize),
    #[error("invalid temperature '{0}'")]
    BadTemperature(String),
}

/// A decoded piecewise list plus the tokens after the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Piecewise {
    pub segments: Vec<FunctionSegment>,
    pub trailing: Vec<String>,
}

pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Remove every whitespace character.
pub fn squeeze(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode a piecewise list. `;` expression terminators count as
/// whitespace.
///
/// The continuation `marker` may follow any temperature. A lone marker
/// token is dropped. Line joining can glue it onto the expression that
/// follows (`Y-11276.24+...`); it is stripped there too when the rest of
/// the token opens an expression (sign, digit or `.`), so `YTERM` stays
/// a name.
pub fn piecewise(text: &str, marker: char) -> Result<Piecewise, PiecewiseError> {
    let spaced = text.replace(';', " ");
    let tokens = words(&spaced);

    // Alternating temp, expr, temp, ... with markers removed.
    let mut values: Vec<&str> = Vec::new();
    let mut marker_pending = false;
    let mut sentinel = None;

    for (i, &tok) in tokens.iter().enumerate() {
        if tok == SENTINEL {
            sentinel = Some(i);
            break;
        }
        if values.len() % 2 == 0 {
            values.push(tok);
            marker_pending = true;
            continue;
        }
        if marker_pending {
            marker_pending = false;
            if is_lone_marker(tok, marker) {
                continue;
            }
            if let Some(rest) = strip_glued_marker(tok, marker) {
                values.push(rest);
                continue;
            }
        }
        values.push(tok);
    }

    let sentinel = sentinel.ok_or(PiecewiseError::MissingSentinel)?;
    if values.len() < 3 || values.len() % 2 == 0 {
        return Err(PiecewiseError::TokenCount(values.len()));
    }

    let temps = values
        .iter()
        .step_by(2)
        .map(|t| parse_number(t).ok_or_else(|| PiecewiseError::BadTemperature(t.to_string())))
        .collect::<Result<Vec<f64>, _>>()?;

    let segments = values
        .iter()
        .skip(1)
        .step_by(2)
        .enumerate()
        .map(|(i, expr)| FunctionSegment {
            min_temp: temps[i],
            max_temp: temps[i + 1],
            expression: expr.to_string(),
        })
        .collect();

    Ok(Piecewise {
        segments,
        trailing: tokens[sentinel + 1..].iter().map(|t| t.to_string()).collect(),
    })
}

fn is_lone_marker(tok: &str, marker: char) -> bool {
    let mut chars = tok.chars();
    chars.next() == Some(marker) && chars.next().is_none()
}

fn strip_glued_marker(tok: &str, marker: char) -> Option<&str> {
    tok.strip_prefix(marker)
        .filter(|rest| rest.starts_with(|c: char| matches!(c, '+' | '-' | '.') || c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_with_markers() {
        let p = piecewise(
            "298.15 Y -7976.15+137.093038*T-24.3671976*T*LN(T) 700.00 Y N !",
            'Y',
        )
        .unwrap();
        assert_eq!(p.segments.len(), 1);
        assert_eq!(p.segments[0].min_temp, 298.15);
        assert_eq!(p.segments[0].max_temp, 700.0);
        assert_eq!(
            p.segments[0].expression,
            "-7976.15+137.093038*T-24.3671976*T*LN(T)"
        );
        assert_eq!(p.trailing, vec!["!"]);
    }

    #[test]
    fn glued_marker_after_later_temperature_is_stripped() {
        let p = piecewise(
            "298.15 -7976.15+137.09*T; 700.00 Y-11276.24+223.05*T; 933.47 N REF0",
            'Y',
        )
        .unwrap();
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.segments[1].min_temp, 700.0);
        assert_eq!(p.segments[1].max_temp, 933.47);
        assert_eq!(p.segments[1].expression, "-11276.24+223.05*T");
        assert_eq!(p.trailing, vec!["REF0"]);
    }

    #[test]
    fn glued_marker_after_first_temperature_is_stripped() {
        let p = piecewise(
            "298.15 Y-7976.15+137.093038*T-24.3671976*T*LN(T) 700.00 Y N",
            'Y',
        )
        .unwrap();
        assert_eq!(p.segments.len(), 1);
        assert_eq!(
            p.segments[0].expression,
            "-7976.15+137.093038*T-24.3671976*T*LN(T)"
        );

        let p = piecewise("298.15 Y.5*T; 700 Y Y+1; 900 N", 'Y').unwrap();
        assert_eq!(p.segments[0].expression, ".5*T");
        assert_eq!(p.segments[1].expression, "Y+1");
    }

    #[test]
    fn glued_marker_before_a_name_is_kept() {
        let p = piecewise("298.15 YGHSER; 700 YTERM; 900 N", 'Y').unwrap();
        assert_eq!(p.segments[0].expression, "YGHSER");
        assert_eq!(p.segments[1].expression, "YTERM");
    }

    #[test]
    fn expression_starting_with_marker_letter_survives() {
        let p = piecewise("298.15 +GHSERYY; 1000 Y YTERM; 2000 N", 'Y').unwrap();
        assert_eq!(p.segments[0].expression, "+GHSERYY");
        assert_eq!(p.segments[1].expression, "YTERM");
    }

    #[test]
    fn missing_sentinel_is_an_error() {
        assert_eq!(
            piecewise("298.15 +1.0; 6000", 'Y'),
            Err(PiecewiseError::MissingSentinel)
        );
    }

    #[test]
    fn even_token_count_is_an_error() {
        assert_eq!(
            piecewise("298.15 +1.0; N", 'Y'),
            Err(PiecewiseError::TokenCount(2))
        );
    }

    #[test]
    fn non_numeric_temperature_is_an_error() {
        assert_eq!(
            piecewise("LOW +1.0; 6000 N", 'Y'),
            Err(PiecewiseError::BadTemperature("LOW".into()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            PiecewiseError::MissingSentinel.to_string(),
            "missing 'N' terminator after the last temperature"
        );
        assert_eq!(
            PiecewiseError::BadTemperature("LOW".into()).to_string(),
            "invalid temperature 'LOW'"
        );
    }

    #[test]
    fn squeeze_removes_interior_whitespace() {
        assert_eq!(squeeze(" BCC_A2  :AL,CU : VA :  "), "BCC_A2:AL,CU:VA:");
    }
}
