//! ELEMENT statements: `<symbol> <reference phase> <mass> <H298-H0> <S298>`.

use crate::error::TdbError;
use crate::lexer::{parse_number, words};
use crate::records::Element;

pub fn parse_element(body: &str) -> Result<Element, TdbError> {
    let fields = words(body);
    if fields.len() < 5 {
        return Err(TdbError::MalformedElement(format!(
            "expected 5 fields (symbol, phase, mass, H298-H0, S298), got {}",
            fields.len()
        )));
    }

    let number = |idx: usize, what: &str| {
        parse_number(fields[idx]).ok_or_else(|| {
            TdbError::MalformedElement(format!(
                "{} of '{}' is not a number: '{}'",
                what, fields[0], fields[idx]
            ))
        })
    };

    Ok(Element {
        symbol: fields[0].to_owned(),
        reference_phase: fields[1].to_owned(),
        atomic_mass: number(2, "atomic mass")?,
        h298_h0: number(3, "H298-H0")?,
        s298: number(4, "S298")?,
    })
}
