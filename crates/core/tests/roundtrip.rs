//! Records written back out as TDB text re-parse to the same records.

use proptest::prelude::*;
use std::path::Path;
use tdb_core::parser::{parse_element, parse_function};
use tdb_core::pass5_serialize::{write_element, write_function};
use tdb_core::{parse_tdb, write_database, Element, Function, FunctionSegment};

fn body(statement: &str, keyword: &str) -> String {
    statement
        .strip_prefix(keyword)
        .and_then(|s| s.strip_suffix('!'))
        .unwrap_or_else(|| panic!("unexpected statement text: {}", statement))
        .to_owned()
}

fn expression() -> impl Strategy<Value = String> {
    "[-+0-9.*A-Z()#]{1,24}".prop_filter("sentinel token", |e| e != "N")
}

/// Strictly increasing temperatures with two decimals.
fn temperatures(count: usize) -> impl Strategy<Value = Vec<f64>> {
    (1u32..100_000, prop::collection::vec(1u32..500_000, count)).prop_map(|(start, steps)| {
        let mut cents = start;
        let mut temps = vec![f64::from(cents) / 100.0];
        for step in steps {
            cents += step;
            temps.push(f64::from(cents) / 100.0);
        }
        temps
    })
}

fn function() -> impl Strategy<Value = Function> {
    (1usize..6)
        .prop_flat_map(|n| {
            (
                "[A-Z][A-Z0-9_]{0,11}",
                temperatures(n),
                prop::collection::vec(expression(), n),
            )
        })
        .prop_map(|(name, temps, exprs)| Function {
            name,
            segments: exprs
                .into_iter()
                .enumerate()
                .map(|(i, expression)| FunctionSegment {
                    min_temp: temps[i],
                    max_temp: temps[i + 1],
                    expression,
                })
                .collect(),
        })
}

proptest! {
    #[test]
    fn function_round_trip(f in function()) {
        let text = write_function(&f);
        let parsed = parse_function(&body(&text, "FUNCTION"), 'Y').unwrap();
        prop_assert_eq!(&parsed, &f);
        prop_assert!(parsed
            .segments
            .windows(2)
            .all(|w| w[0].max_temp <= w[1].min_temp));
    }

    #[test]
    fn element_round_trip(
        symbol in "[A-Z][A-Z]?",
        phase in "[A-Z][A-Z0-9_]{0,11}",
        mass in 0.0f64..300.0,
        h298 in 0.0f64..20_000.0,
        s298 in 0.0f64..100.0,
    ) {
        let e = Element { symbol, reference_phase: phase, atomic_mass: mass, h298_h0: h298, s298 };
        let parsed = parse_element(&body(&write_element(&e), "ELEMENT")).unwrap();
        prop_assert_eq!(parsed, e);
    }
}

#[test]
fn conformance_database_round_trip() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../conformance/alcu.tdb");
    let text = std::fs::read_to_string(&path).unwrap();
    let first = parse_tdb(&text);

    let rewritten = write_database(&first.database);
    let second = parse_tdb(&rewritten);

    assert!(
        second.diagnostics.is_empty(),
        "rewritten text produced diagnostics: {:?}",
        second.diagnostics
    );
    assert_eq!(second.database, first.database);
}
