//! Parser configuration.

use serde::Deserialize;

/// Knobs for one parse. [`Default`] matches COST507R conventions.
///
/// Deserializable so a caller can keep dialect settings next to the
/// database file; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Parse ELEMENT/FUNCTION/PARAMETER statements on the rayon pool.
    pub parallel: bool,
    /// Comment marker. A leading run of it is stripped from each physical
    /// line; the rest of the line stays in the stream.
    pub comment_marker: char,
    /// Drop a physical line that starts with `comment_marker` instead of
    /// keeping its text.
    pub drop_comment_lines: bool,
    /// Statement terminator.
    pub terminator: char,
    /// Soft continuation marker between a temperature and an expression.
    pub continuation_marker: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            parallel: true,
            comment_marker: '$',
            drop_comment_lines: false,
            terminator: '!',
            continuation_marker: 'Y',
        }
    }
}

impl ParseOptions {
    pub fn sequential() -> Self {
        ParseOptions {
            parallel: false,
            ..Default::default()
        }
    }
}
