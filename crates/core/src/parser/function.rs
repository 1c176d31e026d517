//! FUNCTION statements: `<name> <temp> <expr> <temp> [...] N <ref>`.

use crate::error::TdbError;
use crate::lexer::piecewise;
use crate::records::Function;

pub fn parse_function(body: &str, marker: char) -> Result<Function, TdbError> {
    let body = body.trim_start();
    let (name, rest) = match body.find(char::is_whitespace) {
        Some(end) => (&body[..end], &body[end..]),
        None => (body, ""),
    };
    if name.is_empty() {
        return Err(TdbError::MalformedFunction("missing function name".into()));
    }

    let list = piecewise(rest, marker)
        .map_err(|e| TdbError::MalformedFunction(format!("{}: {}", name, e)))?;

    Ok(Function {
        name: name.to_owned(),
        segments: list.segments,
    })
}
