//! Pass 1: Preprocessing -- strip comments and indentation, join physical
//! lines and split the stream into raw statements.

use crate::ast::RawStatement;
use crate::options::ParseOptions;

/// Split `text` into terminator-delimited statements, in input order.
///
/// Lines are joined without a separator: the format breaks long
/// expressions mid-token and relies on the leading indentation of the
/// continuation line being insignificant.
pub fn preprocess(text: &str, opts: &ParseOptions) -> Vec<RawStatement> {
    let mut stream = String::with_capacity(text.len());
    // (byte offset in `stream`, physical line) for each contributing line
    let mut line_starts: Vec<(usize, u32)> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let mut content = line.trim_start();
        if content.starts_with(opts.comment_marker) {
            if opts.drop_comment_lines {
                continue;
            }
            content = content.trim_start_matches(opts.comment_marker).trim_start();
        }
        if content.is_empty() {
            continue;
        }
        line_starts.push((stream.len(), idx as u32 + 1));
        stream.push_str(content);
    }

    let mut statements = Vec::new();
    let mut offset = 0usize;
    for chunk in stream.split(opts.terminator) {
        let start = offset;
        offset += chunk.len() + opts.terminator.len_utf8();

        let trimmed = chunk.trim_start();
        if trimmed.trim_end().is_empty() {
            continue;
        }
        let first = start + (chunk.len() - trimmed.len());
        statements.push(RawStatement::new(
            trimmed.trim_end(),
            line_of(&line_starts, first),
        ));
    }
    statements
}

fn line_of(line_starts: &[(usize, u32)], offset: usize) -> u32 {
    let idx = line_starts.partition_point(|(start, _)| *start <= offset);
    match idx {
        0 => 1,
        i => line_starts[i - 1].1,
    }
}
