use crate::diagnostic::Diagnostic;
use crate::location::Location;

/// Byte offsets of every `\n` in `contents`.
pub fn find_new_lines(contents: &str) -> Vec<usize> {
    contents.match_indices('\n').map(|x| x.0).collect()
}

/// Converts a byte offset into a 1-based (row, column) pair. The column is
/// counted in characters so that non-ASCII text before the offset doesn't
/// shift it.
pub fn find_row_col(contents: &str, start: usize, loc_new_lines: &[usize]) -> (usize, usize) {
    let n_new_lines = loc_new_lines.partition_point(|x| *x < start);
    let line_start = match n_new_lines {
        0 => 0,
        n => loc_new_lines[n - 1] + 1,
    };

    let col = contents
        .get(line_start..start)
        .map_or(start - line_start, |line| line.chars().count());

    (n_new_lines + 1, col + 1)
}

pub fn compute_lints_location(
    diagnostics: Vec<Diagnostic>,
    contents: &str,
    loc_new_lines: &[usize],
) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .map(|mut diagnostic| {
            let start: usize = diagnostic.range.start().into();
            let (row, col) = find_row_col(contents, start, loc_new_lines);
            diagnostic.location = Some(Location::new(row, col));
            diagnostic
        })
        .collect()
}

/// Strips the surrounding quotes of a string literal token, e.g. the source of
/// an import declaration.
pub fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}
