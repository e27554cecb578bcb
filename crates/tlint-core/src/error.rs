use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

/// The parser reported syntax errors for this file. Such files are not
/// linted since the binding table would be built from a partial tree.
#[derive(Debug)]
pub struct ParseError {
    pub filename: PathBuf,
}

impl std::error::Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to parse {} due to syntax errors.",
            self.filename.display()
        )
    }
}
