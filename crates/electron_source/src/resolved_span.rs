//! Spans converted to 1-indexed line/column positions.

use std::fmt;
use std::path::PathBuf;

/// A span resolved to 1-indexed line and column numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Name or path of the source.
    pub file_path: PathBuf,
    /// First line (1-indexed).
    pub start_line: u32,
    /// First column (1-indexed).
    pub start_col: u32,
    /// Last line (1-indexed).
    pub end_line: u32,
    /// Last column (1-indexed).
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}
