//! One source text with a line index.

use crate::file_id::FileId;
use electron_common::ContentHash;
use std::path::PathBuf;

/// A source text loaded into the session.
pub struct SourceFile {
    /// Identifier inside the owning [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// Path on disk, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// The full text.
    pub content: String,
    /// Offsets at which each line starts; the first entry is 0.
    line_starts: Vec<u32>,
    /// Digest of `content`.
    pub content_hash: ContentHash,
}

impl SourceFile {
    /// Creates a source file, indexing its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        let content_hash = ContentHash::from_bytes(content.as_bytes());
        Self {
            id,
            path,
            content,
            line_starts,
            content_hash,
        }
    }

    /// Converts a byte offset into 1-indexed `(line, column)`.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }

    /// Returns the full text of the line containing `byte_offset`, without
    /// its terminator.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let rest = &self.content[start..];
        rest.split('\n').next().unwrap_or("").trim_end_matches('\r')
    }

    /// Returns the text between two offsets, or `""` if they are out of range.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        self.content
            .get(start as usize..end as usize)
            .unwrap_or_default()
    }
}
