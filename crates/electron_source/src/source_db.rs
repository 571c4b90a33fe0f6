//! Owner of every source text in a compilation session.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// Stores source texts and resolves spans against them.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds an in-memory source under the given display name.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the file for `id`, or `None` for dummy or foreign ids.
    pub fn try_get_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Resolves a span to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> Option<ResolvedSpan> {
        let file = self.try_get_file(span.file)?;
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        Some(ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        })
    }

    /// Returns the text covered by `span`, or `""` for synthesized spans.
    pub fn snippet(&self, span: Span) -> &str {
        self.try_get_file(span.file)
            .map(|file| file.snippet(span.start, span.end))
            .unwrap_or_default()
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_snippet() {
        let mut db = SourceDb::new();
        let id = db.add_source("top.el", "module top {}".to_string());
        assert_eq!(db.snippet(Span::new(id, 7, 10)), "top");
        assert_eq!(db.get_file(id).path, PathBuf::from("top.el"));
    }

    #[test]
    fn resolve_second_line() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.el", "module a {\n  net x;\n}".to_string());
        let rs = db.resolve_span(Span::new(id, 13, 16)).unwrap();
        assert_eq!((rs.start_line, rs.start_col), (2, 3));
        assert_eq!((rs.end_line, rs.end_col), (2, 5));
    }

    #[test]
    fn dummy_span_does_not_resolve() {
        let db = SourceDb::new();
        assert!(db.resolve_span(Span::DUMMY).is_none());
        assert_eq!(db.snippet(Span::DUMMY), "");
    }

    #[test]
    fn load_from_disk() {
        let dir = std::env::temp_dir().join("electron_source_load_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("led.el");
        std::fs::write(&path, "declare module Led {}").unwrap();

        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "declare module Led {}");

        std::fs::remove_dir_all(&dir).ok();
    }
}
