//! Half-open byte ranges inside a source text.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` in one source file.
///
/// Every AST node, compiled attribute and diagnostic carries a span so that
/// errors found late in compilation still point at the user's text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file this span points into.
    pub file: FileId,
    /// Start offset (inclusive).
    pub start: u32,
    /// End offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Span used for compiler-synthesized nodes.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// Spans from different files cannot be merged; `self` is returned
    /// unchanged in that case. A dummy operand yields the other span.
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() || self.file != other.file {
            return self;
        }
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the span from the start of `self` to the end of `other`.
    ///
    /// Used for diagnostics that cover a whole construct, e.g. from the first
    /// left-hand expression of an assignment to its last right-hand one.
    pub fn to(self, other: Span) -> Span {
        if self.is_dummy() || self.file != other.file {
            return self.merge(other);
        }
        Span {
            file: self.file,
            start: self.start,
            end: other.end.max(self.start),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` for a synthesized span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}
