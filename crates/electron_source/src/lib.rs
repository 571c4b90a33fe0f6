//! Source text ownership and location tracking.
//!
//! [`SourceDb`] owns every source text of a compilation session, [`FileId`]
//! and [`Span`] point into it, and [`ResolvedSpan`] turns a span into the
//! `file:line:col` form used when a diagnostic is shown.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::SourceFile;
pub use span::Span;
