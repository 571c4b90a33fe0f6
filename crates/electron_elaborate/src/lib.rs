//! CST-to-AST elaboration for the electron language.
//!
//! Parses one source file and lowers its concrete syntax tree into the
//! [`ast`] consumed by the compiler.
//!
//! # Usage
//!
//! ```ignore
//! let design = elaborate(file_id, &source_db, &interner, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod ast;
pub mod elaborator;
pub mod errors;

pub use ast::Design;
pub use elaborator::Elaborator;

use electron_common::{Interner, InternalError};
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_source::{FileId, SourceDb};

/// Why a source file could not be elaborated.
#[derive(Debug, thiserror::Error)]
pub enum ElaborateError {
    /// The first error found in the user's source. All errors of the file are
    /// also held by the sink.
    #[error("{}: {}", .0.code, .0.message)]
    Diagnostic(Diagnostic),
    /// A defect in the compiler.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Parses and elaborates a file held by the source database.
///
/// Fails with the first error recorded while lexing, parsing or elaborating
/// this file. Warnings do not fail.
pub fn elaborate(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<Design, ElaborateError> {
    elaborate_str(&source_db.get_file(file_id).content, file_id, interner, sink)
}

/// Parses and elaborates source text attributed to `file_id`.
pub fn elaborate_str(
    source: &str,
    file_id: FileId,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<Design, ElaborateError> {
    let mark = sink.len();
    let unit = electron_syntax::parse_str(source, file_id, sink);
    let design = Elaborator::new(source, interner, sink).design(&unit)?;
    match sink.first_error_from(mark) {
        Some(diag) => Err(ElaborateError::Diagnostic(diag)),
        None => Ok(design),
    }
}
