//! A single user-facing problem report.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use electron_source::Span;
use serde::{Deserialize, Serialize};

/// A problem found in the user's source, located by a primary span.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe the problem is.
    pub severity: Severity,
    /// Stable code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// The main message.
    pub message: String,
    /// Where the problem is.
    pub primary_span: Span,
    /// Additional annotated spans.
    pub labels: Vec<Label>,
    /// Explanatory notes.
    pub notes: Vec<String>,
    /// Suggestions for fixing the problem.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Adds a label.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help line.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
