//! Diagnostic codes and helper functions for elaboration.
//!
//! `E200`--`E201` are elaboration errors; `W200` flags attributes that have
//! nothing to attach to.

use electron_diagnostics::{Category, Diagnostic, DiagnosticCode};
use electron_source::Span;

/// Left and right sides of an assignment have different lengths.
pub const E200: DiagnosticCode = DiagnosticCode::new(Category::Error, 200);

/// A literal that cannot be represented.
pub const E201: DiagnosticCode = DiagnosticCode::new(Category::Error, 201);

/// Attributes on a statement that does not take attributes.
pub const W200: DiagnosticCode = DiagnosticCode::new(Category::Warning, 200);

/// Creates an error for an assignment with differing side lengths.
pub fn error_unbalanced_assignment(lhs: usize, rhs: usize, span: Span) -> Diagnostic {
    Diagnostic::error(E200, "Unbalanced assignment", span).with_note(format!(
        "{lhs} expression(s) on the left, {rhs} on the right"
    ))
}

/// Creates an error for an integer literal outside the 64-bit range.
pub fn error_integer_overflow(text: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E201, format!("integer literal `{text}` is too large"), span)
}

/// Creates an error for a bit vector whose width disagrees with its digits.
pub fn error_bit_vector_width(text: &str, width: usize, digits: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        E201,
        format!("bit vector `{text}` declares {width} bit(s) but has {digits} digit(s)"),
        span,
    )
}

/// Creates an error for a real literal that does not parse.
pub fn error_bad_real(text: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E201, format!("invalid real literal `{text}`"), span)
}

/// Creates a warning for attributes that are dropped.
pub fn warning_ignored_attributes(what: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(W200, format!("attributes have no effect on {what}"), span)
        .with_help("attach attributes to a declaration or a dotted name")
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_source::FileId;

    #[test]
    fn codes_display() {
        assert_eq!(E200.to_string(), "E200");
        assert_eq!(W200.to_string(), "W200");
    }

    #[test]
    fn unbalanced_message() {
        let span = Span::new(FileId::from_raw(0), 0, 5);
        let d = error_unbalanced_assignment(2, 1, span);
        assert_eq!(d.message, "Unbalanced assignment");
        assert_eq!(d.code, E200);
        assert_eq!(d.primary_span, span);
    }
}
