//! Diagnostic codes and helper functions for name checking, compilation and
//! attribute validation.
//!
//! `E300`--`E319` cover name checking and compile-time evaluation, `E400`--
//! `E403` attribute validation. `W300`--`W301` are non-fatal.

use electron_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use electron_source::Span;

/// Duplicate module name.
pub const E300: DiagnosticCode = DiagnosticCode::new(Category::Error, 300);
/// Instance of an unknown module.
pub const E301: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
/// Reference to an undeclared name.
pub const E302: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);
/// Name declared twice in one module.
pub const E303: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);
/// Connection to a port the module does not have.
pub const E304: DiagnosticCode = DiagnosticCode::new(Category::Error, 304);
/// Instance parameter the module does not take.
pub const E305: DiagnosticCode = DiagnosticCode::new(Category::Error, 305);
/// Non-port statement in a declared module.
pub const E306: DiagnosticCode = DiagnosticCode::new(Category::Error, 306);
/// Unresolvable import.
pub const E307: DiagnosticCode = DiagnosticCode::new(Category::Error, 307);
/// Invalid width.
pub const E308: DiagnosticCode = DiagnosticCode::new(Category::Error, 308);
/// Invalid arithmetic.
pub const E309: DiagnosticCode = DiagnosticCode::new(Category::Error, 309);
/// Range index error.
pub const E310: DiagnosticCode = DiagnosticCode::new(Category::Error, 310);
/// Module parameter without value.
pub const E311: DiagnosticCode = DiagnosticCode::new(Category::Error, 311);
/// Concatenation of incompatible values.
pub const E312: DiagnosticCode = DiagnosticCode::new(Category::Error, 312);
/// Connection that is not a signal list.
pub const E313: DiagnosticCode = DiagnosticCode::new(Category::Error, 313);
/// Assignment with differing bit or cell counts.
pub const E314: DiagnosticCode = DiagnosticCode::new(Category::Error, 314);
/// Module instantiating itself.
pub const E315: DiagnosticCode = DiagnosticCode::new(Category::Error, 315);
/// Dotted name with more than one segment.
pub const E316: DiagnosticCode = DiagnosticCode::new(Category::Error, 316);
/// Assignment between different kinds of value.
pub const E317: DiagnosticCode = DiagnosticCode::new(Category::Error, 317);
/// Cell used as a parameter value.
pub const E318: DiagnosticCode = DiagnosticCode::new(Category::Error, 318);
/// Assignment to something other than a name, range or tuple of those.
pub const E319: DiagnosticCode = DiagnosticCode::new(Category::Error, 319);

/// Attribute parameters do not match the attribute's signature.
pub const E400: DiagnosticCode = DiagnosticCode::new(Category::Error, 400);
/// Attribute parameter has an invalid value.
pub const E401: DiagnosticCode = DiagnosticCode::new(Category::Error, 401);
/// `@cpl` query without catalog match.
pub const E402: DiagnosticCode = DiagnosticCode::new(Category::Error, 402);
/// Unknown attribute name.
pub const E403: DiagnosticCode = DiagnosticCode::new(Category::Error, 403);

/// Connection width differs from the port width.
pub const W300: DiagnosticCode = DiagnosticCode::new(Category::Warning, 300);
/// Cell declared but never bound to an instance.
pub const W301: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);

/// Creates an error for a module defined twice.
pub fn error_duplicate_module(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::error(E300, format!("module `{name}` is defined more than once"), span)
        .with_label(Label::secondary(first, "first defined here"))
}

/// Creates an error for an instance of an unknown module.
pub fn error_unknown_module(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E301, format!("unknown module `{name}`"), span)
}

/// Creates an error for a reference to an undeclared name.
pub fn error_undeclared(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E302, format!("`{name}` is not declared"), span)
        .with_help("names must be declared before they are used")
}

/// Creates an error for a name declared twice.
pub fn error_duplicate_declaration(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::error(E303, format!("`{name}` is declared more than once"), span)
        .with_label(Label::secondary(first, "first declared here"))
}

/// Creates an error for a connection to a missing port.
pub fn error_unknown_port(module: &str, port: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E304, format!("module `{module}` has no port `{port}`"), span)
}

/// Creates an error for an unknown named instance parameter.
pub fn error_unknown_param(module: &str, param: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E305,
        format!("module `{module}` has no parameter `{param}`"),
        span,
    )
}

/// Creates an error for too many positional instance parameters.
pub fn error_too_many_params(module: &str, expected: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        E305,
        format!("module `{module}` takes {expected} parameter(s)"),
        span,
    )
}

/// Creates an error for a body statement in a declared module.
pub fn error_declare_body(module: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E306,
        format!("declared module `{module}` may only contain port declarations"),
        span,
    )
}

/// Creates an error for an unresolvable import.
pub fn error_import(message: String, span: Span) -> Diagnostic {
    Diagnostic::error(E307, message, span)
}

/// Creates an error for a width that is not a non-negative integer.
pub fn error_bad_width(found: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E308,
        format!("width must be a non-negative integer, found {found}"),
        span,
    )
}

/// Creates an error for invalid arithmetic.
pub fn error_arithmetic(message: impl Into<String>, span: Span) -> Diagnostic {
    Diagnostic::error(E309, message, span)
}

/// Creates a range index error.
pub fn error_range(message: String, span: Span) -> Diagnostic {
    Diagnostic::error(E310, message, span)
}

/// Creates an error for a module parameter with neither value nor default.
pub fn error_missing_param(module: &str, param: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E311,
        format!("missing value for parameter `{param}` of module `{module}`"),
        span,
    )
}

/// Creates an error for a concatenation of different kinds of value.
pub fn error_mixed_concat(span: Span) -> Diagnostic {
    Diagnostic::error(
        E312,
        "a concatenation must contain only signals or only cells",
        span,
    )
}

/// Creates an error for a connection that does not evaluate to signals.
pub fn error_connection_not_signals(port: &str, found: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E313,
        format!("connection to port `{port}` must be a signal list, found {found}"),
        span,
    )
}

/// Creates an error for a signal assignment with differing bit counts.
pub fn error_width_mismatch(lhs: usize, rhs: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        E314,
        format!("cannot assign {rhs} bit(s) to {lhs} bit(s)"),
        span,
    )
}

/// Creates an error for binding a cell list to a different number of
/// instances.
pub fn error_cell_count_mismatch(lhs: usize, rhs: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        E314,
        format!("cannot bind {rhs} instance(s) to {lhs} cell(s)"),
        span,
    )
}

/// Creates an error for circular instantiation.
pub fn error_circular(module: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E315,
        format!("circular instantiation of module `{module}`"),
        span,
    )
}

/// Creates an error for a dotted name with several segments.
pub fn error_nested_fqn(span: Span) -> Diagnostic {
    Diagnostic::error(
        E316,
        "attributes can only be attached to names of the enclosing module",
        span,
    )
}

/// Creates an error for an assignment between different kinds of value.
pub fn error_kind_mismatch(lhs: &str, rhs: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E317, format!("cannot assign {rhs} to {lhs}"), span)
}

/// Creates an error for a cell used as a parameter value.
pub fn error_cell_param(span: Span) -> Diagnostic {
    Diagnostic::error(E318, "a cell cannot be used as a parameter value", span)
}

/// Creates an error for an assignment whose left side cannot be written.
pub fn error_not_assignable(span: Span) -> Diagnostic {
    Diagnostic::error(
        E319,
        "the left side of an assignment must be a name, a range or a tuple of those",
        span,
    )
}

/// Creates an error for an unknown attribute.
pub fn error_unknown_attribute(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E403, format!("unknown attribute `@{name}`"), span)
}

/// Creates a warning for a connection narrower or wider than its port.
pub fn warning_connection_width(port: &str, port_width: usize, width: usize, span: Span) -> Diagnostic {
    Diagnostic::warning(
        W300,
        format!("port `{port}` is {port_width} bit(s) wide but {width} bit(s) are connected"),
        span,
    )
}

/// Creates a warning for a cell that was never bound.
pub fn warning_unbound_cell(name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(
        W301,
        format!("cell `{name}` is never bound to an instance"),
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_diagnostics::Severity;

    #[test]
    fn codes_and_severity() {
        let d = error_circular("m", Span::DUMMY);
        assert_eq!(d.code.to_string(), "E315");
        assert_eq!(d.severity, Severity::Error);
        let w = warning_unbound_cell("c", Span::DUMMY);
        assert_eq!(w.code.to_string(), "W301");
        assert_eq!(w.severity, Severity::Warning);
    }

    #[test]
    fn duplicate_points_at_first() {
        let d = error_duplicate_module("m", Span::DUMMY, Span::DUMMY);
        assert_eq!(d.labels.len(), 1);
    }
}
