//! Result type separating compiler defects from user-facing problems.

/// The standard result type for fallible internal operations.
///
/// `Err` always means a defect in the compiler itself: a parser/elaborator
/// rule mismatch, a tag-unification failure, a symbol missing from the
/// symbol table after name checking. Mistakes in the user's source are
/// reported through a `DiagnosticSink` and the operation still returns `Ok`.
pub type ElectronResult<T> = Result<T, InternalError>;

/// An internal compiler error indicating a bug in electron, not in user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates the error raised when the elaborator meets a tree shape the
    /// parser should never produce.
    pub fn rule_mismatch(rule: &str) -> Self {
        Self::new(format!("parser/elaborator mismatch at rule `{rule}`"))
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefix() {
        let err = InternalError::new("scope stack underflow");
        assert_eq!(
            err.to_string(),
            "internal compiler error: scope stack underflow"
        );
    }

    #[test]
    fn rule_mismatch_names_rule() {
        let err = InternalError::rule_mismatch("cellExpression");
        assert!(err.message.contains("`cellExpression`"));
    }

    #[test]
    fn question_mark_propagates() {
        fn inner() -> ElectronResult<u8> {
            Err(InternalError::new("boom"))
        }
        fn outer() -> ElectronResult<u8> {
            let v = inner()?;
            Ok(v + 1)
        }
        assert_eq!(outer(), Err(InternalError::new("boom")));
    }

    #[test]
    fn from_string() {
        let err: InternalError = String::from("lost cell").into();
        assert_eq!(err.message, "lost cell");
    }
}
