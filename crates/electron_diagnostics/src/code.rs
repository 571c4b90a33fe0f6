//! Stable diagnostic codes such as `E200` or `W300`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a diagnostic code, rendered as its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Errors, prefixed with `E`.
    Error,
    /// Warnings, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the prefix letter.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A category plus a number, displayed as e.g. `E101`.
///
/// Ranges: `1xx` syntax, `2xx` elaboration, `3xx` compilation, `4xx`
/// attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category.
    pub category: Category,
    /// Number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_number() {
        assert_eq!(DiagnosticCode::new(Category::Error, 200).to_string(), "E200");
        assert_eq!(DiagnosticCode::new(Category::Warning, 7).to_string(), "W007");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Warning, 300);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(serde_json::from_str::<DiagnosticCode>(&json).unwrap(), code);
    }
}
