//! Interned names for modules, ports, nets, cells and parameters.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name.
///
/// Two `Ident`s from the same [`Interner`] are equal exactly when their
/// strings are equal, so name comparison in scopes and during module
/// deduplication is a `u32` comparison.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Creates an `Ident` from a raw index. Intended for tests and deserialization.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this identifier.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: `Ident` wraps a `u32`, which always fits in `usize` on supported
// targets; `try_from_usize` rejects indices that do not fit back into `u32`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// String interner shared by the parser, the elaborator, the compiler and the
/// passes of one compilation session.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns `s`, reusing the existing identifier if it was seen before.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Returns the identifier of `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.get(s)
    }

    /// Resolves an identifier back to its text.
    ///
    /// # Panics
    ///
    /// Panics if `ident` was not produced by this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_text() {
        let interner = Interner::new();
        let id = interner.get_or_intern("vcc");
        assert_eq!(interner.resolve(id), "vcc");
    }

    #[test]
    fn equal_text_equal_ident() {
        let interner = Interner::new();
        assert_eq!(interner.get_or_intern("r$0"), interner.get_or_intern("r$0"));
        assert_ne!(interner.get_or_intern("a"), interner.get_or_intern("b"));
    }

    #[test]
    fn get_does_not_intern() {
        let interner = Interner::new();
        assert_eq!(interner.get("gnd"), None);
        let id = interner.get_or_intern("gnd");
        assert_eq!(interner.get("gnd"), Some(id));
    }

    #[test]
    fn empty_name_is_internable() {
        let interner = Interner::new();
        let id = interner.get_or_intern("");
        assert_eq!(interner.resolve(id), "");
    }

    #[test]
    fn serde_roundtrip() {
        let id = Ident::from_raw(9);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
