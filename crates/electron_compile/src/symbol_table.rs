//! Lexically scoped name bindings.

use electron_common::{ElectronResult, Ident, InternalError};
use std::collections::HashMap;

/// A stack of scopes mapping names to values.
///
/// Lookups search from the innermost scope outwards. A miss is reported as
/// `None`; whether that is a user mistake or a compiler defect is the
/// caller's decision.
#[derive(Debug)]
pub struct SymbolTable<V> {
    scopes: Vec<HashMap<Ident, V>>,
}

impl<V> Default for SymbolTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SymbolTable<V> {
    /// A table with one empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Number of open scopes, including the global one.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Opens a new innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost scope and drops its bindings.
    pub fn exit_scope(&mut self) -> ElectronResult<()> {
        if self.scopes.len() <= 1 {
            return Err(InternalError::new("exit_scope without matching enter_scope"));
        }
        self.scopes.pop();
        Ok(())
    }

    /// Binds `name` in the innermost scope, shadowing outer bindings and
    /// replacing an earlier binding in the same scope.
    pub fn define(&mut self, name: Ident, value: V) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// The nearest binding of `name`.
    pub fn lookup(&self, name: Ident) -> Option<&V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    /// The nearest binding of `name`, mutably.
    pub fn lookup_mut(&mut self, name: Ident) -> Option<&mut V> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(&name))
    }

    /// Returns `true` if `name` is bound in the innermost scope.
    pub fn defined_locally(&self, name: Ident) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.contains_key(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> Ident {
        Ident::from_raw(n)
    }

    #[test]
    fn innermost_binding_wins() {
        let mut st = SymbolTable::new();
        st.define(id(0), 1);
        st.enter_scope();
        st.define(id(0), 2);
        assert_eq!(st.lookup(id(0)), Some(&2));
        st.exit_scope().unwrap();
        assert_eq!(st.lookup(id(0)), Some(&1));
    }

    #[test]
    fn outer_bindings_visible() {
        let mut st = SymbolTable::new();
        st.define(id(1), "outer");
        st.enter_scope();
        assert_eq!(st.lookup(id(1)), Some(&"outer"));
        assert!(!st.defined_locally(id(1)));
    }

    #[test]
    fn miss_is_none() {
        let mut st: SymbolTable<u8> = SymbolTable::new();
        st.enter_scope();
        st.define(id(0), 1);
        st.exit_scope().unwrap();
        assert_eq!(st.lookup(id(0)), None);
    }

    #[test]
    fn lookup_mut_updates_nearest() {
        let mut st = SymbolTable::new();
        st.define(id(0), 1);
        st.enter_scope();
        *st.lookup_mut(id(0)).unwrap() = 5;
        st.exit_scope().unwrap();
        assert_eq!(st.lookup(id(0)), Some(&5));
    }

    #[test]
    fn global_scope_cannot_be_popped() {
        let mut st: SymbolTable<u8> = SymbolTable::new();
        assert!(st.exit_scope().is_err());
        assert_eq!(st.depth(), 1);
    }
}
