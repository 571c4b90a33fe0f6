//! The compiler's output: every compiled module of one unit.

use crate::arena::Arena;
use crate::ids::ModuleId;
use crate::module::Module;
use electron_common::Ident;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// All modules of a compilation unit.
///
/// The compiler allocates a module before compiling its body, so parents
/// precede the modules they instantiate. Cells refer to modules by
/// [`ModuleId`] into this netlist.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// The modules.
    pub modules: Arena<ModuleId, Module>,
}

impl Netlist {
    /// An empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module.
    pub fn add(&mut self, module: Module) -> ModuleId {
        self.modules.alloc(module)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if there are no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The module with `id`.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id]
    }

    /// `(id, module)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules.iter()
    }

    /// The first module emitted under `name`.
    pub fn find(&self, name: Ident) -> Option<ModuleId> {
        self.modules
            .iter()
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| id)
    }

    /// Distinct modules instantiated directly by `id`.
    pub fn children(&self, id: ModuleId) -> BTreeSet<ModuleId> {
        self.modules[id]
            .cells
            .iter()
            .filter_map(|c| c.module)
            .collect()
    }

    /// Returns `true` if every cell refers to a module of this netlist.
    pub fn references_valid(&self) -> bool {
        self.modules.values().all(|m| {
            m.cells
                .iter()
                .filter_map(|c| c.module)
                .all(|id| self.modules.contains(id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use electron_source::Span;

    #[test]
    fn children_and_find() {
        let mut netlist = Netlist::new();
        let top = netlist.add(Module::new(Ident::from_raw(0), Span::DUMMY));
        let leaf = netlist.add(Module::new(Ident::from_raw(1), Span::DUMMY));
        let mut cell = Cell::placeholder(Ident::from_raw(2), Span::DUMMY);
        cell.module = Some(leaf);
        netlist.modules[top].cells.push(cell.clone());
        netlist.modules[top].cells.push(cell);
        assert_eq!(netlist.children(top).into_iter().collect::<Vec<_>>(), vec![leaf]);
        assert!(netlist.children(leaf).is_empty());
        assert_eq!(netlist.find(Ident::from_raw(1)), Some(leaf));
        assert!(netlist.references_valid());
    }

    #[test]
    fn dangling_reference_detected() {
        let mut netlist = Netlist::new();
        let top = netlist.add(Module::new(Ident::from_raw(0), Span::DUMMY));
        let mut cell = Cell::placeholder(Ident::from_raw(2), Span::DUMMY);
        cell.module = Some(ModuleId::from_raw(9));
        netlist.modules[top].cells.push(cell);
        assert!(!netlist.references_valid());
    }
}
