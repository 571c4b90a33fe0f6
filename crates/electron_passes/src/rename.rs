//! Naming of anonymous cells and resolution of cell name collisions.

use crate::Pass;
use electron_common::Interner;
use electron_ir::{Module, Netlist};
use std::collections::HashSet;
use tracing::debug;

/// Name given to cells that have none.
pub const ANONYMOUS_CELL: &str = "$cell";

/// Makes cell names unique within each module.
///
/// Unnamed cells become `$cell`. Every later cell whose name is already
/// taken gets `$k` appended, with the smallest `k` giving a free name.
/// Nothing but cell names changes.
pub struct Rename;

impl Pass for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn transform(&self, mut netlist: Netlist, interner: &Interner) -> Netlist {
        let mut renamed = 0;
        for (_, module) in netlist.modules.iter_mut() {
            renamed += rename_cells(module, interner);
        }
        debug!(renamed, "cells renamed");
        netlist
    }
}

fn rename_cells(module: &mut Module, interner: &Interner) -> usize {
    let anonymous = interner.get_or_intern(ANONYMOUS_CELL);
    let unnamed = interner.get_or_intern("");
    for cell in &mut module.cells {
        if cell.name == unnamed {
            cell.name = anonymous;
        }
    }

    let mut taken: HashSet<String> = module
        .cells
        .iter()
        .map(|c| interner.resolve(c.name).to_string())
        .collect();
    let mut seen = HashSet::new();
    let mut renamed = 0;
    for cell in &mut module.cells {
        if seen.insert(cell.name) {
            continue;
        }
        let base = interner.resolve(cell.name);
        let fresh = (0..)
            .map(|k| format!("{base}${k}"))
            .find(|name| !taken.contains(name))
            .unwrap_or_default();
        cell.name = interner.get_or_intern(&fresh);
        seen.insert(cell.name);
        taken.insert(fresh);
        renamed += 1;
    }
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_ir::Cell;
    use electron_source::Span;

    fn module(interner: &Interner, cells: &[&str]) -> Netlist {
        let mut m = Module::new(interner.get_or_intern("m"), Span::DUMMY);
        m.cells = cells
            .iter()
            .map(|name| Cell::placeholder(interner.get_or_intern(name), Span::DUMMY))
            .collect();
        let mut netlist = Netlist::new();
        netlist.add(m);
        netlist
    }

    fn cell_names(netlist: &Netlist, interner: &Interner) -> Vec<String> {
        netlist
            .iter()
            .flat_map(|(_, m)| m.cells.iter())
            .map(|c| interner.resolve(c.name).to_string())
            .collect()
    }

    #[test]
    fn anonymous_cells_are_named() {
        let interner = Interner::new();
        let out = Rename.transform(module(&interner, &["", "", "r"]), &interner);
        assert_eq!(cell_names(&out, &interner), vec!["$cell", "$cell$0", "r"]);
    }

    #[test]
    fn collisions_take_smallest_free_suffix() {
        let interner = Interner::new();
        let out = Rename.transform(module(&interner, &["r", "r$0", "r", "r"]), &interner);
        assert_eq!(
            cell_names(&out, &interner),
            vec!["r", "r$0", "r$1", "r$2"]
        );
    }

    #[test]
    fn unique_names_untouched() {
        let interner = Interner::new();
        let out = Rename.transform(module(&interner, &["a", "b$0", "b$1"]), &interner);
        assert_eq!(cell_names(&out, &interner), vec!["a", "b$0", "b$1"]);
    }

    #[test]
    fn modules_are_independent() {
        let interner = Interner::new();
        let mut netlist = module(&interner, &["x"]);
        let mut other = Module::new(interner.get_or_intern("n"), Span::DUMMY);
        other.cells.push(Cell::placeholder(interner.get_or_intern("x"), Span::DUMMY));
        netlist.add(other);
        let out = Rename.transform(netlist, &interner);
        assert_eq!(cell_names(&out, &interner), vec!["x", "x"]);
    }
}
