//! Merging of identical modules.
//!
//! Compilation emits one module per instantiation, so a design that uses
//! the same leaf twice holds two copies of it. This pass keeps one module
//! per structure and repoints every cell at the survivor. Two modules have
//! the same structure when they agree on everything except spans and the
//! numbering of their signals. The output lists children before parents.

use crate::Pass;
use electron_common::{ContentHash, Interner};
use electron_ir::{Arena, Attr, Module, ModuleId, Netlist, SigId, SigValue, Signal};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use tracing::debug;

/// Merges structurally identical modules.
pub struct Hierarchy;

impl Pass for Hierarchy {
    fn name(&self) -> &'static str {
        "hierarchy"
    }

    fn transform(&self, netlist: Netlist, interner: &Interner) -> Netlist {
        let order = post_order(&netlist);
        let mut modules = netlist.modules.into_values().map(Some).collect::<Vec<_>>();
        let mut remap: HashMap<ModuleId, ModuleId> = HashMap::new();
        let mut out: Arena<ModuleId, Module> = Arena::new();
        let mut by_hash: HashMap<ContentHash, Vec<(String, ModuleId)>> = HashMap::new();
        let mut merged = 0;

        for old in order {
            let Some(mut module) = modules.get_mut(old.as_raw() as usize).and_then(Option::take)
            else {
                continue;
            };
            for cell in &mut module.cells {
                cell.module = cell.module.and_then(|id| remap.get(&id).copied());
            }
            let canon = canonical(&module, interner);
            let hash = ContentHash::from_bytes(canon.as_bytes());
            let candidates = by_hash.entry(hash).or_default();
            if let Some((_, survivor)) = candidates.iter().find(|(c, _)| *c == canon) {
                remap.insert(old, *survivor);
                merged += 1;
                continue;
            }
            let new = out.alloc(module);
            candidates.push((canon, new));
            remap.insert(old, new);
        }

        debug!(merged, modules = out.len(), "hierarchy merged modules");
        Netlist { modules: out }
    }
}

/// Module ids with every module after the modules its cells reference.
fn post_order(netlist: &Netlist) -> Vec<ModuleId> {
    fn visit(
        netlist: &Netlist,
        id: ModuleId,
        seen: &mut HashSet<ModuleId>,
        out: &mut Vec<ModuleId>,
    ) {
        if !seen.insert(id) {
            return;
        }
        for child in netlist.children(id) {
            if netlist.modules.contains(child) {
                visit(netlist, child, seen, out);
            }
        }
        out.push(id);
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(netlist.len());
    for id in netlist.modules.ids() {
        visit(netlist, id, &mut seen, &mut out);
    }
    out
}

/// A text form of `module` that is equal for structurally identical
/// modules. Signals are numbered in order of first appearance and spans are
/// left out. Cell module references must already be remapped.
fn canonical(module: &Module, interner: &Interner) -> String {
    let mut sigs: HashMap<SigId, usize> = HashMap::new();
    let mut out = String::new();
    let _ = write!(out, "module {}", interner.resolve(module.name));
    attrs(&mut out, &module.attrs);
    for port in &module.ports {
        let _ = write!(out, "\nport {} {}", interner.resolve(port.name), port.direction);
        bits(&mut out, &port.bits, &mut sigs);
        attrs(&mut out, &port.attrs);
    }
    for net in &module.nets {
        let _ = write!(out, "\nnet {}", interner.resolve(net.name));
        bits(&mut out, &net.bits, &mut sigs);
        attrs(&mut out, &net.attrs);
    }
    for cell in &module.cells {
        let _ = write!(
            out,
            "\ncell {:?} {:?}",
            interner.resolve(cell.name),
            cell.module.map(ModuleId::as_raw)
        );
        for param in &cell.params {
            let _ = write!(out, " {}={:?}", interner.resolve(param.name), param.value);
        }
        for assign in &cell.assigns {
            let _ = write!(out, " .{}", interner.resolve(assign.port));
            bits(&mut out, &assign.bits, &mut sigs);
        }
        attrs(&mut out, &cell.attrs);
    }
    out
}

fn bits(out: &mut String, bits: &[Signal], sigs: &mut HashMap<SigId, usize>) {
    out.push_str(" [");
    for bit in bits {
        let id = number(bit.id, sigs);
        let _ = match bit.value {
            SigValue::Const(level) => write!(out, " {id}:{level}"),
            SigValue::Symbolic(to) => write!(out, " {id}:s{}", number(to, sigs)),
        };
    }
    out.push_str(" ]");
}

fn number(id: SigId, sigs: &mut HashMap<SigId, usize>) -> usize {
    let next = sigs.len();
    *sigs.entry(id).or_insert(next)
}

fn attrs(out: &mut String, attrs: &[Attr]) {
    for attr in attrs {
        let _ = write!(out, " @{}={:?}", attr.key, attr.value);
    }
}
