//! Resolution of `import ... from "pkg"` against in-memory packages.

use crate::errors;
use electron_common::{Ident, Interner};
use electron_diagnostics::DiagnosticSink;
use electron_elaborate::ast::{self, Design, Expr, Statement};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Elaborated packages by the name used in `from "..."`.
pub type Packages = HashMap<String, Design>;

/// Returns the modules to compile: the imported ones first, then the
/// design's own.
///
/// Each imported module must exist in its package and be exported. Modules
/// of the package that an imported module instantiates are brought along so
/// that the import is self-contained. Everything taken from a package is
/// marked `imported`.
pub fn link_imports(
    design: &Design,
    packages: &Packages,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Vec<ast::Module> {
    let mut linked: Vec<ast::Module> = Vec::new();
    let mut seen: HashSet<(&str, Ident)> = HashSet::new();

    for import in &design.imports {
        let name = interner.resolve(import.identifier.name);
        let Some(package) = packages.get(&import.package) else {
            sink.emit(errors::error_import(
                format!("Package '{}' not found.", import.package),
                import.span,
            ));
            continue;
        };
        let Some(module) = find(package, import.identifier.name) else {
            sink.emit(errors::error_import(
                format!("Module '{name}' not found in package '{}'.", import.package),
                import.identifier.span,
            ));
            continue;
        };
        if !module.exported {
            sink.emit(errors::error_import(
                format!("Module '{name}' is not exported by '{}'.", import.package),
                import.identifier.span,
            ));
            continue;
        }

        let mut pending = vec![module];
        while let Some(module) = pending.pop() {
            if !seen.insert((import.package.as_str(), module.identifier.name)) {
                continue;
            }
            for used in instantiated(module) {
                if let Some(helper) = find(package, used) {
                    pending.push(helper);
                }
            }
            linked.push(ast::Module {
                imported: true,
                ..module.clone()
            });
        }
    }

    debug!(
        imports = design.imports.len(),
        linked = linked.len(),
        "imports linked"
    );
    linked.extend(design.modules.iter().cloned());
    linked
}

fn find(package: &Design, name: Ident) -> Option<&ast::Module> {
    package.modules.iter().find(|m| m.identifier.name == name)
}

/// Names of the modules instantiated anywhere in `module`.
fn instantiated(module: &ast::Module) -> Vec<Ident> {
    let mut out = Vec::new();
    for param in &module.params {
        if let Some(default) = &param.default {
            collect(default, &mut out);
        }
    }
    for stmt in &module.statements {
        match stmt {
            Statement::Declaration(decl) => collect(&decl.ty.width, &mut out),
            Statement::Assignment(assign) => {
                collect(&assign.lhs, &mut out);
                collect(&assign.rhs, &mut out);
            }
            Statement::Const(_) | Statement::Fqn(_) => {}
        }
    }
    out
}

fn collect(expr: &Expr, out: &mut Vec<Ident>) {
    match expr {
        Expr::Literal(_) | Expr::Ref(_) => {}
        Expr::Tuple(tuple) => tuple.items.iter().for_each(|e| collect(e, out)),
        Expr::Range(range) => {
            collect(&range.from, out);
            collect(&range.to, out);
        }
        Expr::BinOp(op) => {
            collect(&op.lhs, out);
            collect(&op.rhs, out);
        }
        Expr::Inst(inst) => {
            out.push(inst.cell_type.name);
            collect(&inst.width, out);
            inst.params.iter().for_each(|p| collect(&p.value, out));
            inst.connections.iter().for_each(|c| collect(&c.value, out));
        }
    }
}
