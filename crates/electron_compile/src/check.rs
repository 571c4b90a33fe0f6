//! Name checking ahead of compilation.
//!
//! The compiler resolves every name through its symbol table and treats a
//! miss as a defect. The checker makes that sound: it walks each module in
//! source order with its own scope, reports every user mistake the compiler
//! would otherwise trip over, and compilation only starts when it found
//! none.

use crate::attributes::AttributeRegistry;
use crate::errors;
use electron_common::{Ident, Interner};
use electron_diagnostics::DiagnosticSink;
use electron_elaborate::ast::{self, Expr, LiteralKind, Statement, TypeKind};
use electron_source::Span;
use std::collections::HashMap;
use tracing::debug;

/// What a name in a module scope stands for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Kind {
    Signal,
    Cell,
    Param,
    Const,
}

/// The kind of value an expression evaluates to, when known statically.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ValueKind {
    Param,
    Sigs,
    Cells,
}

impl ValueKind {
    fn describe(self) -> &'static str {
        match self {
            ValueKind::Param => "a parameter",
            ValueKind::Sigs => "signals",
            ValueKind::Cells => "cells",
        }
    }
}

/// Checks every module and returns the number of errors reported.
pub fn check_design(
    modules: &[ast::Module],
    registry: &AttributeRegistry,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> usize {
    let before = sink.error_count();
    let mut index: HashMap<Ident, &ast::Module> = HashMap::new();
    for module in modules {
        let name = module.identifier.name;
        if let Some(first) = index.get(&name) {
            sink.emit(errors::error_duplicate_module(
                interner.resolve(name),
                module.identifier.span,
                first.identifier.span,
            ));
        } else {
            index.insert(name, module);
        }
    }

    for module in modules {
        ModuleChecker {
            index: &index,
            registry,
            interner,
            sink,
            scope: HashMap::new(),
        }
        .check(module);
    }

    let errors = sink.error_count() - before;
    debug!(modules = modules.len(), errors, "name check finished");
    errors
}

struct ModuleChecker<'a> {
    index: &'a HashMap<Ident, &'a ast::Module>,
    registry: &'a AttributeRegistry,
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
    scope: HashMap<Ident, (Kind, Span)>,
}

impl ModuleChecker<'_> {
    fn check(&mut self, module: &ast::Module) {
        self.attributes(&module.attributes);
        for param in &module.params {
            if let Some(default) = &param.default {
                self.expr(default);
            }
            self.declare(param.identifier, Kind::Param);
        }

        for stmt in &module.statements {
            if module.declaration && !is_port(stmt) {
                self.sink.emit(errors::error_declare_body(
                    self.interner.resolve(module.identifier.name),
                    statement_span(stmt),
                ));
                continue;
            }
            match stmt {
                Statement::Const(id) => self.declare(*id, Kind::Const),
                Statement::Declaration(decl) => {
                    self.expr(&decl.ty.width);
                    self.attributes(&decl.attributes);
                    let kind = match decl.ty.kind {
                        TypeKind::Cell => Kind::Cell,
                        _ => Kind::Signal,
                    };
                    self.declare(decl.identifier, kind);
                }
                Statement::Assignment(assign) => {
                    if !is_assignable(&assign.lhs) {
                        self.sink
                            .emit(errors::error_not_assignable(assign.lhs.span()));
                    }
                    let lhs = self.expr(&assign.lhs);
                    let rhs = self.expr(&assign.rhs);
                    if let (Some(lhs), Some(rhs)) = (lhs, rhs) {
                        if lhs != rhs {
                            self.sink.emit(errors::error_kind_mismatch(
                                lhs.describe(),
                                rhs.describe(),
                                assign.span,
                            ));
                        }
                    }
                }
                Statement::Fqn(fqn) => self.fqn(fqn),
            }
        }
    }

    fn declare(&mut self, id: ast::Identifier, kind: Kind) {
        if let Some((_, first)) = self.scope.get(&id.name) {
            self.sink.emit(errors::error_duplicate_declaration(
                self.interner.resolve(id.name),
                id.span,
                *first,
            ));
            return;
        }
        self.scope.insert(id.name, (kind, id.span));
    }

    fn lookup(&self, id: ast::Identifier) -> Option<Kind> {
        match self.scope.get(&id.name) {
            Some((kind, _)) => Some(*kind),
            None => {
                self.sink.emit(errors::error_undeclared(
                    self.interner.resolve(id.name),
                    id.span,
                ));
                None
            }
        }
    }

    fn attributes(&self, attrs: &[ast::Attribute]) {
        for attr in attrs {
            let name = self.interner.resolve(attr.name.name);
            if !self.registry.contains(name) {
                self.sink
                    .emit(errors::error_unknown_attribute(name, attr.name.span));
            }
        }
    }

    fn fqn(&self, fqn: &ast::Fqn) {
        self.attributes(&fqn.attributes);
        if fqn.segments.len() > 1 {
            self.sink.emit(errors::error_nested_fqn(fqn.span));
            return;
        }
        let Some(first) = fqn.segments.first() else {
            return;
        };
        match self.scope.get(&first.name) {
            Some((Kind::Signal | Kind::Cell, _)) => {}
            _ => self.sink.emit(errors::error_undeclared(
                self.interner.resolve(first.name),
                first.span,
            )),
        }
    }

    /// Checks names in `expr` and infers its kind. `None` means unknown,
    /// either because a name did not resolve or because it is a module
    /// parameter that may be bound to bits.
    fn expr(&self, expr: &Expr) -> Option<ValueKind> {
        match expr {
            Expr::Literal(lit) => match lit.kind {
                LiteralKind::BitVector(_) => Some(ValueKind::Sigs),
                _ => Some(ValueKind::Param),
            },
            Expr::Ref(id) => self.lookup(*id).and_then(value_kind),
            Expr::Range(range) => {
                self.expr(&range.from);
                self.expr(&range.to);
                self.lookup(range.identifier).and_then(value_kind)
            }
            Expr::Tuple(tuple) => {
                let kinds: Vec<_> = tuple.items.iter().map(|e| self.expr(e)).collect();
                match kinds.as_slice() {
                    [single] => *single,
                    [first, rest @ ..] if rest.iter().all(|k| k == first) => *first,
                    _ => None,
                }
            }
            Expr::BinOp(op) => {
                self.expr(&op.lhs);
                self.expr(&op.rhs);
                Some(ValueKind::Param)
            }
            Expr::Inst(inst) => {
                self.expr(&inst.width);
                self.inst(inst);
                Some(ValueKind::Cells)
            }
        }
    }

    fn inst(&self, inst: &ast::Inst) {
        for param in &inst.params {
            self.expr(&param.value);
        }
        for conn in &inst.connections {
            self.expr(&conn.value);
        }
        let Some(target) = self.index.get(&inst.cell_type.name) else {
            self.sink.emit(errors::error_unknown_module(
                self.interner.resolve(inst.cell_type.name),
                inst.cell_type.span,
            ));
            return;
        };
        let module_name = self.interner.resolve(target.identifier.name);

        let mut positional = 0;
        for param in &inst.params {
            match param.name {
                Some(name) => {
                    if !target.params.iter().any(|p| p.identifier == name) {
                        self.sink.emit(errors::error_unknown_param(
                            module_name,
                            self.interner.resolve(name.name),
                            name.span,
                        ));
                    }
                }
                None => {
                    positional += 1;
                    if positional > target.params.len() {
                        self.sink.emit(errors::error_too_many_params(
                            module_name,
                            target.params.len(),
                            param.span,
                        ));
                    }
                }
            }
        }

        for conn in &inst.connections {
            if !target.ports().any(|p| p.identifier == conn.port) {
                self.sink.emit(errors::error_unknown_port(
                    module_name,
                    self.interner.resolve(conn.port.name),
                    conn.port.span,
                ));
            }
        }
    }
}

fn value_kind(kind: Kind) -> Option<ValueKind> {
    match kind {
        Kind::Signal => Some(ValueKind::Sigs),
        Kind::Cell => Some(ValueKind::Cells),
        Kind::Const => Some(ValueKind::Param),
        Kind::Param => None,
    }
}

fn is_assignable(expr: &Expr) -> bool {
    match expr {
        Expr::Ref(_) | Expr::Range(_) => true,
        Expr::Tuple(tuple) => tuple.items.iter().all(is_assignable),
        Expr::Literal(_) | Expr::Inst(_) | Expr::BinOp(_) => false,
    }
}

fn is_port(stmt: &Statement) -> bool {
    matches!(stmt, Statement::Declaration(decl) if decl.ty.kind.is_port())
}

fn statement_span(stmt: &Statement) -> Span {
    match stmt {
        Statement::Const(id) => id.span,
        Statement::Declaration(decl) => decl.span,
        Statement::Assignment(assign) => assign.span,
        Statement::Fqn(fqn) => fqn.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PartsCatalog;
    use electron_diagnostics::DiagnosticCode;
    use electron_source::FileId;

    fn check(source: &str) -> Vec<DiagnosticCode> {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let design =
            electron_elaborate::elaborate_str(source, FileId::from_raw(0), &interner, &sink)
                .unwrap();
        let registry = AttributeRegistry::new(PartsCatalog::default());
        check_design(&design.modules, &registry, &interner, &sink);
        sink.diagnostics().into_iter().map(|d| d.code).collect()
    }

    #[test]
    fn clean_design() {
        let src = "module inv { input a; output b; }
                   module top { net[2] x; cell c; c = inv { a = x[0], b = x[1] }; }";
        assert!(check(src).is_empty());
    }

    #[test]
    fn duplicate_module() {
        assert_eq!(check("module m {} module m {}"), vec![errors::E300]);
    }

    #[test]
    fn unknown_module() {
        assert_eq!(
            check("module m { cell c; c = nope {}; }"),
            vec![errors::E301]
        );
    }

    #[test]
    fn use_before_declaration() {
        assert_eq!(
            check("module m { b = a; net a; net b; }"),
            vec![errors::E302, errors::E302]
        );
    }

    #[test]
    fn duplicate_declaration() {
        assert_eq!(check("module m { net a; input a; }"), vec![errors::E303]);
    }

    #[test]
    fn unknown_port_and_param() {
        let src = "module r(value) { analog a; }
                   module m { cell c; c = r { b } (ohms = 3); }";
        let codes = check(src);
        assert!(codes.contains(&errors::E304));
        assert!(codes.contains(&errors::E305));
    }

    #[test]
    fn too_many_positional_params() {
        let src = "module r(value) { analog a; }
                   module m { cell c; c = r {} (1, 2); }";
        assert_eq!(check(src), vec![errors::E305]);
    }

    #[test]
    fn declared_module_has_ports_only() {
        assert_eq!(
            check("declare module io { input a; net n; }"),
            vec![errors::E306]
        );
    }

    #[test]
    fn nested_fqn_and_unknown_attribute() {
        let codes = check("module m { net a; @rotate(90) a.b; @sparkle a; }");
        assert_eq!(codes, vec![errors::E316, errors::E403]);
    }

    #[test]
    fn kind_mismatch() {
        assert_eq!(
            check("module m { net a; cell c; a = c; }"),
            vec![errors::E317]
        );
    }

    #[test]
    fn assignment_target_must_be_a_name() {
        assert_eq!(check("module m { 1 = 2; }"), vec![errors::E319]);
        assert_eq!(
            check("module inv {} module m { cell c; inv {} = c; }"),
            vec![errors::E319]
        );
        assert!(check("module m { const k; net[2] a, b; (k) = 1; (a[0], b) = 3'000; }").is_empty());
    }

    #[test]
    fn module_params_are_in_scope() {
        let src = "module m(n, w = n + 1) { net[w] a; net[n] b; }";
        assert!(check(src).is_empty());
    }
}
