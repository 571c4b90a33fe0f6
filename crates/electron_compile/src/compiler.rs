//! The AST compiler.
//!
//! Walks checked AST modules and produces the IR [`Netlist`]. Every module
//! without parameters is a root; parameterized modules are compiled at each
//! instantiation with the parameter values bound there, which gives every
//! specialization its own IR module and a mangled name.
//!
//! Signals are allocated from one [`SignalTable`] per compilation so that
//! identities are unique across the whole netlist. Cells are kept in an arena
//! while their module is compiled because assignments may rebind them after
//! they were declared; they are copied into the IR module when it is
//! finished, and so are the current values of its signals.

use crate::attributes::AttributeRegistry;
use crate::cache::{mangling_prefix, InstanceKey, ModuleCache};
use crate::errors;
use crate::signals::SignalTable;
use crate::symbol_table::SymbolTable;
use crate::value::{Scalar, Unwrapped, WrappedValue};
use crate::CompileOptions;
use electron_common::{ElectronResult, Ident, Interner, InternalError};
use electron_diagnostics::DiagnosticSink;
use electron_elaborate::ast::{self, BinOpKind, Expr, LiteralKind, Statement, TypeKind};
use electron_ir::{
    Arena, Assign, Attr, AttrKey, Cell, CellId, Module, ModuleId, Net, Netlist, Param,
    ParamValue, Port, PortDirection, SigId, Signal,
};
use electron_source::Span;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// Widths above this are rejected rather than allocated.
const MAX_WIDTH: i64 = 1 << 20;

/// Compiles AST modules into a netlist.
pub struct Compiler<'a> {
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
    registry: &'a AttributeRegistry,
    options: CompileOptions,
    modules: HashMap<Ident, &'a ast::Module>,
    symbols: SymbolTable<WrappedValue>,
    signals: SignalTable,
    cells: Arena<CellId, Cell>,
    netlist: Netlist,
    cache: ModuleCache,
    /// Compiled attributes by occurrence, so each is validated once.
    attrs: HashMap<(Span, Ident), Vec<Attr>>,
    /// Modules being compiled, innermost last.
    stack: Vec<Ident>,
}

impl<'a> Compiler<'a> {
    /// Creates a compiler reporting to `sink`.
    pub fn new(
        interner: &'a Interner,
        sink: &'a DiagnosticSink,
        registry: &'a AttributeRegistry,
        options: CompileOptions,
    ) -> Self {
        Self {
            interner,
            sink,
            registry,
            options,
            modules: HashMap::new(),
            symbols: SymbolTable::new(),
            signals: SignalTable::new(),
            cells: Arena::new(),
            netlist: Netlist::new(),
            cache: ModuleCache::new(),
            attrs: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Compiles every parameterless module of `modules` and what they
    /// instantiate.
    ///
    /// Modules appear in the netlist in the order their compilation started,
    /// so a parent precedes its children. The modules must have passed
    /// [`check_design`](crate::check::check_design); an unresolved name is
    /// reported as an [`InternalError`].
    #[instrument(skip_all, fields(modules = modules.len()))]
    pub fn compile(mut self, modules: &'a [ast::Module]) -> ElectronResult<Netlist> {
        for module in modules {
            self.modules.entry(module.identifier.name).or_insert(module);
        }
        self.signals.reset();
        for module in modules {
            if module.params.is_empty() {
                self.compile_module(module, Vec::new(), module.identifier.span)?;
            }
        }
        debug!(
            modules = self.netlist.len(),
            signals = self.signals.len(),
            "compilation finished"
        );
        Ok(self.netlist)
    }

    /// Compiles `module` with the explicitly bound `params`.
    ///
    /// Returns `None` if the module is already being compiled further up,
    /// which is reported at `site`.
    fn compile_module(
        &mut self,
        module: &'a ast::Module,
        params: Vec<Param>,
        site: Span,
    ) -> ElectronResult<Option<ModuleId>> {
        let name = module.identifier.name;
        if module.declaration {
            if let Some(id) = self.cache.declared(name) {
                debug!(module = self.interner.resolve(name), "declared module cache hit");
                return Ok(Some(id));
            }
        }
        if self.stack.contains(&name) {
            self.sink
                .emit(errors::error_circular(self.interner.resolve(name), site));
            return Ok(None);
        }
        self.stack.push(name);
        let outer = std::mem::take(&mut self.symbols);
        self.symbols.enter_scope();
        let params = self.bind_params(module, params, site)?;

        // Keyed on the bound values, defaults included.
        let key = (self.options.share_instances && !module.declaration)
            .then(|| InstanceKey::new(name, &params, self.interner));
        if let Some(id) = key.as_ref().and_then(|k| self.cache.instance(k)) {
            debug!(module = self.interner.resolve(name), "instance cache hit");
            self.symbols = outer;
            self.stack.pop();
            return Ok(Some(id));
        }
        let id = self.netlist.add(Module::new(name, module.span));
        if module.declaration {
            self.cache.insert_declared(name, id);
        }
        if let Some(key) = key {
            self.cache.insert_instance(key, id);
        }
        let emitted = if module.declaration || module.exported || params.is_empty() {
            name
        } else {
            let mangled = format!(
                "{}{}",
                mangling_prefix(&params, self.interner),
                self.interner.resolve(name)
            );
            self.interner.get_or_intern(&mangled)
        };
        debug!(
            module = self.interner.resolve(name),
            emitted = self.interner.resolve(emitted),
            params = params.len(),
            "compiling module"
        );

        let mut ir = Module::new(emitted, module.span);
        ir.attrs = self.compile_attrs(&module.attributes)?;
        ir.attrs
            .push(Attr::new(AttrKey::Name, self.interner.resolve(name)));
        if module.declaration {
            ir.attrs.push(Attr::new(AttrKey::Declare, true));
        }
        if let Some(doc) = &module.doc {
            ir.attrs.push(Attr::new(AttrKey::Doc, doc.as_str()));
        }
        if module.exported {
            ir.attrs.push(Attr::new(AttrKey::Export, true));
        }
        if module.imported {
            ir.attrs.push(Attr::new(AttrKey::Import, true));
        }

        let mut cell_ids = Vec::new();
        for stmt in &module.statements {
            if module.declaration && !is_port(stmt) {
                continue;
            }
            self.statement(stmt, &mut ir, &mut cell_ids)?;
        }
        self.finish(id, ir, &cell_ids)?;

        self.symbols.exit_scope()?;
        self.symbols = outer;
        self.stack.pop();
        Ok(Some(id))
    }

    /// Binds the explicit parameters, then the defaults of the rest in
    /// declaration order. Returns every binding in declaration order.
    fn bind_params(
        &mut self,
        module: &ast::Module,
        explicit: Vec<Param>,
        site: Span,
    ) -> ElectronResult<Vec<Param>> {
        for param in &explicit {
            self.bind_param(param);
        }
        let mut bound = Vec::with_capacity(module.params.len());
        for decl in &module.params {
            let name = decl.identifier.name;
            if let Some(param) = explicit.iter().find(|p| p.name == name) {
                bound.push(param.clone());
                continue;
            }
            let value = match &decl.default {
                Some(expr) => {
                    let value = self.eval_expr(expr)?;
                    self.param_value(value, expr.span())?
                }
                None => None,
            };
            let value = match value {
                Some(value) => value,
                None => {
                    if decl.default.is_none() {
                        self.sink.emit(errors::error_missing_param(
                            self.interner.resolve(module.identifier.name),
                            self.interner.resolve(name),
                            site,
                        ));
                    }
                    ParamValue::Int(0)
                }
            };
            let param = Param { name, value };
            self.bind_param(&param);
            bound.push(param);
        }
        Ok(bound)
    }

    fn bind_param(&mut self, param: &Param) {
        let value = match Unwrapped::from(&param.value) {
            Unwrapped::Scalar(scalar) => WrappedValue::Param(scalar),
            Unwrapped::Bits(bits) => WrappedValue::Sigs(
                bits.into_iter()
                    .map(|level| self.signals.alloc_const(level))
                    .collect(),
            ),
        };
        self.symbols.define(param.name, value);
    }

    /// Converts an evaluated expression to a parameter value. Signals are
    /// passed by their current levels; cells cannot be parameters.
    fn param_value(
        &mut self,
        value: WrappedValue,
        span: Span,
    ) -> ElectronResult<Option<ParamValue>> {
        Ok(match value {
            WrappedValue::Param(scalar) => Some(scalar.to_param()),
            WrappedValue::Sigs(sigs) => Some(ParamValue::Bits(
                sigs.iter()
                    .map(|s| self.signals.level(*s))
                    .collect::<ElectronResult<_>>()?,
            )),
            WrappedValue::Cells(_) => {
                self.sink.emit(errors::error_cell_param(span));
                None
            }
        })
    }

    fn statement(
        &mut self,
        stmt: &ast::Statement,
        ir: &mut Module,
        cell_ids: &mut Vec<CellId>,
    ) -> ElectronResult<()> {
        match stmt {
            Statement::Const(id) => {
                self.symbols
                    .define(id.name, WrappedValue::Param(Scalar::Int(0)));
            }
            Statement::Declaration(decl) if decl.ty.kind == TypeKind::Cell => {
                cell_ids.extend(self.define_cells(decl)?);
            }
            Statement::Declaration(decl) => match direction(decl.ty.kind) {
                Some(direction) => {
                    let bits = self.define_signals(decl)?;
                    ir.ports.push(Port {
                        name: decl.identifier.name,
                        direction,
                        bits,
                        attrs: self.compile_attrs(&decl.attributes)?,
                        span: decl.span,
                    });
                }
                None => {
                    let bits = self.define_signals(decl)?;
                    ir.nets.push(Net {
                        name: decl.identifier.name,
                        bits,
                        attrs: self.compile_attrs(&decl.attributes)?,
                        span: decl.span,
                    });
                }
            },
            Statement::Assignment(assign) => self.eval_assign(assign)?,
            Statement::Fqn(fqn) => {
                let Some(first) = fqn.segments.first() else {
                    return Ok(());
                };
                let attrs = self.compile_attrs(&fqn.attributes)?;
                match self.lookup(*first)? {
                    WrappedValue::Cells(ids) => {
                        for id in ids {
                            self.cells[id].attrs.extend(attrs.iter().cloned());
                        }
                    }
                    WrappedValue::Sigs(_) => {
                        let target = ir
                            .ports
                            .iter_mut()
                            .find(|p| p.name == first.name)
                            .map(|p| &mut p.attrs)
                            .or_else(|| {
                                ir.nets
                                    .iter_mut()
                                    .find(|n| n.name == first.name)
                                    .map(|n| &mut n.attrs)
                            });
                        match target {
                            Some(target) => target.extend(attrs),
                            None => {
                                return Err(InternalError::new(format!(
                                    "`{}` names signals but no port or net",
                                    self.interner.resolve(first.name)
                                )))
                            }
                        }
                    }
                    WrappedValue::Param(_) => {
                        return Err(InternalError::new(format!(
                            "attributes attached to parameter `{}`",
                            self.interner.resolve(first.name)
                        )))
                    }
                }
            }
        }
        Ok(())
    }

    /// Allocates fresh signals for a port or net and binds its name.
    fn define_signals(&mut self, decl: &ast::Declaration) -> ElectronResult<Vec<Signal>> {
        let width = self.eval_width(&decl.ty.width)?;
        let sigs = self.signals.alloc_many(width);
        let bits = sigs.iter().copied().map(Signal::fresh).collect();
        self.symbols
            .define(decl.identifier.name, WrappedValue::Sigs(sigs));
        Ok(bits)
    }

    /// Allocates unbound cells for a `cell` declaration. A replicated
    /// declaration names its cells `base$0`, `base$1`, ...
    fn define_cells(&mut self, decl: &ast::Declaration) -> ElectronResult<Vec<CellId>> {
        let width = self.eval_width(&decl.ty.width)?;
        let attrs = self.compile_attrs(&decl.attributes)?;
        let base = self.interner.resolve(decl.identifier.name);
        let mut ids = Vec::with_capacity(width);
        for i in 0..width {
            let name = if width > 1 {
                self.interner.get_or_intern(&format!("{base}${i}"))
            } else {
                decl.identifier.name
            };
            let mut cell = Cell::placeholder(name, decl.span);
            cell.attrs = attrs.clone();
            ids.push(self.cells.alloc(cell));
        }
        self.symbols
            .define(decl.identifier.name, WrappedValue::Cells(ids.clone()));
        Ok(ids)
    }

    /// Moves the module's cells out of the arena, takes a snapshot of every
    /// signal value and stores the module under its placeholder id.
    fn finish(&mut self, id: ModuleId, mut ir: Module, cell_ids: &[CellId]) -> ElectronResult<()> {
        for port in &mut ir.ports {
            for bit in &mut port.bits {
                self.signals.refresh(bit)?;
            }
        }
        for net in &mut ir.nets {
            for bit in &mut net.bits {
                self.signals.refresh(bit)?;
            }
        }
        for &cell_id in cell_ids {
            let mut cell = self.cells[cell_id].clone();
            for assign in &mut cell.assigns {
                for bit in &mut assign.bits {
                    self.signals.refresh(bit)?;
                }
            }
            if cell.module.is_none() {
                self.sink.emit(errors::warning_unbound_cell(
                    self.interner.resolve(cell.name),
                    cell.span,
                ));
            }
            ir.cells.push(cell);
        }
        debug!(
            module = self.interner.resolve(ir.name),
            ports = ir.ports.len(),
            nets = ir.nets.len(),
            cells = ir.cells.len(),
            "module compiled"
        );
        *self.netlist.modules.get_mut(id) = ir;
        Ok(())
    }

    fn eval_assign(&mut self, assign: &ast::Assignment) -> ElectronResult<()> {
        let lhs = self.eval_expr(&assign.lhs)?;
        let rhs = self.eval_expr(&assign.rhs)?;
        trace!(lhs = lhs.tag(), rhs = rhs.tag(), "assignment");
        match (lhs, rhs) {
            (WrappedValue::Cells(lhs), WrappedValue::Cells(rhs)) => {
                if lhs.len() != rhs.len() {
                    self.sink.emit(errors::error_cell_count_mismatch(
                        lhs.len(),
                        rhs.len(),
                        assign.span,
                    ));
                    return Ok(());
                }
                for (l, r) in lhs.into_iter().zip(rhs) {
                    let source = self.cells[r].clone();
                    let target = &mut self.cells[l];
                    target.module = source.module;
                    target.params = source.params;
                    target.assigns = source.assigns;
                }
            }
            (WrappedValue::Sigs(lhs), WrappedValue::Sigs(rhs)) => {
                if lhs.len() != rhs.len() {
                    self.sink.emit(errors::error_width_mismatch(
                        lhs.len(),
                        rhs.len(),
                        assign.span,
                    ));
                    return Ok(());
                }
                for (l, r) in lhs.into_iter().zip(rhs) {
                    let value = self.signals.value(r)?;
                    self.signals.set(l, value)?;
                }
            }
            (WrappedValue::Param(_), WrappedValue::Param(value)) => {
                let mut target = &assign.lhs;
                while let Expr::Tuple(tuple) = target {
                    match tuple.items.as_slice() {
                        [single] => target = single,
                        _ => break,
                    }
                }
                let Expr::Ref(id) = target else {
                    return Err(InternalError::new("parameter assignment to a non-name"));
                };
                let slot = self.symbols.lookup_mut(id.name).ok_or_else(|| {
                    InternalError::new(format!(
                        "`{}` not found",
                        self.interner.resolve(id.name)
                    ))
                })?;
                *slot = WrappedValue::Param(value);
            }
            (lhs, rhs) => {
                self.sink.emit(errors::error_kind_mismatch(
                    lhs.tag(),
                    rhs.tag(),
                    assign.span,
                ));
            }
        }
        Ok(())
    }

    fn lookup(&self, id: ast::Identifier) -> ElectronResult<WrappedValue> {
        self.symbols.lookup(id.name).cloned().ok_or_else(|| {
            InternalError::new(format!("`{}` not found", self.interner.resolve(id.name)))
        })
    }

    fn eval_expr(&mut self, expr: &Expr) -> ElectronResult<WrappedValue> {
        match expr {
            Expr::Literal(lit) => Ok(match &lit.kind {
                LiteralKind::Integer(v) => WrappedValue::Param(Scalar::Int(*v)),
                LiteralKind::Real(v) => WrappedValue::Param(Scalar::Real(*v)),
                LiteralKind::Unit(s) | LiteralKind::String(s) | LiteralKind::Xml(s) => {
                    WrappedValue::Param(Scalar::Str(s.clone()))
                }
                LiteralKind::Bool(b) => WrappedValue::Param(Scalar::Bool(*b)),
                LiteralKind::BitVector(bits) => WrappedValue::Sigs(
                    bits.iter()
                        .map(|level| self.signals.alloc_const(*level))
                        .collect(),
                ),
                LiteralKind::Ident(_) => {
                    return Err(InternalError::new("identifier literal in an expression"))
                }
            }),
            Expr::Tuple(tuple) => self.eval_tuple(tuple),
            Expr::Ref(id) => self.lookup(*id),
            Expr::Range(range) => self.eval_range(range),
            Expr::Inst(inst) => self.eval_inst(inst),
            Expr::BinOp(op) => self.eval_binop(op),
        }
    }

    /// Concatenates signals or cells left to right. A single item is passed
    /// through unchanged.
    fn eval_tuple(&mut self, tuple: &ast::Tuple) -> ElectronResult<WrappedValue> {
        let mut values = tuple
            .items
            .iter()
            .map(|e| self.eval_expr(e))
            .collect::<ElectronResult<Vec<_>>>()?;
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Ok(value);
            }
        }
        if !values.is_empty() && values.iter().all(|v| matches!(v, WrappedValue::Cells(_))) {
            let cells = values
                .into_iter()
                .flat_map(|v| match v {
                    WrappedValue::Cells(cells) => cells,
                    _ => Vec::new(),
                })
                .collect();
            return Ok(WrappedValue::Cells(cells));
        }
        if !values.iter().all(|v| matches!(v, WrappedValue::Sigs(_))) {
            self.sink.emit(errors::error_mixed_concat(tuple.span));
        }
        let sigs: Vec<SigId> = values
            .into_iter()
            .flat_map(|v| match v {
                WrappedValue::Sigs(sigs) => sigs,
                _ => Vec::new(),
            })
            .collect();
        Ok(WrappedValue::Sigs(sigs))
    }

    /// `name[from:to]`, inclusive. Index errors are reported and the
    /// in-bounds part of the range is returned.
    fn eval_range(&mut self, range: &ast::Range) -> ElectronResult<WrappedValue> {
        let target = self.lookup(range.identifier)?;
        let len = match &target {
            WrappedValue::Sigs(sigs) => sigs.len(),
            WrappedValue::Cells(cells) => cells.len(),
            WrappedValue::Param(_) => {
                self.sink.emit(errors::error_range(
                    format!(
                        "Cannot take a range of parameter '{}'.",
                        self.interner.resolve(range.identifier.name)
                    ),
                    range.span,
                ));
                return Ok(WrappedValue::Sigs(Vec::new()));
            }
        } as i64;
        let start = self.eval_index(&range.from)?;
        let end = self.eval_index(&range.to)?;
        if start > end {
            self.sink.emit(errors::error_range(
                format!("Start index '{start}' is larger than end index '{end}'."),
                range.span,
            ));
        }
        if start < 0 {
            self.sink.emit(errors::error_range(
                "Start index out of bounds.".to_string(),
                range.span,
            ));
        }
        if end > len - 1 {
            self.sink.emit(errors::error_range(
                "End index out of bounds.".to_string(),
                range.span,
            ));
        }
        let lo = start.max(0);
        let hi = end.min(len - 1);
        let picked = if lo <= hi {
            lo as usize..hi as usize + 1
        } else {
            0..0
        };
        Ok(match target {
            WrappedValue::Sigs(sigs) => WrappedValue::Sigs(sigs[picked].to_vec()),
            WrappedValue::Cells(cells) => WrappedValue::Cells(cells[picked].to_vec()),
            WrappedValue::Param(scalar) => WrappedValue::Param(scalar),
        })
    }

    fn eval_index(&mut self, expr: &Expr) -> ElectronResult<i64> {
        let value = self.eval_expr(expr)?;
        match value.as_int() {
            Some(index) => Ok(index),
            None => {
                self.sink.emit(errors::error_range(
                    format!("Index must be an integer, found {}.", value.describe()),
                    expr.span(),
                ));
                Ok(0)
            }
        }
    }

    /// A declared width: a non-negative integer of reasonable size. Invalid
    /// widths are reported and treated as zero.
    fn eval_width(&mut self, expr: &Expr) -> ElectronResult<usize> {
        let value = self.eval_expr(expr)?;
        match value.as_int() {
            Some(width) if (0..=MAX_WIDTH).contains(&width) => Ok(width as usize),
            Some(width) if width > MAX_WIDTH => {
                self.sink.emit(errors::error_bad_width(
                    &format!("{width}, which exceeds {MAX_WIDTH}"),
                    expr.span(),
                ));
                Ok(0)
            }
            _ => {
                self.sink
                    .emit(errors::error_bad_width(&value.describe(), expr.span()));
                Ok(0)
            }
        }
    }

    fn eval_binop(&mut self, op: &ast::BinOp) -> ElectronResult<WrappedValue> {
        let lhs = self.eval_expr(&op.lhs)?;
        let rhs = self.eval_expr(&op.rhs)?;
        let symbol = match op.op {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Shl => "<<",
            BinOpKind::Shr => ">>",
        };
        let (Some(l), Some(r)) = (lhs.as_int(), rhs.as_int()) else {
            self.sink.emit(errors::error_arithmetic(
                format!(
                    "operands of `{symbol}` must be integers, found {} and {}",
                    lhs.describe(),
                    rhs.describe()
                ),
                op.span,
            ));
            return Ok(WrappedValue::Param(Scalar::Int(0)));
        };
        let shift = u32::try_from(r).ok();
        let result = match op.op {
            BinOpKind::Add => l.checked_add(r),
            BinOpKind::Sub => l.checked_sub(r),
            BinOpKind::Mul => l.checked_mul(r),
            BinOpKind::Shl => shift.and_then(|r| l.checked_shl(r)),
            BinOpKind::Shr => shift.and_then(|r| l.checked_shr(r)),
        };
        match result {
            Some(value) => Ok(WrappedValue::Param(Scalar::Int(value))),
            None => {
                self.sink.emit(errors::error_arithmetic(
                    format!("`{l} {symbol} {r}` is out of range"),
                    op.span,
                ));
                Ok(WrappedValue::Param(Scalar::Int(0)))
            }
        }
    }

    /// Compiles the instantiated module and returns `width` unnamed cells
    /// bound to it. All replicas share the parameters and connections.
    fn eval_inst(&mut self, inst: &ast::Inst) -> ElectronResult<WrappedValue> {
        let width = self.eval_width(&inst.width)?;
        let target = *self.modules.get(&inst.cell_type.name).ok_or_else(|| {
            InternalError::new(format!(
                "module `{}` not found",
                self.interner.resolve(inst.cell_type.name)
            ))
        })?;
        let params = self.inst_params(inst, target)?;
        let module = self.compile_module(target, params.clone(), inst.span)?;

        let mut assigns = Vec::with_capacity(inst.connections.len());
        for conn in &inst.connections {
            let port_name = self.interner.resolve(conn.port.name);
            let sigs = match self.eval_expr(&conn.value)? {
                WrappedValue::Sigs(sigs) => sigs,
                other => {
                    self.sink.emit(errors::error_connection_not_signals(
                        port_name,
                        other.tag(),
                        conn.value.span(),
                    ));
                    continue;
                }
            };
            let Some(module) = module else {
                continue;
            };
            let port_width = self
                .netlist
                .module(module)
                .port(conn.port.name)
                .map(|p| p.width())
                .ok_or_else(|| {
                    InternalError::new(format!("compiled module has no port `{port_name}`"))
                })?;
            if port_width != sigs.len() {
                self.sink.emit(errors::warning_connection_width(
                    port_name,
                    port_width,
                    sigs.len(),
                    conn.span,
                ));
            }
            let bits = sigs
                .iter()
                .map(|s| self.signals.signal(*s))
                .collect::<ElectronResult<Vec<_>>>()?;
            assigns.push(Assign {
                port: conn.port.name,
                bits,
                span: conn.span,
            });
        }

        let unnamed = self.interner.get_or_intern("");
        let cells = (0..width)
            .map(|_| {
                self.cells.alloc(Cell {
                    name: unnamed,
                    module,
                    params: params.clone(),
                    assigns: assigns.clone(),
                    attrs: Vec::new(),
                    span: inst.span,
                })
            })
            .collect();
        Ok(WrappedValue::Cells(cells))
    }

    /// Evaluates instance parameters: positional ones bind in declaration
    /// order, named ones by name.
    fn inst_params(
        &mut self,
        inst: &ast::Inst,
        target: &ast::Module,
    ) -> ElectronResult<Vec<Param>> {
        let mut params = Vec::with_capacity(inst.params.len());
        let mut positional = 0;
        for param in &inst.params {
            let name = match param.name {
                Some(name) => name.name,
                None => {
                    let decl = target.params.get(positional).ok_or_else(|| {
                        InternalError::new(format!(
                            "too many parameters for `{}`",
                            self.interner.resolve(target.identifier.name)
                        ))
                    })?;
                    positional += 1;
                    decl.identifier.name
                }
            };
            let value = self.eval_expr(&param.value)?;
            if let Some(value) = self.param_value(value, param.span)? {
                params.push(Param { name, value });
            }
        }
        Ok(params)
    }

    /// Validates and compiles attributes. Each occurrence is validated only
    /// the first time it is compiled.
    fn compile_attrs(&mut self, attrs: &[ast::Attribute]) -> ElectronResult<Vec<Attr>> {
        let mut out = Vec::new();
        for attr in attrs {
            let key = (attr.span, attr.name.name);
            if let Some(compiled) = self.attrs.get(&key) {
                out.extend(compiled.iter().cloned());
                continue;
            }
            let name = self.interner.resolve(attr.name.name);
            let handler = self.registry.get(name).ok_or_else(|| {
                InternalError::new(format!("no handler for attribute `@{name}`"))
            })?;
            let mut validated = attr.clone();
            let compiled = if handler.validate(self.sink, &mut validated) {
                handler.compile(&validated)?
            } else {
                Vec::new()
            };
            out.extend(compiled.iter().cloned());
            self.attrs.insert(key, compiled);
        }
        Ok(out)
    }
}

fn direction(kind: TypeKind) -> Option<PortDirection> {
    match kind {
        TypeKind::Input => Some(PortDirection::Input),
        TypeKind::Output => Some(PortDirection::Output),
        TypeKind::Inout => Some(PortDirection::Inout),
        TypeKind::Analog => Some(PortDirection::Analog),
        TypeKind::Net | TypeKind::Cell => None,
    }
}

fn is_port(stmt: &Statement) -> bool {
    matches!(stmt, Statement::Declaration(decl) if decl.ty.kind.is_port())
}
