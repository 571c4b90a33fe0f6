//! Attribute handlers and the registry the compiler consults.
//!
//! Every `@name(...)` annotation is looked up by name in the
//! [`AttributeRegistry`]. The handler first validates the parameters against
//! its signature, reporting problems to the sink, and then compiles the
//! annotation into IR [`Attr`]s. Handlers are grouped by the downstream tool
//! that reads their output:
//!
//! - **schematic**: `skin`, `rotate`, `left`, `right`, `top`, `bottom`,
//!   `fixed`, `group`, `power`, `ground`
//! - **parts**: `cpl`, `bom`, `footprint`, `value`, `set_pad`
//! - **target**: `clock`, `init`, `model`, `fpga`, `board`, `bitstream`

mod parts;
mod schematic;
mod target;

pub use parts::{Bom, Cpl, Footprint, SetPad, Value};
pub use schematic::{Fixed, Group, Rotate, Side, Skin, Supply};
pub use target::{Bitstream, Board, Clock, Fpga, Init, Model};

use crate::catalog::PartsCatalog;
use crate::errors;
use electron_common::{ElectronResult, InternalError};
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_elaborate::ast::{Attribute, LiteralKind};
use electron_ir::Attr;
use electron_source::Span;
use std::collections::BTreeMap;

/// Validation and compilation of one attribute name.
pub trait AttributeHandler: Send + Sync {
    /// The attribute name without `@`.
    fn name(&self) -> &'static str;

    /// Checks the parameters, reporting every problem to `sink`.
    ///
    /// Returns `false` if the attribute must not be compiled. A handler may
    /// add resolved parameters to `attr` for [`compile`](Self::compile).
    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool;

    /// Compiles a validated attribute.
    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>>;
}

/// Literal kinds an attribute parameter can be required to have.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamKind {
    /// An integer literal.
    Integer,
    /// A string literal.
    String,
    /// An xml literal.
    Xml,
}

impl ParamKind {
    /// Returns `true` if `literal` has this kind.
    pub fn accepts(self, literal: &LiteralKind) -> bool {
        matches!(
            (self, literal),
            (ParamKind::Integer, LiteralKind::Integer(_))
                | (ParamKind::String, LiteralKind::String(_))
                | (ParamKind::Xml, LiteralKind::Xml(_))
        )
    }
}

/// Checks `attr` against the positional signature `kinds`.
///
/// Too few parameters is reported at the attribute; a surplus parameter or
/// one of the wrong kind is reported at the parameter. Every problem is
/// reported, each with `message`.
pub fn validate_params(
    sink: &DiagnosticSink,
    attr: &Attribute,
    message: &str,
    kinds: &[ParamKind],
) -> bool {
    let mut ok = true;
    if attr.params.len() < kinds.len() {
        sink.emit(Diagnostic::error(errors::E400, message, attr.span));
        ok = false;
    }
    for (i, param) in attr.params.iter().enumerate() {
        let fits = kinds.get(i).is_some_and(|k| k.accepts(&param.value.kind));
        if !fits {
            sink.emit(Diagnostic::error(errors::E400, message, param.value.span));
            ok = false;
        }
    }
    ok
}

pub(crate) fn int_param(attr: &Attribute, index: usize) -> ElectronResult<(i64, Span)> {
    match attr.params.get(index).map(|p| (&p.value.kind, p.value.span)) {
        Some((LiteralKind::Integer(v), span)) => Ok((*v, span)),
        _ => Err(param_mismatch(attr, index, "integer")),
    }
}

pub(crate) fn str_param(attr: &Attribute, index: usize) -> ElectronResult<(&str, Span)> {
    match attr.params.get(index).map(|p| (&p.value.kind, p.value.span)) {
        Some((LiteralKind::String(s), span)) => Ok((s.as_str(), span)),
        _ => Err(param_mismatch(attr, index, "string")),
    }
}

pub(crate) fn xml_param(attr: &Attribute, index: usize) -> ElectronResult<(&str, Span)> {
    match attr.params.get(index).map(|p| (&p.value.kind, p.value.span)) {
        Some((LiteralKind::Xml(s), span)) => Ok((s.as_str(), span)),
        _ => Err(param_mismatch(attr, index, "xml")),
    }
}

fn param_mismatch(attr: &Attribute, index: usize, expected: &str) -> InternalError {
    InternalError::new(format!(
        "validated attribute at {}..{} has no {expected} parameter {index}",
        attr.span.start, attr.span.end
    ))
}

/// All attribute handlers, by name.
pub struct AttributeRegistry {
    handlers: BTreeMap<&'static str, Box<dyn AttributeHandler>>,
}

impl AttributeRegistry {
    /// A registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// A registry with every built-in handler; `@cpl` resolves against
    /// `catalog`.
    pub fn new(catalog: PartsCatalog) -> Self {
        let mut registry = Self::empty();
        register_builtin_handlers(&mut registry, catalog);
        registry
    }

    /// Adds a handler, replacing one registered under the same name.
    pub fn register(&mut self, handler: Box<dyn AttributeHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    /// The handler for `name`.
    pub fn get(&self, name: &str) -> Option<&dyn AttributeHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Returns `true` if `name` has a handler.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Registers the 21 built-in handlers.
pub fn register_builtin_handlers(registry: &mut AttributeRegistry, catalog: PartsCatalog) {
    // Schematic
    registry.register(Box::new(Skin));
    registry.register(Box::new(Rotate));
    registry.register(Box::new(Side::LEFT));
    registry.register(Box::new(Side::RIGHT));
    registry.register(Box::new(Side::TOP));
    registry.register(Box::new(Side::BOTTOM));
    registry.register(Box::new(Fixed));
    registry.register(Box::new(Group));
    registry.register(Box::new(Supply::POWER));
    registry.register(Box::new(Supply::GROUND));
    // RTL
    registry.register(Box::new(Clock));
    registry.register(Box::new(Init));
    // Parts
    registry.register(Box::new(Cpl::new(catalog)));
    registry.register(Box::new(Bom));
    // Simulation
    registry.register(Box::new(Model));
    // PCB
    registry.register(Box::new(Footprint));
    registry.register(Box::new(Value));
    registry.register(Box::new(SetPad));
    // Bitstream
    registry.register(Box::new(Fpga));
    registry.register(Box::new(Board));
    registry.register(Box::new(Bitstream));
}

#[cfg(test)]
pub(crate) mod test_support {
    use electron_common::Interner;
    use electron_elaborate::ast::{Attribute, Identifier, Literal, LiteralKind, Parameter};
    use electron_source::{FileId, Span};

    pub fn span(start: u32) -> Span {
        Span::new(FileId::from_raw(0), start, start + 1)
    }

    /// `@name(params...)` with the attribute at span 0 and parameter `i` at
    /// span `10 * (i + 1)`.
    pub fn attr(interner: &Interner, name: &str, params: Vec<LiteralKind>) -> Attribute {
        Attribute {
            name: Identifier {
                name: interner.get_or_intern(name),
                span: span(0),
            },
            params: params
                .into_iter()
                .enumerate()
                .map(|(i, kind)| Parameter {
                    name: None,
                    value: Literal {
                        kind,
                        span: span(10 * (i as u32 + 1)),
                    },
                })
                .collect(),
            span: span(0),
        }
    }
}
