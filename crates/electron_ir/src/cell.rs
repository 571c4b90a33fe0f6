//! Cells: instances of modules inside a parent module.

use crate::attr::Attr;
use crate::ids::ModuleId;
use crate::signal::Signal;
use electron_common::{Ident, Logic};
use electron_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parameter value bound at instantiation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ParamValue {
    /// An integer.
    Int(i64),
    /// A real number.
    Real(f64),
    /// A string, unit literal or xml text.
    Str(String),
    /// A flag.
    Bool(bool),
    /// Constant bits, bit 0 first.
    Bits(Vec<Logic>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Real(v) => write!(f, "{v}"),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Bits(bits) => {
                write!(f, "{}'", bits.len())?;
                bits.iter().rev().try_for_each(|b| write!(f, "{b}"))
            }
        }
    }
}

/// A named parameter of a cell.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name in the instantiated module.
    pub name: Ident,
    /// Bound value.
    pub value: ParamValue,
}

/// Connects a port of the instantiated module to signals of the parent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assign {
    /// Port of the instantiated module.
    pub port: Ident,
    /// Parent signals, bit 0 first.
    pub bits: Vec<Signal>,
    /// The connection in source.
    pub span: Span,
}

/// A cell inside a module.
///
/// `module` is `None` for a `cell` placeholder that was never bound to an
/// instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Instance name; empty for an anonymous instance.
    pub name: Ident,
    /// The instantiated module.
    pub module: Option<ModuleId>,
    /// Bound parameters in order.
    pub params: Vec<Param>,
    /// Port connections in order.
    pub assigns: Vec<Assign>,
    /// Compiled attributes.
    pub attrs: Vec<Attr>,
    /// Declaration or instantiation.
    pub span: Span,
}

impl Cell {
    /// A cell with no module, params or connections.
    pub fn placeholder(name: Ident, span: Span) -> Self {
        Self {
            name,
            module: None,
            params: Vec::new(),
            assigns: Vec::new(),
            attrs: Vec::new(),
            span,
        }
    }

    /// The connection of `port`, if any.
    pub fn assign(&self, port: Ident) -> Option<&Assign> {
        self.assigns.iter().find(|a| a.port == port)
    }
}
