//! IR modules.

use crate::attr::{find_attr, Attr, AttrKey};
use crate::cell::Cell;
use crate::port::{Net, Port};
use electron_common::Ident;
use electron_source::Span;
use serde::{Deserialize, Serialize};

/// A compiled module: ports, nets and cells in declaration order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    /// Emitted name; mangled for specialized instantiations.
    pub name: Ident,
    /// Ports in declaration order.
    pub ports: Vec<Port>,
    /// Nets in declaration order.
    pub nets: Vec<Net>,
    /// Cells in declaration order.
    pub cells: Vec<Cell>,
    /// Compiled attributes.
    pub attrs: Vec<Attr>,
    /// The module definition.
    pub span: Span,
}

impl Module {
    /// An empty module.
    pub fn new(name: Ident, span: Span) -> Self {
        Self {
            name,
            ports: Vec::new(),
            nets: Vec::new(),
            cells: Vec::new(),
            attrs: Vec::new(),
            span,
        }
    }

    /// Looks up a port by name.
    pub fn port(&self, name: Ident) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Looks up a net by name.
    pub fn net(&self, name: Ident) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name)
    }

    /// Looks up the first attribute with `key`.
    pub fn attr(&self, key: AttrKey) -> Option<&Attr> {
        find_attr(&self.attrs, key)
    }

    /// Returns `true` for foreign declarations.
    pub fn is_declared(&self) -> bool {
        self.attr(AttrKey::Declare).is_some()
    }
}
