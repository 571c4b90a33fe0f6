//! Ports and nets: named, ordered groups of signals.

use crate::attr::Attr;
use crate::signal::Signal;
use electron_common::Ident;
use electron_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction or kind of a port.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Driven from outside.
    Input,
    /// Driven from inside.
    Output,
    /// Either way.
    Inout,
    /// Analog pin.
    Analog,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
            PortDirection::Inout => "inout",
            PortDirection::Analog => "analog",
        })
    }
}

/// A module port. `bits[i]` is bit `i`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Port {
    /// Port name.
    pub name: Ident,
    /// Direction.
    pub direction: PortDirection,
    /// Signals, bit 0 first.
    pub bits: Vec<Signal>,
    /// Compiled attributes.
    pub attrs: Vec<Attr>,
    /// Declaration.
    pub span: Span,
}

impl Port {
    /// Number of bits.
    pub fn width(&self) -> usize {
        self.bits.len()
    }
}

/// An internal net. `bits[i]` is bit `i`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Net {
    /// Net name.
    pub name: Ident,
    /// Signals, bit 0 first.
    pub bits: Vec<Signal>,
    /// Compiled attributes.
    pub attrs: Vec<Attr>,
    /// Declaration.
    pub span: Span,
}

impl Net {
    /// Number of bits.
    pub fn width(&self) -> usize {
        self.bits.len()
    }
}
