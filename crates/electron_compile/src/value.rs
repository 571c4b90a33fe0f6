//! Values bound in the symbol table during compilation.

use electron_common::Logic;
use electron_ir::{CellId, ParamValue, SigId};
use std::fmt;

/// A compile-time scalar.
#[derive(Clone, PartialEq, Debug)]
pub enum Scalar {
    /// An integer.
    Int(i64),
    /// A real number.
    Real(f64),
    /// A string, unit literal or xml text.
    Str(String),
    /// A flag.
    Bool(bool),
}

impl Scalar {
    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The parameter value carrying this scalar.
    pub fn to_param(&self) -> ParamValue {
        match self {
            Scalar::Int(v) => ParamValue::Int(*v),
            Scalar::Real(v) => ParamValue::Real(*v),
            Scalar::Str(s) => ParamValue::Str(s.clone()),
            Scalar::Bool(b) => ParamValue::Bool(*b),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{v}"),
            Scalar::Real(v) => write!(f, "{v}"),
            Scalar::Str(s) => write!(f, "\"{s}\""),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// What a name or expression evaluates to.
///
/// The tag decides how assignment and slicing behave and is never lost:
/// slicing signals gives signals, slicing cells gives cells.
#[derive(Clone, PartialEq, Debug)]
pub enum WrappedValue {
    /// A scalar parameter.
    Param(Scalar),
    /// An ordered list of signals, bit 0 first.
    Sigs(Vec<SigId>),
    /// An ordered list of cells.
    Cells(Vec<CellId>),
}

impl WrappedValue {
    /// Name of the tag, used in diagnostics and internal errors.
    pub fn tag(&self) -> &'static str {
        match self {
            WrappedValue::Param(_) => "a parameter",
            WrappedValue::Sigs(_) => "signals",
            WrappedValue::Cells(_) => "cells",
        }
    }

    /// The integer, if this is an integer parameter.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            WrappedValue::Param(scalar) => scalar.as_int(),
            _ => None,
        }
    }

    /// Short description of the value for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            WrappedValue::Param(scalar) => scalar.to_string(),
            WrappedValue::Sigs(sigs) => format!("{} signal(s)", sigs.len()),
            WrappedValue::Cells(cells) => format!("{} cell(s)", cells.len()),
        }
    }
}

/// A parameter value split into what the symbol table can bind directly and
/// constant bits that still need signals allocated.
pub enum Unwrapped {
    /// A scalar.
    Scalar(Scalar),
    /// Constant bits, bit 0 first.
    Bits(Vec<Logic>),
}

impl From<&ParamValue> for Unwrapped {
    fn from(value: &ParamValue) -> Self {
        match value {
            ParamValue::Int(v) => Unwrapped::Scalar(Scalar::Int(*v)),
            ParamValue::Real(v) => Unwrapped::Scalar(Scalar::Real(*v)),
            ParamValue::Str(s) => Unwrapped::Scalar(Scalar::Str(s.clone())),
            ParamValue::Bool(b) => Unwrapped::Scalar(Scalar::Bool(*b)),
            ParamValue::Bits(bits) => Unwrapped::Bits(bits.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags() {
        assert_eq!(WrappedValue::Param(Scalar::Int(1)).tag(), "a parameter");
        assert_eq!(WrappedValue::Sigs(vec![]).tag(), "signals");
        assert_eq!(WrappedValue::Cells(vec![]).tag(), "cells");
    }

    #[test]
    fn only_integers_convert() {
        assert_eq!(WrappedValue::Param(Scalar::Int(8)).as_int(), Some(8));
        assert_eq!(WrappedValue::Param(Scalar::Str("8".into())).as_int(), None);
        assert_eq!(WrappedValue::Sigs(vec![SigId::from_raw(0)]).as_int(), None);
    }

    #[test]
    fn param_roundtrip() {
        let v = Scalar::Real(1.5).to_param();
        let Unwrapped::Scalar(back) = Unwrapped::from(&v) else {
            panic!("expected scalar");
        };
        assert_eq!(back, Scalar::Real(1.5));
    }
}
