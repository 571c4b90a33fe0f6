//! Attributes read by simulation, RTL and bitstream tools.

use super::schematic::no_params;
use super::{int_param, str_param, validate_params, AttributeHandler, ParamKind};
use crate::errors;
use electron_common::ElectronResult;
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_elaborate::ast::Attribute;
use electron_ir::{Attr, AttrKey};

/// `@clock`: accepted and checked, produces nothing yet.
pub struct Clock;

impl AttributeHandler for Clock {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(sink, attr, &no_params("clock"), &[])
    }

    fn compile(&self, _attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        Ok(Vec::new())
    }
}

/// `@init(value)`: register initial value.
pub struct Init;

impl AttributeHandler for Init {
    fn name(&self) -> &'static str {
        "init"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@init takes one parameter of type Integer.",
            &[ParamKind::Integer],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (value, _) = int_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Init, value, attr.span)])
    }
}

/// `@model(...)`: reserved for simulation; any parameters, no output.
pub struct Model;

impl AttributeHandler for Model {
    fn name(&self) -> &'static str {
        "model"
    }

    fn validate(&self, _sink: &DiagnosticSink, _attr: &mut Attribute) -> bool {
        true
    }

    fn compile(&self, _attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        Ok(Vec::new())
    }
}

/// `@fpga("ARCH-FAMILY-PACKAGE")`
pub struct Fpga;

impl AttributeHandler for Fpga {
    fn name(&self) -> &'static str {
        "fpga"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        if !validate_params(
            sink,
            attr,
            "@fpga takes a target triple ARCH-FAMILY-PACKAGE.",
            &[ParamKind::String],
        ) {
            return false;
        }
        match str_param(attr, 0) {
            Ok((triple, _)) if triple.split('-').count() == 3 => true,
            Ok((_, span)) => {
                sink.emit(Diagnostic::error(errors::E401, "Invalid target triple.", span));
                false
            }
            Err(_) => false,
        }
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (triple, _) = str_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Fpga, triple, attr.span)])
    }
}

/// `@board("id")`
pub struct Board;

impl AttributeHandler for Board {
    fn name(&self) -> &'static str {
        "board"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@board takes a parameter of type String.",
            &[ParamKind::String],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (board, _) = str_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Board, board, attr.span)])
    }
}

/// `@bitstream(...)`: reserved; any parameters, no output.
pub struct Bitstream;

impl AttributeHandler for Bitstream {
    fn name(&self) -> &'static str {
        "bitstream"
    }

    fn validate(&self, _sink: &DiagnosticSink, _attr: &mut Attribute) -> bool {
        true
    }

    fn compile(&self, _attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::attr;
    use super::*;
    use electron_common::Interner;
    use electron_elaborate::ast::LiteralKind;
    use electron_ir::AttrValue;

    #[test]
    fn fpga_triple() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut good = attr(
            &interner,
            "fpga",
            vec![LiteralKind::String("ice40-hx1k-tq144".into())],
        );
        assert!(Fpga.validate(&sink, &mut good));
        assert_eq!(
            Fpga.compile(&good).unwrap()[0].value,
            AttrValue::Str("ice40-hx1k-tq144".into())
        );
        let mut bad = attr(&interner, "fpga", vec![LiteralKind::String("ice40-hx1k".into())]);
        assert!(!Fpga.validate(&sink, &mut bad));
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "Invalid target triple.");
    }

    #[test]
    fn reserved_attributes_compile_to_nothing() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut model = attr(&interner, "model", vec![LiteralKind::Bool(true)]);
        assert!(Model.validate(&sink, &mut model));
        assert!(Model.compile(&model).unwrap().is_empty());
        let mut bitstream = attr(&interner, "bitstream", vec![]);
        assert!(Bitstream.validate(&sink, &mut bitstream));
        assert!(Bitstream.compile(&bitstream).unwrap().is_empty());
        let mut clock = attr(&interner, "clock", vec![]);
        assert!(Clock.validate(&sink, &mut clock));
        assert!(Clock.compile(&clock).unwrap().is_empty());
        assert!(!sink.has_errors());
    }

    #[test]
    fn init_and_board() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let mut init = attr(&interner, "init", vec![LiteralKind::Integer(5)]);
        assert!(Init.validate(&sink, &mut init));
        assert_eq!(Init.compile(&init).unwrap()[0].key, AttrKey::Init);
        let mut board = attr(&interner, "board", vec![LiteralKind::Integer(5)]);
        assert!(!Board.validate(&sink, &mut board));
    }
}
