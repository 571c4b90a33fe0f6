//! Attributes read by schematic generation.

use super::{int_param, str_param, validate_params, xml_param, AttributeHandler, ParamKind};
use crate::errors;
use electron_common::ElectronResult;
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_elaborate::ast::Attribute;
use electron_ir::{Attr, AttrKey};

/// `@skin(<svg>...</svg>)`
pub struct Skin;

impl AttributeHandler for Skin {
    fn name(&self) -> &'static str {
        "skin"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "'@skin' takes one parameter of type Xml",
            &[ParamKind::Xml],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (xml, _) = xml_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Skin, xml, attr.span)])
    }
}

/// `@rotate(angle)` with the angle one of 0, 90, 180 or 270.
pub struct Rotate;

const ROTATE_MESSAGE: &str = "'@rotate' takes one parameter of type Integer";
const ROTATE_HELP: &str = "allowed values are 0, 90, 180, 270";

impl AttributeHandler for Rotate {
    fn name(&self) -> &'static str {
        "rotate"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        if !validate_params(sink, attr, ROTATE_MESSAGE, &[ParamKind::Integer]) {
            return false;
        }
        match int_param(attr, 0) {
            Ok((0 | 90 | 180 | 270, _)) => true,
            Ok((_, span)) => {
                sink.emit(
                    Diagnostic::error(errors::E401, ROTATE_MESSAGE, span).with_help(ROTATE_HELP),
                );
                false
            }
            Err(_) => false,
        }
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (angle, _) = int_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Rotate, angle, attr.span)])
    }
}

/// `@left`, `@right`, `@top`, `@bottom`: the schematic side of a port.
pub struct Side {
    name: &'static str,
}

impl Side {
    /// `@left`
    pub const LEFT: Side = Side { name: "left" };
    /// `@right`
    pub const RIGHT: Side = Side { name: "right" };
    /// `@top`
    pub const TOP: Side = Side { name: "top" };
    /// `@bottom`
    pub const BOTTOM: Side = Side { name: "bottom" };
}

impl AttributeHandler for Side {
    fn name(&self) -> &'static str {
        self.name
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(sink, attr, &no_params(self.name), &[])
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        Ok(vec![Attr::at(AttrKey::Side, self.name, attr.span)])
    }
}

/// `@fixed(x, y)`: fixed schematic coordinates of a port.
pub struct Fixed;

impl AttributeHandler for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@fixed takes two params of type Integer.",
            &[ParamKind::Integer, ParamKind::Integer],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (x, x_span) = int_param(attr, 0)?;
        let (y, y_span) = int_param(attr, 1)?;
        Ok(vec![
            Attr::at(AttrKey::PortX, x, x_span),
            Attr::at(AttrKey::PortY, y, y_span),
        ])
    }
}

/// `@group("name")`
pub struct Group;

impl AttributeHandler for Group {
    fn name(&self) -> &'static str {
        "group"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@group takes one parameter of type String.",
            &[ParamKind::String],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (group, _) = str_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Group, group, attr.span)])
    }
}

/// `@power` and `@ground`: split the net into an implicit supply rail.
pub struct Supply {
    name: &'static str,
    rail: &'static str,
}

impl Supply {
    /// `@power`, rail `$vcc`.
    pub const POWER: Supply = Supply {
        name: "power",
        rail: "$vcc",
    };
    /// `@ground`, rail `$gnd`.
    pub const GROUND: Supply = Supply {
        name: "ground",
        rail: "$gnd",
    };
}

impl AttributeHandler for Supply {
    fn name(&self) -> &'static str {
        self.name
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(sink, attr, &no_params(self.name), &[])
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        Ok(vec![Attr::at(AttrKey::Splitnet, self.rail, attr.span)])
    }
}

pub(super) fn no_params(name: &str) -> String {
    format!("@{name} takes no params.")
}
