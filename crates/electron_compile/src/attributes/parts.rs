//! Attributes read by BOM and PCB generation.

use super::{int_param, str_param, validate_params, AttributeHandler, ParamKind};
use crate::catalog::PartsCatalog;
use crate::errors;
use electron_common::{ElectronResult, InternalError};
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_elaborate::ast::{Attribute, Literal, LiteralKind, Parameter};
use electron_ir::{Attr, AttrKey, AttrValue};

/// `@cpl("10k 0603 resistor")`: picks a part from the catalog.
///
/// Validation resolves the query and appends the matched catalog key as a
/// second string parameter; compilation reads it back.
pub struct Cpl {
    catalog: PartsCatalog,
}

impl Cpl {
    /// A handler resolving against `catalog`.
    pub fn new(catalog: PartsCatalog) -> Self {
        Self { catalog }
    }
}

impl AttributeHandler for Cpl {
    fn name(&self) -> &'static str {
        "cpl"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        if !validate_params(
            sink,
            attr,
            "@cpl takes a parameter of type String.",
            &[ParamKind::String],
        ) {
            return false;
        }
        let Ok((query, span)) = str_param(attr, 0) else {
            return false;
        };
        let Some(key) = self.catalog.resolve(query) else {
            sink.emit(Diagnostic::error(
                errors::E402,
                format!("No CPL matches found for '{query}'."),
                span,
            ));
            return false;
        };
        let key = key.to_string();
        attr.params.push(Parameter {
            name: None,
            value: Literal {
                kind: LiteralKind::String(key),
                span,
            },
        });
        true
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (key, span) = str_param(attr, 1)?;
        let part = self
            .catalog
            .get(key)
            .ok_or_else(|| InternalError::new(format!("resolved part `{key}` left the catalog")))?;
        Ok(vec![
            Attr::at(AttrKey::Man, "CPL", span),
            Attr::at(AttrKey::Mpn, key, span),
            Attr::new(AttrKey::Value, part.value.clone().unwrap_or_default()),
            Attr::new(
                AttrKey::Footprint,
                part.footprint.clone().unwrap_or_default(),
            ),
        ])
    }
}

/// `@bom("manufacturer", "part number")`
pub struct Bom;

impl AttributeHandler for Bom {
    fn name(&self) -> &'static str {
        "bom"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@bom takes two params of type String.",
            &[ParamKind::String, ParamKind::String],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (man, man_span) = str_param(attr, 0)?;
        let (mpn, mpn_span) = str_param(attr, 1)?;
        Ok(vec![
            Attr::at(AttrKey::Man, man, man_span),
            Attr::at(AttrKey::Mpn, mpn, mpn_span),
        ])
    }
}

/// `@footprint("0603")`
pub struct Footprint;

impl AttributeHandler for Footprint {
    fn name(&self) -> &'static str {
        "footprint"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@footprint takes one param of type String.",
            &[ParamKind::String],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (fp, _) = str_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Footprint, fp, attr.span)])
    }
}

/// `@value("10k")`
pub struct Value;

impl AttributeHandler for Value {
    fn name(&self) -> &'static str {
        "value"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        validate_params(
            sink,
            attr,
            "@value takes one param of type String.",
            &[ParamKind::String],
        )
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let (value, _) = str_param(attr, 0)?;
        Ok(vec![Attr::at(AttrKey::Value, value, attr.span)])
    }
}

/// `@set_pad("A1", 2, ...)`: pad names of a port.
pub struct SetPad;

const SET_PAD_MESSAGE: &str = "@set_pad takes at least one param of type String or Integer.";

impl AttributeHandler for SetPad {
    fn name(&self) -> &'static str {
        "set_pad"
    }

    fn validate(&self, sink: &DiagnosticSink, attr: &mut Attribute) -> bool {
        let mut ok = true;
        if attr.params.is_empty() {
            sink.emit(Diagnostic::error(errors::E400, SET_PAD_MESSAGE, attr.span));
            ok = false;
        }
        for param in &attr.params {
            let fits = ParamKind::String.accepts(&param.value.kind)
                || ParamKind::Integer.accepts(&param.value.kind);
            if !fits {
                sink.emit(Diagnostic::error(
                    errors::E400,
                    SET_PAD_MESSAGE,
                    param.value.span,
                ));
                ok = false;
            }
        }
        ok
    }

    fn compile(&self, attr: &Attribute) -> ElectronResult<Vec<Attr>> {
        let pads = (0..attr.params.len())
            .map(|i| match str_param(attr, i) {
                Ok((pad, _)) => Ok(pad.to_string()),
                Err(_) => int_param(attr, i).map(|(pad, _)| pad.to_string()),
            })
            .collect::<ElectronResult<Vec<_>>>()?;
        Ok(vec![Attr::new(AttrKey::Pads, AttrValue::List(pads))])
    }
}
