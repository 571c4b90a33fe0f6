//! Compiled attributes: the key/value metadata read by downstream tools.
//!
//! The key vocabulary is a stable contract; [`AttrKey::as_str`] gives the
//! exact strings consumers match on.

use electron_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute keys understood by downstream tools.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrKey {
    /// Schematic skin (xml).
    Skin,
    /// Schematic rotation in degrees.
    Rotate,
    /// Schematic side of a port: `left`, `right`, `top` or `bottom`.
    Side,
    /// Fixed schematic x coordinate.
    PortX,
    /// Fixed schematic y coordinate.
    PortY,
    /// Schematic group.
    Group,
    /// Implicit supply rail a net is split into.
    Splitnet,
    /// Register initial value.
    Init,
    /// Manufacturer.
    Man,
    /// Manufacturer part number.
    Mpn,
    /// Component value.
    Value,
    /// PCB footprint.
    Footprint,
    /// Pad names of a port.
    Pads,
    /// FPGA target triple.
    Fpga,
    /// Target board.
    Board,
    /// Source name of a module.
    Name,
    /// The module is a foreign declaration.
    Declare,
    /// Module documentation.
    Doc,
    /// The module is exported.
    Export,
    /// The module was imported from a package.
    Import,
    /// Reserved for anonymous modules; never emitted by the compiler.
    Anonymous,
}

impl AttrKey {
    /// Every key, in declaration order.
    pub const ALL: [AttrKey; 21] = [
        AttrKey::Skin,
        AttrKey::Rotate,
        AttrKey::Side,
        AttrKey::PortX,
        AttrKey::PortY,
        AttrKey::Group,
        AttrKey::Splitnet,
        AttrKey::Init,
        AttrKey::Man,
        AttrKey::Mpn,
        AttrKey::Value,
        AttrKey::Footprint,
        AttrKey::Pads,
        AttrKey::Fpga,
        AttrKey::Board,
        AttrKey::Name,
        AttrKey::Declare,
        AttrKey::Doc,
        AttrKey::Export,
        AttrKey::Import,
        AttrKey::Anonymous,
    ];

    /// The wire name of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            AttrKey::Skin => "skin",
            AttrKey::Rotate => "rotate",
            AttrKey::Side => "side",
            AttrKey::PortX => "port_x",
            AttrKey::PortY => "port_y",
            AttrKey::Group => "group",
            AttrKey::Splitnet => "splitnet",
            AttrKey::Init => "init",
            AttrKey::Man => "man",
            AttrKey::Mpn => "mpn",
            AttrKey::Value => "value",
            AttrKey::Footprint => "footprint",
            AttrKey::Pads => "pads",
            AttrKey::Fpga => "fpga",
            AttrKey::Board => "board",
            AttrKey::Name => "name",
            AttrKey::Declare => "declare",
            AttrKey::Doc => "doc",
            AttrKey::Export => "export",
            AttrKey::Import => "import",
            AttrKey::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// An integer.
    Int(i64),
    /// A string.
    Str(String),
    /// A flag.
    Bool(bool),
    /// A list of strings.
    List(Vec<String>),
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

/// A compiled attribute.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Attr {
    /// The key.
    pub key: AttrKey,
    /// The value.
    pub value: AttrValue,
    /// Where the annotation was written, if it came from source.
    pub span: Option<Span>,
}

impl Attr {
    /// An attribute synthesized by the compiler.
    pub fn new(key: AttrKey, value: impl Into<AttrValue>) -> Self {
        Self {
            key,
            value: value.into(),
            span: None,
        }
    }

    /// An attribute compiled from a source annotation.
    pub fn at(key: AttrKey, value: impl Into<AttrValue>, span: Span) -> Self {
        Self {
            key,
            value: value.into(),
            span: Some(span),
        }
    }
}

/// Looks up the first attribute with `key`.
pub fn find_attr(attrs: &[Attr], key: AttrKey) -> Option<&Attr> {
    attrs.iter().find(|a| a.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_names() {
        for key in AttrKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn vocabulary_is_stable() {
        let names: Vec<_> = AttrKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "skin", "rotate", "side", "port_x", "port_y", "group", "splitnet", "init", "man",
                "mpn", "value", "footprint", "pads", "fpga", "board", "name", "declare", "doc",
                "export", "import", "anonymous",
            ]
        );
    }

    #[test]
    fn value_serializes_untagged() {
        let attr = Attr::new(AttrKey::Rotate, 90);
        let json = serde_json::to_value(&attr).unwrap();
        assert_eq!(json["key"], "rotate");
        assert_eq!(json["value"], 90);
        assert!(json["span"].is_null());
    }

    #[test]
    fn find_first() {
        let attrs = vec![
            Attr::new(AttrKey::Side, "left"),
            Attr::new(AttrKey::Side, "top"),
        ];
        assert_eq!(
            find_attr(&attrs, AttrKey::Side).map(|a| &a.value),
            Some(&AttrValue::Str("left".into()))
        );
        assert!(find_attr(&attrs, AttrKey::Doc).is_none());
    }
}
