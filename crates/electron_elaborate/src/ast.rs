//! The abstract syntax tree handed from the elaborator to the compiler.
//!
//! Nodes are plain data and are not modified after elaboration. Names are
//! interned [`Ident`]s; every node keeps the span it came from.

use electron_common::{Ident, Logic};
use electron_source::Span;
use serde::{Deserialize, Serialize};

/// A name and where it was written.
///
/// Two identifiers denote the same thing when their names are equal; the span
/// does not take part in comparisons.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Identifier {
    /// The interned name.
    pub name: Ident,
    /// Source location.
    pub span: Span,
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Identifier {}

/// An elaborated source unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Design {
    /// `//!` documentation of the unit.
    pub doc: Option<String>,
    /// Imports in source order, one per imported name.
    pub imports: Vec<Import>,
    /// Modules in source order.
    pub modules: Vec<Module>,
}

/// One imported name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Import {
    /// The imported module name.
    pub identifier: Identifier,
    /// Package the module comes from, without quotes.
    pub package: String,
    /// The import statement.
    pub span: Span,
}

/// A module definition or foreign declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub identifier: Identifier,
    /// Marked `export`.
    pub exported: bool,
    /// Marked `declare`: a foreign signature with ports only.
    pub declaration: bool,
    /// Brought in through an import.
    pub imported: bool,
    /// `///` documentation.
    pub doc: Option<String>,
    /// Module attributes.
    pub attributes: Vec<Attribute>,
    /// Parameters in declaration order.
    pub params: Vec<ModuleParam>,
    /// Body statements, flattened.
    pub statements: Vec<Statement>,
    /// The whole module.
    pub span: Span,
}

impl Module {
    /// Iterates over the declarations of the module body.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Declaration(d) => Some(d),
            _ => None,
        })
    }

    /// Iterates over the port declarations of the module body.
    pub fn ports(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations().filter(|d| d.ty.kind.is_port())
    }
}

/// A module parameter with optional default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleParam {
    /// Parameter name.
    pub identifier: Identifier,
    /// Default value, evaluated when an instance does not bind the parameter.
    pub default: Option<Expr>,
}

/// `@name(params...)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name without the `@`.
    pub name: Identifier,
    /// Parameters in order.
    pub params: Vec<Parameter>,
    /// The whole attribute.
    pub span: Span,
}

/// An attribute parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Optional parameter name.
    pub name: Option<Identifier>,
    /// The value.
    pub value: Literal,
}

/// A literal and its location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    /// The value.
    pub kind: LiteralKind,
    /// Source location.
    pub span: Span,
}

/// Literal values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LiteralKind {
    /// A constant bit vector; index 0 is the least significant bit.
    BitVector(Vec<Logic>),
    /// An integer.
    Integer(i64),
    /// A real number.
    Real(f64),
    /// A number with engineering suffix, kept as written (`4.7uF`).
    Unit(String),
    /// A string without quotes.
    String(String),
    /// `true` or `false`.
    Bool(bool),
    /// An xml element, verbatim.
    Xml(String),
    /// A bare name (attribute parameters only).
    Ident(Ident),
}

impl LiteralKind {
    /// Short name of the literal kind, used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            LiteralKind::BitVector(_) => "bit vector",
            LiteralKind::Integer(_) => "integer",
            LiteralKind::Real(_) => "real",
            LiteralKind::Unit(_) => "unit",
            LiteralKind::String(_) => "string",
            LiteralKind::Bool(_) => "boolean",
            LiteralKind::Xml(_) => "xml",
            LiteralKind::Ident(_) => "identifier",
        }
    }
}

/// A body statement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Statement {
    /// `const name;`
    Const(Identifier),
    /// A typed port, net or cell declaration.
    Declaration(Declaration),
    /// `lhs = rhs`
    Assignment(Assignment),
    /// A dotted name carrying attributes for an existing item.
    Fqn(Fqn),
}

/// One declared name with its type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Declaration {
    /// Declared name.
    pub identifier: Identifier,
    /// Declared type.
    pub ty: Type,
    /// Attributes of the declaration.
    pub attributes: Vec<Attribute>,
    /// The declaring statement.
    pub span: Span,
}

/// A declaration type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Type {
    /// Kind of declaration.
    pub kind: TypeKind,
    /// Width expression; `1` when not written.
    pub width: Expr,
    /// Keyword plus width.
    pub span: Span,
}

/// Kinds of declaration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeKind {
    /// Internal net.
    Net,
    /// Input port.
    Input,
    /// Output port.
    Output,
    /// Bidirectional port.
    Inout,
    /// Analog port.
    Analog,
    /// Cell placeholder.
    Cell,
}

impl TypeKind {
    /// Returns `true` for the port kinds.
    pub fn is_port(self) -> bool {
        matches!(
            self,
            TypeKind::Input | TypeKind::Output | TypeKind::Inout | TypeKind::Analog
        )
    }
}

/// `lhs = rhs`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Assignment {
    /// Assigned-to expression.
    pub lhs: Expr,
    /// Assigned expression.
    pub rhs: Expr,
    /// From `lhs` to `rhs`.
    pub span: Span,
}

/// `a.b.c`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fqn {
    /// Segments in order.
    pub segments: Vec<Identifier>,
    /// Attributes to attach.
    pub attributes: Vec<Attribute>,
    /// The statement.
    pub span: Span,
}

/// An expression.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Expr {
    /// A literal.
    Literal(Literal),
    /// `(a, b, ...)`: concatenation.
    Tuple(Tuple),
    /// A name.
    Ref(Identifier),
    /// `name[from:to]`, inclusive.
    Range(Range),
    /// `Name[width]{connections}(params)`
    Inst(Inst),
    /// Integer arithmetic.
    BinOp(BinOp),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(lit) => lit.span,
            Expr::Tuple(t) => t.span,
            Expr::Ref(id) => id.span,
            Expr::Range(r) => r.span,
            Expr::Inst(i) => i.span,
            Expr::BinOp(b) => b.span,
        }
    }
}

/// `(a, b, ...)`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tuple {
    /// Items, left to right.
    pub items: Vec<Expr>,
    /// Including parentheses.
    pub span: Span,
}

/// `name[from:to]`; `name[i]` has `from == to`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Range {
    /// The sliced name.
    pub identifier: Identifier,
    /// First index.
    pub from: Box<Expr>,
    /// Last index.
    pub to: Box<Expr>,
    /// The whole expression.
    pub span: Span,
}

/// A cell instantiation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Inst {
    /// Instantiated module name.
    pub cell_type: Identifier,
    /// Number of instances; `1` when not written.
    pub width: Box<Expr>,
    /// Parameters in order.
    pub params: Vec<InstParam>,
    /// Port connections in order.
    pub connections: Vec<Connection>,
    /// The whole expression.
    pub span: Span,
}

/// An instance parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstParam {
    /// Name, for `name = value`.
    pub name: Option<Identifier>,
    /// The value.
    pub value: Expr,
    /// The whole parameter.
    pub span: Span,
}

/// `port = expr`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Connection {
    /// Port of the instantiated module.
    pub port: Identifier,
    /// Connected expression.
    pub value: Expr,
    /// The whole connection.
    pub span: Span,
}

/// `lhs op rhs`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinOp {
    /// Operator.
    pub op: BinOpKind,
    /// Left operand.
    pub lhs: Box<Expr>,
    /// Right operand.
    pub rhs: Box<Expr>,
    /// Both operands.
    pub span: Span,
}

/// Binary operators.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BinOpKind {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_source::FileId;

    #[test]
    fn identifier_equality_ignores_span() {
        let a = Identifier {
            name: Ident::from_raw(1),
            span: Span::new(FileId::from_raw(0), 0, 1),
        };
        let b = Identifier {
            name: Ident::from_raw(1),
            span: Span::new(FileId::from_raw(0), 10, 11),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn port_kinds() {
        assert!(TypeKind::Analog.is_port());
        assert!(!TypeKind::Net.is_port());
        assert!(!TypeKind::Cell.is_port());
    }
}
