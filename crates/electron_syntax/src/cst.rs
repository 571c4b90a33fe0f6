//! Concrete syntax tree produced by the parser.
//!
//! The tree mirrors the grammar rule for rule and keeps the original tokens,
//! so the elaborator can read literal text and spans directly. Optional
//! trailing constructs are `Option`s: which of them are present decides how
//! the elaborator reshapes a node.

use crate::token::Token;
use electron_source::Span;
use serde::{Deserialize, Serialize};

/// A parsed source text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceUnit {
    /// `//!` comments, in order.
    pub docs: Vec<Token>,
    /// Top-level items.
    pub items: Vec<Item>,
    /// The whole unit.
    pub span: Span,
}

/// A top-level item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Item {
    /// `import a, b from "pkg";`
    Import(ImportNode),
    /// A module definition or declaration.
    Module(ModuleNode),
    /// Tokens that could not be parsed as an item.
    Error(Span),
}

/// `import a, b from "pkg";`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportNode {
    /// Imported module names.
    pub names: Vec<Token>,
    /// The package string literal, if present.
    pub package: Option<Token>,
    /// The whole statement.
    pub span: Span,
}

/// A module.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleNode {
    /// `///` comments directly above the module.
    pub docs: Vec<Token>,
    /// Leading attributes.
    pub attributes: Vec<AttributeNode>,
    /// The `export` keyword, if present.
    pub export_kw: Option<Token>,
    /// The `declare` keyword, if present.
    pub declare_kw: Option<Token>,
    /// The module name.
    pub name: Token,
    /// Parameter declarations between parentheses.
    pub params: Vec<ParamDeclNode>,
    /// Body statements.
    pub statements: Vec<StatementNode>,
    /// From the first attribute or keyword to the closing brace.
    pub span: Span,
}

/// `name` or `name = default` in a module header.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamDeclNode {
    /// Parameter name.
    pub name: Token,
    /// Default value expression.
    pub default: Option<ExprNode>,
}

/// `@name(param, ...)`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttributeNode {
    /// The `@name` token.
    pub name: Token,
    /// Parameters in order.
    pub params: Vec<AttrParamNode>,
    /// The whole attribute.
    pub span: Span,
}

/// One attribute parameter: `value` or `name = value`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttrParamNode {
    /// Optional parameter name.
    pub name: Option<Token>,
    /// A literal token or an identifier.
    pub value: Token,
    /// The whole parameter.
    pub span: Span,
}

/// A statement with its leading attributes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatementNode {
    /// Leading attributes.
    pub attributes: Vec<AttributeNode>,
    /// What kind of statement.
    pub kind: StatementKind,
    /// From the first attribute to the semicolon.
    pub span: Span,
}

/// The statement forms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum StatementKind {
    /// `const a, b;`
    Const(Vec<Token>),
    /// `net[2] a, b = x, y;`
    Declaration(DeclarationNode),
    /// `a, b = x, y;`
    Assignment(AssignmentNode),
    /// `a.b.c;`
    Fqn(FqnNode),
    /// An unparseable statement; the parser already reported it.
    Error,
}

/// A typed declaration with optional initializer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeclarationNode {
    /// The type.
    pub ty: TypeNode,
    /// Declared names.
    pub names: Vec<Token>,
    /// Initializer expressions after `=`; empty without initializer.
    pub init: Vec<ExprNode>,
}

/// `net`, `input[4]`, `cell[2]`, ...
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeNode {
    /// The type keyword.
    pub keyword: Token,
    /// Width expression between brackets.
    pub width: Option<ExprNode>,
    /// Keyword plus width.
    pub span: Span,
}

/// `lhs, ... = rhs, ...`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignmentNode {
    /// Left-hand expressions.
    pub lhs: Vec<ExprNode>,
    /// Right-hand expressions.
    pub rhs: Vec<ExprNode>,
}

/// A dotted name.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FqnNode {
    /// Name segments.
    pub segments: Vec<Token>,
    /// All segments.
    pub span: Span,
}

/// An expression.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ExprNode {
    /// A literal token.
    Literal(Token),
    /// `(a, b, ...)`
    Paren(ParenNode),
    /// A name with optional index, cell body and parameter list.
    Name(NameNode),
    /// `lhs op rhs`
    Binary(BinaryNode),
    /// An expression the parser could not read.
    Error(Span),
}

impl ExprNode {
    /// Returns the span of the expression.
    pub fn span(&self) -> Span {
        match self {
            ExprNode::Literal(tok) => tok.span,
            ExprNode::Paren(node) => node.span,
            ExprNode::Name(node) => node.span,
            ExprNode::Binary(node) => node.span,
            ExprNode::Error(span) => *span,
        }
    }
}

/// `(a, b, ...)`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenNode {
    /// Items in order.
    pub items: Vec<ExprNode>,
    /// Including the parentheses.
    pub span: Span,
}

/// `name`, `name[i]`, `name[i:j]`, `Name[n]{...}(...)`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NameNode {
    /// The name.
    pub name: Token,
    /// Bracketed index or width.
    pub index: Option<IndexNode>,
    /// Cell body with port connections.
    pub body: Option<CellBodyNode>,
    /// Instance parameters.
    pub params: Option<Vec<InstParamNode>>,
    /// The whole expression.
    pub span: Span,
}

/// `[from]` or `[from:to]`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexNode {
    /// First expression.
    pub from: Box<ExprNode>,
    /// Expression after `:`.
    pub to: Option<Box<ExprNode>>,
    /// Including the brackets.
    pub span: Span,
}

/// `{ conn, ... }`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellBodyNode {
    /// Connections in order.
    pub connections: Vec<ConnectionNode>,
    /// Including the braces.
    pub span: Span,
}

/// `port` or `port = expr`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionNode {
    /// Port name.
    pub port: Token,
    /// Connected expression.
    pub value: Option<ExprNode>,
    /// The whole connection.
    pub span: Span,
}

/// `expr` or `name = expr` inside an instance parameter list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstParamNode {
    /// Optional parameter name.
    pub name: Option<Token>,
    /// Value expression.
    pub value: ExprNode,
    /// The whole parameter.
    pub span: Span,
}

/// `lhs op rhs`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryNode {
    /// The operator token.
    pub op: Token,
    /// Left operand.
    pub lhs: Box<ExprNode>,
    /// Right operand.
    pub rhs: Box<ExprNode>,
    /// Both operands.
    pub span: Span,
}
