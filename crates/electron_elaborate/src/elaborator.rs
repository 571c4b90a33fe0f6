//! Lowering of the concrete syntax tree into the AST.
//!
//! The elaborator reshapes grammar-level nodes into the node types of
//! [`crate::ast`]: multi-name declarations become one declaration per name,
//! `a, b = x, y` becomes one assignment per pair, `name[i]` becomes the range
//! `name[i:i]`, and a bare connection `p` becomes `p = p`. Mistakes the user
//! can make are reported to the sink; a tree shape the parser never produces
//! is an [`InternalError`].

use crate::ast::*;
use crate::errors;
use electron_common::{ElectronResult, Interner, InternalError, Logic};
use electron_diagnostics::DiagnosticSink;
use electron_source::Span;
use electron_syntax::cst::{
    self, AttributeNode, ConnectionNode, ExprNode, IndexNode, Item, NameNode, StatementKind,
    TypeNode,
};
use electron_syntax::{token_text, ElectronToken, Token};
use tracing::{debug, trace};

/// Walks a [`cst::SourceUnit`] and builds a [`Design`].
pub struct Elaborator<'a> {
    source: &'a str,
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
}

impl<'a> Elaborator<'a> {
    /// Creates an elaborator for a unit parsed from `source`.
    pub fn new(source: &'a str, interner: &'a Interner, sink: &'a DiagnosticSink) -> Self {
        Self {
            source,
            interner,
            sink,
        }
    }

    /// Elaborates a whole source unit.
    pub fn design(&self, unit: &cst::SourceUnit) -> ElectronResult<Design> {
        let doc = self.doc(&unit.docs, "//!");
        let mut imports = Vec::new();
        let mut modules = Vec::new();
        for item in &unit.items {
            match item {
                Item::Import(node) => imports.extend(self.import(node)),
                Item::Module(node) => modules.push(self.module(node)?),
                Item::Error(_) => {}
            }
        }
        debug!(
            imports = imports.len(),
            modules = modules.len(),
            "elaborated source unit"
        );
        Ok(Design {
            doc,
            imports,
            modules,
        })
    }

    fn text(&self, token: Token) -> &'a str {
        token_text(self.source, token)
    }

    fn doc(&self, tokens: &[Token], marker: &str) -> Option<String> {
        if tokens.is_empty() {
            return None;
        }
        let lines: Vec<&str> = tokens
            .iter()
            .map(|tok| {
                let text = self.text(*tok);
                let text = text.strip_prefix(marker).unwrap_or(text);
                text.strip_prefix(' ').unwrap_or(text).trim_end()
            })
            .collect();
        Some(lines.join("\n"))
    }

    fn identifier(&self, token: Token) -> Identifier {
        let text = self.text(token);
        let text = text.strip_prefix('\'').unwrap_or(text);
        Identifier {
            name: self.interner.get_or_intern(text),
            span: token.span,
        }
    }

    fn import(&self, node: &cst::ImportNode) -> Vec<Import> {
        // A missing package was reported by the parser.
        let Some(package) = node.package else {
            return Vec::new();
        };
        let package = unquote(self.text(package)).to_string();
        node.names
            .iter()
            .filter(|tok| tok.kind == ElectronToken::Identifier)
            .map(|tok| Import {
                identifier: self.identifier(*tok),
                package: package.clone(),
                span: node.span,
            })
            .collect()
    }

    fn module(&self, node: &cst::ModuleNode) -> ElectronResult<Module> {
        let identifier = self.identifier(node.name);
        trace!(
            module = self.interner.resolve(identifier.name),
            "elaborating module"
        );
        let attributes = self.attributes(&node.attributes)?;
        let params = node
            .params
            .iter()
            .map(|p| {
                Ok(ModuleParam {
                    identifier: self.identifier(p.name),
                    default: p.default.as_ref().map(|e| self.expr(e)).transpose()?,
                })
            })
            .collect::<ElectronResult<Vec<_>>>()?;
        let mut statements = Vec::new();
        for stmt in &node.statements {
            statements.extend(self.statement(stmt)?);
        }
        Ok(Module {
            identifier,
            exported: node.export_kw.is_some(),
            declaration: node.declare_kw.is_some(),
            imported: false,
            doc: self.doc(&node.docs, "///"),
            attributes,
            params,
            statements,
            span: node.span,
        })
    }

    fn statement(&self, node: &cst::StatementNode) -> ElectronResult<Vec<Statement>> {
        match &node.kind {
            StatementKind::Const(names) => {
                self.ignore_attributes(&node.attributes, "a const statement");
                Ok(names
                    .iter()
                    .map(|tok| Statement::Const(self.identifier(*tok)))
                    .collect())
            }
            StatementKind::Declaration(decl) => {
                let attributes = self.attributes(&node.attributes)?;
                let ty = self.ty(&decl.ty)?;
                let mut out: Vec<Statement> = decl
                    .names
                    .iter()
                    .map(|tok| {
                        Statement::Declaration(Declaration {
                            identifier: self.identifier(*tok),
                            ty: ty.clone(),
                            attributes: attributes.clone(),
                            span: node.span,
                        })
                    })
                    .collect();
                if !decl.init.is_empty() {
                    let lhs = decl
                        .names
                        .iter()
                        .map(|tok| Expr::Ref(self.identifier(*tok)))
                        .collect();
                    out.extend(self.assignments(lhs, self.exprs(&decl.init)?));
                }
                Ok(out)
            }
            StatementKind::Assignment(assign) => {
                self.ignore_attributes(&node.attributes, "an assignment");
                let lhs = self.exprs(&assign.lhs)?;
                let rhs = self.exprs(&assign.rhs)?;
                Ok(self.assignments(lhs, rhs))
            }
            StatementKind::Fqn(fqn) => Ok(vec![Statement::Fqn(Fqn {
                segments: fqn.segments.iter().map(|t| self.identifier(*t)).collect(),
                attributes: self.attributes(&node.attributes)?,
                span: fqn.span,
            })]),
            StatementKind::Error => Ok(Vec::new()),
        }
    }

    fn ignore_attributes(&self, attributes: &[AttributeNode], what: &str) {
        if let (Some(first), Some(last)) = (attributes.first(), attributes.last()) {
            self.sink.emit(errors::warning_ignored_attributes(
                what,
                first.span.to(last.span),
            ));
        }
    }

    /// Pairs left and right expressions up. Lengths must agree; on mismatch
    /// the error is reported and the common prefix is kept.
    fn assignments(&self, lhs: Vec<Expr>, rhs: Vec<Expr>) -> Vec<Statement> {
        if lhs.len() != rhs.len() {
            let span = match (lhs.first(), rhs.last()) {
                (Some(first), Some(last)) => first.span().to(last.span()),
                _ => Span::DUMMY,
            };
            self.sink.emit(errors::error_unbalanced_assignment(
                lhs.len(),
                rhs.len(),
                span,
            ));
        }
        lhs.into_iter()
            .zip(rhs)
            .map(|(lhs, rhs)| {
                let span = lhs.span().to(rhs.span());
                Statement::Assignment(Assignment { lhs, rhs, span })
            })
            .collect()
    }

    fn ty(&self, node: &TypeNode) -> ElectronResult<Type> {
        let kind = match node.keyword.kind {
            ElectronToken::Net => TypeKind::Net,
            ElectronToken::Input => TypeKind::Input,
            ElectronToken::Output => TypeKind::Output,
            ElectronToken::Inout => TypeKind::Inout,
            ElectronToken::Analog => TypeKind::Analog,
            ElectronToken::Cell => TypeKind::Cell,
            _ => return Err(InternalError::rule_mismatch("typeExpression")),
        };
        let width = match &node.width {
            Some(expr) => self.expr(expr)?,
            None => one(node.keyword.span),
        };
        Ok(Type {
            kind,
            width,
            span: node.span,
        })
    }

    fn exprs(&self, nodes: &[ExprNode]) -> ElectronResult<Vec<Expr>> {
        nodes.iter().map(|node| self.expr(node)).collect()
    }

    fn expr(&self, node: &ExprNode) -> ElectronResult<Expr> {
        match node {
            ExprNode::Literal(tok) => Ok(Expr::Literal(self.literal(*tok)?)),
            ExprNode::Paren(paren) => Ok(Expr::Tuple(Tuple {
                items: self.exprs(&paren.items)?,
                span: paren.span,
            })),
            ExprNode::Name(name) => self.name(name),
            ExprNode::Binary(bin) => {
                let op = match bin.op.kind {
                    ElectronToken::Plus => BinOpKind::Add,
                    ElectronToken::Minus => BinOpKind::Sub,
                    ElectronToken::Star => BinOpKind::Mul,
                    ElectronToken::Shl => BinOpKind::Shl,
                    ElectronToken::Shr => BinOpKind::Shr,
                    _ => return Err(InternalError::rule_mismatch("binaryExpression")),
                };
                Ok(Expr::BinOp(BinOp {
                    op,
                    lhs: Box::new(self.expr(&bin.lhs)?),
                    rhs: Box::new(self.expr(&bin.rhs)?),
                    span: bin.span,
                }))
            }
            // Reported by the parser; the unit never reaches the compiler.
            ExprNode::Error(span) => Ok(Expr::Literal(Literal {
                kind: LiteralKind::Integer(0),
                span: *span,
            })),
        }
    }

    fn name(&self, node: &NameNode) -> ElectronResult<Expr> {
        let identifier = self.identifier(node.name);
        match (&node.index, &node.body) {
            (None, None) if node.params.is_none() => Ok(Expr::Ref(identifier)),
            (Some(index), None) if node.params.is_none() => {
                let from = self.expr(&index.from)?;
                let to = match &index.to {
                    Some(to) => self.expr(to)?,
                    None => from.clone(),
                };
                Ok(Expr::Range(Range {
                    identifier,
                    from: Box::new(from),
                    to: Box::new(to),
                    span: node.span,
                }))
            }
            (index, Some(body)) => {
                let width = match index {
                    Some(IndexNode { to: Some(_), .. }) => {
                        return Err(InternalError::rule_mismatch("cellExpression"))
                    }
                    Some(index) => self.expr(&index.from)?,
                    None => one(node.name.span),
                };
                let connections = body
                    .connections
                    .iter()
                    .map(|c| self.connection(c))
                    .collect::<ElectronResult<Vec<_>>>()?;
                let params = node
                    .params
                    .iter()
                    .flatten()
                    .map(|p| {
                        Ok(InstParam {
                            name: p.name.map(|t| self.identifier(t)),
                            value: self.expr(&p.value)?,
                            span: p.span,
                        })
                    })
                    .collect::<ElectronResult<Vec<_>>>()?;
                Ok(Expr::Inst(Inst {
                    cell_type: identifier,
                    width: Box::new(width),
                    params,
                    connections,
                    span: node.span,
                }))
            }
            _ => Err(InternalError::rule_mismatch("cellExpression")),
        }
    }

    fn connection(&self, node: &ConnectionNode) -> ElectronResult<Connection> {
        let port = self.identifier(node.port);
        let value = match &node.value {
            Some(expr) => self.expr(expr)?,
            None => Expr::Ref(port),
        };
        Ok(Connection {
            port,
            value,
            span: node.span,
        })
    }

    fn attributes(&self, nodes: &[AttributeNode]) -> ElectronResult<Vec<Attribute>> {
        nodes
            .iter()
            .map(|node| {
                let text = self.text(node.name);
                let name = Identifier {
                    name: self
                        .interner
                        .get_or_intern(text.strip_prefix('@').unwrap_or(text)),
                    span: node.name.span,
                };
                let params = node
                    .params
                    .iter()
                    .map(|p| {
                        Ok(Parameter {
                            name: p.name.map(|t| self.identifier(t)),
                            value: self.literal(p.value)?,
                        })
                    })
                    .collect::<ElectronResult<Vec<_>>>()?;
                Ok(Attribute {
                    name,
                    params,
                    span: node.span,
                })
            })
            .collect()
    }

    fn literal(&self, token: Token) -> ElectronResult<Literal> {
        let text = self.text(token);
        let span = token.span;
        let kind = match token.kind {
            ElectronToken::BitVector => self.bit_vector(text, span),
            ElectronToken::Integer => match text.parse::<i64>() {
                Ok(value) => LiteralKind::Integer(value),
                Err(_) => {
                    self.sink.emit(errors::error_integer_overflow(text, span));
                    LiteralKind::Integer(0)
                }
            },
            ElectronToken::Real => match text.parse::<f64>() {
                Ok(value) => LiteralKind::Real(value),
                Err(_) => {
                    self.sink.emit(errors::error_bad_real(text, span));
                    LiteralKind::Real(0.0)
                }
            },
            ElectronToken::Unit => LiteralKind::Unit(text.to_string()),
            ElectronToken::String => LiteralKind::String(unquote(text).to_string()),
            ElectronToken::Xml => LiteralKind::Xml(text.to_string()),
            ElectronToken::True => LiteralKind::Bool(true),
            ElectronToken::False => LiteralKind::Bool(false),
            ElectronToken::Identifier => LiteralKind::Ident(self.identifier(token).name),
            // Reported by the lexer or parser.
            ElectronToken::Error => LiteralKind::Integer(0),
            _ => return Err(InternalError::rule_mismatch("literal")),
        };
        Ok(Literal { kind, span })
    }

    /// `N'digits`, digits most significant first. The width must be positive
    /// and equal the number of digits.
    fn bit_vector(&self, text: &str, span: Span) -> LiteralKind {
        let (width, digits) = text.split_once('\'').unwrap_or(("", text));
        let bits = Logic::parse_msb_first(digits).unwrap_or_default();
        match width.parse::<usize>() {
            Ok(width) if width > 0 && width == bits.len() => {}
            Ok(width) => self.sink.emit(errors::error_bit_vector_width(
                text,
                width,
                bits.len(),
                span,
            )),
            Err(_) => self.sink.emit(errors::error_integer_overflow(width, span)),
        }
        LiteralKind::BitVector(bits)
    }
}

fn one(span: Span) -> Expr {
    Expr::Literal(Literal {
        kind: LiteralKind::Integer(1),
        span,
    })
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
