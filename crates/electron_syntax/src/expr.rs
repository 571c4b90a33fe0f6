//! Expression parsing with precedence climbing.
//!
//! Binding powers, loosest first: shifts (`<<`, `>>`), additive (`+`, `-`),
//! multiplicative (`*`). All operators are left-associative.

use crate::cst::*;
use crate::parser::ElectronParser;
use crate::token::{ElectronToken, Token};

fn infix_binding_power(kind: ElectronToken) -> Option<u8> {
    match kind {
        ElectronToken::Shl | ElectronToken::Shr => Some(1),
        ElectronToken::Plus | ElectronToken::Minus => Some(2),
        ElectronToken::Star => Some(3),
        _ => None,
    }
}

impl ElectronParser<'_> {
    /// Parses an expression.
    pub(crate) fn parse_expr(&mut self) -> ExprNode {
        self.parse_binary(0)
    }

    /// `expr (',' expr)*`
    pub(crate) fn parse_expr_list(&mut self) -> Vec<ExprNode> {
        let mut exprs = vec![self.parse_expr()];
        while self.eat(ElectronToken::Comma) {
            exprs.push(self.parse_expr());
        }
        exprs
    }

    fn parse_binary(&mut self, min_bp: u8) -> ExprNode {
        let mut lhs = self.parse_primary();
        while let Some(bp) = infix_binding_power(self.current()) {
            if bp <= min_bp {
                break;
            }
            let op = self.bump();
            let rhs = self.parse_binary(bp);
            let span = lhs.span().merge(rhs.span());
            lhs = ExprNode::Binary(BinaryNode {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            });
        }
        lhs
    }

    fn parse_primary(&mut self) -> ExprNode {
        let kind = self.current();
        if kind.is_literal() {
            return ExprNode::Literal(self.bump());
        }
        match kind {
            ElectronToken::LeftParen => self.parse_paren(),
            ElectronToken::Identifier => self.parse_name(),
            _ => {
                let span = self.current_span();
                self.expected("expression");
                if !matches!(
                    kind,
                    ElectronToken::Semicolon | ElectronToken::RightBrace | ElectronToken::Eof
                ) {
                    self.bump();
                }
                ExprNode::Error(span)
            }
        }
    }

    /// `(a, b, ...)`
    fn parse_paren(&mut self) -> ExprNode {
        let start = self.bump().span;
        let mut items = Vec::new();
        if !self.at(ElectronToken::RightParen) {
            items = self.parse_expr_list();
        }
        self.expect(ElectronToken::RightParen);
        ExprNode::Paren(ParenNode {
            items,
            span: start.merge(self.prev_span()),
        })
    }

    /// A name, optionally followed by an index and, for instances, a cell
    /// body and parameter list.
    fn parse_name(&mut self) -> ExprNode {
        let name = self.bump();

        let mut index = if self.at(ElectronToken::LeftBracket) {
            Some(self.parse_index())
        } else {
            None
        };

        let body = if self.at(ElectronToken::LeftBrace) {
            Some(self.parse_cell_body())
        } else {
            None
        };

        if body.is_some() {
            if let Some(index) = index.as_mut() {
                if let Some(to) = index.to.take() {
                    self.error_at("an instance width cannot be a range", to.span());
                }
            }
        }

        let params = if body.is_some() && self.at(ElectronToken::LeftParen) {
            Some(self.parse_inst_params())
        } else {
            None
        };

        ExprNode::Name(NameNode {
            name,
            index,
            body,
            params,
            span: name.span.merge(self.prev_span()),
        })
    }

    fn parse_index(&mut self) -> IndexNode {
        let start = self.bump().span;
        let from = Box::new(self.parse_expr());
        let to = if self.eat(ElectronToken::Colon) {
            Some(Box::new(self.parse_expr()))
        } else {
            None
        };
        self.expect(ElectronToken::RightBracket);
        IndexNode {
            from,
            to,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_cell_body(&mut self) -> CellBodyNode {
        let start = self.bump().span;
        let mut connections = Vec::new();
        while !self.at(ElectronToken::RightBrace) && !self.at_eof() {
            let port = self.expect_ident();
            if port.kind == ElectronToken::Error {
                break;
            }
            let value = if self.eat(ElectronToken::Eq) {
                Some(self.parse_expr())
            } else {
                None
            };
            connections.push(ConnectionNode {
                port,
                value,
                span: port.span.merge(self.prev_span()),
            });
            if !self.eat(ElectronToken::Comma) {
                break;
            }
        }
        self.expect(ElectronToken::RightBrace);
        CellBodyNode {
            connections,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_inst_params(&mut self) -> Vec<InstParamNode> {
        self.bump();
        let mut params = Vec::new();
        while !self.at(ElectronToken::RightParen) && !self.at_eof() {
            let start = self.current_span();
            let name: Option<Token> =
                if self.at(ElectronToken::Identifier) && self.peek_is(ElectronToken::Eq) {
                    let name = self.bump();
                    self.bump();
                    Some(name)
                } else {
                    None
                };
            let value = self.parse_expr();
            let is_error = matches!(value, ExprNode::Error(_));
            params.push(InstParamNode {
                name,
                value,
                span: start.merge(self.prev_span()),
            });
            if is_error || !self.eat(ElectronToken::Comma) {
                break;
            }
        }
        self.expect(ElectronToken::RightParen);
        params
    }
}

#[cfg(test)]
mod tests {
    use crate::cst::*;
    use crate::token::ElectronToken;
    use crate::{parse_str, token_text};
    use electron_diagnostics::DiagnosticSink;
    use electron_source::FileId;

    /// Parses `x = <expr>;` inside a module and returns the right-hand side.
    fn rhs(expr: &str) -> (ExprNode, DiagnosticSink, String) {
        let src = format!("module m {{ x = {expr}; }}");
        let sink = DiagnosticSink::new();
        let unit = parse_str(&src, FileId::from_raw(0), &sink);
        let Some(Item::Module(m)) = unit.items.into_iter().next() else {
            panic!("expected module");
        };
        let Some(stmt) = m.statements.into_iter().next() else {
            panic!("expected statement");
        };
        match stmt.kind {
            StatementKind::Assignment(a) => (a.rhs.into_iter().next().unwrap(), sink, src),
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn precedence() {
        let (expr, sink, src) = rhs("1 << 2 + 3 * 4");
        assert!(!sink.has_errors());
        let ExprNode::Binary(shl) = expr else {
            panic!("expected binary");
        };
        assert_eq!(shl.op.kind, ElectronToken::Shl);
        let ExprNode::Binary(add) = *shl.rhs else {
            panic!("expected binary");
        };
        assert_eq!(token_text(&src, add.op), "+");
        assert!(matches!(*add.rhs, ExprNode::Binary(ref mul) if mul.op.kind == ElectronToken::Star));
    }

    #[test]
    fn left_associative() {
        let (expr, _, _) = rhs("5 - 2 - 1");
        let ExprNode::Binary(outer) = expr else {
            panic!("expected binary");
        };
        assert!(matches!(*outer.lhs, ExprNode::Binary(_)));
        assert!(matches!(*outer.rhs, ExprNode::Literal(_)));
    }

    #[test]
    fn slice_reference() {
        let (expr, sink, _) = rhs("a[2:4]");
        assert!(!sink.has_errors());
        let ExprNode::Name(name) = expr else {
            panic!("expected name");
        };
        let index = name.index.unwrap();
        assert!(index.to.is_some());
        assert!(name.body.is_none());
    }

    #[test]
    fn cell_instance_full() {
        let (expr, sink, src) = rhs("Res[2]{A, B = n[0]}(value=\"10k\", 3)");
        assert!(!sink.has_errors());
        let ExprNode::Name(name) = expr else {
            panic!("expected name");
        };
        assert_eq!(token_text(&src, name.name), "Res");
        assert!(name.index.is_some());
        let body = name.body.unwrap();
        assert_eq!(body.connections.len(), 2);
        assert!(body.connections[0].value.is_none());
        assert!(body.connections[1].value.is_some());
        let params = name.params.unwrap();
        assert_eq!(params.len(), 2);
        assert!(params[0].name.is_some());
        assert!(params[1].name.is_none());
    }

    #[test]
    fn empty_cell_body() {
        let (expr, sink, _) = rhs("Led{}");
        assert!(!sink.has_errors());
        assert!(matches!(expr, ExprNode::Name(ref n) if n.body.as_ref().is_some_and(|b| b.connections.is_empty())));
    }

    #[test]
    fn range_as_instance_width_rejected() {
        let (expr, sink, _) = rhs("Res[0:1]{}");
        assert_eq!(sink.error_count(), 1);
        let ExprNode::Name(name) = expr else {
            panic!("expected name");
        };
        assert!(name.index.unwrap().to.is_none());
    }

    #[test]
    fn concatenation() {
        let (expr, sink, _) = rhs("(a, b[1], 1'1)");
        assert!(!sink.has_errors());
        assert!(matches!(expr, ExprNode::Paren(ref p) if p.items.len() == 3));
    }

    #[test]
    fn missing_operand() {
        let (_, sink, _) = rhs("1 +");
        assert!(sink.has_errors());
    }
}
