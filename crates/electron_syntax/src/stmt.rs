//! Statement parsing: constants, declarations, assignments and dotted names.

use crate::cst::*;
use crate::parser::ElectronParser;
use crate::token::ElectronToken;

impl ElectronParser<'_> {
    /// Parses one statement including its leading attributes and the
    /// terminating `;`.
    pub(crate) fn parse_statement(&mut self) -> StatementNode {
        let start = self.current_span();
        let attributes = self.parse_attributes();

        let kind = match self.current() {
            ElectronToken::Const => {
                self.bump();
                StatementKind::Const(self.parse_ident_list())
            }
            kind if kind.is_type_keyword() => StatementKind::Declaration(self.parse_declaration()),
            ElectronToken::Identifier if self.peek_is(ElectronToken::Dot) => {
                StatementKind::Fqn(self.parse_fqn())
            }
            _ => self.parse_assignment_or_name(),
        };

        if matches!(kind, StatementKind::Error) {
            self.recover_to_semicolon();
        } else if !self.eat(ElectronToken::Semicolon) {
            self.expected("`;`");
            self.recover_to_semicolon();
        }

        StatementNode {
            attributes,
            kind,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_declaration(&mut self) -> DeclarationNode {
        let keyword = self.bump();
        let width = if self.eat(ElectronToken::LeftBracket) {
            let width = self.parse_expr();
            self.expect(ElectronToken::RightBracket);
            Some(width)
        } else {
            None
        };
        let ty = TypeNode {
            keyword,
            width,
            span: keyword.span.merge(self.prev_span()),
        };
        let names = self.parse_ident_list();
        let init = if self.eat(ElectronToken::Eq) {
            self.parse_expr_list()
        } else {
            Vec::new()
        };
        DeclarationNode { ty, names, init }
    }

    fn parse_fqn(&mut self) -> FqnNode {
        let mut segments = vec![self.expect_ident()];
        while self.eat(ElectronToken::Dot) {
            segments.push(self.expect_ident());
        }
        let span = segments[0].span.merge(self.prev_span());
        FqnNode { segments, span }
    }

    /// An assignment, or a lone name which is a one-segment dotted name.
    fn parse_assignment_or_name(&mut self) -> StatementKind {
        let lhs = self.parse_expr_list();
        if self.eat(ElectronToken::Eq) {
            let rhs = self.parse_expr_list();
            return StatementKind::Assignment(AssignmentNode { lhs, rhs });
        }
        if let [ExprNode::Name(name)] = lhs.as_slice() {
            if name.index.is_none() && name.body.is_none() && name.params.is_none() {
                return StatementKind::Fqn(FqnNode {
                    segments: vec![name.name],
                    span: name.span,
                });
            }
        }
        if lhs.iter().any(|e| matches!(e, ExprNode::Error(_))) {
            return StatementKind::Error;
        }
        self.expected("`=`");
        StatementKind::Error
    }
}

#[cfg(test)]
mod tests {
    use crate::cst::*;
    use crate::{parse_str, token_text};
    use electron_diagnostics::DiagnosticSink;
    use electron_source::FileId;

    fn statements(body: &str) -> (Vec<StatementNode>, DiagnosticSink, String) {
        let src = format!("module m {{ {body} }}");
        let sink = DiagnosticSink::new();
        let unit = parse_str(&src, FileId::from_raw(0), &sink);
        let stmts = match unit.items.into_iter().next() {
            Some(Item::Module(m)) => m.statements,
            other => panic!("expected module, got {other:?}"),
        };
        (stmts, sink, src)
    }

    #[test]
    fn grouped_declaration_with_init() {
        let (stmts, sink, src) = statements("@left net[3] a, b = x, y;");
        assert!(!sink.has_errors());
        assert_eq!(stmts[0].attributes.len(), 1);
        match &stmts[0].kind {
            StatementKind::Declaration(decl) => {
                assert_eq!(token_text(&src, decl.ty.keyword), "net");
                assert!(decl.ty.width.is_some());
                assert_eq!(decl.names.len(), 2);
                assert_eq!(decl.init.len(), 2);
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn const_list() {
        let (stmts, sink, _) = statements("const a, b;");
        assert!(!sink.has_errors());
        assert!(matches!(&stmts[0].kind, StatementKind::Const(names) if names.len() == 2));
    }

    #[test]
    fn assignment_lists() {
        let (stmts, sink, _) = statements("a, b = c;");
        assert!(!sink.has_errors());
        match &stmts[0].kind {
            StatementKind::Assignment(a) => {
                assert_eq!(a.lhs.len(), 2);
                assert_eq!(a.rhs.len(), 1);
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn dotted_and_bare_names() {
        let (stmts, sink, _) = statements("@rotate(90) r1; top.r1.A;");
        assert!(!sink.has_errors());
        assert!(matches!(&stmts[0].kind, StatementKind::Fqn(f) if f.segments.len() == 1));
        assert!(matches!(&stmts[1].kind, StatementKind::Fqn(f) if f.segments.len() == 3));
    }

    #[test]
    fn missing_semicolon_recovers() {
        let (stmts, sink, _) = statements("net a net b; net c;");
        assert!(sink.has_errors());
        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[1].kind, StatementKind::Declaration(_)));
    }

    #[test]
    fn expression_without_assignment() {
        let (stmts, sink, _) = statements("a[0];");
        assert_eq!(sink.error_count(), 1);
        assert!(matches!(stmts[0].kind, StatementKind::Error));
    }
}
