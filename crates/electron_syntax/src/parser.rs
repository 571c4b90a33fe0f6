//! Core parser infrastructure and top-level electron parsing rules.
//!
//! The [`ElectronParser`] struct provides primitive operations (advance,
//! expect, eat) and error recovery; the top-level methods here parse source
//! units, imports, modules and attributes. Statements and expressions live in
//! `stmt.rs` and `expr.rs`.

use crate::cst::*;
use crate::token::{ElectronToken, Token};
use electron_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use electron_source::Span;

/// Code of every parser diagnostic.
pub const PARSE_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A recursive descent parser over a token stream.
///
/// Errors are reported to the diagnostic sink; the tree is still produced,
/// with `Error` nodes where input could not be parsed.
pub struct ElectronParser<'src> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) sink: &'src DiagnosticSink,
}

impl<'src> ElectronParser<'src> {
    /// Creates a parser. `tokens` must come from [`lex`](crate::lexer::lex)
    /// and therefore end with `Eof`.
    pub fn new(tokens: Vec<Token>, sink: &'src DiagnosticSink) -> Self {
        Self {
            tokens,
            pos: 0,
            sink,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    pub(crate) fn current_token(&self) -> Token {
        match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(tok) => *tok,
            None => Token {
                kind: ElectronToken::Eof,
                span: Span::DUMMY,
            },
        }
    }

    pub(crate) fn current(&self) -> ElectronToken {
        self.current_token().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current_token().span
    }

    pub(crate) fn at(&self, kind: ElectronToken) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.at(ElectronToken::Eof)
    }

    pub(crate) fn peek_is(&self, kind: ElectronToken) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(|tok| tok.kind == kind)
    }

    pub(crate) fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    /// Consumes and returns the current token.
    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.current_token();
        if !self.at_eof() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn eat(&mut self, kind: ElectronToken) -> bool {
        self.eat_token(kind).is_some()
    }

    pub(crate) fn eat_token(&mut self, kind: ElectronToken) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consumes `kind` or reports "expected kind". Returns whether it was there.
    pub(crate) fn expect(&mut self, kind: ElectronToken) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.expected(kind.describe());
            false
        }
    }

    /// Consumes an identifier. On failure reports an error and returns an
    /// `Error` token at the current position without consuming it.
    pub(crate) fn expect_ident(&mut self) -> Token {
        if let Some(tok) = self.eat_token(ElectronToken::Identifier) {
            return tok;
        }
        self.expected("identifier");
        Token {
            kind: ElectronToken::Error,
            span: self.current_span(),
        }
    }

    /// `ident (',' ident)*`
    pub(crate) fn parse_ident_list(&mut self) -> Vec<Token> {
        let mut names = vec![self.expect_ident()];
        while self.eat(ElectronToken::Comma) {
            names.push(self.expect_ident());
        }
        names
    }

    // ========================================================================
    // Error handling and recovery
    // ========================================================================

    pub(crate) fn error(&self, msg: &str) {
        self.error_at(msg, self.current_span());
    }

    pub(crate) fn error_at(&self, msg: &str, span: Span) {
        self.sink.emit(Diagnostic::error(PARSE_ERROR, msg, span));
    }

    pub(crate) fn expected(&self, what: &str) {
        self.error(&format!(
            "expected {what}, found {}",
            self.current().describe()
        ));
    }

    /// Skips to just past the next `;`, stopping before a `}` so the
    /// enclosing module still closes.
    pub(crate) fn recover_to_semicolon(&mut self) {
        while !self.at_eof() && !self.at(ElectronToken::Semicolon) && !self.at(ElectronToken::RightBrace) {
            self.bump();
        }
        self.eat(ElectronToken::Semicolon);
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parses a complete source text.
    pub fn parse_source_unit(&mut self) -> SourceUnit {
        let start = self.current_span();
        let mut docs = Vec::new();
        let mut pending_docs = Vec::new();
        let mut items = Vec::new();

        while !self.at_eof() {
            match self.current() {
                ElectronToken::DesignDoc => docs.push(self.bump()),
                ElectronToken::ModuleDoc => pending_docs.push(self.bump()),
                ElectronToken::Import => {
                    pending_docs.clear();
                    items.push(Item::Import(self.parse_import()));
                }
                ElectronToken::Attribute
                | ElectronToken::Export
                | ElectronToken::Declare
                | ElectronToken::Module => {
                    let module = self.parse_module(std::mem::take(&mut pending_docs));
                    items.push(Item::Module(module));
                }
                _ => {
                    let span = self.current_span();
                    self.expected("`import` or `module`");
                    self.bump();
                    items.push(Item::Error(span));
                }
            }
        }

        SourceUnit {
            docs,
            items,
            span: start.merge(self.current_span()),
        }
    }

    /// `import a, b from "pkg";`
    fn parse_import(&mut self) -> ImportNode {
        let start = self.bump().span;
        let names = self.parse_ident_list();
        let mut package = None;
        if self.expect(ElectronToken::From) {
            package = self.eat_token(ElectronToken::String);
            if package.is_none() {
                self.expected("package string");
            }
        }
        if !self.eat(ElectronToken::Semicolon) {
            self.expected("`;`");
            self.recover_to_semicolon();
        }
        ImportNode {
            names,
            package,
            span: start.merge(self.prev_span()),
        }
    }

    fn parse_module(&mut self, docs: Vec<Token>) -> ModuleNode {
        let start = self.current_span();
        let attributes = self.parse_attributes();
        let export_kw = self.eat_token(ElectronToken::Export);
        let declare_kw = self.eat_token(ElectronToken::Declare);
        self.expect(ElectronToken::Module);
        let name = self.expect_ident();

        let mut params = Vec::new();
        if self.eat(ElectronToken::LeftParen) {
            if !self.at(ElectronToken::RightParen) {
                loop {
                    let name = self.expect_ident();
                    let default = if self.eat(ElectronToken::Eq) {
                        Some(self.parse_expr())
                    } else {
                        None
                    };
                    params.push(ParamDeclNode { name, default });
                    if !self.eat(ElectronToken::Comma) {
                        break;
                    }
                }
            }
            self.expect(ElectronToken::RightParen);
        }

        let mut statements = Vec::new();
        if self.expect(ElectronToken::LeftBrace) {
            while !self.at(ElectronToken::RightBrace) && !self.at_eof() {
                if self.eat(ElectronToken::ModuleDoc) || self.eat(ElectronToken::DesignDoc) {
                    continue;
                }
                statements.push(self.parse_statement());
            }
            self.expect(ElectronToken::RightBrace);
        }

        ModuleNode {
            docs,
            attributes,
            export_kw,
            declare_kw,
            name,
            params,
            statements,
            span: start.merge(self.prev_span()),
        }
    }

    /// Zero or more `@name(...)`.
    pub(crate) fn parse_attributes(&mut self) -> Vec<AttributeNode> {
        let mut attributes = Vec::new();
        while self.at(ElectronToken::Attribute) {
            attributes.push(self.parse_attribute());
        }
        attributes
    }

    fn parse_attribute(&mut self) -> AttributeNode {
        let name = self.bump();
        let mut params = Vec::new();
        if self.eat(ElectronToken::LeftParen) {
            if !self.at(ElectronToken::RightParen) {
                loop {
                    params.push(self.parse_attr_param());
                    if !self.eat(ElectronToken::Comma) {
                        break;
                    }
                }
            }
            self.expect(ElectronToken::RightParen);
        }
        AttributeNode {
            name,
            params,
            span: name.span.merge(self.prev_span()),
        }
    }

    fn parse_attr_param(&mut self) -> AttrParamNode {
        let start = self.current_span();
        let name = if self.at(ElectronToken::Identifier) && self.peek_is(ElectronToken::Eq) {
            let name = self.bump();
            self.bump();
            Some(name)
        } else {
            None
        };
        let value = if self.current().is_literal() || self.at(ElectronToken::Identifier) {
            self.bump()
        } else {
            self.expected("attribute parameter");
            Token {
                kind: ElectronToken::Error,
                span: self.current_span(),
            }
        };
        AttrParamNode {
            name,
            value,
            span: start.merge(value.span),
        }
    }
}
