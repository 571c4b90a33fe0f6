//! Hand-rolled recursive descent parser for the electron language.
//!
//! The main entry point is [`parse_file`], which lexes and parses one source
//! file into a concrete syntax tree ([`SourceUnit`]).
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): source text to tokens, keeping doc comments.
//! - **Parser** ([`parser`]): recursive descent with precedence climbing for
//!   expressions and recovery to the next `;`.
//! - **CST** ([`cst`]): one node type per grammar rule, holding tokens.

#![warn(missing_docs)]

/// Concrete syntax tree node types.
pub mod cst;
mod expr;
/// Lexical analyzer.
pub mod lexer;
/// Parser core and top-level rules.
pub mod parser;
mod stmt;
/// Token kinds.
pub mod token;

pub use cst::SourceUnit;
pub use token::{ElectronToken, Token};

use electron_diagnostics::DiagnosticSink;
use electron_source::{FileId, SourceDb};

/// Parses a file held by the source database.
pub fn parse_file(file_id: FileId, source_db: &SourceDb, sink: &DiagnosticSink) -> SourceUnit {
    parse_str(&source_db.get_file(file_id).content, file_id, sink)
}

/// Parses source text attributed to `file_id`.
pub fn parse_str(source: &str, file_id: FileId, sink: &DiagnosticSink) -> SourceUnit {
    let tokens = lexer::lex(source, file_id, sink);
    let mut parser = parser::ElectronParser::new(tokens, sink);
    parser.parse_source_unit()
}

/// Returns the source text of a token.
pub fn token_text(source: &str, token: Token) -> &str {
    source
        .get(token.span.start as usize..token.span.end as usize)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{Item, StatementKind};

    #[test]
    fn parse_through_source_db() {
        let mut db = SourceDb::new();
        let id = db.add_source(
            "blinky.el",
            "import Led from \"parts\";\n\
             /// Blinks.\n\
             export module blinky {\n\
                 input clk;\n\
                 @power net vcc;\n\
                 cell led = Led{A = vcc, K = clk};\n\
             }\n"
                .to_string(),
        );
        let sink = DiagnosticSink::new();
        let unit = parse_file(id, &db, &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());
        assert_eq!(unit.items.len(), 2);
        let Item::Module(m) = &unit.items[1] else {
            panic!("expected module");
        };
        assert_eq!(m.statements.len(), 3);
        assert!(m
            .statements
            .iter()
            .all(|s| matches!(s.kind, StatementKind::Declaration(_))));
    }

    #[test]
    fn token_text_out_of_range() {
        let tok = Token {
            kind: ElectronToken::Identifier,
            span: electron_source::Span::new(FileId::from_raw(0), 3, 99),
        };
        assert_eq!(token_text("abc", tok), "");
    }
}
