//! Lexical analyzer for electron source text.
//!
//! Converts source text into [`Token`]s. Whitespace and plain `//` comments
//! are skipped; `///` and `//!` comments are kept as documentation tokens.
//! Errors are reported to the [`DiagnosticSink`] as `E100` and produce
//! [`ElectronToken::Error`] tokens.

use crate::token::{lookup_keyword, ElectronToken, Token};
use electron_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use electron_source::{FileId, Span};

/// Code of every lexer diagnostic.
pub const LEX_ERROR: DiagnosticCode = DiagnosticCode::new(Category::Error, 100);

/// Lexes `source`. The returned vector always ends with [`ElectronToken::Eof`].
pub fn lex(source: &str, file: FileId, sink: &DiagnosticSink) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        file,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            if let Some(doc) = self.skip_trivia() {
                tokens.push(doc);
                continue;
            }
            if self.at_end() {
                tokens.push(Token {
                    kind: ElectronToken::Eof,
                    span: self.span_from(self.pos),
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.source.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.at_end() && pred(self.source[self.pos]) {
            self.pos += 1;
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    fn token(&self, kind: ElectronToken, start: usize) -> Token {
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn error(&self, msg: &str, span: Span) {
        self.sink.emit(Diagnostic::error(LEX_ERROR, msg, span));
    }

    /// Skips whitespace and comments. Stops early and returns a token when a
    /// documentation comment is found.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            self.eat_while(|b| b.is_ascii_whitespace());
            if !(self.peek() == b'/' && self.peek_at(1) == b'/') {
                return None;
            }
            let start = self.pos;
            let kind = match self.peek_at(2) {
                b'/' if self.peek_at(3) != b'/' => Some(ElectronToken::ModuleDoc),
                b'!' => Some(ElectronToken::DesignDoc),
                _ => None,
            };
            self.eat_while(|b| b != b'\n');
            if let Some(kind) = kind {
                return Some(self.token(kind, start));
            }
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        if b.is_ascii_alphabetic() || b == b'$' {
            return self.lex_identifier_or_keyword(start);
        }
        if b == b'\'' {
            return self.lex_quoted_identifier(start);
        }
        if b == b'@' {
            self.pos += 1;
            self.eat_while(is_word_char);
            return self.token(ElectronToken::Attribute, start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        if b == b'<' && self.peek_at(1).is_ascii_alphabetic() {
            return self.lex_xml(start);
        }
        self.lex_operator(start)
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Token {
        self.pos += 1;
        self.eat_while(is_word_char);
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let kind = lookup_keyword(text).unwrap_or(ElectronToken::Identifier);
        self.token(kind, start)
    }

    /// `'name` where name runs until whitespace or a delimiter.
    fn lex_quoted_identifier(&mut self, start: usize) -> Token {
        self.pos += 1;
        self.eat_while(|b| {
            !b.is_ascii_whitespace()
                && !matches!(b, b'(' | b')' | b'[' | b']' | b'{' | b'}' | b',' | b':' | b';')
        });
        if self.pos == start + 1 {
            self.error("expected a name after `'`", self.span_from(start));
            return self.token(ElectronToken::Error, start);
        }
        self.token(ElectronToken::Identifier, start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_while(|b| b.is_ascii_digit());

        if self.peek() == b'\'' && is_bit_digit(self.peek_at(1)) {
            self.pos += 1;
            self.eat_while(is_bit_digit);
            return self.token(ElectronToken::BitVector, start);
        }

        let mut kind = ElectronToken::Integer;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_while(|b| b.is_ascii_digit());
            kind = ElectronToken::Real;
        }
        if self.peek().is_ascii_alphabetic() {
            self.eat_while(|b| b.is_ascii_alphabetic());
            kind = ElectronToken::Unit;
        }
        self.token(kind, start)
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1;
        self.eat_while(|b| b != b'"');
        if self.at_end() {
            self.error("unterminated string literal", self.span_from(start));
            return self.token(ElectronToken::Error, start);
        }
        self.pos += 1;
        self.token(ElectronToken::String, start)
    }

    /// A balanced xml element, e.g. `<g><rect/></g>`.
    fn lex_xml(&mut self, start: usize) -> Token {
        let mut depth = 0usize;
        loop {
            if self.at_end() {
                self.error("unterminated xml literal", self.span_from(start));
                return self.token(ElectronToken::Error, start);
            }
            if self.peek() != b'<' {
                self.pos += 1;
                continue;
            }
            let marker = self.peek_at(1);
            self.eat_while(|b| b != b'>');
            if self.at_end() {
                continue;
            }
            let self_closing = self.source[self.pos - 1] == b'/';
            self.pos += 1;
            match marker {
                b'/' => depth = depth.saturating_sub(1),
                b'!' | b'?' => {}
                _ if self_closing => {}
                _ => depth += 1,
            }
            if depth == 0 {
                return self.token(ElectronToken::Xml, start);
            }
        }
    }

    fn lex_operator(&mut self, start: usize) -> Token {
        let b = self.peek();
        self.pos += 1;
        let kind = match b {
            b'=' => ElectronToken::Eq,
            b'+' => ElectronToken::Plus,
            b'-' => ElectronToken::Minus,
            b'*' => ElectronToken::Star,
            b'.' => ElectronToken::Dot,
            b',' => ElectronToken::Comma,
            b':' => ElectronToken::Colon,
            b';' => ElectronToken::Semicolon,
            b'(' => ElectronToken::LeftParen,
            b')' => ElectronToken::RightParen,
            b'[' => ElectronToken::LeftBracket,
            b']' => ElectronToken::RightBracket,
            b'{' => ElectronToken::LeftBrace,
            b'}' => ElectronToken::RightBrace,
            b'<' if self.peek() == b'<' => {
                self.pos += 1;
                ElectronToken::Shl
            }
            b'>' if self.peek() == b'>' => {
                self.pos += 1;
                ElectronToken::Shr
            }
            _ => {
                // Skip the rest of a multi-byte character so spans stay on
                // char boundaries.
                self.eat_while(|b| b & 0xC0 == 0x80);
                self.error("unexpected character", self.span_from(start));
                ElectronToken::Error
            }
        };
        self.token(kind, start)
    }
}

fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_bit_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1' | b'x' | b'z' | b'X' | b'Z')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<ElectronToken> {
        let sink = DiagnosticSink::new();
        lex(source, FileId::from_raw(0), &sink)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_with_errors(source: &str) -> (Vec<Token>, usize) {
        let sink = DiagnosticSink::new();
        let tokens = lex(source, FileId::from_raw(0), &sink);
        (tokens, sink.error_count())
    }

    use ElectronToken::*;

    #[test]
    fn module_header() {
        assert_eq!(
            kinds("export module top {}"),
            vec![Export, Module, Identifier, LeftBrace, RightBrace, Eof]
        );
    }

    #[test]
    fn declaration_with_width() {
        assert_eq!(
            kinds("input[2] a, b;"),
            vec![
                Input,
                LeftBracket,
                Integer,
                RightBracket,
                Identifier,
                Comma,
                Identifier,
                Semicolon,
                Eof
            ]
        );
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(
            kinds("4'10xz 42 1.5 10k 4.7uF 0"),
            vec![BitVector, Integer, Real, Unit, Unit, Integer, Eof]
        );
    }

    #[test]
    fn names_and_attributes() {
        assert_eq!(
            kinds("@rotate $vcc '+5V a_1"),
            vec![Attribute, Identifier, Identifier, Identifier, Eof]
        );
    }

    #[test]
    fn quoted_identifier_stops_at_delimiter() {
        let (tokens, errors) = lex_with_errors("'+5V;");
        assert_eq!(errors, 0);
        assert_eq!(tokens[0].span.end, 4);
        assert_eq!(tokens[1].kind, Semicolon);
    }

    #[test]
    fn shifts_and_operators() {
        assert_eq!(
            kinds("a << 2 >> 1 + 3 - 4 * 5 = b"),
            vec![
                Identifier, Shl, Integer, Shr, Integer, Plus, Integer, Minus, Integer, Star,
                Integer, Eq, Identifier, Eof
            ]
        );
    }

    #[test]
    fn comments() {
        assert_eq!(
            kinds("//! design\n/// doc\n// plain\n//// also plain\nnet a;"),
            vec![DesignDoc, ModuleDoc, Net, Identifier, Semicolon, Eof]
        );
    }

    #[test]
    fn xml_literal_balanced() {
        let src = "@skin(<svg><g><rect/></g></svg>) x";
        let (tokens, errors) = lex_with_errors(src);
        assert_eq!(errors, 0);
        assert_eq!(tokens[2].kind, Xml);
        let span = tokens[2].span;
        assert_eq!(
            &src[span.start as usize..span.end as usize],
            "<svg><g><rect/></g></svg>"
        );
        assert_eq!(tokens[3].kind, RightParen);
    }

    #[test]
    fn unterminated_string() {
        let (tokens, errors) = lex_with_errors("\"abc");
        assert_eq!(errors, 1);
        assert_eq!(tokens[0].kind, Error);
    }

    #[test]
    fn unterminated_xml() {
        let (_, errors) = lex_with_errors("<svg><g>");
        assert_eq!(errors, 1);
    }

    #[test]
    fn unexpected_character() {
        let (tokens, errors) = lex_with_errors("a # b");
        assert_eq!(errors, 1);
        assert_eq!(tokens[1].kind, Error);
        assert_eq!(tokens[2].kind, Identifier);
    }

    #[test]
    fn eof_only() {
        assert_eq!(kinds("  \n "), vec![Eof]);
    }
}
