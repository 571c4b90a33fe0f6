//! Token kinds of the electron language.
//!
//! Literal values are not stored in the token; they are read back from the
//! source text through the token's span.

use electron_source::Span;
use serde::{Deserialize, Serialize};

/// An electron token kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ElectronToken {
    // === Keywords ===
    /// `import`
    Import,
    /// `export`
    Export,
    /// `from`
    From,
    /// `declare`
    Declare,
    /// `module`
    Module,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// `analog`
    Analog,
    /// `net`
    Net,
    /// `cell`
    Cell,
    /// `const`
    Const,
    /// `true`
    True,
    /// `false`
    False,

    // === Names ===
    /// `name`, `$name` or a quoted name such as `'+5V`.
    Identifier,
    /// `@name`
    Attribute,

    // === Literals ===
    /// `4'10xz`
    BitVector,
    /// `42`
    Integer,
    /// `1.5`
    Real,
    /// `10k`, `4.7uF`
    Unit,
    /// `"text"`
    String,
    /// `<svg>...</svg>`
    Xml,

    // === Operators ===
    /// `=`
    Eq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `<<`
    Shl,
    /// `>>`
    Shr,

    // === Punctuation ===
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,

    // === Comments that carry documentation ===
    /// `/// text` documenting the next module.
    ModuleDoc,
    /// `//! text` documenting the whole design.
    DesignDoc,

    // === Special ===
    /// A character sequence the lexer could not classify.
    Error,
    /// End of input.
    Eof,
}

impl ElectronToken {
    /// Returns `true` for the keywords that open a declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            ElectronToken::Net
                | ElectronToken::Input
                | ElectronToken::Output
                | ElectronToken::Inout
                | ElectronToken::Analog
                | ElectronToken::Cell
        )
    }

    /// Returns `true` for tokens that form a literal value.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            ElectronToken::BitVector
                | ElectronToken::Integer
                | ElectronToken::Real
                | ElectronToken::Unit
                | ElectronToken::String
                | ElectronToken::Xml
                | ElectronToken::True
                | ElectronToken::False
        )
    }

    /// Human-readable description used in "expected ..., found ..." errors.
    pub fn describe(self) -> &'static str {
        match self {
            ElectronToken::Import => "`import`",
            ElectronToken::Export => "`export`",
            ElectronToken::From => "`from`",
            ElectronToken::Declare => "`declare`",
            ElectronToken::Module => "`module`",
            ElectronToken::Input => "`input`",
            ElectronToken::Output => "`output`",
            ElectronToken::Inout => "`inout`",
            ElectronToken::Analog => "`analog`",
            ElectronToken::Net => "`net`",
            ElectronToken::Cell => "`cell`",
            ElectronToken::Const => "`const`",
            ElectronToken::True => "`true`",
            ElectronToken::False => "`false`",
            ElectronToken::Identifier => "identifier",
            ElectronToken::Attribute => "attribute",
            ElectronToken::BitVector => "bit vector",
            ElectronToken::Integer => "integer",
            ElectronToken::Real => "real number",
            ElectronToken::Unit => "unit value",
            ElectronToken::String => "string",
            ElectronToken::Xml => "xml",
            ElectronToken::Eq => "`=`",
            ElectronToken::Plus => "`+`",
            ElectronToken::Minus => "`-`",
            ElectronToken::Star => "`*`",
            ElectronToken::Shl => "`<<`",
            ElectronToken::Shr => "`>>`",
            ElectronToken::Dot => "`.`",
            ElectronToken::Comma => "`,`",
            ElectronToken::Colon => "`:`",
            ElectronToken::Semicolon => "`;`",
            ElectronToken::LeftParen => "`(`",
            ElectronToken::RightParen => "`)`",
            ElectronToken::LeftBracket => "`[`",
            ElectronToken::RightBracket => "`]`",
            ElectronToken::LeftBrace => "`{`",
            ElectronToken::RightBrace => "`}`",
            ElectronToken::ModuleDoc => "doc comment",
            ElectronToken::DesignDoc => "design doc comment",
            ElectronToken::Error => "invalid token",
            ElectronToken::Eof => "end of file",
        }
    }
}

/// A token kind with its location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// What was lexed.
    pub kind: ElectronToken,
    /// Where it was lexed.
    pub span: Span,
}

/// Returns the keyword token for `text`, if it is one. Keywords are case-sensitive.
pub fn lookup_keyword(text: &str) -> Option<ElectronToken> {
    match text {
        "import" => Some(ElectronToken::Import),
        "export" => Some(ElectronToken::Export),
        "from" => Some(ElectronToken::From),
        "declare" => Some(ElectronToken::Declare),
        "module" => Some(ElectronToken::Module),
        "input" => Some(ElectronToken::Input),
        "output" => Some(ElectronToken::Output),
        "inout" => Some(ElectronToken::Inout),
        "analog" => Some(ElectronToken::Analog),
        "net" => Some(ElectronToken::Net),
        "cell" => Some(ElectronToken::Cell),
        "const" => Some(ElectronToken::Const),
        "true" => Some(ElectronToken::True),
        "false" => Some(ElectronToken::False),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_case_sensitive() {
        assert_eq!(lookup_keyword("module"), Some(ElectronToken::Module));
        assert_eq!(lookup_keyword("Module"), None);
        assert_eq!(lookup_keyword("with"), None);
    }

    #[test]
    fn type_keywords() {
        assert!(ElectronToken::Analog.is_type_keyword());
        assert!(ElectronToken::Cell.is_type_keyword());
        assert!(!ElectronToken::Const.is_type_keyword());
    }

    #[test]
    fn literal_predicate() {
        assert!(ElectronToken::Unit.is_literal());
        assert!(ElectronToken::False.is_literal());
        assert!(!ElectronToken::Identifier.is_literal());
    }
}
