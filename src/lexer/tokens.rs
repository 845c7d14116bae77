use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("pragma", TokenKind::Pragma);
        map.insert("include", TokenKind::Include);
        map.insert("module", TokenKind::Module);
        map.insert("export", TokenKind::Export);
        map.insert("sealed", TokenKind::Sealed);
        map.insert("ledger", TokenKind::Ledger);
        map.insert("constructor", TokenKind::Constructor);
        map.insert("import", TokenKind::Import);
        map.insert("prefix", TokenKind::Prefix);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("for", TokenKind::For);
        map.insert("const", TokenKind::Const);
        map.insert("of", TokenKind::Of);
        map.insert("assert", TokenKind::Assert);
        map.insert("as", TokenKind::As);
        map.insert("Boolean", TokenKind::Boolean);
        map.insert("Field", TokenKind::Field);
        map.insert("Uint", TokenKind::Uint);
        map.insert("Bytes", TokenKind::Bytes);
        map.insert("Opaque", TokenKind::Opaque);
        map.insert("Vector", TokenKind::Vector);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Natural,
    Version,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    DotDot,
    Semicolon,
    Colon,
    Question,
    Comma,
    Hash,

    PlusEquals,
    MinusEquals,

    Plus,
    Dash,
    Star,

    // Reserved
    Pragma,
    Include,
    Module,
    Export,
    Sealed,
    Ledger,
    Constructor,
    Import,
    Prefix,
    Return,
    If,
    Else,
    For,
    Const,
    Of,
    Assert,
    As,

    // Reserved type names
    Boolean,
    Field,
    Uint,
    Bytes,
    Opaque,
    Vector,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Natural,
            TokenKind::Version,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
