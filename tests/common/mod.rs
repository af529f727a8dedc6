#![allow(dead_code)]

use php2js_rs::{Token, TokenKind};

/// Helper: token from its wire category name and text.
pub fn tok(name: &str, text: &str) -> Token {
    Token::new(TokenKind::from_name(name), text)
}

/// Single space of insignificant whitespace.
pub fn ws() -> Token {
    tok("T_WHITESPACE", " ")
}

pub fn num(text: &str) -> Token {
    tok("T_LNUMBER", text)
}

pub fn ident(name: &str) -> Token {
    tok("T_STRING", name)
}

/// Variable token; `name` includes the `$` sigil, as PHP's lexer
/// reports it.
pub fn var(name: &str) -> Token {
    tok("T_VARIABLE", name)
}

/// Single-character token whose category name is its own spelling.
pub fn punct(symbol: &str) -> Token {
    tok(symbol, symbol)
}

pub fn semi() -> Token {
    punct(";")
}
