use std::fmt;

/// Token categories produced by PHP's tokenizer.
///
/// Multi-character categories use the tokenizer's `T_*` names on the
/// wire; single-character tokens use the character itself. Categories
/// this crate does not recognize are preserved in
/// [`Unknown`](TokenKind::Unknown) so consumers can report or skip
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `<?php` opening tag (`T_OPEN_TAG`).
    OpenTag,
    /// Whitespace run (`T_WHITESPACE`).
    Whitespace,
    /// `/** ... */` documentation comment (`T_DOC_COMMENT`).
    DocComment,
    /// `class` keyword (`T_CLASS`).
    Class,
    /// `function` keyword (`T_FUNCTION`).
    Function,
    /// `if` keyword (`T_IF`).
    If,
    /// `else` keyword (`T_ELSE`).
    Else,
    /// `abstract` modifier (`T_ABSTRACT`).
    Abstract,
    /// `final` modifier (`T_FINAL`).
    Final,
    /// `public` modifier (`T_PUBLIC`).
    Public,
    /// `protected` modifier (`T_PROTECTED`).
    Protected,
    /// `private` modifier (`T_PRIVATE`).
    Private,
    /// `static` modifier (`T_STATIC`).
    Static,
    /// Bare identifier such as a class or function name (`T_STRING`).
    Identifier,
    /// `$`-prefixed variable (`T_VARIABLE`).
    Variable,
    /// Integer literal (`T_LNUMBER`).
    Number,
    /// Quoted string literal (`T_CONSTANT_ENCAPSED_STRING`).
    StringLiteral,
    /// `&&` operator (`T_BOOLEAN_AND`).
    BooleanAnd,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `;`
    Semicolon,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `.` (PHP string concatenation)
    Dot,
    /// Any category this crate does not recognize, carrying the wire
    /// name verbatim.
    Unknown(String),
}

impl TokenKind {
    /// Maps a wire category name to its kind.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "T_OPEN_TAG" => Self::OpenTag,
            "T_WHITESPACE" => Self::Whitespace,
            "T_DOC_COMMENT" => Self::DocComment,
            "T_CLASS" => Self::Class,
            "T_FUNCTION" => Self::Function,
            "T_IF" => Self::If,
            "T_ELSE" => Self::Else,
            "T_ABSTRACT" => Self::Abstract,
            "T_FINAL" => Self::Final,
            "T_PUBLIC" => Self::Public,
            "T_PROTECTED" => Self::Protected,
            "T_PRIVATE" => Self::Private,
            "T_STATIC" => Self::Static,
            "T_STRING" => Self::Identifier,
            "T_VARIABLE" => Self::Variable,
            "T_LNUMBER" => Self::Number,
            "T_CONSTANT_ENCAPSED_STRING" => Self::StringLiteral,
            "T_BOOLEAN_AND" => Self::BooleanAnd,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "{" => Self::OpenBrace,
            "}" => Self::CloseBrace,
            "," => Self::Comma,
            "=" => Self::Assign,
            ";" => Self::Semicolon,
            "+" => Self::Plus,
            "-" => Self::Minus,
            "*" => Self::Star,
            "/" => Self::Slash,
            "%" => Self::Percent,
            "." => Self::Dot,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Wire spelling of this category, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::OpenTag => "T_OPEN_TAG",
            Self::Whitespace => "T_WHITESPACE",
            Self::DocComment => "T_DOC_COMMENT",
            Self::Class => "T_CLASS",
            Self::Function => "T_FUNCTION",
            Self::If => "T_IF",
            Self::Else => "T_ELSE",
            Self::Abstract => "T_ABSTRACT",
            Self::Final => "T_FINAL",
            Self::Public => "T_PUBLIC",
            Self::Protected => "T_PROTECTED",
            Self::Private => "T_PRIVATE",
            Self::Static => "T_STATIC",
            Self::Identifier => "T_STRING",
            Self::Variable => "T_VARIABLE",
            Self::Number => "T_LNUMBER",
            Self::StringLiteral => "T_CONSTANT_ENCAPSED_STRING",
            Self::BooleanAnd => "T_BOOLEAN_AND",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::Comma => ",",
            Self::Assign => "=",
            Self::Semicolon => ";",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Dot => ".",
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token with its category and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
