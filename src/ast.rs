/// Parsed program: top-level nodes of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub filename: Option<String>,
    pub children: Vec<Node>,
}

/// Class declaration with its member nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub modifiers: ModifierSet,
    pub doc_comment: Option<String>,
    pub children: Vec<Node>,
}

/// Function or method declaration with its body nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub modifiers: ModifierSet,
    pub doc_comment: Option<String>,
    pub parameters: Vec<Parameter>,
    pub children: Vec<Node>,
}

/// Declared parameter, name stored without the `$` sigil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Literal>,
}

/// `if` statement with its condition and body nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub condition: Expr,
    pub children: Vec<Node>,
}

/// Any node that can appear in a container body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Class(Class),
    Function(Function),
    If(If),
    Expr(Expr),
}

/// Expression tree built by precedence climbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Number(i64),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Builds a binary node from already-parsed operands.
    #[must_use]
    pub fn binary(op: BinaryOp, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Binary operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    /// PHP `.`; translates to JavaScript `+`.
    Concatenate,
}

/// Default-value literal on a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Bool(bool),
    Str(String),
}

impl Literal {
    /// Interprets a bare keyword token as a literal, if it is one.
    /// PHP spells its boolean constants in any capitalization.
    #[must_use]
    pub fn from_keyword(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("true") {
            Some(Self::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Some(Self::Bool(false))
        } else {
            None
        }
    }

    /// Interprets a quoted string token: strips the quotes and
    /// resolves the escape sequences its quoting style defines.
    #[must_use]
    pub fn from_quoted(text: &str) -> Self {
        Self::Str(unquote(text))
    }
}

/// Declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Abstract,
    Final,
    Public,
    Protected,
    Private,
    Static,
}

/// Accumulated modifiers awaiting the next declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSet {
    pub is_abstract: bool,
    pub is_final: bool,
    pub is_public: bool,
    pub is_protected: bool,
    pub is_private: bool,
    pub is_static: bool,
}

impl ModifierSet {
    pub fn insert(&mut self, modifier: Modifier) {
        match modifier {
            Modifier::Abstract => self.is_abstract = true,
            Modifier::Final => self.is_final = true,
            Modifier::Public => self.is_public = true,
            Modifier::Protected => self.is_protected = true,
            Modifier::Private => self.is_private = true,
            Modifier::Static => self.is_static = true,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.is_abstract
            || self.is_final
            || self.is_public
            || self.is_protected
            || self.is_private
            || self.is_static)
    }
}

/// Strips the quotes from a PHP string token and resolves its escapes.
///
/// Single-quoted strings only recognize `\\` and `\'`; double-quoted
/// strings additionally resolve `\n`, `\r`, `\t`, `\"`, and `\$`. An
/// unrecognized escape keeps its backslash, as PHP does.
fn unquote(text: &str) -> String {
    let (quote, body) = match text.as_bytes().first() {
        Some(b'\'') => ('\'', inner(text, '\'')),
        Some(b'"') => ('"', inner(text, '"')),
        _ => return text.to_owned(),
    };
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some(q) if q == quote => out.push(q),
            Some('n') if quote == '"' => out.push('\n'),
            Some('r') if quote == '"' => out.push('\r'),
            Some('t') if quote == '"' => out.push('\t'),
            Some('$') if quote == '"' => out.push('$'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Body of a quoted token, tolerating a missing closing quote.
fn inner(text: &str, quote: char) -> &str {
    let body = &text[quote.len_utf8()..];
    body.strip_suffix(quote).unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_literals() {
        assert_eq!(Literal::from_keyword("true"), Some(Literal::Bool(true)));
        assert_eq!(Literal::from_keyword("false"), Some(Literal::Bool(false)));
        assert_eq!(Literal::from_keyword("null"), None);
    }

    #[test]
    fn keyword_literals_ignore_case() {
        assert_eq!(Literal::from_keyword("TRUE"), Some(Literal::Bool(true)));
        assert_eq!(Literal::from_keyword("True"), Some(Literal::Bool(true)));
        assert_eq!(Literal::from_keyword("FALSE"), Some(Literal::Bool(false)));
        assert_eq!(Literal::from_keyword("False"), Some(Literal::Bool(false)));
        assert_eq!(Literal::from_keyword("NULL"), None);
    }

    #[test]
    fn single_quoted_strings_keep_most_escapes_literal() {
        assert_eq!(
            Literal::from_quoted(r"'it\'s \n raw \\'"),
            Literal::Str("it's \\n raw \\".to_owned())
        );
    }

    #[test]
    fn double_quoted_strings_resolve_escapes() {
        assert_eq!(
            Literal::from_quoted(r#""line\none\ttab \$x \q""#),
            Literal::Str("line\none\ttab $x \\q".to_owned())
        );
    }

    #[test]
    fn modifier_set_accumulates() {
        let mut set = ModifierSet::default();
        assert!(set.is_empty());
        set.insert(Modifier::Abstract);
        set.insert(Modifier::Static);
        assert!(set.is_abstract);
        assert!(set.is_static);
        assert!(!set.is_public);
        assert!(!set.is_empty());
    }

    #[test]
    fn binary_helper_boxes_operands() {
        let expr = Expr::binary(BinaryOp::Add, Expr::Number(1), Expr::Number(2));
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::Number(1)),
                right: Box::new(Expr::Number(2)),
            }
        );
    }
}
