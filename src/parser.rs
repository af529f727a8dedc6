use std::fmt;

use crate::ast::{Class, File, Function, If, Literal, Modifier, ModifierSet, Node, Parameter};
use crate::cursor::TokenCursor;
use crate::expr::parse_expression;
use crate::token::{Token, TokenKind};

/// Unrecognized tokens tolerated in a row before parsing stops early.
pub const UNKNOWN_TOKEN_LIMIT: usize = 10;

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected a specific token, found another.
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    /// Input ended while a construct was incomplete.
    UnexpectedEnd { expected: Option<&'static str> },
    /// Doc comment seen before the previous one was attached.
    UnhandledDocComment,
    /// Token with no meaning inside an expression.
    UnhandledExpressionToken { found: String },
    /// Input ended before the expression terminator.
    UnterminatedExpression,
    /// Expression did not reduce to exactly one tree.
    MalformedExpression { operands: usize },
    /// Numeric token that does not fit a 64-bit integer.
    InvalidNumber { text: String },
    /// Parameter default that is not a recognized literal.
    UnknownDefaultLiteral { found: String },
    /// `}` with no open container to close.
    StackUnderflow,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, got '{found}'")
            }
            Self::UnexpectedEnd { expected: None } => {
                write!(f, "unexpected end of input")
            }
            Self::UnexpectedEnd {
                expected: Some(expected),
            } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            Self::UnhandledDocComment => {
                write!(f, "doc comment with no declaration to attach to")
            }
            Self::UnhandledExpressionToken { found } => {
                write!(f, "'{found}' has no meaning in an expression")
            }
            Self::UnterminatedExpression => write!(f, "expression not terminated"),
            Self::MalformedExpression { operands } => {
                write!(f, "malformed expression ({operands} operands left)")
            }
            Self::InvalidNumber { text } => write!(f, "invalid number '{text}'"),
            Self::UnknownDefaultLiteral { found } => {
                write!(f, "unsupported default value '{found}'")
            }
            Self::StackUnderflow => write!(f, "no open container to close"),
        }
    }
}

/// Error produced while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at token {at}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub at: usize,
}

/// Parse a token sequence into a program tree.
///
/// # Errors
///
/// Returns `ParseError` on syntax errors such as a malformed
/// declaration header, an expression that does not reduce, or a `}`
/// with nothing open.
pub fn parse(tokens: &[Token]) -> Result<File, ParseError> {
    Parser::new(tokens, None).parse()
}

/// Like [`parse`], recording the originating filename on the tree.
///
/// # Errors
///
/// Same conditions as [`parse`].
pub fn parse_named(tokens: &[Token], filename: impl Into<String>) -> Result<File, ParseError> {
    Parser::new(tokens, Some(filename.into())).parse()
}

/// Tree under construction.
///
/// Holds the root file, the stack of containers whose `}` has not
/// arrived yet, and the pending state (modifiers, doc comment) that
/// the next declaration will consume. A container receives its
/// children while it is on the stack and attaches to its parent when
/// it closes, so nesting falls out of stack order. The root is the
/// conceptual stack bottom and is never popped.
#[derive(Debug)]
pub struct TreeBuilder {
    root: File,
    stack: Vec<OpenContainer>,
    modifiers: ModifierSet,
    doc_comment: Option<String>,
}

#[derive(Debug)]
enum OpenContainer {
    Class(Class),
    Function(Function),
    If(If),
}

impl OpenContainer {
    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self {
            Self::Class(class) => &mut class.children,
            Self::Function(function) => &mut function.children,
            Self::If(if_stmt) => &mut if_stmt.children,
        }
    }

    fn into_node(self) -> Node {
        match self {
            Self::Class(class) => Node::Class(class),
            Self::Function(function) => Node::Function(function),
            Self::If(if_stmt) => Node::If(if_stmt),
        }
    }
}

impl TreeBuilder {
    #[must_use]
    pub fn new(filename: Option<String>) -> Self {
        Self {
            root: File {
                filename,
                children: Vec::new(),
            },
            stack: Vec::new(),
            modifiers: ModifierSet::default(),
            doc_comment: None,
        }
    }

    /// Holds a doc comment for the next declaration.
    ///
    /// # Errors
    ///
    /// Fails with `UnhandledDocComment` if one is already pending.
    pub fn store_doc(&mut self, text: &str) -> Result<(), ParseErrorKind> {
        if self.doc_comment.is_some() {
            return Err(ParseErrorKind::UnhandledDocComment);
        }
        self.doc_comment = Some(text.to_owned());
        Ok(())
    }

    pub fn take_doc(&mut self) -> Option<String> {
        self.doc_comment.take()
    }

    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.modifiers.insert(modifier);
    }

    /// Moves the pending modifiers out, leaving the set empty.
    pub fn take_modifiers(&mut self) -> ModifierSet {
        std::mem::take(&mut self.modifiers)
    }

    /// Attaches a finished node to the innermost open container, or to
    /// the root when nothing is open.
    pub fn push_node(&mut self, node: Node) {
        if let Some(open) = self.stack.last_mut() {
            open.children_mut().push(node);
            return;
        }
        self.root.children.push(node);
    }

    pub fn open_class(&mut self, class: Class) {
        self.stack.push(OpenContainer::Class(class));
    }

    pub fn open_function(&mut self, function: Function) {
        self.stack.push(OpenContainer::Function(function));
    }

    pub fn open_if(&mut self, if_stmt: If) {
        self.stack.push(OpenContainer::If(if_stmt));
    }

    /// Closes the innermost open container, attaching it to its parent.
    ///
    /// # Errors
    ///
    /// Fails with `StackUnderflow` when nothing is open; the root
    /// cannot be closed.
    pub fn close(&mut self) -> Result<(), ParseErrorKind> {
        let Some(top) = self.stack.pop() else {
            return Err(ParseErrorKind::StackUnderflow);
        };
        self.push_node(top.into_node());
        Ok(())
    }

    /// Consumes the builder, folding any still-open containers into
    /// their parents, and returns the finished tree.
    #[must_use]
    pub fn finish(mut self) -> File {
        while let Some(top) = self.stack.pop() {
            self.push_node(top.into_node());
        }
        self.root
    }
}

struct Parser<'a> {
    cursor: TokenCursor<'a>,
    builder: TreeBuilder,
    unknown_streak: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], filename: Option<String>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            builder: TreeBuilder::new(filename),
            unknown_streak: 0,
        }
    }

    fn parse(mut self) -> Result<File, ParseError> {
        loop {
            let at = self.cursor.position();
            let Some(token) = self.cursor.take() else {
                break;
            };
            match &token.kind {
                TokenKind::OpenTag | TokenKind::Whitespace => {}
                TokenKind::DocComment => {
                    self.builder
                        .store_doc(&token.text)
                        .map_err(|kind| ParseError { kind, at })?;
                }
                TokenKind::Abstract => self.builder.add_modifier(Modifier::Abstract),
                TokenKind::Final => self.builder.add_modifier(Modifier::Final),
                TokenKind::Public => self.builder.add_modifier(Modifier::Public),
                TokenKind::Protected => self.builder.add_modifier(Modifier::Protected),
                TokenKind::Private => self.builder.add_modifier(Modifier::Private),
                TokenKind::Static => self.builder.add_modifier(Modifier::Static),
                TokenKind::Class => self.parse_class()?,
                TokenKind::Function => self.parse_function()?,
                TokenKind::If => self.parse_if()?,
                TokenKind::Number => {
                    self.cursor.rewind(1);
                    let expr = parse_expression(&mut self.cursor, &TokenKind::Semicolon)?;
                    self.builder.push_node(Node::Expr(expr));
                }
                TokenKind::CloseBrace => {
                    self.builder
                        .close()
                        .map_err(|kind| ParseError { kind, at })?;
                }
                _ => {
                    // Anything else starts or extends an unrecognized
                    // run; too many in a row and we stop early rather
                    // than wander through a file we cannot read.
                    self.unknown_streak += 1;
                    if self.unknown_streak > UNKNOWN_TOKEN_LIMIT {
                        break;
                    }
                    continue;
                }
            }
            self.unknown_streak = 0;
        }
        Ok(self.builder.finish())
    }

    fn parse_class(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        let name = self
            .expect(&TokenKind::Identifier, "a class name")?
            .text
            .clone();
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;
        let class = Class {
            name,
            modifiers: self.builder.take_modifiers(),
            doc_comment: self.builder.take_doc(),
            children: Vec::new(),
        };
        self.builder.open_class(class);
        Ok(())
    }

    fn parse_function(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        let name = self
            .expect(&TokenKind::Identifier, "a function name")?
            .text
            .clone();
        self.skip_whitespace();
        self.expect(&TokenKind::OpenParen, "'('")?;
        let parameters = self.parse_parameters()?;
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;
        let function = Function {
            name,
            modifiers: self.builder.take_modifiers(),
            doc_comment: self.builder.take_doc(),
            parameters,
            children: Vec::new(),
        };
        self.builder.open_function(function);
        Ok(())
    }

    /// Parses the parameter list after `(`, consuming the closing `)`.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        let mut parameters = Vec::new();
        loop {
            self.skip_whitespace();
            if self.cursor.take_if(&TokenKind::CloseParen).is_some() {
                break;
            }
            let token = self.expect(&TokenKind::Variable, "a parameter")?;
            let name = token
                .text
                .strip_prefix('$')
                .unwrap_or(&token.text)
                .to_owned();
            self.skip_whitespace();
            let default = if self.cursor.take_if(&TokenKind::Assign).is_some() {
                self.skip_whitespace();
                Some(self.parse_default_literal()?)
            } else {
                None
            };
            parameters.push(Parameter { name, default });
            self.skip_whitespace();
            if self.cursor.take_if(&TokenKind::Comma).is_none() {
                self.expect(&TokenKind::CloseParen, "')'")?;
                break;
            }
        }
        Ok(parameters)
    }

    fn parse_default_literal(&mut self) -> Result<Literal, ParseError> {
        let at = self.cursor.position();
        let Some(token) = self.cursor.take() else {
            return Err(ParseError {
                kind: ParseErrorKind::UnexpectedEnd {
                    expected: Some("a default value"),
                },
                at,
            });
        };
        match &token.kind {
            TokenKind::Identifier => {
                Literal::from_keyword(&token.text).ok_or_else(|| ParseError {
                    kind: ParseErrorKind::UnknownDefaultLiteral {
                        found: token.text.clone(),
                    },
                    at,
                })
            }
            TokenKind::StringLiteral => Ok(Literal::from_quoted(&token.text)),
            kind => Err(ParseError {
                kind: ParseErrorKind::UnknownDefaultLiteral {
                    found: kind.name().to_owned(),
                },
                at,
            }),
        }
    }

    fn parse_if(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        self.expect(&TokenKind::OpenParen, "'('")?;
        let condition = parse_expression(&mut self.cursor, &TokenKind::CloseParen)?;
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;
        self.builder.open_if(If {
            condition,
            children: Vec::new(),
        });
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.take_if(&TokenKind::Whitespace).is_some() {}
    }

    fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &'static str,
    ) -> Result<&'a Token, ParseError> {
        let at = self.cursor.position();
        match self.cursor.take() {
            Some(token) if token.kind == *kind => Ok(token),
            Some(token) => Err(ParseError {
                kind: ParseErrorKind::UnexpectedToken {
                    expected,
                    found: token.kind.name().to_owned(),
                },
                at,
            }),
            None => Err(ParseError {
                kind: ParseErrorKind::UnexpectedEnd {
                    expected: Some(expected),
                },
                at,
            }),
        }
    }
}
