//! Streaming JavaScript emitter driven directly by the token sequence.
//!
//! A single pass over the tokens, no tree in between: emitted text
//! accumulates as fragments inside a stack of open containers, a
//! context stack tracks whether the next token lands in statement,
//! expression, or after-operand position, and a continuation stack
//! remembers what to do when a delimiter closes. Pieces that depend on
//! later tokens (the class declaration line depends on whether the
//! class turns out to have members) stay deferred until assembly.

use std::fmt;

use crate::ast::{Literal, Modifier, ModifierSet, Parameter};
use crate::cursor::TokenCursor;
use crate::expr::binary_operator;
use crate::token::{Token, TokenKind};

const INDENT: &str = "    ";

/// Classifies a generator error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateErrorKind {
    /// Expected a specific token, found another.
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    /// Input ended while a construct was incomplete.
    UnexpectedEnd { expected: Option<&'static str> },
    /// Token landed in a context it cannot extend.
    ContextMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// `)` closed an expression nothing was waiting for.
    MissingContinuation,
    /// Non-static function declared outside any class.
    NoEnclosingClass { function: String },
    /// Parameter default that is not a recognized literal.
    UnknownDefaultLiteral { found: String },
    /// `}` with no open container to close.
    StackUnderflow,
}

impl fmt::Display for GenerateErrorKind {
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
            Self::ContextMismatch { expected, found } => {
                write!(f, "expected {expected} context, found {found}")
            }
            Self::MissingContinuation => write!(f, "no continuation pending"),
            Self::NoEnclosingClass { function } => {
                write!(f, "function '{function}' has no enclosing class")
            }
            Self::UnknownDefaultLiteral { found } => {
                write!(f, "unsupported default value '{found}'")
            }
            Self::StackUnderflow => write!(f, "no open container to close"),
        }
    }
}

/// Error produced while generating JavaScript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: GenerateErrorKind,
    pub at: usize,
    pub file: Option<String>,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at token {}", self.kind, self.at)?;
        if let Some(file) = &self.file {
            write!(f, " in {file}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GenerateError {}

/// Translate a token sequence into JavaScript source text.
///
/// # Errors
///
/// Returns `GenerateError` when the sequence cannot be followed: a
/// malformed declaration header, a token in a context it cannot
/// extend, or a delimiter with nothing to close. Tokens the emitter
/// merely does not know become `/* unhandled ... */` placeholders
/// instead of errors.
pub fn generate(tokens: &[Token]) -> Result<String, GenerateError> {
    Generator::new(tokens, None).generate()
}

/// Like [`generate`], recording the originating filename on errors.
///
/// # Errors
///
/// Same conditions as [`generate`].
pub fn generate_named(
    tokens: &[Token],
    filename: impl Into<String>,
) -> Result<String, GenerateError> {
    Generator::new(tokens, Some(filename.into())).generate()
}

/// One piece of output inside a container.
#[derive(Debug)]
enum Fragment {
    /// Finished text.
    Literal(String),
    /// Text that can only be rendered at assembly time.
    Deferred(Deferred),
    /// Another container, spliced in place.
    Nested(usize),
}

#[derive(Debug)]
enum Deferred {
    /// Class declaration line; its trailing spacing depends on whether
    /// the class body turned out to contain members.
    ClassDecl {
        name: String,
        is_abstract: bool,
        container: usize,
    },
}

#[derive(Debug)]
struct Container {
    kind: ContainerKind,
    fragments: Vec<Fragment>,
}

#[derive(Debug)]
enum ContainerKind {
    Root,
    Class { name: String },
    Function,
    If,
}

/// What the next token is expected to continue.
#[derive(Debug)]
enum Context {
    Statement,
    Expression { terminator: TokenKind },
    Operator,
}

const fn context_name(context: Option<&Context>) -> &'static str {
    match context {
        Some(Context::Statement) => "statement",
        Some(Context::Expression { .. }) => "expression",
        Some(Context::Operator) => "operator",
        None => "nothing",
    }
}

/// Action to run once the current delimiter closes.
#[derive(Debug, Clone, Copy)]
enum Continuation {
    /// `)` finished an if condition; the body follows.
    IfBody,
    /// `}` finished an if body; an else branch could attach here.
    ElseBranch,
}

struct Generator<'a> {
    cursor: TokenCursor<'a>,
    containers: Vec<Container>,
    /// Indices of open containers; `[0]` is the root, never popped.
    stack: Vec<usize>,
    contexts: Vec<Context>,
    continuations: Vec<Continuation>,
    modifiers: ModifierSet,
    /// A doc comment was just emitted; the declaration that follows
    /// attaches directly beneath it, without its own separator.
    after_doc: bool,
    depth: usize,
    file: Option<String>,
}

impl<'a> Generator<'a> {
    fn new(tokens: &'a [Token], file: Option<String>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            containers: vec![Container {
                kind: ContainerKind::Root,
                fragments: Vec::new(),
            }],
            stack: vec![0],
            contexts: vec![Context::Statement],
            continuations: Vec::new(),
            modifiers: ModifierSet::default(),
            after_doc: false,
            depth: 0,
            file,
        }
    }

    fn generate(mut self) -> Result<String, GenerateError> {
        loop {
            let at = self.cursor.position();
            let Some(token) = self.cursor.take() else {
                break;
            };
            // Whitespace and modifier keywords sit between a doc
            // comment and the declaration it belongs to; any other
            // token detaches it.
            let keeps_doc = matches!(
                token.kind,
                TokenKind::OpenTag
                    | TokenKind::Whitespace
                    | TokenKind::DocComment
                    | TokenKind::Abstract
                    | TokenKind::Final
                    | TokenKind::Public
                    | TokenKind::Protected
                    | TokenKind::Private
                    | TokenKind::Static
            );
            match &token.kind {
                TokenKind::OpenTag | TokenKind::Whitespace => {}
                TokenKind::DocComment => self.handle_doc_comment(&token.text),
                TokenKind::Abstract => self.modifiers.insert(Modifier::Abstract),
                TokenKind::Final => self.modifiers.insert(Modifier::Final),
                TokenKind::Public => self.modifiers.insert(Modifier::Public),
                TokenKind::Protected => self.modifiers.insert(Modifier::Protected),
                TokenKind::Private => self.modifiers.insert(Modifier::Private),
                TokenKind::Static => self.modifiers.insert(Modifier::Static),
                TokenKind::Class => self.handle_class()?,
                TokenKind::Function => self.handle_function()?,
                TokenKind::If => self.handle_if()?,
                TokenKind::Number => self.handle_operand(token.text.clone()),
                TokenKind::Variable => {
                    let name = token.text.strip_prefix('$').unwrap_or(&token.text);
                    self.handle_operand(name.to_owned());
                }
                TokenKind::StringLiteral => {
                    let rendered = js_literal(&Literal::from_quoted(&token.text));
                    self.handle_operand(rendered);
                }
                TokenKind::Assign => self.handle_operator("=", at)?,
                TokenKind::BooleanAnd => self.handle_operator("&&", at)?,
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Dot => {
                    if let Some(info) = binary_operator(&token.kind) {
                        self.handle_operator(info.symbol, at)?;
                    }
                }
                TokenKind::Semicolon => self.handle_semicolon(),
                TokenKind::CloseParen => self.handle_close_paren(at)?,
                TokenKind::CloseBrace => self.handle_close_brace(at)?,
                other => {
                    let marker = placeholder(other.name(), &token.text);
                    self.emit(marker);
                }
            }
            if !keeps_doc {
                self.after_doc = false;
            }
        }
        Ok(self.assemble())
    }

    /// Emits a doc comment where it stands, re-indented. At member
    /// level the comment takes over the blank-line separator the
    /// declaration after it would have emitted.
    fn handle_doc_comment(&mut self, text: &str) {
        if !self.after_doc && self.at_member_level() {
            self.member_separator();
        }
        self.emit_doc(text);
        self.after_doc = true;
    }

    fn handle_class(&mut self) -> Result<(), GenerateError> {
        let modifiers = std::mem::take(&mut self.modifiers);
        self.skip_whitespace();
        let name = self
            .expect(&TokenKind::Identifier, "a class name")?
            .text
            .clone();
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;

        if !self.after_doc {
            self.member_separator();
        }
        let idx = self.add_container(ContainerKind::Class { name: name.clone() });
        self.push_deferred(Deferred::ClassDecl {
            name,
            is_abstract: modifiers.is_abstract,
            container: idx,
        });
        self.attach_and_open(idx);
        self.contexts.push(Context::Statement);
        Ok(())
    }

    fn handle_function(&mut self) -> Result<(), GenerateError> {
        let modifiers = std::mem::take(&mut self.modifiers);
        self.skip_whitespace();
        let at = self.cursor.position();
        let name = self
            .expect(&TokenKind::Identifier, "a function name")?
            .text
            .clone();
        self.skip_whitespace();
        self.expect(&TokenKind::OpenParen, "'('")?;
        let parameters = self.parse_parameters()?;
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;

        let target = if modifiers.is_static {
            format!("exports.{name}")
        } else {
            match self.enclosing_class() {
                Some(class) => format!("{class}.prototype.{name}"),
                None => {
                    return Err(
                        self.fail(GenerateErrorKind::NoEnclosingClass { function: name }, at)
                    );
                }
            }
        };

        if !self.after_doc {
            self.member_separator();
        }
        let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
        self.emit(format!("{target} = function ({}) {{", names.join(", ")));
        self.depth += 1;
        let idx = self.add_container(ContainerKind::Function);
        self.attach_and_open(idx);
        self.newline();
        for parameter in &parameters {
            if let Some(default) = &parameter.default {
                self.emit(format!(
                    "if ({name} === undefined) {{ {name} = {value}; }}",
                    name = parameter.name,
                    value = js_literal(default),
                ));
                self.newline();
            }
        }
        self.contexts.push(Context::Statement);
        Ok(())
    }

    fn handle_if(&mut self) -> Result<(), GenerateError> {
        self.skip_whitespace();
        self.expect(&TokenKind::OpenParen, "'('")?;
        self.emit("if (");
        self.contexts.push(Context::Expression {
            terminator: TokenKind::CloseParen,
        });
        self.continuations.push(Continuation::IfBody);
        Ok(())
    }

    fn handle_operand(&mut self, rendered: String) {
        self.emit(rendered);
        self.contexts.push(Context::Operator);
    }

    fn handle_operator(&mut self, symbol: &str, at: usize) -> Result<(), GenerateError> {
        match self.contexts.pop() {
            Some(Context::Operator) => {
                self.emit(format!(" {symbol} "));
                Ok(())
            }
            found => Err(self.fail(
                GenerateErrorKind::ContextMismatch {
                    expected: "operator",
                    found: context_name(found.as_ref()),
                },
                at,
            )),
        }
    }

    fn handle_semicolon(&mut self) {
        while matches!(self.contexts.last(), Some(Context::Operator)) {
            self.contexts.pop();
        }
        self.emit(";");
        self.newline();
    }

    fn handle_close_paren(&mut self, at: usize) -> Result<(), GenerateError> {
        match self.contexts.pop() {
            Some(Context::Operator) => {}
            found => {
                return Err(self.fail(
                    GenerateErrorKind::ContextMismatch {
                        expected: "operator",
                        found: context_name(found.as_ref()),
                    },
                    at,
                ));
            }
        }
        match self.contexts.pop() {
            Some(Context::Expression { terminator }) if terminator == TokenKind::CloseParen => {}
            found => {
                return Err(self.fail(
                    GenerateErrorKind::ContextMismatch {
                        expected: "expression",
                        found: context_name(found.as_ref()),
                    },
                    at,
                ));
            }
        }
        match self.continuations.pop() {
            Some(Continuation::IfBody) => self.continue_if_body(),
            Some(Continuation::ElseBranch) | None => {
                Err(self.fail(GenerateErrorKind::MissingContinuation, at))
            }
        }
    }

    /// Runs after `)` finished an if condition: consumes the `{`,
    /// opens the body container, and leaves an else attachment point
    /// behind.
    fn continue_if_body(&mut self) -> Result<(), GenerateError> {
        self.skip_whitespace();
        self.expect(&TokenKind::OpenBrace, "'{'")?;
        self.emit(") {");
        self.depth += 1;
        let idx = self.add_container(ContainerKind::If);
        self.attach_and_open(idx);
        self.newline();
        self.contexts.push(Context::Statement);
        self.continuations.push(Continuation::ElseBranch);
        Ok(())
    }

    fn handle_close_brace(&mut self, at: usize) -> Result<(), GenerateError> {
        match self.contexts.pop() {
            Some(Context::Statement) => {}
            found => {
                return Err(self.fail(
                    GenerateErrorKind::ContextMismatch {
                        expected: "statement",
                        found: context_name(found.as_ref()),
                    },
                    at,
                ));
            }
        }
        let Some(&top) = self.stack.last() else {
            return Err(self.fail(GenerateErrorKind::StackUnderflow, at));
        };
        let (footer, ends_branch) = match &self.containers[top].kind {
            ContainerKind::Root => {
                return Err(self.fail(GenerateErrorKind::StackUnderflow, at));
            }
            ContainerKind::Class { .. } => (None, false),
            ContainerKind::Function => (Some("};"), false),
            ContainerKind::If => (Some("}"), true),
        };
        match footer {
            Some(footer) => self.close_block(footer),
            None => {
                self.stack.pop();
            }
        }
        // The attachment point for a future else branch; today it is
        // simply discarded.
        if ends_branch && self.continuations.pop().is_none() {
            return Err(self.fail(GenerateErrorKind::MissingContinuation, at));
        }
        Ok(())
    }

    /// Closes an indented container: retracts the indent the last
    /// newline left behind, then writes the footer into the parent at
    /// the shallower depth.
    fn close_block(&mut self, footer: &str) {
        self.retract_indent();
        self.depth = self.depth.saturating_sub(1);
        self.stack.pop();
        self.emit(format!("{}{footer}", INDENT.repeat(self.depth)));
        self.newline();
    }

    /// Parses the parameter list after `(`, consuming the closing `)`.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, GenerateError> {
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

    fn parse_default_literal(&mut self) -> Result<Literal, GenerateError> {
        let at = self.cursor.position();
        let Some(token) = self.cursor.take() else {
            return Err(self.fail(
                GenerateErrorKind::UnexpectedEnd {
                    expected: Some("a default value"),
                },
                at,
            ));
        };
        match &token.kind {
            TokenKind::Identifier => {
                Literal::from_keyword(&token.text).ok_or_else(|| {
                    self.fail(
                        GenerateErrorKind::UnknownDefaultLiteral {
                            found: token.text.clone(),
                        },
                        at,
                    )
                })
            }
            TokenKind::StringLiteral => Ok(Literal::from_quoted(&token.text)),
            kind => Err(self.fail(
                GenerateErrorKind::UnknownDefaultLiteral {
                    found: kind.name().to_owned(),
                },
                at,
            )),
        }
    }

    /// Name of the innermost open class, if any.
    fn enclosing_class(&self) -> Option<String> {
        self.stack
            .iter()
            .rev()
            .find_map(|&idx| match &self.containers[idx].kind {
                ContainerKind::Class { name } => Some(name.clone()),
                _ => None,
            })
    }

    /// Whether emission currently targets a member list (the root or
    /// a class body) rather than statements in a function or if body.
    fn at_member_level(&self) -> bool {
        self.stack.last().is_some_and(|&idx| {
            matches!(
                self.containers[idx].kind,
                ContainerKind::Root | ContainerKind::Class { .. }
            )
        })
    }

    fn add_container(&mut self, kind: ContainerKind) -> usize {
        let idx = self.containers.len();
        self.containers.push(Container {
            kind,
            fragments: Vec::new(),
        });
        idx
    }

    /// Splices a container into the current one and makes it the
    /// emission target.
    fn attach_and_open(&mut self, idx: usize) {
        if let Some(&top) = self.stack.last() {
            self.containers[top].fragments.push(Fragment::Nested(idx));
        }
        self.stack.push(idx);
    }

    fn emit(&mut self, text: impl Into<String>) {
        if let Some(&top) = self.stack.last() {
            self.containers[top]
                .fragments
                .push(Fragment::Literal(text.into()));
        }
    }

    fn push_deferred(&mut self, deferred: Deferred) {
        if let Some(&top) = self.stack.last() {
            self.containers[top]
                .fragments
                .push(Fragment::Deferred(deferred));
        }
    }

    /// Ends the current line and indents the next one. The indent is a
    /// separate fragment so a closing brace can retract it.
    fn newline(&mut self) {
        self.emit("\n");
        if self.depth > 0 {
            self.emit(INDENT.repeat(self.depth));
        }
    }

    /// Drops the trailing indent fragment, if the last newline left
    /// one; the next line starts shallower than this one did.
    fn retract_indent(&mut self) {
        let Some(&top) = self.stack.last() else {
            return;
        };
        let fragments = &mut self.containers[top].fragments;
        if let Some(Fragment::Literal(text)) = fragments.last() {
            if !text.is_empty() && text.bytes().all(|b| b == b' ') {
                fragments.pop();
            }
        }
    }

    /// Blank line before a member that is not the first in its
    /// container. The break replaces any pending indent so the blank
    /// line carries no spaces.
    fn member_separator(&mut self) {
        let Some(&top) = self.stack.last() else {
            return;
        };
        if self.containers[top].fragments.is_empty() {
            return;
        }
        self.retract_indent();
        self.newline();
    }

    /// Emits a doc comment with its continuation lines re-aligned
    /// under the opening `/**` at the current depth.
    fn emit_doc(&mut self, text: &str) {
        let mut lines = text.lines();
        if let Some(first) = lines.next() {
            self.emit(first.trim_start().to_owned());
            self.newline();
        }
        for line in lines {
            self.emit(format!(" {}", line.trim_start()));
            self.newline();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.cursor.take_if(&TokenKind::Whitespace).is_some() {}
    }

    fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &'static str,
    ) -> Result<&'a Token, GenerateError> {
        let at = self.cursor.position();
        match self.cursor.take() {
            Some(token) if token.kind == *kind => Ok(token),
            Some(token) => Err(self.fail(
                GenerateErrorKind::UnexpectedToken {
                    expected,
                    found: token.kind.name().to_owned(),
                },
                at,
            )),
            None => Err(self.fail(
                GenerateErrorKind::UnexpectedEnd {
                    expected: Some(expected),
                },
                at,
            )),
        }
    }

    fn fail(&self, kind: GenerateErrorKind, at: usize) -> GenerateError {
        GenerateError {
            kind,
            at,
            file: self.file.clone(),
        }
    }

    /// Renders the container tree, resolving deferred fragments, and
    /// normalizes trailing whitespace to a single final newline.
    fn assemble(&self) -> String {
        let mut out = String::new();
        self.write_container(0, &mut out);
        let mut result = out.trim_end().to_owned();
        result.push('\n');
        result
    }

    fn write_container(&self, idx: usize, out: &mut String) {
        for fragment in &self.containers[idx].fragments {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Nested(child) => self.write_container(*child, out),
                Fragment::Deferred(deferred) => out.push_str(&self.resolve(deferred)),
            }
        }
    }

    fn resolve(&self, deferred: &Deferred) -> String {
        match deferred {
            Deferred::ClassDecl {
                name,
                is_abstract,
                container,
            } => {
                let constructor = if *is_abstract {
                    format!("function () {{ throw new Error('{name} is abstract'); }}")
                } else {
                    "function () {}".to_owned()
                };
                let spacing = if self.containers[*container].fragments.is_empty() {
                    "\n"
                } else {
                    "\n\n"
                };
                format!("var {name} = exports.{name} = {constructor};{spacing}")
            }
        }
    }
}

/// Renders a default-value literal in JavaScript.
fn js_literal(literal: &Literal) -> String {
    match literal {
        Literal::Bool(true) => "true".to_owned(),
        Literal::Bool(false) => "false".to_owned(),
        Literal::Str(value) => js_string(value),
    }
}

/// Quotes a string as a JavaScript literal. JSON string syntax is a
/// subset of JavaScript's, so the JSON encoder does the escaping.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Renders an unknown token as a comment marker carrying its kind and
/// quoted text. A `*/` inside the text would end the comment early,
/// so that pair is split into `*\/` (the same string under JavaScript
/// escape rules).
fn placeholder(kind_name: &str, text: &str) -> String {
    let quoted = js_string(text).replace("*/", "*\\/");
    format!("/* unhandled {kind_name} {quoted} */")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(name: &str, text: &str) -> Token {
        Token::new(TokenKind::from_name(name), text)
    }

    fn ws() -> Token {
        tok("T_WHITESPACE", " ")
    }

    #[test]
    fn empty_input_is_a_bare_newline() {
        assert_eq!(generate(&[]).expect("generate failed"), "\n");
    }

    #[test]
    fn number_statement() {
        let tokens = vec![
            tok("T_OPEN_TAG", "<?php "),
            tok("T_LNUMBER", "42"),
            tok(";", ";"),
        ];
        assert_eq!(generate(&tokens).expect("generate failed"), "42;\n");
    }

    #[test]
    fn assignment_with_concatenation() {
        let tokens = vec![
            tok("T_VARIABLE", "$msg"),
            ws(),
            tok("=", "="),
            ws(),
            tok("T_CONSTANT_ENCAPSED_STRING", "'hi '"),
            ws(),
            tok(".", "."),
            ws(),
            tok("T_VARIABLE", "$name"),
            tok(";", ";"),
        ];
        assert_eq!(
            generate(&tokens).expect("generate failed"),
            "msg = \"hi \" + name;\n"
        );
    }

    #[test]
    fn empty_class_declares_on_one_line() {
        let tokens = vec![
            tok("T_CLASS", "class"),
            ws(),
            tok("T_STRING", "Empty"),
            ws(),
            tok("{", "{"),
            tok("}", "}"),
        ];
        assert_eq!(
            generate(&tokens).expect("generate failed"),
            "var Empty = exports.Empty = function () {};\n"
        );
    }

    #[test]
    fn abstract_class_constructor_throws() {
        let tokens = vec![
            tok("T_ABSTRACT", "abstract"),
            ws(),
            tok("T_CLASS", "class"),
            ws(),
            tok("T_STRING", "Base"),
            ws(),
            tok("{", "{"),
            tok("}", "}"),
        ];
        assert_eq!(
            generate(&tokens).expect("generate failed"),
            "var Base = exports.Base = function () { throw new Error('Base is abstract'); };\n"
        );
    }

    #[test]
    fn top_level_function_must_be_static() {
        let tokens = vec![
            tok("T_FUNCTION", "function"),
            ws(),
            tok("T_STRING", "orphan"),
            tok("(", "("),
            tok(")", ")"),
            ws(),
            tok("{", "{"),
            tok("}", "}"),
        ];
        let err = generate(&tokens).expect_err("should fail");
        assert_eq!(
            err.kind,
            GenerateErrorKind::NoEnclosingClass {
                function: "orphan".to_owned()
            }
        );
        assert_eq!(err.at, 2);
    }

    #[test]
    fn stray_close_brace_underflows() {
        let err = generate(&[tok("}", "}")]).expect_err("should fail");
        assert_eq!(err.kind, GenerateErrorKind::StackUnderflow);
        assert_eq!(err.at, 0);
    }

    #[test]
    fn operator_with_no_operand_mismatches() {
        let tokens = vec![tok("+", "+"), tok("T_LNUMBER", "1")];
        let err = generate(&tokens).expect_err("should fail");
        assert_eq!(
            err.kind,
            GenerateErrorKind::ContextMismatch {
                expected: "operator",
                found: "statement",
            }
        );
    }

    #[test]
    fn close_paren_outside_a_condition_mismatches() {
        let tokens = vec![tok("T_LNUMBER", "1"), tok(")", ")")];
        let err = generate(&tokens).expect_err("should fail");
        assert_eq!(
            err.kind,
            GenerateErrorKind::ContextMismatch {
                expected: "expression",
                found: "statement",
            }
        );
        assert_eq!(err.at, 1);
    }

    #[test]
    fn unknown_token_becomes_a_placeholder() {
        let tokens = vec![
            tok("T_ECHO", "echo"),
            ws(),
            tok("T_LNUMBER", "5"),
            tok(";", ";"),
        ];
        assert_eq!(
            generate(&tokens).expect("generate failed"),
            "/* unhandled T_ECHO \"echo\" */5;\n"
        );
    }

    #[test]
    fn placeholder_text_cannot_close_the_comment() {
        let tokens = vec![tok("T_INLINE_HTML", "x */ alert(1) /*")];
        assert_eq!(
            generate(&tokens).expect("generate failed"),
            "/* unhandled T_INLINE_HTML \"x *\\/ alert(1) /*\" */\n"
        );
    }

    #[test]
    fn named_errors_carry_the_filename() {
        let err =
            generate_named(&[tok("}", "}")], "calc.php").expect_err("should fail");
        assert_eq!(err.file.as_deref(), Some("calc.php"));
        assert_eq!(
            err.to_string(),
            "no open container to close at token 0 in calc.php"
        );
    }
}
