//! PHP to JavaScript translator working from PHP token dumps.
//!
//! The input is not PHP source text but a JSON dump of the token
//! stream a PHP lexer produced for it. From there two independent
//! consumers are available: a parser that builds a typed tree of the
//! constructs it recognizes, and a streaming generator that emits
//! module-style JavaScript (`exports` members, `prototype` methods)
//! in a single pass.
//!
//! # Quick start
//!
//! ## Translate a token dump to JavaScript
//!
//! ```
//! use php2js_rs::translate;
//!
//! let dump = r#"[
//!     {"type": "T_OPEN_TAG", "text": "<?php "},
//!     {"type": "T_VARIABLE", "text": "$total"},
//!     {"type": "T_WHITESPACE", "text": " "},
//!     {"type": "=", "text": "="},
//!     {"type": "T_WHITESPACE", "text": " "},
//!     {"type": "T_LNUMBER", "text": "6"},
//!     {"type": "T_WHITESPACE", "text": " "},
//!     {"type": "*", "text": "*"},
//!     {"type": "T_WHITESPACE", "text": " "},
//!     {"type": "T_LNUMBER", "text": "7"},
//!     {"type": ";", "text": ";"}
//! ]"#;
//!
//! let js = translate(dump).unwrap();
//! assert_eq!(js, "total = 6 * 7;\n");
//! ```
//!
//! ## Build and inspect the typed tree
//!
//! ```
//! use php2js_rs::{ast::Node, parse_json};
//!
//! let dump = r#"[
//!     {"type": "T_LNUMBER", "text": "1"},
//!     {"type": "+", "text": "+"},
//!     {"type": "T_LNUMBER", "text": "2"},
//!     {"type": ";", "text": ";"}
//! ]"#;
//!
//! let file = parse_json(dump).unwrap();
//! assert_eq!(file.children.len(), 1);
//! assert!(matches!(file.children[0], Node::Expr(_)));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools
)]

pub mod ast;
pub mod cursor;
pub mod expr;
pub mod generator;
pub mod parser;
pub mod token;
pub mod wire;

pub use ast::{BinaryOp, Expr, File, Literal, Modifier, ModifierSet, Node, Parameter};
pub use cursor::TokenCursor;
pub use generator::{GenerateError, GenerateErrorKind, generate, generate_named};
pub use parser::{ParseError, ParseErrorKind, TreeBuilder, parse, parse_named};
pub use token::{Token, TokenKind};
pub use wire::{WireError, decode};

/// Unified error type covering decoding, parsing, and generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token dump decoding error.
    #[error("{0}")]
    Wire(#[from] WireError),
    /// A tree building error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A JavaScript generation error.
    #[error("{0}")]
    Generate(#[from] GenerateError),
}

/// Decode a token dump and build the typed tree in one step.
pub fn parse_json(dump: &str) -> Result<File, Error> {
    let tokens = decode(dump)?;
    Ok(parse(&tokens)?)
}

/// Decode a token dump and translate it to JavaScript in one step.
pub fn translate(dump: &str) -> Result<String, Error> {
    let tokens = decode(dump)?;
    Ok(generate(&tokens)?)
}
