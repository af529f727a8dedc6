use crate::ast::{BinaryOp, Expr};
use crate::cursor::TokenCursor;
use crate::parser::{ParseError, ParseErrorKind};
use crate::token::TokenKind;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// One row of the binary operator table.
#[derive(Debug, Clone, Copy)]
pub struct OpInfo {
    /// Binding strength; lower binds tighter.
    pub precedence: u8,
    pub assoc: Assoc,
    pub op: BinaryOp,
    /// JavaScript spelling of the operator.
    pub symbol: &'static str,
}

/// Looks up a token category in the binary operator table.
///
/// One table serves both consumers: the expression parser reads the
/// strength and associativity, the code generator reads the JavaScript
/// spelling. Multiplicative operators bind tighter than additive ones;
/// concatenation sits at additive strength and is spelled `+` in
/// JavaScript.
#[must_use]
pub const fn binary_operator(kind: &TokenKind) -> Option<OpInfo> {
    let info = match kind {
        TokenKind::Star => OpInfo {
            precedence: 1,
            assoc: Assoc::Left,
            op: BinaryOp::Multiply,
            symbol: "*",
        },
        TokenKind::Slash => OpInfo {
            precedence: 1,
            assoc: Assoc::Left,
            op: BinaryOp::Divide,
            symbol: "/",
        },
        TokenKind::Percent => OpInfo {
            precedence: 1,
            assoc: Assoc::Left,
            op: BinaryOp::Modulus,
            symbol: "%",
        },
        TokenKind::Plus => OpInfo {
            precedence: 2,
            assoc: Assoc::Left,
            op: BinaryOp::Add,
            symbol: "+",
        },
        TokenKind::Minus => OpInfo {
            precedence: 2,
            assoc: Assoc::Left,
            op: BinaryOp::Subtract,
            symbol: "-",
        },
        TokenKind::Dot => OpInfo {
            precedence: 2,
            assoc: Assoc::Left,
            op: BinaryOp::Concatenate,
            symbol: "+",
        },
        _ => return None,
    };
    Some(info)
}

/// Parses one expression up to and including the terminator token.
///
/// Precedence climbing over two explicit stacks: operands hold
/// finished subtrees, operators hold table rows awaiting their right
/// operand. An incoming operator first reduces every stacked operator
/// that binds at least as tightly (strictly tighter for
/// right-associative incomers), then pushes itself. The terminator
/// drains the operator stack; exactly one operand must remain.
pub fn parse_expression(
    cursor: &mut TokenCursor<'_>,
    terminator: &TokenKind,
) -> Result<Expr, ParseError> {
    let mut operands: Vec<Expr> = Vec::new();
    let mut operators: Vec<OpInfo> = Vec::new();

    loop {
        let at = cursor.position();
        let Some(token) = cursor.take() else {
            return Err(ParseError {
                kind: ParseErrorKind::UnterminatedExpression,
                at,
            });
        };
        if token.kind == *terminator {
            break;
        }
        match &token.kind {
            TokenKind::Whitespace => {}
            TokenKind::Number => {
                let value = token.text.parse().map_err(|_| ParseError {
                    kind: ParseErrorKind::InvalidNumber {
                        text: token.text.clone(),
                    },
                    at,
                })?;
                operands.push(Expr::Number(value));
            }
            kind => {
                let Some(incoming) = binary_operator(kind) else {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnhandledExpressionToken {
                            found: kind.name().to_owned(),
                        },
                        at,
                    });
                };
                while let Some(top) = operators.last().copied() {
                    let reduces = match incoming.assoc {
                        Assoc::Left => top.precedence <= incoming.precedence,
                        Assoc::Right => top.precedence < incoming.precedence,
                    };
                    if !reduces {
                        break;
                    }
                    operators.pop();
                    reduce(&mut operands, top.op)
                        .map_err(|kind| ParseError { kind, at })?;
                }
                operators.push(incoming);
            }
        }
    }

    let at = cursor.position().saturating_sub(1);
    while let Some(top) = operators.pop() {
        reduce(&mut operands, top.op).map_err(|kind| ParseError { kind, at })?;
    }
    match (operands.pop(), operands.len()) {
        (Some(expr), 0) => Ok(expr),
        (popped, rest) => Err(ParseError {
            kind: ParseErrorKind::MalformedExpression {
                operands: rest + usize::from(popped.is_some()),
            },
            at,
        }),
    }
}

/// Replaces the top two operands with one binary node.
fn reduce(operands: &mut Vec<Expr>, op: BinaryOp) -> Result<(), ParseErrorKind> {
    match (operands.pop(), operands.pop()) {
        (Some(right), Some(left)) => {
            operands.push(Expr::binary(op, left, right));
            Ok(())
        }
        (Some(_), None) => Err(ParseErrorKind::MalformedExpression { operands: 1 }),
        _ => Err(ParseErrorKind::MalformedExpression { operands: 0 }),
    }
}
