//! Postfix-to-tree construction
//!
//! Consumes the postfix lexeme sequence on a work stack. Operands push fresh
//! nodes; operator and function heads clone their registry entry and attach
//! the operands in original order. The finished root is wrapped in `Tree`.

use crate::error::MathError;
use crate::node::Node;
use crate::parser::lexer::{Lexeme, LexemeKind, Op, UnaryOp};
use crate::registry::Registry;
use crate::scalar::Scalar;

/// Canonical head name for a binary operator lexeme
fn operator_head(op: Op) -> &'static str {
    match op {
        Op::Add => "ADD",
        Op::Sub => "SUB",
        Op::Mul => "MUL",
        Op::Div => "DIV",
        Op::Pow => "POW",
    }
}

/// Canonical head name for a unary operator lexeme
fn unary_head(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Plus => "PLUS",
        UnaryOp::Minus => "MINUS",
    }
}

/// Pop `arity` operands and attach them, in original order, under `head`
fn attach(
    registry: &Registry,
    head: &str,
    stack: &mut Vec<Node>,
    operator: bool,
) -> Result<(), MathError> {
    let def = registry.function(head).ok_or_else(|| {
        if operator {
            MathError::UnknownOperator {
                name: head.to_string(),
            }
        } else {
            MathError::UnknownFunction {
                name: head.to_string(),
            }
        }
    })?;

    if stack.len() < def.arity {
        return Err(MathError::ArityMismatch {
            head: head.to_string(),
            expected: def.arity,
            got: stack.len(),
        });
    }

    let args = stack.split_off(stack.len() - def.arity);
    let node = registry.build(head, args)?;
    stack.push(node);
    Ok(())
}

/// Build an expression tree from a postfix lexeme sequence
pub fn build(postfix: Vec<Lexeme>, registry: &Registry) -> Result<Node, MathError> {
    let mut stack: Vec<Node> = Vec::new();

    for lexeme in postfix {
        match lexeme.kind {
            LexemeKind::Number => {
                let value = Scalar::parse_literal(&lexeme.text)
                    .map_err(|e| e.with_span(lexeme.span))?;
                stack.push(Node::number(value));
            }

            LexemeKind::Identifier => {
                // A function name outside call position cannot satisfy its
                // arity invariant
                if let Some(def) = registry.function(&lexeme.text) {
                    return Err(MathError::ArityMismatch {
                        head: lexeme.text,
                        expected: def.arity,
                        got: 0,
                    });
                }
                stack.push(Node::variable(lexeme.text));
            }

            LexemeKind::Operator(op) => attach(registry, operator_head(op), &mut stack, true)?,
            LexemeKind::Unary(op) => attach(registry, unary_head(op), &mut stack, true)?,
            LexemeKind::Function => attach(registry, &lexeme.text, &mut stack, false)?,

            LexemeKind::LParen | LexemeKind::RParen | LexemeKind::Comma => {
                return Err(MathError::invalid_expression(
                    "parenthesis or comma survived postfix conversion",
                ));
            }
        }
    }

    match stack.len() {
        0 => Err(MathError::EmptyExpression),
        1 => match stack.pop() {
            Some(root) => Ok(Node::tree(root)),
            None => Err(MathError::EmptyExpression),
        },
        n => Err(MathError::invalid_expression(format!(
            "{} disconnected operands remain after construction",
            n
        ))),
    }
}
