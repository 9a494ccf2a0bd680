//! Infix-to-postfix conversion (Dijkstra's shunting-yard)
//!
//! Precedence classes: `ADD`/`SUB` 1, `MUL`/`DIV` and the unary operators 2,
//! `CARET` 3, function heads 4. `^` is right-associative (it pops only on
//! strictly greater stack precedence); everything else is left-associative.

use crate::error::MathError;
use crate::parser::lexer::{Lexeme, LexemeKind, Op};

fn precedence(lexeme: &Lexeme) -> u8 {
    match lexeme.kind {
        LexemeKind::Operator(Op::Add | Op::Sub) => 1,
        LexemeKind::Operator(Op::Mul | Op::Div) | LexemeKind::Unary(_) => 2,
        LexemeKind::Operator(Op::Pow) => 3,
        LexemeKind::Function => 4,
        _ => 0,
    }
}

/// Convert a processed lexeme sequence into a postfix sequence
pub fn to_postfix(lexemes: Vec<Lexeme>) -> Result<Vec<Lexeme>, MathError> {
    let mut output = Vec::with_capacity(lexemes.len());
    let mut stack: Vec<Lexeme> = Vec::new();

    for lexeme in lexemes {
        match lexeme.kind {
            LexemeKind::Number | LexemeKind::Identifier => output.push(lexeme),

            LexemeKind::Operator(_) | LexemeKind::Unary(_) | LexemeKind::Function => {
                let prec = precedence(&lexeme);
                let right_assoc = lexeme.kind == LexemeKind::Operator(Op::Pow);
                loop {
                    let pops = match stack.last() {
                        Some(top) if top.is_operator() => {
                            let top_prec = precedence(top);
                            if right_assoc {
                                top_prec > prec
                            } else {
                                top_prec >= prec
                            }
                        }
                        _ => false,
                    };
                    if !pops {
                        break;
                    }
                    if let Some(top) = stack.pop() {
                        output.push(top);
                    }
                }
                stack.push(lexeme);
            }

            LexemeKind::LParen => stack.push(lexeme),

            LexemeKind::RParen => loop {
                match stack.pop() {
                    Some(top) if top.kind == LexemeKind::LParen => break,
                    Some(top) => output.push(top),
                    None => {
                        return Err(MathError::UnbalancedParens {
                            span: Some(lexeme.span),
                        });
                    }
                }
            },

            // Argument separator: flush the pending operators of this
            // argument, keeping the '(' on the stack
            LexemeKind::Comma => loop {
                match stack.last() {
                    Some(top) if top.kind == LexemeKind::LParen => break,
                    Some(_) => {
                        if let Some(top) = stack.pop() {
                            output.push(top);
                        }
                    }
                    None => {
                        return Err(MathError::UnbalancedParens {
                            span: Some(lexeme.span),
                        });
                    }
                }
            },
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == LexemeKind::LParen {
            return Err(MathError::UnbalancedParens {
                span: Some(top.span),
            });
        }
        output.push(top);
    }

    Ok(output)
}
