//! Context-sensitive lexeme rewriting
//!
//! One left-to-right pass performs three rewrites before shunting-yard:
//!
//! 1. implicit multiplication: a number abutting `(` or an identifier, or a
//!    non-function identifier abutting `(`, gets a `*` inserted;
//! 2. function head recognition: a registered function name followed by `(`
//!    is retagged `Function` and relocated to just past its matching `)`,
//!    the postfix-friendly position (the retag is the status bit that keeps
//!    an already-moved head from moving again);
//! 3. a `+`/`-` at the start of the sequence or right after an operator,
//!    unary operator, `(` or `,` is reclassified as unary `PLUS`/`MINUS`.

use crate::error::MathError;
use crate::parser::lexer::{Lexeme, LexemeKind, Op, UnaryOp};
use crate::registry::Registry;

/// Should a `*` be inserted between these two adjacent lexemes?
fn inserts_mul(current: &Lexeme, next: &Lexeme, registry: &Registry) -> bool {
    match (current.kind, next.kind) {
        // 2(x+1), 2x, 2sin(x)
        (LexemeKind::Number, LexemeKind::LParen | LexemeKind::Identifier) => true,
        // x(y+1) multiplies; sin(x) is a call
        (LexemeKind::Identifier, LexemeKind::LParen) => !registry.is_function(&current.text),
        _ => false,
    }
}

/// Index of the `)` matching the `(` at `open`
fn matching_rparen(lexemes: &[Lexeme], open: usize) -> Result<usize, MathError> {
    let mut depth = 0usize;
    for (j, lex) in lexemes.iter().enumerate().skip(open) {
        match lex.kind {
            LexemeKind::LParen => depth += 1,
            LexemeKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(j);
                }
            }
            _ => {}
        }
    }
    Err(MathError::UnbalancedParens {
        span: Some(lexemes[open].span),
    })
}

/// Apply the three context-sensitive rewrites
pub fn process(mut lexemes: Vec<Lexeme>, registry: &Registry) -> Result<Vec<Lexeme>, MathError> {
    let mut i = 0;
    while i < lexemes.len() {
        if let Some(next) = lexemes.get(i + 1) {
            if inserts_mul(&lexemes[i], next, registry) {
                let span = lexemes[i].span;
                lexemes.insert(
                    i + 1,
                    Lexeme {
                        kind: LexemeKind::Operator(Op::Mul),
                        text: "*".to_string(),
                        span,
                    },
                );
            }
        }

        if lexemes[i].kind == LexemeKind::Identifier
            && registry.is_function(&lexemes[i].text)
            && lexemes.get(i + 1).map(|l| l.kind) == Some(LexemeKind::LParen)
        {
            let mut head = lexemes.remove(i);
            head.kind = LexemeKind::Function;
            let close = matching_rparen(&lexemes, i)?;
            lexemes.insert(close + 1, head);
            // Re-examine position i, which now holds the '('
            continue;
        }

        if let LexemeKind::Operator(op @ (Op::Add | Op::Sub)) = lexemes[i].kind {
            let unary_position = i == 0
                || matches!(
                    lexemes[i - 1].kind,
                    LexemeKind::Operator(_)
                        | LexemeKind::Unary(_)
                        | LexemeKind::LParen
                        | LexemeKind::Comma
                );
            if unary_position {
                lexemes[i].kind = LexemeKind::Unary(if op == Op::Add {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Minus
                });
            }
        }

        i += 1;
    }

    Ok(lexemes)
}
