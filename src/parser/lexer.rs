//! Token coalescence
//!
//! Collapses runs of primitive tokens into lexemes:
//!
//! ```text
//! number     := DIGIT+ ( POINT DIGIT+ )?
//! identifier := CHAR+
//! operator   := ADD | SUB | MUL | DIV | CARET
//! paren      := LPAREN | RPAREN
//! ```
//!
//! The scanner keeps a buffer plus a valid-next mask derived from the last
//! accepted flag; a token outside the mask closes the buffer and starts a
//! new lexeme. Numbers and identifiers are the shunting-yard operands.

use crate::error::Span;
use crate::parser::tokenizer::{Token, TokenFlag};

/// Binary operator heads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Unary operator heads, produced by the processor's reclassification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// Kind tag of a lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeKind {
    Number,
    Identifier,
    Operator(Op),
    /// Set by the processor when reclassifying a leading `+`/`-`
    Unary(UnaryOp),
    /// Set by the processor when relocating a recognized function head
    Function,
    LParen,
    RParen,
    Comma,
}

/// A maximal run of primitive tokens forming one grammar atom
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub text: String,
    pub span: Span,
}

impl Lexeme {
    /// True for lexemes that are shunting-yard operands
    pub fn is_operand(&self) -> bool {
        matches!(self.kind, LexemeKind::Number | LexemeKind::Identifier)
    }

    /// True for binary operators, unary operators and function heads
    pub fn is_operator(&self) -> bool {
        matches!(
            self.kind,
            LexemeKind::Operator(_) | LexemeKind::Unary(_) | LexemeKind::Function
        )
    }
}

/// Can `flag` extend a buffer whose last accepted flag was `last`?
fn extends(kind: LexemeKind, last: TokenFlag, flag: TokenFlag) -> bool {
    match (kind, last) {
        (LexemeKind::Number, TokenFlag::Digit) => {
            matches!(flag, TokenFlag::Digit | TokenFlag::Point)
        }
        (LexemeKind::Number, TokenFlag::Point) => matches!(flag, TokenFlag::Digit),
        (LexemeKind::Identifier, TokenFlag::Char) => matches!(flag, TokenFlag::Char),
        _ => false,
    }
}

/// Coalesce primitive tokens into lexemes
pub fn lex(tokens: &[Token]) -> Vec<Lexeme> {
    let mut lexemes = Vec::with_capacity(tokens.len());

    let mut buf = String::new();
    let mut buf_kind = LexemeKind::Number;
    let mut buf_start = 0;
    let mut last_flag = TokenFlag::Digit;

    let flush = |lexemes: &mut Vec<Lexeme>,
                 buf: &mut String,
                 buf_kind: LexemeKind,
                 buf_start: usize| {
        if !buf.is_empty() {
            let text = std::mem::take(buf);
            lexemes.push(Lexeme {
                kind: buf_kind,
                span: Span::new(buf_start, buf_start + text.len()),
                text,
            });
        }
    };

    for token in tokens {
        match token.flag {
            TokenFlag::Digit | TokenFlag::Point | TokenFlag::Char => {
                if buf.is_empty() || !extends(buf_kind, last_flag, token.flag) {
                    flush(&mut lexemes, &mut buf, buf_kind, buf_start);
                    buf_kind = if token.flag == TokenFlag::Char {
                        LexemeKind::Identifier
                    } else {
                        LexemeKind::Number
                    };
                    buf_start = token.pos;
                }
                buf.push(token.ch);
                last_flag = token.flag;
            }
            other => {
                flush(&mut lexemes, &mut buf, buf_kind, buf_start);
                let kind = match other {
                    TokenFlag::Add => LexemeKind::Operator(Op::Add),
                    TokenFlag::Sub => LexemeKind::Operator(Op::Sub),
                    TokenFlag::Mul => LexemeKind::Operator(Op::Mul),
                    TokenFlag::Div => LexemeKind::Operator(Op::Div),
                    TokenFlag::Caret => LexemeKind::Operator(Op::Pow),
                    TokenFlag::LParen => LexemeKind::LParen,
                    TokenFlag::RParen => LexemeKind::RParen,
                    TokenFlag::Comma => LexemeKind::Comma,
                    _ => unreachable!("buffered flags handled above"),
                };
                lexemes.push(Lexeme {
                    kind,
                    text: token.ch.to_string(),
                    span: Span::at(token.pos),
                });
            }
        }
    }
    flush(&mut lexemes, &mut buf, buf_kind, buf_start);

    lexemes
}
