//! Built-in function and operator definitions for the registry
//!
//! Operator heads are SCREAMING_CASE (the unary `PLUS`/`MINUS` are separate
//! heads from the binary `ADD`/`SUB`); named functions are lowercase and
//! case-sensitive.

use crate::registry::FunctionDefinition;
use crate::scalar::Scalar;

/// All built-in definitions, in bootstrap order
pub(crate) fn builtin_definitions() -> Vec<FunctionDefinition> {
    vec![
        // Unary plus
        FunctionDefinition {
            name: "PLUS",
            format: "+{}",
            arity: 1,
            functor: |args| Ok(args[0].clone()),
        },
        // Unary minus
        FunctionDefinition {
            name: "MINUS",
            format: "-{}",
            arity: 1,
            functor: |args| Ok(-&args[0]),
        },
        // Addition
        FunctionDefinition {
            name: "ADD",
            format: "{} + {}",
            arity: 2,
            functor: |args| Ok(&args[0] + &args[1]),
        },
        // Subtraction
        FunctionDefinition {
            name: "SUB",
            format: "{} - {}",
            arity: 2,
            functor: |args| Ok(&args[0] - &args[1]),
        },
        // Multiplication
        FunctionDefinition {
            name: "MUL",
            format: "{} * {}",
            arity: 2,
            functor: |args| Ok(&args[0] * &args[1]),
        },
        // Division
        FunctionDefinition {
            name: "DIV",
            format: "{} / {}",
            arity: 2,
            functor: |args| args[0].div(&args[1]),
        },
        // Exponentiation
        FunctionDefinition {
            name: "POW",
            format: "{} ^ {}",
            arity: 2,
            functor: |args| args[0].pow(&args[1]),
        },
        FunctionDefinition {
            name: "sin",
            format: "sin({})",
            arity: 1,
            functor: |args| args[0].sin(),
        },
        FunctionDefinition {
            name: "cos",
            format: "cos({})",
            arity: 1,
            functor: |args| args[0].cos(),
        },
        FunctionDefinition {
            name: "tan",
            format: "tan({})",
            arity: 1,
            functor: |args| args[0].tan(),
        },
        FunctionDefinition {
            name: "csc",
            format: "csc({})",
            arity: 1,
            functor: |args| args[0].csc(),
        },
        FunctionDefinition {
            name: "sec",
            format: "sec({})",
            arity: 1,
            functor: |args| args[0].sec(),
        },
        FunctionDefinition {
            name: "cot",
            format: "cot({})",
            arity: 1,
            functor: |args| args[0].cot(),
        },
    ]
}

/// Named constants resolvable by the library-surface evaluator
pub(crate) fn builtin_constants() -> Vec<(&'static str, Scalar)> {
    vec![
        (
            "pi",
            Scalar::from_f64(std::f64::consts::PI).unwrap_or_else(|_| Scalar::zero()),
        ),
        (
            "e",
            Scalar::from_f64(std::f64::consts::E).unwrap_or_else(|_| Scalar::zero()),
        ),
    ]
}
