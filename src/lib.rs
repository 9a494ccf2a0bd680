//! Symbolic Mathematics Engine
//!
//! Ingests infix mathematical expressions and produces an evaluable,
//! differentiable and simplifiable expression tree.
//!
//! # Features
//! - Lexer/parser front end with implicit multiplication and unary operators
//! - Exact rational arithmetic (decimal literals parse losslessly)
//! - Rule-based differentiation with respect to a variable
//! - Rule-based algebraic simplification with a constant-folding pass
//! - Recursive variable substitution with cycle detection
//! - Isolated registries of functions, rules and constants
//!
//! # Usage
//! ```
//! use symbomath::{auto_parse, differentiate, simplify, pretty_print};
//!
//! let tree = auto_parse("x^2").unwrap();
//! let derivative = differentiate(&tree, "x").unwrap();
//! let reduced = simplify(&derivative).unwrap();
//! assert_eq!(pretty_print(&reduced), "2 * x");
//! ```
//!
//! Evaluation binds variables through substitution:
//! ```
//! use symbomath::{auto_parse, eval, substitute, Environment, Node};
//!
//! let tree = auto_parse("1/x").unwrap();
//! let mut env = Environment::default();
//! env.insert("x".to_string(), Node::integer(5));
//! let bound = substitute(&tree, &env).unwrap();
//! assert_eq!(eval(&bound).unwrap().to_f64().unwrap(), 0.2);
//! ```

pub mod differentiation;
pub mod display;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod node;
pub mod parser;
pub mod registry;
pub mod scalar;
pub mod simplification;
pub mod substitution;

#[cfg(test)]
mod tests;

pub use display::pretty_print;
pub use error::{MathError, Span};
pub use node::{FunctionNode, Node};
pub use registry::{FunctionDefinition, Registry};
pub use scalar::Scalar;
pub use substitution::{substitute, Environment};

use registry::default_registry;

/// Parse an infix expression using the default registry
///
/// See [`parser::auto_parse`] for the registry-explicit variant.
pub fn auto_parse(input: &str) -> Result<Node, MathError> {
    parser::auto_parse(input, default_registry())
}

/// Parse an infix expression against an explicit registry
pub fn auto_parse_with(input: &str, registry: &Registry) -> Result<Node, MathError> {
    parser::auto_parse(input, registry)
}

/// Differentiate with respect to `wrt` using the default registry
pub fn differentiate(node: &Node, wrt: &str) -> Result<Node, MathError> {
    differentiation::differentiate(node, wrt, default_registry())
}

/// Differentiate against an explicit registry
pub fn differentiate_with(node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
    differentiation::differentiate(node, wrt, registry)
}

/// Run one simplification pass using the default registry
pub fn simplify(node: &Node) -> Result<Node, MathError> {
    simplification::simplify(node, default_registry())
}

/// Run one simplification pass against an explicit registry
pub fn simplify_with(node: &Node, registry: &Registry) -> Result<Node, MathError> {
    simplification::simplify(node, registry)
}

/// Simplify to a structural fixpoint using the default registry
pub fn simplify_full(node: &Node) -> Result<Node, MathError> {
    simplification::simplify_full(node, default_registry())
}

/// Simplify to a structural fixpoint against an explicit registry
pub fn simplify_full_with(node: &Node, registry: &Registry) -> Result<Node, MathError> {
    simplification::simplify_full(node, registry)
}

/// Evaluate numerically using the default registry's constants
pub fn eval(node: &Node) -> Result<Scalar, MathError> {
    evaluator::eval(node, default_registry())
}

/// Evaluate numerically against an explicit registry
pub fn eval_with(node: &Node, registry: &Registry) -> Result<Scalar, MathError> {
    evaluator::eval(node, registry)
}
