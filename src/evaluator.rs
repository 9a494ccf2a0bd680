//! Library-surface numeric evaluation
//!
//! Forwards to each node's own `eval`, with one addition: a variable with no
//! binding is resolved against the registry's named constants (`pi`, `e`)
//! before failing with `UnboundVariable`. Numeric domain errors propagate
//! from the provider untouched.

use crate::error::MathError;
use crate::node::Node;
use crate::registry::Registry;
use crate::scalar::Scalar;

/// Evaluate a node numerically, resolving registered constants
pub fn eval(node: &Node, registry: &Registry) -> Result<Scalar, MathError> {
    match node {
        Node::Number(value) => Ok(value.clone()),

        Node::Variable(name) => registry
            .constant(name)
            .cloned()
            .ok_or_else(|| MathError::UnboundVariable { name: name.clone() }),

        Node::Function(f) => {
            let mut values = Vec::with_capacity(f.args.len());
            for arg in &f.args {
                values.push(eval(arg, registry)?);
            }
            (f.def.functor)(&values)
        }

        Node::Tree(child) => eval(child, registry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::auto_parse;

    #[test]
    fn test_eval_fully_bound() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("2 * 3 + 4", &registry).unwrap();
        assert!(eval(&tree, &registry).unwrap().eq_integer(10));
    }

    #[test]
    fn test_eval_resolves_constants() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("2 * pi", &registry).unwrap();
        let value = eval(&tree, &registry).unwrap().to_f64().unwrap();
        assert!((value - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_eval_unbound_variable() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("2 * q", &registry).unwrap();
        let err = eval(&tree, &registry).unwrap_err();
        assert!(matches!(err, MathError::UnboundVariable { name } if name == "q"));
    }

    #[test]
    fn test_eval_division_by_zero() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("1 / (2 - 2)", &registry).unwrap();
        let err = eval(&tree, &registry).unwrap_err();
        assert!(matches!(err, MathError::NumericDomain { .. }));
    }

    #[test]
    fn test_node_contract_ignores_constants() {
        // Node::eval is the bare contract: variables always fail
        let registry = Registry::with_builtins();
        let tree = auto_parse("pi", &registry).unwrap();
        assert!(tree.eval().is_err());
        assert!(eval(&tree, &registry).is_ok());
    }
}
