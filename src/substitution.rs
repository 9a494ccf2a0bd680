//! Variable substitution
//!
//! Substitution resolves recursively through the environment: with
//! `x -> y + 1` and `y -> 3`, the variable `x` resolves to `3 + 1`. The
//! resolution stack guards against cyclic environments.

use rustc_hash::FxHashMap;

use crate::error::MathError;
use crate::node::{FunctionNode, Node};

/// Name-to-node bindings for substitution
pub type Environment = FxHashMap<String, Node>;

/// Replace bound variables throughout the tree
///
/// Numbers copy themselves, functions rebuild with substituted children (the
/// definition is preserved), the tree wrapper substitutes its single child,
/// and variables resolve recursively through the environment values.
///
/// # Errors
/// `CyclicSubstitution` if a cycle in the environment is reachable from the
/// input (e.g. `x -> y`, `y -> x`).
pub fn substitute(node: &Node, env: &Environment) -> Result<Node, MathError> {
    let mut active = Vec::new();
    walk(node, env, &mut active)
}

fn walk(node: &Node, env: &Environment, active: &mut Vec<String>) -> Result<Node, MathError> {
    match node {
        Node::Number(_) => Ok(node.clone()),

        Node::Variable(name) => match env.get(name) {
            Some(replacement) => {
                if active.iter().any(|n| n == name) {
                    return Err(MathError::CyclicSubstitution { name: name.clone() });
                }
                active.push(name.clone());
                let resolved = walk(replacement, env, active)?;
                active.pop();
                Ok(resolved)
            }
            None => Ok(node.clone()),
        },

        Node::Function(f) => {
            let mut args = Vec::with_capacity(f.args.len());
            for arg in &f.args {
                args.push(std::sync::Arc::new(walk(arg, env, active)?));
            }
            Ok(Node::Function(FunctionNode {
                def: std::sync::Arc::clone(&f.def),
                args,
            }))
        }

        Node::Tree(child) => Ok(Node::tree(walk(child, env, active)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::auto_parse;
    use crate::registry::Registry;

    fn env(bindings: &[(&str, &str)]) -> Environment {
        let registry = Registry::with_builtins();
        bindings
            .iter()
            .map(|(name, expr)| {
                (
                    name.to_string(),
                    auto_parse(expr, &registry).unwrap().root().clone(),
                )
            })
            .collect()
    }

    #[test]
    fn test_simple_binding() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("x + 1", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "5")])).unwrap();
        assert!(result.eval().unwrap().eq_integer(6));
    }

    #[test]
    fn test_unbound_variable_copies() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("x + y", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "5")])).unwrap();
        assert_eq!(format!("{}", result), "5 + y");
    }

    #[test]
    fn test_recursive_resolution() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("x", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "y + 1"), ("y", "3")])).unwrap();
        assert_eq!(format!("{}", result), "3 + 1");
        assert!(result.eval().unwrap().eq_integer(4));
    }

    #[test]
    fn test_cycle_detected() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("x", &registry).unwrap();
        let err = substitute(&tree, &env(&[("x", "y"), ("y", "x")])).unwrap_err();
        assert!(matches!(err, MathError::CyclicSubstitution { .. }));
    }

    #[test]
    fn test_self_cycle_detected() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("x + 1", &registry).unwrap();
        let err = substitute(&tree, &env(&[("x", "x + 1")])).unwrap_err();
        assert!(matches!(err, MathError::CyclicSubstitution { name } if name == "x"));
    }

    #[test]
    fn test_unreachable_cycle_is_harmless() {
        // The cycle through z is never reached from this input
        let registry = Registry::with_builtins();
        let tree = auto_parse("x", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "2"), ("z", "z")])).unwrap();
        assert!(result.eval().unwrap().eq_integer(2));
    }

    #[test]
    fn test_repeated_variable_is_not_a_cycle() {
        // x appearing twice in one expression must not trip the guard
        let registry = Registry::with_builtins();
        let tree = auto_parse("x * x", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "3")])).unwrap();
        assert!(result.eval().unwrap().eq_integer(9));
    }

    #[test]
    fn test_function_children_substituted() {
        let registry = Registry::with_builtins();
        let tree = auto_parse("sin(x)", &registry).unwrap();
        let result = substitute(&tree, &env(&[("x", "0")])).unwrap();
        assert_eq!(format!("{}", result), "sin(0)");
        assert!(result.eval().unwrap().is_zero());
    }
}
