//! Rule-based differentiation engine
//!
//! Rules are tried in registration order and the first whose `applicable`
//! predicate holds produces the derivative; `applicable` is a strict
//! precondition, never a partial match. Rules construct fresh nodes through
//! the registry and never mutate their inputs. When no rule matches the
//! transformation fails with `NoDerivativeRule` (notably for the registered
//! trigonometric heads, which carry no derivative rule).

use std::sync::Arc;

use crate::error::MathError;
use crate::node::Node;
use crate::registry::Registry;

/// One derivative rule: a predicate plus a rewriter
pub trait DerivativeRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Precondition for `apply`; must be checked by the engine first
    fn applicable(&self, node: &Node, wrt: &str) -> bool;

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError>;
}

/// Differentiate `node` with respect to the variable `wrt`
///
/// A `Tree` wrapper is recursed into and rewrapped, so differentiating a
/// parse result yields a `Tree` again.
pub fn differentiate(node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
    if let Node::Tree(child) = node {
        return Ok(Node::tree(differentiate(child, wrt, registry)?));
    }

    for rule in registry.derivative_rules() {
        if rule.applicable(node, wrt) {
            return rule.apply(node, wrt, registry);
        }
    }

    Err(MathError::NoDerivativeRule {
        head: head_label(node),
    })
}

fn head_label(node: &Node) -> String {
    node.head_name()
        .map(str::to_string)
        .unwrap_or_else(|| node.type_name().to_string())
}

/// The function node's children, if the head and arity match
fn matching_args<'a>(node: &'a Node, heads: &[&str]) -> Option<(&'a str, &'a [Arc<Node>])> {
    match node {
        Node::Function(f) if heads.contains(&f.def.name) && f.args.len() == f.def.arity => {
            Some((f.def.name, &f.args))
        }
        _ => None,
    }
}

fn misapplied(rule: &'static str) -> MathError {
    MathError::invalid_expression(format!("derivative rule '{}' applied out of precondition", rule))
}

/// d/dx c = 0, d/dx x = 1, d/dx y = 0
struct DerivScalar;

impl DerivativeRule for DerivScalar {
    fn name(&self) -> &'static str {
        "DerivScalar"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matches!(node, Node::Number(_) | Node::Variable(_))
    }

    fn apply(&self, node: &Node, wrt: &str, _registry: &Registry) -> Result<Node, MathError> {
        match node {
            Node::Number(_) => Ok(Node::integer(0)),
            Node::Variable(name) => Ok(Node::integer(i64::from(name == wrt))),
            _ => Err(misapplied(self.name())),
        }
    }
}

/// d/dx (±u) = ±(du/dx)
struct DerivUnaryPlusMinus;

impl DerivativeRule for DerivUnaryPlusMinus {
    fn name(&self) -> &'static str {
        "DerivUnaryPlusMinus"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matching_args(node, &["PLUS", "MINUS"]).is_some()
    }

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
        let (head, args) =
            matching_args(node, &["PLUS", "MINUS"]).ok_or_else(|| misapplied(self.name()))?;
        let du = differentiate(&args[0], wrt, registry)?;
        registry.build(head, vec![du])
    }
}

/// d/dx (u ± v) = du/dx ± dv/dx
struct DerivSumDiff;

impl DerivativeRule for DerivSumDiff {
    fn name(&self) -> &'static str {
        "DerivSumDiff"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matching_args(node, &["ADD", "SUB"]).is_some()
    }

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
        let (head, args) =
            matching_args(node, &["ADD", "SUB"]).ok_or_else(|| misapplied(self.name()))?;
        let du = differentiate(&args[0], wrt, registry)?;
        let dv = differentiate(&args[1], wrt, registry)?;
        registry.build(head, vec![du, dv])
    }
}

/// d/dx (u * v) = (du * v) + (u * dv)
struct DerivProd;

impl DerivativeRule for DerivProd {
    fn name(&self) -> &'static str {
        "DerivProd"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matching_args(node, &["MUL"]).is_some()
    }

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
        let (_, args) = matching_args(node, &["MUL"]).ok_or_else(|| misapplied(self.name()))?;
        let u = args[0].as_ref().clone();
        let v = args[1].as_ref().clone();
        let du = differentiate(&args[0], wrt, registry)?;
        let dv = differentiate(&args[1], wrt, registry)?;

        let left = registry.build("MUL", vec![du, v])?;
        let right = registry.build("MUL", vec![u, dv])?;
        registry.build("ADD", vec![left, right])
    }
}

/// d/dx (u / v) = ((du * v) - (u * dv)) / v^2
struct DerivQuotient;

impl DerivativeRule for DerivQuotient {
    fn name(&self) -> &'static str {
        "DerivQuotient"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matching_args(node, &["DIV"]).is_some()
    }

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
        let (_, args) = matching_args(node, &["DIV"]).ok_or_else(|| misapplied(self.name()))?;
        let u = args[0].as_ref().clone();
        let v = args[1].as_ref().clone();
        let du = differentiate(&args[0], wrt, registry)?;
        let dv = differentiate(&args[1], wrt, registry)?;

        let left = registry.build("MUL", vec![du, v.clone()])?;
        let right = registry.build("MUL", vec![u, dv])?;
        let numerator = registry.build("SUB", vec![left, right])?;
        let denominator = registry.build("POW", vec![v, Node::integer(2)])?;
        registry.build("DIV", vec![numerator, denominator])
    }
}

/// d/dx (u ^ b) = b * u^(b-1) * du/dx, for constant exponent b
struct DerivExponent;

impl DerivativeRule for DerivExponent {
    fn name(&self) -> &'static str {
        "DerivExponent"
    }

    fn applicable(&self, node: &Node, _wrt: &str) -> bool {
        matching_args(node, &["POW"]).is_some_and(|(_, args)| args[1].can_eval())
    }

    fn apply(&self, node: &Node, wrt: &str, registry: &Registry) -> Result<Node, MathError> {
        let (_, args) = matching_args(node, &["POW"]).ok_or_else(|| misapplied(self.name()))?;
        if !args[1].can_eval() {
            return Err(misapplied(self.name()));
        }
        let u = args[0].as_ref().clone();
        let b = args[1].as_ref().clone();
        let du = differentiate(&args[0], wrt, registry)?;

        let reduced = registry.build("SUB", vec![b.clone(), Node::integer(1)])?;
        let power = registry.build("POW", vec![u, reduced])?;
        let scaled = registry.build("MUL", vec![b, power])?;
        registry.build("MUL", vec![scaled, du])
    }
}

/// All built-in derivative rules, in priority order
pub(crate) fn builtin_rules() -> Vec<Box<dyn DerivativeRule>> {
    vec![
        Box::new(DerivScalar),
        Box::new(DerivUnaryPlusMinus),
        Box::new(DerivSumDiff),
        Box::new(DerivProd),
        Box::new(DerivQuotient),
        Box::new(DerivExponent),
    ]
}
