//! Rule-based algebraic simplification
//!
//! A single `simplify` call is one top-level pass: every registered rule
//! whose predicate holds runs once, in registration order, over the running
//! result; rules recursively simplify their children, which is what makes
//! structural constants collapse in one call. After the structural rules a
//! final eval pass replaces any fully-numeric node with its value. One pass
//! is not a global normal form; `simplify_full` iterates to a structural
//! fixpoint under a pass cap for callers that want deeper reduction.

use std::sync::Arc;

use crate::error::MathError;
use crate::node::{FunctionNode, Node};
use crate::registry::Registry;

/// One simplification rule: a predicate plus a rewriter
pub trait SimplificationRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Precondition for `apply`
    fn applicable(&self, node: &Node) -> bool;

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError>;
}

/// Run one top-level simplification pass
pub fn simplify(node: &Node, registry: &Registry) -> Result<Node, MathError> {
    if let Node::Tree(child) = node {
        return Ok(Node::tree(simplify(child, registry)?));
    }

    let mut current = node.clone();
    let mut rewritten = false;
    for rule in registry.simplification_rules() {
        if rule.applicable(&current) {
            current = rule.apply(&current, registry)?;
            rewritten = true;
        }
    }

    // Heads without a dedicated rule still get their children reduced
    if !rewritten {
        if let Node::Function(f) = &current {
            let mut args = Vec::with_capacity(f.args.len());
            for arg in &f.args {
                args.push(Arc::new(simplify(arg, registry)?));
            }
            current = Node::Function(FunctionNode {
                def: Arc::clone(&f.def),
                args,
            });
        }
    }

    if current.can_eval() && !matches!(current, Node::Number(_)) {
        current = Node::Number(current.eval()?);
    }

    Ok(current)
}

/// Iterate `simplify` to a structural fixpoint
///
/// Bounded by a fixed pass cap; convergence is detected by structural
/// equality between consecutive passes.
pub fn simplify_full(node: &Node, registry: &Registry) -> Result<Node, MathError> {
    const MAX_PASSES: usize = 32;

    let mut current = simplify(node, registry)?;
    for _ in 1..MAX_PASSES {
        let next = simplify(&current, registry)?;
        if next == current {
            break;
        }
        current = next;
    }
    Ok(current)
}

/// The function node's children, if the head matches
fn head_args<'a>(node: &'a Node, head: &str) -> Option<&'a [Arc<Node>]> {
    match node {
        Node::Function(f) if f.def.name == head => Some(&f.args),
        _ => None,
    }
}

fn misapplied(rule: &'static str) -> MathError {
    MathError::invalid_expression(format!(
        "simplification rule '{}' applied out of precondition",
        rule
    ))
}

/// +x -> x
struct SimplifyPlus;

impl SimplificationRule for SimplifyPlus {
    fn name(&self) -> &'static str {
        "SimplifyPlus"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "PLUS").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "PLUS").ok_or_else(|| misapplied(self.name()))?;
        simplify(&args[0], registry)
    }
}

/// -(-x) -> x
struct SimplifyMinus;

impl SimplificationRule for SimplifyMinus {
    fn name(&self) -> &'static str {
        "SimplifyMinus"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "MINUS").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "MINUS").ok_or_else(|| misapplied(self.name()))?;
        let inner = simplify(&args[0], registry)?;
        if let Some(inner_args) = head_args(&inner, "MINUS") {
            return Ok(inner_args[0].as_ref().clone());
        }
        registry.build("MINUS", vec![inner])
    }
}

/// 0 + x -> x, x + 0 -> x
struct SimplifyAdd;

impl SimplificationRule for SimplifyAdd {
    fn name(&self) -> &'static str {
        "SimplifyAdd"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "ADD").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "ADD").ok_or_else(|| misapplied(self.name()))?;
        let a = simplify(&args[0], registry)?;
        let b = simplify(&args[1], registry)?;
        if a.is_number_eq(0) {
            return Ok(b);
        }
        if b.is_number_eq(0) {
            return Ok(a);
        }
        registry.build("ADD", vec![a, b])
    }
}

/// 0 - x -> -x, x - 0 -> x
struct SimplifySub;

impl SimplificationRule for SimplifySub {
    fn name(&self) -> &'static str {
        "SimplifySub"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "SUB").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "SUB").ok_or_else(|| misapplied(self.name()))?;
        let a = simplify(&args[0], registry)?;
        let b = simplify(&args[1], registry)?;
        if a.is_number_eq(0) {
            return registry.build("MINUS", vec![b]);
        }
        if b.is_number_eq(0) {
            return Ok(a);
        }
        registry.build("SUB", vec![a, b])
    }
}

/// 0 * x -> 0, x * 0 -> 0, 1 * x -> x, x * 1 -> x
struct SimplifyMul;

impl SimplificationRule for SimplifyMul {
    fn name(&self) -> &'static str {
        "SimplifyMul"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "MUL").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "MUL").ok_or_else(|| misapplied(self.name()))?;
        let a = simplify(&args[0], registry)?;
        let b = simplify(&args[1], registry)?;
        if a.is_number_eq(0) || b.is_number_eq(0) {
            return Ok(Node::integer(0));
        }
        if a.is_number_eq(1) {
            return Ok(b);
        }
        if b.is_number_eq(1) {
            return Ok(a);
        }
        registry.build("MUL", vec![a, b])
    }
}

/// 0 / x -> 0, x / 1 -> x (x / 0 is left to the evaluator)
struct SimplifyDiv;

impl SimplificationRule for SimplifyDiv {
    fn name(&self) -> &'static str {
        "SimplifyDiv"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "DIV").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "DIV").ok_or_else(|| misapplied(self.name()))?;
        let a = simplify(&args[0], registry)?;
        let b = simplify(&args[1], registry)?;
        if a.is_number_eq(0) {
            return Ok(Node::integer(0));
        }
        if b.is_number_eq(1) {
            return Ok(a);
        }
        registry.build("DIV", vec![a, b])
    }
}

/// 0^x -> 0, x^0 -> 1, x^1 -> x
struct SimplifyExponent;

impl SimplificationRule for SimplifyExponent {
    fn name(&self) -> &'static str {
        "SimplifyExponent"
    }

    fn applicable(&self, node: &Node) -> bool {
        head_args(node, "POW").is_some()
    }

    fn apply(&self, node: &Node, registry: &Registry) -> Result<Node, MathError> {
        let args = head_args(node, "POW").ok_or_else(|| misapplied(self.name()))?;
        let base = simplify(&args[0], registry)?;
        let exp = simplify(&args[1], registry)?;
        // x^0 is checked before 0^x so that 0^0 folds to 1, matching the
        // provider's pow; simplification must never change a value
        if exp.is_number_eq(0) {
            return Ok(Node::integer(1));
        }
        if base.is_number_eq(0) {
            return Ok(Node::integer(0));
        }
        if exp.is_number_eq(1) {
            return Ok(base);
        }
        registry.build("POW", vec![base, exp])
    }
}

/// All built-in simplification rules, in registration order
pub(crate) fn builtin_rules() -> Vec<Box<dyn SimplificationRule>> {
    vec![
        Box::new(SimplifyPlus),
        Box::new(SimplifyMinus),
        Box::new(SimplifyAdd),
        Box::new(SimplifySub),
        Box::new(SimplifyMul),
        Box::new(SimplifyDiv),
        Box::new(SimplifyExponent),
    ]
}
