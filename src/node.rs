//! Expression tree data model
//!
//! Every node satisfies the same capability set: `eval`, `can_eval`,
//! `tree_depth`, `type_name`, and a textual render (`Display`, implemented in
//! `display`). Children are shared by reference count; nodes are immutable
//! once the builder releases them, so transformations may reuse sub-trees
//! freely.

use std::sync::Arc;

use crate::error::MathError;
use crate::registry::FunctionDefinition;
use crate::scalar::Scalar;

/// A node of the expression tree
#[derive(Debug, Clone)]
pub enum Node {
    /// A scalar constant
    Number(Scalar),
    /// A named variable (leading alphabetic, continued alphabetic)
    Variable(String),
    /// A named operator or function applied to `arity` children
    Function(FunctionNode),
    /// Root wrapper holding exactly one child
    Tree(Arc<Node>),
}

/// Payload of a `Node::Function`
///
/// The definition (name, format template, arity, functor) is shared with the
/// registry entry it was cloned from. Only the head name and the children
/// participate in structural equality; the template and functor are metadata.
#[derive(Debug, Clone)]
pub struct FunctionNode {
    pub def: Arc<FunctionDefinition>,
    pub args: Vec<Arc<Node>>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Number(a), Node::Number(b)) => a == b,
            (Node::Variable(a), Node::Variable(b)) => a == b,
            (Node::Function(a), Node::Function(b)) => {
                a.def.name == b.def.name && a.args == b.args
            }
            (Node::Tree(a), Node::Tree(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Node {
    /// Create a number node
    pub fn number(value: Scalar) -> Self {
        Node::Number(value)
    }

    /// Create a number node from an integer
    pub fn integer(n: i64) -> Self {
        Node::Number(Scalar::from_integer(n))
    }

    /// Create a variable node
    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    /// Create a function node from a registry definition and its children
    pub fn function(def: Arc<FunctionDefinition>, args: Vec<Node>) -> Self {
        Node::Function(FunctionNode {
            def,
            args: args.into_iter().map(Arc::new).collect(),
        })
    }

    /// Wrap a node in the root `Tree` marker
    pub fn tree(root: Node) -> Self {
        Node::Tree(Arc::new(root))
    }

    /// The node under the `Tree` wrapper, or the node itself
    pub fn root(&self) -> &Node {
        match self {
            Node::Tree(child) => child,
            other => other,
        }
    }

    /// The wrapped scalar, if this is a number node
    pub fn as_number(&self) -> Option<&Scalar> {
        match self {
            Node::Number(v) => Some(v),
            _ => None,
        }
    }

    /// True if this node is a number equal to the given integer
    pub fn is_number_eq(&self, n: i64) -> bool {
        self.as_number().is_some_and(|v| v.eq_integer(n))
    }

    /// Head name for function nodes
    pub fn head_name(&self) -> Option<&str> {
        match self {
            Node::Function(f) => Some(f.def.name),
            _ => None,
        }
    }

    /// Coarse node type tag, as shown by `tree_view`
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "NUMBER",
            Node::Variable(_) => "VARIABLE",
            Node::Function(_) => "FUNCTION",
            Node::Tree(_) => "TREE",
        }
    }

    /// True if every leaf below this node is a number
    ///
    /// Monotone with respect to evaluation: when this holds, `eval` never
    /// fails with `UnboundVariable`.
    pub fn can_eval(&self) -> bool {
        match self {
            Node::Number(_) => true,
            Node::Variable(_) => false,
            Node::Function(f) => f.args.iter().all(|a| a.can_eval()),
            Node::Tree(child) => child.can_eval(),
        }
    }

    /// Evaluate the node numerically
    ///
    /// Children are evaluated left to right before the head's functor is
    /// applied. Variables always fail with `UnboundVariable`; bind them with
    /// `substitute` first (the library-surface `eval` additionally resolves
    /// registered constants such as `pi`).
    pub fn eval(&self) -> Result<Scalar, MathError> {
        match self {
            Node::Number(v) => Ok(v.clone()),
            Node::Variable(name) => Err(MathError::UnboundVariable { name: name.clone() }),
            Node::Function(f) => {
                let mut values = Vec::with_capacity(f.args.len());
                for arg in &f.args {
                    values.push(arg.eval()?);
                }
                (f.def.functor)(&values)
            }
            Node::Tree(child) => child.eval(),
        }
    }

    /// Maximum nesting depth
    ///
    /// Numbers and variables contribute 1, a function contributes one plus
    /// its deepest child, and the tree wrapper delegates to its child.
    pub fn tree_depth(&self) -> usize {
        match self {
            Node::Number(_) | Node::Variable(_) => 1,
            Node::Function(f) => 1 + f.args.iter().map(|a| a.tree_depth()).max().unwrap_or(0),
            Node::Tree(child) => child.tree_depth(),
        }
    }

    /// Short value label for one inspection row
    fn value_label(&self) -> String {
        match self {
            Node::Number(v) => v.to_string(),
            Node::Variable(name) => name.clone(),
            Node::Function(f) => f.def.name.to_string(),
            Node::Tree(_) => String::new(),
        }
    }

    /// Render the aligned `[ TYPE ] [ value ]` inspection dump
    ///
    /// Column widths are computed per sibling group and children are indented
    /// four spaces below their parent.
    pub fn tree_view(&self) -> String {
        match self {
            Node::Tree(child) => {
                let mut out = String::from("[ TREE ]");
                out.push('\n');
                let type_w = child.type_name().len();
                let val_w = child.value_label().len();
                out.push_str(&child.view_rows(4, type_w, val_w));
                out
            }
            _ => self.view_rows(0, self.type_name().len(), self.value_label().len()),
        }
    }

    fn view_rows(&self, indent: usize, type_w: usize, val_w: usize) -> String {
        let mut out = format!(
            "{:indent$}[ {:^type_w$} ] [ {:^val_w$} ]",
            "",
            self.type_name(),
            self.value_label(),
        );

        let children: &[Arc<Node>] = match self {
            Node::Function(f) => &f.args,
            Node::Tree(child) => std::slice::from_ref(child),
            _ => &[],
        };
        if !children.is_empty() {
            let type_w = children
                .iter()
                .map(|c| c.type_name().len())
                .max()
                .unwrap_or(0);
            let val_w = children
                .iter()
                .map(|c| c.value_label().len())
                .max()
                .unwrap_or(0);
            for child in children {
                out.push('\n');
                out.push_str(&child.view_rows(indent + 4, type_w, val_w));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn reg() -> Registry {
        Registry::with_builtins()
    }

    #[test]
    fn test_number_contract() {
        let n = Node::integer(5);
        assert!(n.can_eval());
        assert!(n.eval().unwrap().eq_integer(5));
        assert_eq!(n.tree_depth(), 1);
        assert_eq!(n.type_name(), "NUMBER");
    }

    #[test]
    fn test_variable_contract() {
        let v = Node::variable("x");
        assert!(!v.can_eval());
        assert!(matches!(
            v.eval(),
            Err(MathError::UnboundVariable { name }) if name == "x"
        ));
        assert_eq!(v.tree_depth(), 1);
    }

    #[test]
    fn test_function_eval_and_depth() {
        let registry = reg();
        let add = registry
            .build("ADD", vec![Node::integer(2), Node::integer(3)])
            .unwrap();
        assert!(add.can_eval());
        assert!(add.eval().unwrap().eq_integer(5));
        assert_eq!(add.tree_depth(), 2);

        let nested = registry
            .build("MUL", vec![add, Node::integer(4)])
            .unwrap();
        assert_eq!(nested.tree_depth(), 3);
        assert!(nested.eval().unwrap().eq_integer(20));
    }

    #[test]
    fn test_can_eval_is_monotone() {
        let registry = reg();
        let partly = registry
            .build("ADD", vec![Node::integer(1), Node::variable("x")])
            .unwrap();
        assert!(!partly.can_eval());
        assert!(partly.eval().is_err());
    }

    #[test]
    fn test_structural_equality_ignores_metadata() {
        let registry = reg();
        let a = registry
            .build("ADD", vec![Node::integer(1), Node::variable("x")])
            .unwrap();
        let b = registry
            .build("ADD", vec![Node::integer(1), Node::variable("x")])
            .unwrap();
        let c = registry
            .build("SUB", vec![Node::integer(1), Node::variable("x")])
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_tree_wrapper() {
        let t = Node::tree(Node::variable("x"));
        assert_eq!(t.tree_depth(), 1);
        assert_eq!(*t.root(), Node::variable("x"));
    }

    #[test]
    fn test_tree_view_shape() {
        let registry = reg();
        let add = registry
            .build("ADD", vec![Node::integer(123), Node::variable("x")])
            .unwrap();
        let view = Node::tree(add).tree_view();
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines[0], "[ TREE ]");
        assert!(lines[1].contains("FUNCTION"));
        assert!(lines[1].contains("ADD"));
        assert!(lines[2].contains("NUMBER"));
        assert!(lines[2].contains("123"));
        assert!(lines[3].contains("VARIABLE"));
        // Children are indented one level below their parent
        assert!(lines[2].starts_with("        "));
    }
}
