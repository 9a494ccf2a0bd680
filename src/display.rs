// Infix rendering for expression trees
//
// Each function head carries a format template ("{} + {}", "sin({})"); the
// renderer splices the recursively rendered operands into the slots. An
// operand whose own tree depth exceeds 1 is parenthesized.

use std::fmt;

use crate::node::Node;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),

            Node::Variable(name) => write!(f, "{}", name),

            Node::Function(func) => {
                let mut operands = func.args.iter();
                let template = func.def.format;
                let mut chars = template.chars().peekable();
                while let Some(c) = chars.next() {
                    if c == '{' && chars.peek() == Some(&'}') {
                        chars.next();
                        match operands.next() {
                            Some(arg) if arg.tree_depth() > 1 => write!(f, "({})", arg)?,
                            Some(arg) => write!(f, "{}", arg)?,
                            None => {}
                        }
                    } else {
                        write!(f, "{}", c)?;
                    }
                }
                Ok(())
            }

            Node::Tree(child) => write!(f, "{}", child),
        }
    }
}

/// Render a node as human-readable infix text
pub fn pretty_print(node: &Node) -> String {
    node.to_string()
}
