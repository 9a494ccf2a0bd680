//! Function, rule and constant registries
//!
//! The registries are an explicit [`Registry`] value passed into every
//! pipeline entry point, so tests can run against isolated registries
//! instead of a process-wide singleton. A shared default instance backs the
//! convenience functions in the crate root.
//!
//! All registries are append-only and must be fully populated before any
//! transformation runs; lookups are by exact, case-sensitive name, and
//! registration order is preserved (it is the priority order for rules).

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;

use crate::differentiation::{self, DerivativeRule};
use crate::error::MathError;
use crate::functions;
use crate::node::Node;
use crate::scalar::Scalar;
use crate::simplification::{self, SimplificationRule};

/// Definition of a named operator or function head
#[derive(Debug)]
pub struct FunctionDefinition {
    /// Canonical head name (e.g. "ADD", "sin")
    pub name: &'static str,

    /// Infix format template; each `{}` is one operand slot
    pub format: &'static str,

    /// Declared number of children
    pub arity: usize,

    /// Numeric functor applied to the evaluated children
    pub functor: fn(&[Scalar]) -> Result<Scalar, MathError>,
}

/// Named tables of heads, rules and constants
pub struct Registry {
    functions: Vec<Arc<FunctionDefinition>>,
    index: FxHashMap<&'static str, usize>,
    derivative_rules: Vec<Box<dyn DerivativeRule>>,
    simplification_rules: Vec<Box<dyn SimplificationRule>>,
    constants: Vec<(&'static str, Scalar)>,
}

impl Registry {
    /// A registry with no functions, rules or constants
    pub fn empty() -> Self {
        Registry {
            functions: Vec::new(),
            index: FxHashMap::default(),
            derivative_rules: Vec::new(),
            simplification_rules: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// A registry populated with the built-in heads, rules and constants
    pub fn with_builtins() -> Self {
        let mut registry = Registry::empty();
        for def in functions::builtin_definitions() {
            registry.register_function(def);
        }
        for rule in differentiation::builtin_rules() {
            registry.register_derivative_rule(rule);
        }
        for rule in simplification::builtin_rules() {
            registry.register_simplification_rule(rule);
        }
        for (name, value) in functions::builtin_constants() {
            registry.register_constant(name, value);
        }
        registry
    }

    /// Register a function head; a later entry with the same name shadows
    /// earlier ones for lookup while iteration order keeps both
    pub fn register_function(&mut self, def: FunctionDefinition) {
        let name = def.name;
        self.functions.push(Arc::new(def));
        self.index.insert(name, self.functions.len() - 1);
    }

    /// Append a derivative rule; registration order is priority order
    pub fn register_derivative_rule(&mut self, rule: Box<dyn DerivativeRule>) {
        self.derivative_rules.push(rule);
    }

    /// Append a simplification rule; rules run in registration order
    pub fn register_simplification_rule(&mut self, rule: Box<dyn SimplificationRule>) {
        self.simplification_rules.push(rule);
    }

    /// Register a named constant resolvable by the evaluator
    pub fn register_constant(&mut self, name: &'static str, value: Scalar) {
        self.constants.push((name, value));
    }

    /// Look up a function head by exact name
    pub fn function(&self, name: &str) -> Option<&Arc<FunctionDefinition>> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    /// True if the name is a registered function head
    pub fn is_function(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a named constant
    pub fn constant(&self, name: &str) -> Option<&Scalar> {
        self.constants
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Registered heads in registration order
    pub fn functions(&self) -> impl Iterator<Item = &Arc<FunctionDefinition>> {
        self.functions.iter()
    }

    pub(crate) fn derivative_rules(&self) -> &[Box<dyn DerivativeRule>] {
        &self.derivative_rules
    }

    pub(crate) fn simplification_rules(&self) -> &[Box<dyn SimplificationRule>] {
        &self.simplification_rules
    }

    /// Construct a fresh function node for a registered head
    ///
    /// This is how rules and the tree builder create nodes: the registry
    /// entry is cloned by reference count and the children are attached in
    /// the given order. The child count must match the declared arity.
    pub fn build(&self, head: &str, args: Vec<Node>) -> Result<Node, MathError> {
        let def = self
            .function(head)
            .ok_or_else(|| MathError::UnknownFunction {
                name: head.to_string(),
            })?;
        if args.len() != def.arity {
            return Err(MathError::ArityMismatch {
                head: head.to_string(),
                expected: def.arity,
                got: args.len(),
            });
        }
        Ok(Node::function(Arc::clone(def), args))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::with_builtins()
    }
}

/// Shared default registry backing the crate-root convenience functions
pub(crate) fn default_registry() -> &'static Registry {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(Registry::with_builtins)
}
