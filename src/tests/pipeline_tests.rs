//! End-to-end parsing and evaluation behavior

use crate::node::Node;
use crate::registry::Registry;
use crate::substitution::Environment;
use crate::{auto_parse, eval, pretty_print, substitute};

#[test]
fn test_implicit_multiplication_equivalences() {
    for (implicit, explicit) in [
        ("2x", "2*x"),
        ("2(x+1)", "2*(x+1)"),
        ("x(y+1)", "x*(y+1)"),
        ("2sin(x)", "2*sin(x)"),
    ] {
        assert_eq!(
            auto_parse(implicit).unwrap(),
            auto_parse(explicit).unwrap(),
            "'{}' and '{}' must parse identically",
            implicit,
            explicit
        );
    }
}

#[test]
fn test_function_call_inserts_no_multiplication() {
    let tree = auto_parse("sin(x)").unwrap();
    assert_eq!(tree.root().head_name(), Some("sin"));
}

#[test]
fn test_unary_minus_builds_minus_head() {
    let tree = auto_parse("-x").unwrap();
    assert_eq!(tree.root().head_name(), Some("MINUS"));

    assert_eq!(
        auto_parse("a - -b").unwrap(),
        auto_parse("a - (-b)").unwrap()
    );
}

#[test]
fn test_unary_plus_builds_plus_head() {
    let tree = auto_parse("+x").unwrap();
    assert_eq!(tree.root().head_name(), Some("PLUS"));
}

#[test]
fn test_eval_matches_direct_interpretation() {
    for (input, expected) in [
        ("10 + 10", 20.0),
        ("2 + 3 * 4", 14.0),
        ("(2 + 3) * 4", 20.0),
        ("7 - 2 - 1", 4.0),
        ("8 / 4 / 2", 1.0),
        ("2 ^ 3 ^ 2", 512.0),
        ("-2 ^ 2", -4.0),
        ("1.5 * 4", 6.0),
    ] {
        let tree = auto_parse(input).unwrap();
        assert_eq!(
            eval(&tree).unwrap().to_f64().unwrap(),
            expected,
            "eval of '{}'",
            input
        );
    }
}

#[test]
fn test_substitute_then_eval_commutes_with_textual_replacement() {
    let env: Environment = [("x".to_string(), Node::integer(5))].into_iter().collect();

    for (template, replaced) in [("1/x", "1/5"), ("x^2 + x", "5^2 + 5"), ("2x", "2*5")] {
        let substituted = substitute(&auto_parse(template).unwrap(), &env).unwrap();
        let direct = auto_parse(replaced).unwrap();
        assert_eq!(
            eval(&substituted).unwrap(),
            eval(&direct).unwrap(),
            "'{}' with x=5 vs '{}'",
            template,
            replaced
        );
    }
}

#[test]
fn test_substitute_and_eval_scenario() {
    let env: Environment = [("x".to_string(), Node::integer(5))].into_iter().collect();
    let tree = auto_parse("1/x").unwrap();
    let bound = substitute(&tree, &env).unwrap();
    assert_eq!(eval(&bound).unwrap().to_f64().unwrap(), 0.2);
}

#[test]
fn test_pretty_print_scenarios() {
    for (input, expected) in [
        ("10 + 10", "10 + 10"),
        ("x^2", "x ^ 2"),
        ("1/x", "1 / x"),
        ("2*x + 3", "(2 * x) + 3"),
        ("sin(x)", "sin(x)"),
        ("-x", "-x"),
    ] {
        assert_eq!(pretty_print(&auto_parse(input).unwrap()), expected);
    }
}

#[test]
fn test_case_sensitive_function_lookup() {
    // "Sin" is not a registered head, so this is the product Sin * (x)
    let tree = auto_parse("Sin(x)").unwrap();
    assert_eq!(tree.root().head_name(), Some("MUL"));

    // The lowercase head parses as a call
    let tree = auto_parse("sin(x)").unwrap();
    assert_eq!(tree.root().head_name(), Some("sin"));
}

#[test]
fn test_isolated_registry_changes_parse() {
    // Without a "sin" entry the same input is an implicit multiplication
    let mut registry = Registry::empty();
    for def in crate::functions::builtin_definitions() {
        if def.name != "sin" {
            registry.register_function(def);
        }
    }
    let tree = crate::auto_parse_with("sin(x)", &registry).unwrap();
    assert_eq!(tree.root().head_name(), Some("MUL"));
}

#[test]
fn test_multi_argument_custom_function() {
    let mut registry = Registry::with_builtins();
    registry.register_function(crate::registry::FunctionDefinition {
        name: "hypot",
        format: "hypot({}, {})",
        arity: 2,
        functor: |args| {
            let aa = (&args[0] * &args[0]).to_f64()?;
            let bb = (&args[1] * &args[1]).to_f64()?;
            crate::Scalar::from_f64((aa + bb).sqrt())
        },
    });

    let tree = crate::auto_parse_with("hypot(3, 4)", &registry).unwrap();
    assert!(crate::eval_with(&tree, &registry).unwrap().eq_integer(5));
    assert_eq!(format!("{}", tree), "hypot(3, 4)");
}

#[test]
fn test_tree_view_dump() {
    let tree = auto_parse("123 + x").unwrap();
    let view = tree.tree_view();
    assert!(view.starts_with("[ TREE ]"));
    assert!(view.contains("[ FUNCTION ]"));
    assert!(view.contains("ADD"));
    assert!(view.contains("NUMBER"));
    assert!(view.contains("VARIABLE"));
}

#[test]
fn test_whitespace_insensitive() {
    assert_eq!(auto_parse(" 1+2 ").unwrap(), auto_parse("1 + 2").unwrap());
}
