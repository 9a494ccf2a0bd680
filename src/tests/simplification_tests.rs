//! Simplifier identities and value preservation

use crate::{auto_parse, eval, pretty_print, simplify, simplify_full};

/// Fixed forms that one simplification pass leaves untouched
const STABLE_FORMS: &[&str] = &["x", "x + y", "sin(x)", "x ^ 2", "a / b"];

#[test]
fn test_identities_on_stable_forms() {
    for n in STABLE_FORMS {
        let plain = simplify(&auto_parse(n).unwrap()).unwrap();

        for wrapper in [
            format!("0 + ({})", n),
            format!("({}) + 0", n),
            format!("({}) * 1", n),
            format!("1 * ({})", n),
            format!("({}) / 1", n),
            format!("({}) ^ 1", n),
            format!("-(-({}))", n),
            format!("+({})", n),
        ] {
            let wrapped = simplify(&auto_parse(&wrapper).unwrap()).unwrap();
            assert_eq!(
                wrapped, plain,
                "simplify('{}') should equal simplify('{}')",
                wrapper, n
            );
        }
    }
}

#[test]
fn test_annihilator_identities() {
    for n in STABLE_FORMS {
        for (wrapper, expected) in [
            (format!("({}) ^ 0", n), "1"),
            (format!("0 ^ ({})", n), "0"),
            (format!("0 * ({})", n), "0"),
            (format!("({}) * 0", n), "0"),
            (format!("0 / ({})", n), "0"),
        ] {
            let simplified = simplify(&auto_parse(&wrapper).unwrap()).unwrap();
            assert_eq!(
                pretty_print(&simplified),
                expected,
                "simplify('{}')",
                wrapper
            );
        }
    }
}

#[test]
fn test_simplify_preserves_value_of_bound_expressions() {
    for input in [
        "1 + 0 + 2 * 3",
        "(4 - 4) * 100 + 7",
        "2 ^ 0 + 0 ^ 2",
        "-(-(5)) * 1",
        "3 / 1 + 0 / 5",
        "1.5 * 2 + 0",
        "10 / 4",
    ] {
        let tree = auto_parse(input).unwrap();
        let before = eval(&tree).unwrap();
        let after = eval(&simplify(&tree).unwrap()).unwrap();
        assert_eq!(before, after, "value of '{}' changed", input);
    }
}

#[test]
fn test_structural_comparison_needs_simplification() {
    // x+0 and x are distinct nodes; only simplification relates them
    let lhs = auto_parse("x + 0").unwrap();
    let rhs = auto_parse("x").unwrap();
    assert_ne!(lhs, rhs);
    assert_eq!(simplify(&lhs).unwrap(), simplify(&rhs).unwrap());
}

#[test]
fn test_simplify_full_reaches_fixpoint() {
    // Each pass peels one layer; the fixpoint loop finishes the job
    let tree = auto_parse("0 - (0 - (0 - x))").unwrap();
    let full = simplify_full(&tree).unwrap();
    assert_eq!(pretty_print(&full), "-x");
}

#[test]
fn test_deeply_nested_constant_folds() {
    let tree = auto_parse("((((1 + 1) * 2) + 4) ^ 2) / 8").unwrap();
    let simplified = simplify(&tree).unwrap();
    assert_eq!(pretty_print(&simplified), "8");
}
