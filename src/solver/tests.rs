use std::collections::HashSet;
use std::sync::Arc;

use crate::expression::{Node, Operator};
use crate::rational::Rational;
use crate::solver::{
    ExpressionSolver, Registry, Retention, SearchResult, Solution, SolutionSearch, SolverConfig,
    SolverError, Span,
};
use crate::utils::UtilsError;

fn span(start: usize, end: usize) -> Span {
    match Span::new(start, end) {
        Some(span) => span,
        None => panic!("empty span {}..{} in test", start, end),
    }
}

fn int(n: i64) -> Rational {
    Rational::from_integer(n)
}

fn search(digits: &str, max_depth: usize) -> SearchResult {
    match ExpressionSolver::with_config(SolverConfig::with_max_depth(max_depth)).search(digits) {
        Ok(result) => result,
        Err(e) => panic!("search for '{}' failed: {}", digits, e),
    }
}

fn rendered(result: &SearchResult, value: i64) -> Vec<String> {
    let key = Solution::new(int(value), span(0, result.digits.len()));
    result.formulas(&key).iter().map(|f| f.to_string()).collect()
}

fn values(solutions: &[Solution]) -> Vec<Rational> {
    let mut values: Vec<_> = solutions.iter().map(|s| s.value).collect();
    values.sort();
    values
}

#[test]
fn test_span_helpers() {
    assert!(Span::new(2, 2).is_none());
    assert!(Span::new(3, 1).is_none());
    assert_eq!(span(0, 1).join(&span(1, 3)), Some(span(0, 3)));
    assert_eq!(span(0, 1).join(&span(2, 3)), None);
    let splits: Vec<_> = span(0, 3).splits().collect();
    assert_eq!(
        splits,
        vec![(span(0, 1), span(1, 3)), (span(0, 2), span(2, 3))]
    );
    assert_eq!(span(4, 5).splits().count(), 0);
}

#[test]
fn test_retention_from_config() {
    assert_eq!(SolverConfig::default().retention(), Retention::FirstOnly);
    assert_eq!(
        SolverConfig::with_max_depth(3).retention(),
        Retention::DepthBounded(3)
    );
}

#[test]
fn test_registry_first_only_keeps_one_formula() {
    let mut registry = Registry::new(Retention::FirstOnly);
    let key = Solution::new(int(3), span(0, 2));
    let one_plus_two = Arc::new(Node::Binary(
        Operator::Add,
        Node::leaf(int(1)),
        Node::leaf(int(2)),
    ));
    let two_plus_one = Arc::new(Node::Binary(
        Operator::Add,
        Node::leaf(int(2)),
        Node::leaf(int(1)),
    ));
    assert!(registry.insert(key, one_plus_two));
    assert!(!registry.insert(key, two_plus_one));
    assert_eq!(registry.formulas(&key).len(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_depth_bound_keeps_first_deep_formula() {
    let mut registry = Registry::new(Retention::DepthBounded(1));
    let key = Solution::new(int(720), span(0, 1));
    let fact3 = Arc::new(Node::Unary(Operator::Fact, Node::leaf(int(3))));
    let deep = Arc::new(Node::Unary(Operator::Fact, fact3));
    let deeper = Arc::new(Node::Unary(
        Operator::Neg,
        Arc::new(Node::Unary(Operator::Neg, Arc::clone(&deep))),
    ));
    let shallow = Arc::new(Node::Binary(
        Operator::Mul,
        Node::leaf(int(360)),
        Node::leaf(int(2)),
    ));

    // depth 2, but the key is empty
    assert!(registry.insert(key, Arc::clone(&deep)));
    // canonicalizes to the stored formula
    assert!(!registry.insert(key, deeper));
    assert!(registry.insert(key, Arc::clone(&shallow)));
    assert!(!registry.insert(key, shallow));
    let deep_again = Arc::new(Node::Unary(
        Operator::Fact,
        Arc::new(Node::Unary(Operator::Fact, Node::leaf(int(3)))),
    ));
    assert!(!registry.insert(key, deep_again));
    assert_eq!(registry.formulas(&key).len(), 2);
}

#[test]
fn test_registry_canonicalizes_on_insert() {
    let mut registry = Registry::new(Retention::DepthBounded(5));
    let key = Solution::new(int(-1), span(0, 2));
    let formula = Arc::new(Node::Binary(
        Operator::Add,
        Node::leaf(int(1)),
        Arc::new(Node::Unary(Operator::Neg, Node::leaf(int(2)))),
    ));
    assert!(registry.insert(key, formula));
    let stored: Vec<String> = registry
        .formulas(&key)
        .iter()
        .map(|f| f.to_string())
        .collect();
    assert_eq!(stored, vec!["1 - 2".to_string()]);
}

#[test]
fn test_unary_and_binary_steps() {
    let mut search = SolutionSearch::new("93", &SolverConfig::with_max_depth(3));
    let nine = search.leaf(span(0, 1));
    let three = search.leaf(span(1, 2));
    let (Some(nine), Some(three)) = (nine, three) else {
        panic!("literals must be readable");
    };

    let root = search.unary(Operator::Sqrt, nine);
    assert_eq!(root.map(|s| s.value), Some(int(3)));
    assert_eq!(search.unary(Operator::Sqrt, three), None);
    let zero = Solution::new(Rational::ZERO, span(0, 1));
    assert_eq!(search.unary(Operator::Fact, zero).map(|s| s.value), Some(int(1)));

    let quotient = search.binary(Operator::Div, nine, three);
    assert_eq!(quotient, Some(Solution::new(int(3), span(0, 2))));
    // not adjacent in this order
    assert_eq!(search.binary(Operator::Add, three, nine), None);

    let zero = Solution::new(Rational::ZERO, span(1, 2));
    assert_eq!(search.binary(Operator::Div, nine, zero), None);

    if let Some(q) = quotient {
        let formulas: Vec<String> = search
            .registry()
            .formulas(&q)
            .iter()
            .map(|f| f.to_string())
            .collect();
        assert_eq!(formulas, vec!["9 / 3".to_string()]);
    }
}

#[test]
fn test_unary_neg_skips_negated_formulas() {
    let mut search = SolutionSearch::new("5", &SolverConfig::with_max_depth(4));
    let Some(five) = search.leaf(span(0, 1)) else {
        panic!("literal must be readable");
    };
    let minus_five = search.unary(Operator::Neg, five);
    assert_eq!(minus_five, Some(Solution::new(int(-5), span(0, 1))));
    let back = search.unary(Operator::Neg, Solution::new(int(-5), span(0, 1)));
    assert_eq!(back, Some(five));
    // only the literal, no -(-5)
    assert_eq!(search.registry().formulas(&five).len(), 1);
}

#[test]
fn test_binary_sub_skips_negated_right_operand() {
    let mut search = SolutionSearch::new("12", &SolverConfig::with_max_depth(4));
    let (Some(one), Some(two)) = (search.leaf(span(0, 1)), search.leaf(span(1, 2))) else {
        panic!("literals must be readable");
    };
    let Some(minus_two) = search.unary(Operator::Neg, two) else {
        panic!("negation of 2 is defined");
    };
    let result = search.binary(Operator::Sub, one, minus_two);
    let Some(result) = result else {
        panic!("1 - (-2) is defined");
    };
    assert_eq!(result.value, int(3));
    assert!(search.registry().formulas(&result).is_empty());
}

#[test]
fn test_all_unary_closures() {
    let mut search = SolutionSearch::new("0", &SolverConfig::default());
    let zero = Solution::new(Rational::ZERO, span(0, 1));
    assert_eq!(search.all_unary(zero), vec![zero]);

    let mut search = SolutionSearch::new("3", &SolverConfig::with_max_depth(3));
    let Some(three) = search.leaf(span(0, 1)) else {
        panic!("literal must be readable");
    };
    let closure = values(&search.all_unary(three));
    assert_eq!(
        closure,
        vec![int(-720), int(-6), int(-3), int(3), int(6), int(720)]
    );

    let mut search = SolutionSearch::new("1", &SolverConfig::with_max_depth(3));
    let Some(one) = search.leaf(span(0, 1)) else {
        panic!("literal must be readable");
    };
    assert_eq!(values(&search.all_unary(one)), vec![int(-1), int(1)]);
}

#[test]
fn test_all_unary_square_root_chain() {
    let mut search = SolutionSearch::new("16", &SolverConfig::with_max_depth(4));
    let Some(sixteen) = search.leaf(span(0, 2)) else {
        panic!("literal must be readable");
    };
    let closure = values(&search.all_unary(sixteen));
    let sixteen_fact = 20_922_789_888_000;
    // 2! is 2 again, so the chain stops there
    assert_eq!(
        closure,
        vec![
            int(-sixteen_fact),
            int(-16),
            int(2),
            int(4),
            int(16),
            int(24),
            int(sixteen_fact),
        ]
    );
}

#[test]
fn test_all_unary_negative_value_negates_first() {
    let mut search = SolutionSearch::new("4", &SolverConfig::with_max_depth(4));
    let Some(four) = search.leaf(span(0, 1)) else {
        panic!("literal must be readable");
    };
    let Some(minus_four) = search.unary(Operator::Neg, four) else {
        panic!("negation of 4 is defined");
    };
    let closure = values(&search.all_unary(minus_four));
    assert_eq!(
        closure,
        vec![int(-24), int(-4), int(2), int(4), int(24)]
    );
}

#[test]
fn test_find_all_solutions_single_digit() {
    let result = search("1", 0);
    assert_eq!(values(&result.solutions), vec![int(-1), int(1)]);
    assert!(result.solutions.iter().all(|s| s.span == span(0, 1)));
}

#[test]
fn test_end_to_end_two_digits() {
    let result = search("12", 0);
    assert_eq!(rendered(&result, 3), vec!["1 + 2".to_string()]);
    assert_eq!(rendered(&result, -1), vec!["1 - 2".to_string()]);
    assert_eq!(rendered(&result, 12), vec!["12".to_string()]);
    assert_eq!(rendered(&result, 2), vec!["1 * 2".to_string()]);
}

#[test]
fn test_first_only_keeps_one_formula_per_key() {
    let result = search("123", 0);
    assert!(!result.solutions.is_empty());
    for (_, formulas) in result.registry.iter() {
        assert_eq!(formulas.len(), 1);
    }
}

fn keys(result: &SearchResult) -> HashSet<Solution> {
    result.registry.iter().map(|(key, _)| *key).collect()
}

#[test]
fn test_key_set_is_stable_across_runs() {
    let first = search("234", 0);
    let second = search("234", 0);
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first.solutions, second.solutions);
}

#[test]
fn test_key_set_does_not_depend_on_split_order() {
    for max_depth in [0, 2] {
        let solver = ExpressionSolver::with_config(SolverConfig::with_max_depth(max_depth));
        for digits in ["123", "2024", "222", "4321"] {
            let (Ok(forward), Ok(backward)) = (
                solver.search_in_order(digits, false),
                solver.search_in_order(digits, true),
            ) else {
                panic!("search for '{}' failed", digits);
            };
            assert_eq!(
                keys(&forward),
                keys(&backward),
                "'{}' at depth {}",
                digits,
                max_depth
            );
            assert_eq!(forward.solutions, backward.solutions);
        }
    }
}

#[test]
fn test_four_digit_depth_search_completes() {
    let result = search("1234", 3);
    assert!(rendered(&result, 10).contains(&"1 + 2 + 3 + 4".to_string()));
    for (key, formulas) in result.registry.iter() {
        for formula in formulas {
            assert_eq!(formula.eval(), Ok(key.value), "{} under {}", formula, key);
        }
    }
}

#[test]
fn test_depth_bounded_search_collects_alternatives() {
    let result = search("222", 3);
    let six = rendered(&result, 6);
    assert!(six.contains(&"2 + 2 + 2".to_string()), "got {:?}", six);
    assert!(six.len() > 1);

    let whole = span(0, 3);
    for solution in &result.solutions {
        assert_eq!(solution.span, whole);
        let formulas = result.formulas(solution);
        for formula in formulas.iter().skip(1) {
            assert!(formula.depth() <= 3, "{} is too deep", formula);
        }
    }
}

#[test]
fn test_every_stored_formula_evaluates_to_its_key() {
    let result = search("234", 2);
    for (key, formulas) in result.registry.iter() {
        for formula in formulas {
            assert_eq!(formula.eval(), Ok(key.value), "{} under {}", formula, key);
        }
    }
}

#[test]
fn test_solutions_are_sorted_and_cover_everything() {
    let result = search("36", 0);
    let sorted = result.solutions.windows(2).all(|w| w[0].value < w[1].value);
    assert!(sorted);
    assert!(result.solutions.iter().any(|s| s.value == int(9)));
    assert!(result.solutions.iter().any(|s| s.value == int(18)));
    assert!(result.solutions.iter().any(|s| s.value == int(729)));
}

#[test]
fn test_leading_zero_literals_are_accepted() {
    let result = search("01", 0);
    assert_eq!(rendered(&result, 1).len(), 1);
    assert!(result.solutions.iter().any(|s| s.value == int(1)));
}

#[test]
fn test_invalid_input_is_rejected() {
    let solver = ExpressionSolver::new();
    assert_eq!(
        solver.search("").err(),
        Some(SolverError::UtilsError(UtilsError::EmptyDigitString))
    );
    assert!(solver.search("1x").is_err());
}

#[test]
fn test_batch_search_uses_independent_registries() {
    let solver = ExpressionSolver::with_config(SolverConfig::with_max_depth(0));
    let results = solver.search_batch(&["12", "21", "", "12"]);
    assert_eq!(results.len(), 4);
    assert!(results[2].is_err());

    let (Ok(a), Ok(b), Ok(c)) = (&results[0], &results[1], &results[3]) else {
        panic!("valid inputs must succeed");
    };
    assert_eq!(a.solutions, c.solutions);
    assert_eq!(a.registry.len(), c.registry.len());
    assert_eq!(rendered(b, 1), vec!["2 - 1".to_string()]);
    assert_eq!(rendered(a, 1), vec!["-(1 - 2)".to_string()]);
}
