use super::parser::Expr;
use crate::MatchSet;
use crate::error::Result;

/// Resolves the leaves of a boolean query against one dictionary.
pub trait LeafEvaluator {
    /// Number of entries every returned set ranges over.
    fn universe(&self) -> usize;

    fn evaluate_leaf(&mut self, leaf: &str) -> Result<MatchSet>;
}

impl Expr {
    /// Evaluate every leaf and combine the sets. Both operands of a binary
    /// operator are always evaluated, so an error anywhere aborts the query.
    pub fn evaluate<E: LeafEvaluator + ?Sized>(&self, evaluator: &mut E) -> Result<MatchSet> {
        let set = match self {
            Expr::Leaf(text) => evaluator.evaluate_leaf(text)?,
            Expr::Not(inner) => inner.evaluate(evaluator)?.complement(),
            Expr::And(l, r) => l.evaluate(evaluator)?.intersection(&r.evaluate(evaluator)?),
            Expr::Difference(l, r) => l.evaluate(evaluator)?.difference(&r.evaluate(evaluator)?),
            Expr::Or(l, r) => l.evaluate(evaluator)?.union(&r.evaluate(evaluator)?),
        };
        debug_assert_eq!(set.universe(), evaluator.universe());
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::query::parse_expression;
    use std::collections::HashMap;

    /// Leaves are names of fixed sets over a universe of 6.
    struct Fixed {
        sets: HashMap<&'static str, Vec<usize>>,
        calls: Vec<String>,
    }

    impl Fixed {
        fn new() -> Self {
            let sets = HashMap::from([("A", vec![0, 1, 2]), ("B", vec![2, 3]), ("C", vec![1, 3, 5])]);
            Fixed { sets, calls: Vec::new() }
        }
    }

    impl LeafEvaluator for Fixed {
        fn universe(&self) -> usize {
            6
        }

        fn evaluate_leaf(&mut self, leaf: &str) -> Result<MatchSet> {
            self.calls.push(leaf.to_string());
            match self.sets.get(leaf) {
                Some(positions) => Ok(MatchSet::from_positions(6, positions.iter().copied())),
                None => Err(Error::UnknownCommand(leaf.to_string())),
            }
        }
    }

    fn eval(text: &str) -> Vec<usize> {
        let expr = parse_expression(text).unwrap();
        expr.evaluate(&mut Fixed::new()).unwrap().positions().collect()
    }

    #[test]
    fn operators() {
        let cases: Vec<(&str, Vec<usize>)> = vec![
            ("(A) && (B)", vec![2]),
            ("(A) || (B)", vec![0, 1, 2, 3]),
            ("(A) - (B)", vec![0, 1]),
            ("!(A)", vec![3, 4, 5]),
            ("!!(A)", vec![0, 1, 2]),
            ("(A) || (B) && (C)", vec![0, 1, 2, 3]),
            ("((A) || (B)) && (C)", vec![1, 3]),
            ("(A) - (B) || (C)", vec![0, 1, 3, 5]),
        ];
        for (text, expected) in cases {
            assert_eq!(eval(text), expected, "{text}");
        }
    }

    #[test]
    fn de_morgan() {
        assert_eq!(eval("!((A) && (B))"), eval("!(A) || !(B)"));
        assert_eq!(eval("!((A) || (C))"), eval("!(A) && !(C)"));
    }

    #[test]
    fn and_or_commute_and_associate() {
        for op in ["&&", "||"] {
            for (x, y) in [("A", "B"), ("A", "C"), ("B", "C"), ("!(A)", "C")] {
                let (x, y) = (group(x), group(y));
                assert_eq!(eval(&format!("{x} {op} {y}")), eval(&format!("{y} {op} {x}")), "{x} {op} {y}");
            }
            let left = eval(&format!("((A) {op} (B)) {op} (C)"));
            let right = eval(&format!("(A) {op} ((B) {op} (C))"));
            let flat = eval(&format!("(A) {op} (B) {op} (C)"));
            assert_eq!(left, right, "{op}");
            assert_eq!(left, flat, "{op}");
        }
    }

    fn group(leaf: &str) -> String {
        if leaf.starts_with('!') { leaf.to_string() } else { format!("({leaf})") }
    }

    #[test]
    fn errors_abort_the_query() {
        let mut fixed = Fixed::new();
        let expr = parse_expression("(A) || (missing)").unwrap();
        assert!(expr.evaluate(&mut fixed).is_err());
        assert_eq!(fixed.calls, vec!["A", "missing"]);
    }
}
