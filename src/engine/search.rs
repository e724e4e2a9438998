use crate::MatchSet;
use crate::dictionary::Dictionary;
use crate::engine::compiler::LeafQuery;
use crate::engine::matcher::Matcher;
use crate::engine::metrics::{LeafMetrics, LeafRun};
use std::time::Instant;

/// Positions of every dictionary entry accepted by `query`.
pub fn run_leaf(dictionary: &Dictionary, query: &LeafQuery) -> MatchSet {
    run_leaf_with_metrics(dictionary, query).matches
}

pub fn run_leaf_with_metrics(dictionary: &Dictionary, query: &LeafQuery) -> LeafRun {
    let start = Instant::now();
    let mut matcher = Matcher::new();
    let mut matches = MatchSet::empty(dictionary.len());
    let mut metrics = LeafMetrics::default();

    for (position, entry) in dictionary.entries().iter().enumerate() {
        metrics.scanned += 1;
        let Some(budget) = query.residual_budget(&entry.normalized, &entry.display) else {
            metrics.constraint_rejects += 1;
            continue;
        };
        metrics.matcher_runs += 1;
        if matcher.matches(entry.normalized.as_bytes(), &query.elements, budget) {
            matches.insert(position);
            metrics.matched += 1;
        }
    }

    metrics.total = start.elapsed();
    LeafRun { matches, metrics }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(dictionary: &Dictionary, set: &MatchSet) -> Vec<String> {
        set.positions().map(|p| dictionary.entries()[p].display.clone()).collect()
    }

    #[test]
    fn scan_respects_dictionary_order() {
        let dictionary = Dictionary::from_words("t", ["perro", "caso", "casa", "cosa"]);
        let query = LeafQuery::parse("CAS*").unwrap();
        assert_eq!(words(&dictionary, &run_leaf(&dictionary, &query)), vec!["caso", "casa"]);
    }

    #[test]
    fn metrics_account_for_every_entry() {
        let dictionary = Dictionary::from_words("t", ["camino", "casa", "sol", "pelota"]);
        let query = LeafQuery::parse(". [3S*]").unwrap();
        let run = run_leaf_with_metrics(&dictionary, &query);

        assert_eq!(words(&dictionary, &run.matches), vec!["camino", "pelota"]);
        assert_eq!(run.metrics.scanned, 4);
        assert_eq!(run.metrics.constraint_rejects, 2);
        assert_eq!(run.metrics.matcher_runs, 2);
        assert_eq!(run.metrics.matched, 2);
    }

    #[test]
    fn total_budget_trades_constraints_for_pattern() {
        let dictionary = Dictionary::from_words("t", ["camino", "casa", "sol"]);
        let query = LeafQuery::parse(". [3S*] 1*").unwrap();
        assert_eq!(words(&dictionary, &run_leaf(&dictionary, &query)), vec!["camino", "casa"]);
    }
}
