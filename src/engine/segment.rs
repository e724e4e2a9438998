//! Word decomposition into dictionary words.
//!
//! Every interval `[i, j)` of the input gets at most one candidate: the
//! dictionary entry spelled exactly like it, or else the entry closest to it
//! within the tolerance, searched over the length buckets
//! `max(1, len - n) ..= len + n`. A partition is a chain of two or more
//! candidates that covers the whole word with a summed cost of at most `n`;
//! all of them are returned, shorter first segments first.

use crate::dictionary::Dictionary;
use crate::engine::constraints::ConstraintSet;
use smallvec::{SmallVec, smallvec};

/// One piece of a partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Dictionary spelling of the piece.
    pub display: String,
    /// Edit distance between the piece of input and the dictionary word.
    pub cost: usize,
}

pub type Partition = Vec<Segment>;

/// Levenshtein distance of `a` and `b`, or any value above `max` once the
/// distance is known to exceed it.
pub fn bounded_distance(a: &[u8], b: &[u8], max: usize) -> usize {
    let gap = a.len().abs_diff(b.len());
    if gap > max {
        return gap;
    }

    let mut prev: SmallVec<[usize; 32]> = (0..=b.len()).collect();
    let mut curr: SmallVec<[usize; 32]> = smallvec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
            row_min = row_min.min(curr[j + 1]);
        }
        if row_min > max {
            return max.saturating_add(1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    entry: usize,
    cost: usize,
}

struct Segmenter<'a> {
    dictionary: &'a Dictionary,
    constraints: &'a ConstraintSet,
    tolerance: usize,
    /// Lazily computed constraint verdict per dictionary entry.
    admitted: Vec<Option<bool>>,
}

impl Segmenter<'_> {
    fn admits(&mut self, entry: usize) -> bool {
        if self.constraints.is_empty() {
            return true;
        }
        if let Some(verdict) = self.admitted[entry] {
            return verdict;
        }
        let e = &self.dictionary.entries()[entry];
        let verdict = self.constraints.holds(&e.normalized, &e.display);
        self.admitted[entry] = Some(verdict);
        verdict
    }

    fn candidate(&mut self, piece: &str) -> Option<Candidate> {
        // An exact spelling is the only candidate, admitted or not.
        if let Some(entry) = self.dictionary.position(piece) {
            return self.admits(entry).then_some(Candidate { entry, cost: 0 });
        }
        if self.tolerance == 0 {
            return None;
        }

        let dictionary = self.dictionary;
        let lengths = piece.len().saturating_sub(self.tolerance).max(1)..=piece.len().saturating_add(self.tolerance);
        let mut best: Option<Candidate> = None;
        let mut limit = self.tolerance;
        for bucket in dictionary.buckets(lengths) {
            for &entry in bucket {
                if !self.admits(entry) {
                    continue;
                }
                let distance = bounded_distance(piece.as_bytes(), dictionary.entries()[entry].normalized.as_bytes(), limit);
                if distance <= limit && best.is_none_or(|b| distance < b.cost) {
                    best = Some(Candidate { entry, cost: distance });
                    if distance == 0 {
                        return best;
                    }
                    limit = distance - 1;
                }
            }
        }
        best
    }
}

/// Every partition of the normalized `word` into dictionary words.
pub fn decompose(dictionary: &Dictionary, word: &str, constraints: &ConstraintSet, tolerance: usize) -> Vec<Partition> {
    let n = word.len();
    let mut segmenter = Segmenter { dictionary, constraints, tolerance, admitted: vec![None; dictionary.len()] };

    let mut table: Vec<Vec<Option<Candidate>>> = vec![vec![None; n + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate().skip(i + 1) {
            *cell = segmenter.candidate(&word[i..j]);
        }
    }

    let mut partitions = Vec::new();
    let mut chain = Vec::new();
    collect(dictionary, &table, 0, tolerance, &mut chain, &mut partitions);
    partitions
}

/// Walk the table from `start`, keeping chains of two or more segments whose
/// summed cost stays within `left`.
fn collect(
    dictionary: &Dictionary,
    table: &[Vec<Option<Candidate>>],
    start: usize,
    left: usize,
    chain: &mut Vec<Segment>,
    out: &mut Vec<Partition>,
) {
    let n = table.len() - 1;
    if start == n {
        if chain.len() >= 2 {
            out.push(chain.clone());
        }
        return;
    }
    for end in start + 1..=n {
        let Some(candidate) = table[start][end].filter(|c| c.cost <= left) else {
            continue;
        };
        let display = dictionary.entries()[candidate.entry].display.clone();
        chain.push(Segment { display, cost: candidate.cost });
        collect(dictionary, table, end, left - candidate.cost, chain, out);
        chain.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compiler::parse_constraints;

    fn render(partitions: &[Partition]) -> Vec<String> {
        partitions
            .iter()
            .map(|p| {
                p.iter()
                    .map(|s| if s.cost == 0 { s.display.clone() } else { format!("{}~{}", s.display, s.cost) })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn bounded_distance_cases() {
        let cases: Vec<(&str, &str, usize, usize)> = vec![
            ("CASA", "CASA", 2, 0),
            ("CASA", "CASO", 2, 1),
            ("CASA", "CAS", 2, 1),
            ("GATO", "PATOS", 2, 2),
            ("", "ABC", 5, 3),
        ];
        for (a, b, max, expected) in cases {
            assert_eq!(bounded_distance(a.as_bytes(), b.as_bytes(), max), expected, "{a} / {b}");
        }
        assert!(bounded_distance(b"AAAA", b"BBBB", 1) > 1);
        assert!(bounded_distance(b"A", b"ABCDE", 2) > 2);
    }

    #[test]
    fn exact_partitions() {
        let dictionary = Dictionary::from_words("t", ["sol", "dado", "solda", "do"]);
        let partitions = decompose(&dictionary, "SOLDADO", &ConstraintSet::default(), 0);
        assert_eq!(render(&partitions), vec!["sol dado", "solda do"]);
    }

    #[test]
    fn approximate_partitions_carry_their_cost() {
        let dictionary = Dictionary::from_words("t", ["sal", "dado"]);
        let partitions = decompose(&dictionary, "SOLDADO", &ConstraintSet::default(), 1);
        assert_eq!(render(&partitions), vec!["sal~1 dado"]);
    }

    #[test]
    fn exact_entry_failing_constraints_blocks_the_interval() {
        let dictionary = Dictionary::from_words("t", ["sol", "dado", "sal"]);
        let constraints = parse_constraints("A").unwrap();
        // SOL is spelled exactly but has no A; SAL would fit at distance 1 but
        // is never considered for that interval.
        assert!(decompose(&dictionary, "SOLDADO", &constraints, 1).is_empty());
    }

    #[test]
    fn summed_cost_stays_within_budget() {
        let dictionary = Dictionary::from_words("t", ["sal", "dedo"]);
        assert!(decompose(&dictionary, "SOLDADO", &ConstraintSet::default(), 1).is_empty());
        let partitions = decompose(&dictionary, "SOLDADO", &ConstraintSet::default(), 2);
        assert!(render(&partitions).contains(&"sal~1 dedo~1".to_string()));
        assert!(partitions.iter().all(|p| p.iter().map(|s| s.cost).sum::<usize>() <= 2));
    }

    #[test]
    fn whole_word_alone_is_not_a_partition() {
        let dictionary = Dictionary::from_words("t", ["casaluna", "casa", "luna"]);
        let partitions = decompose(&dictionary, "CASALUNA", &ConstraintSet::default(), 0);
        assert_eq!(render(&partitions), vec!["casa luna"]);
    }

    #[test]
    fn huge_tolerance_scans_only_existing_lengths() {
        let dictionary = Dictionary::from_words("t", ["sol", "dado"]);
        let partitions = decompose(&dictionary, "SOLDADO", &ConstraintSet::default(), usize::MAX);
        assert!(render(&partitions).contains(&"sol dado".to_string()));
        assert_eq!(bounded_distance(b"AB", b"CD", usize::MAX), 2);
    }

    #[test]
    fn no_partition_when_uncovered() {
        let dictionary = Dictionary::from_words("t", ["sol"]);
        assert!(decompose(&dictionary, "SOLXYZ", &ConstraintSet::default(), 0).is_empty());
    }
}
