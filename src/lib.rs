//! Pattern-driven word finder for Spanish word lists.
//!
//! A query is a line in a small pattern language (`CAS*`, `(1,2,C)A.`,
//! `. [3S*,>=2V*] 1*`) that is matched against every word of a dictionary
//! with an error budget. Queries combine with a boolean algebra
//! (`(A) && !(B)`), and word commands (`/aso`, `/ang`, `/cal`, ...) accept the
//! results of another query as their arguments.
//!
//! ```
//! use wordsieve::{Dictionary, Options, Session};
//!
//! let dictionary = Dictionary::from_words("demo", ["casa", "caso", "perro"]);
//! let mut session = Session::new(dictionary, Options::default());
//! assert_eq!(session.search("CAS*").unwrap(), vec!["casa", "caso"]);
//! ```

#[macro_use]
mod macros;
mod api;
mod command;
mod dictionary;
mod engine;
mod error;
mod query;
mod text;
mod translate;

pub use api::{Block, Item, Options, Outcome, Response, Session};
pub use command::{Command, WordCommand};
pub use dictionary::{Dictionary, Entry};
pub use engine::{
    ConstraintSet, FeatureMask, LeafMetrics, LeafQuery, LeafRun, Matcher, Partition, Segment, bounded_distance,
    compile_pattern, decompose, parse_constraints, rhyme_suffix, run_leaf, run_leaf_with_metrics, stress_index,
    syllables,
};
pub use error::{CompileError, Error, ParseError, Result};
pub use query::{Expr, LeafEvaluator, NestedArg, parse_expression, split_nested};
pub use text::normalize;

// --- Pattern elements --------------------------------------------------------

/// What a pattern element accepts for each letter of its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Any,
    Vowel,
    Consonant,
    /// One specific normalized letter.
    Exact(u8),
}

impl ElementClass {
    /// Whether `letter` (a normalized byte) satisfies this class.
    #[inline]
    pub fn accepts(self, letter: u8) -> bool {
        match self {
            ElementClass::Any => true,
            ElementClass::Vowel => text::is_vowel(letter),
            ElementClass::Consonant => text::is_consonant(letter),
            ElementClass::Exact(expected) => letter == expected,
        }
    }
}

/// One compiled pattern element: a run of `min..=max` letters of a class.
///
/// `max == None` is the unbounded run produced by `.` or an open range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternElement {
    pub class: ElementClass,
    pub min: usize,
    pub max: Option<usize>,
}

impl PatternElement {
    /// `*`: exactly one letter of any class.
    pub const fn any_one() -> Self {
        PatternElement { class: ElementClass::Any, min: 1, max: Some(1) }
    }

    /// `.`: any number of letters, including none.
    pub const fn any_run() -> Self {
        PatternElement { class: ElementClass::Any, min: 0, max: None }
    }

    /// A literal letter.
    pub const fn exact(letter: u8) -> Self {
        PatternElement { class: ElementClass::Exact(letter), min: 1, max: Some(1) }
    }

    /// `(min,max,V|C)`.
    pub const fn run(class: ElementClass, min: usize, max: Option<usize>) -> Self {
        PatternElement { class, min, max }
    }
}

// --- Constraints -------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparison {
    /// Distance between an observed `value` and the comparison against
    /// `threshold`; zero exactly when the comparison holds.
    pub fn deficit(self, value: usize, threshold: usize) -> usize {
        let (v, k) = (value as i64, threshold as i64);
        let gap = match self {
            Comparison::Eq => (v - k).abs(),
            Comparison::Ge => k - v,
            Comparison::Le => v - k,
            Comparison::Gt => (k + 1) - v,
            Comparison::Lt => v - (k - 1),
        };
        gap.max(0) as usize
    }
}

/// The word feature a constraint measures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Length,
    Vowels,
    Consonants,
    Syllables,
    /// Stressed syllable counted from the end (1 = last).
    Stress,
    Letter(u8),
    Substring(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub comparison: Comparison,
    pub threshold: usize,
    pub target: Target,
}

// --- Budget ------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BudgetMode {
    /// `n`: constraints must hold exactly, only the pattern spends the budget.
    #[default]
    Partial,
    /// `n*`: constraint deficit and pattern cost share the budget.
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Budget {
    pub tolerance: usize,
    pub mode: BudgetMode,
}

// --- MatchSet: membership over the active dictionary ---------------------------

/// Set of dictionary positions produced by a search.
///
/// Every set is tied to the size of the dictionary it was computed against;
/// combining sets of different sizes is a logic error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    bits: Vec<bool>,
}

impl MatchSet {
    /// Empty set over a dictionary of `universe` entries.
    pub fn empty(universe: usize) -> Self {
        MatchSet { bits: vec![false; universe] }
    }

    /// Set holding every entry.
    pub fn full(universe: usize) -> Self {
        MatchSet { bits: vec![true; universe] }
    }

    pub fn from_positions(universe: usize, positions: impl IntoIterator<Item = usize>) -> Self {
        let mut set = MatchSet::empty(universe);
        for position in positions {
            set.insert(position);
        }
        set
    }

    pub fn insert(&mut self, position: usize) {
        if let Some(bit) = self.bits.get_mut(position) {
            *bit = true;
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.bits.get(position).copied().unwrap_or(false)
    }

    /// Size of the dictionary the set ranges over.
    pub fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Number of members.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Members in dictionary order.
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| i)
    }

    pub fn union(&self, other: &MatchSet) -> MatchSet {
        self.zip_with(other, |a, b| a || b)
    }

    pub fn intersection(&self, other: &MatchSet) -> MatchSet {
        self.zip_with(other, |a, b| a && b)
    }

    pub fn difference(&self, other: &MatchSet) -> MatchSet {
        self.zip_with(other, |a, b| a && !b)
    }

    pub fn complement(&self) -> MatchSet {
        MatchSet { bits: self.bits.iter().map(|b| !b).collect() }
    }

    fn zip_with(&self, other: &MatchSet, op: impl Fn(bool, bool) -> bool) -> MatchSet {
        debug_assert_eq!(self.universe(), other.universe());
        MatchSet { bits: self.bits.iter().zip(&other.bits).map(|(&a, &b)| op(a, b)).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_deficits() {
        // (comparison, value, threshold, expected deficit)
        let cases: Vec<(Comparison, usize, usize, usize)> = vec![
            (Comparison::Eq, 3, 3, 0),
            (Comparison::Eq, 1, 3, 2),
            (Comparison::Eq, 5, 3, 2),
            (Comparison::Ge, 4, 3, 0),
            (Comparison::Ge, 1, 3, 2),
            (Comparison::Le, 2, 3, 0),
            (Comparison::Le, 6, 3, 3),
            (Comparison::Gt, 4, 3, 0),
            (Comparison::Gt, 3, 3, 1),
            (Comparison::Gt, 0, 3, 4),
            (Comparison::Lt, 2, 3, 0),
            (Comparison::Lt, 3, 3, 1),
            (Comparison::Lt, 0, 0, 1),
        ];
        for (comparison, value, threshold, expected) in cases {
            assert_eq!(comparison.deficit(value, threshold), expected, "{comparison:?} {value} vs {threshold}");
        }
    }

    #[test]
    fn deficit_is_zero_exactly_when_comparison_holds() {
        let holds = |c: Comparison, v: usize, k: usize| match c {
            Comparison::Eq => v == k,
            Comparison::Ge => v >= k,
            Comparison::Le => v <= k,
            Comparison::Gt => v > k,
            Comparison::Lt => v < k,
        };
        for c in [Comparison::Eq, Comparison::Ge, Comparison::Le, Comparison::Gt, Comparison::Lt] {
            for v in 0..8 {
                for k in 0..8 {
                    assert_eq!(c.deficit(v, k) == 0, holds(c, v, k), "{c:?} {v} {k}");
                }
            }
        }
    }

    #[test]
    fn match_set_algebra() {
        let a = MatchSet::from_positions(6, [0, 1, 2]);
        let b = MatchSet::from_positions(6, [2, 3]);

        assert_eq!(a.union(&b).positions().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(a.intersection(&b).positions().collect::<Vec<_>>(), vec![2]);
        assert_eq!(a.difference(&b).positions().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(a.complement().positions().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(a.intersection(&b).complement(), a.complement().union(&b.complement()));
        assert!(MatchSet::empty(3).is_empty());
        assert_eq!(MatchSet::full(3).count(), 3);
    }

    #[test]
    fn element_classes() {
        assert!(ElementClass::Vowel.accepts(b'E'));
        assert!(!ElementClass::Vowel.accepts(b'S'));
        assert!(ElementClass::Consonant.accepts(text::ENYE));
        assert!(ElementClass::Exact(b'C').accepts(b'C'));
        assert!(!ElementClass::Exact(b'C').accepts(b'K'));
        assert!(ElementClass::Any.accepts(b'Z'));
    }
}
