//! Budgeted pattern matching on a single word.
//!
//! An element `(class, min, max)` consuming `L` letters costs
//! `mismatches + max(0, L - max) + max(0, min - L)`, where mismatches are
//! counted over the first `min(L, max)` letters only. Leftover letters after
//! the last element cost one each. A word matches when some assignment of
//! lengths fits in the budget.
//!
//! The search is a depth-first walk over `(offset, element, budget left)`
//! with a memo table sized for the word being matched. For a given offset and
//! element the cost of the rest lies between `need - remaining` and
//! `need + remaining`, where `need` is the sum of the remaining minimums, so
//! budgets outside that window are decided without a lookup and the memo's
//! budget axis spans at most `2 * word.len() + 1` cells whatever the bounds.

use crate::PatternElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Cell {
    #[default]
    Unknown,
    Fits,
    Fails,
}

/// Memo of `(offset, element, budget)` outcomes for one word.
#[derive(Debug, Default)]
struct MemoTable {
    cells: Vec<Cell>,
    element_span: usize,
    budget_span: usize,
}

impl MemoTable {
    /// Size the table for the next word and forget every previous outcome.
    fn reset(&mut self, word_len: usize, elements: usize) {
        self.element_span = elements + 1;
        self.budget_span = 2 * word_len + 1;
        self.cells.clear();
        self.cells.resize((word_len + 1) * self.element_span * self.budget_span, Cell::Unknown);
    }

    /// `budget` is relative to the lower end of the window at this cell.
    #[inline]
    fn index(&self, offset: usize, element: usize, budget: usize) -> usize {
        (offset * self.element_span + element) * self.budget_span + budget
    }
}

/// Reusable matcher; the memo allocation is kept between words.
#[derive(Debug, Default)]
pub struct Matcher {
    memo: MemoTable,
    /// Sum of the minimums from each element to the end; `None` past `usize::MAX`.
    need: Vec<Option<usize>>,
}

impl Matcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `word` (normalized bytes) matches `elements` within `budget`.
    pub fn matches(&mut self, word: &[u8], elements: &[PatternElement], budget: usize) -> bool {
        self.need.clear();
        self.need.resize(elements.len() + 1, Some(0));
        for (i, el) in elements.iter().enumerate().rev() {
            self.need[i] = self.need[i + 1].and_then(|rest| rest.checked_add(el.min));
        }

        self.memo.reset(word.len(), elements.len());
        Search { word, elements, need: &self.need, memo: &mut self.memo }.fits(0, 0, budget)
    }
}

struct Search<'a> {
    word: &'a [u8],
    elements: &'a [PatternElement],
    need: &'a [Option<usize>],
    memo: &'a mut MemoTable,
}

impl Search<'_> {
    fn fits(&mut self, offset: usize, element: usize, left: usize) -> bool {
        let remaining = self.word.len() - offset;
        if element == self.elements.len() {
            return remaining <= left;
        }

        // Consuming nothing costs `need + remaining`; no assignment costs less
        // than `need - remaining`.
        let (floor, worst) = match self.need[element] {
            Some(need) => (need.saturating_sub(remaining), need.checked_add(remaining)),
            None => (usize::MAX - remaining, None),
        };
        if worst.is_some_and(|worst| left >= worst) {
            return true;
        }
        if left < floor {
            return false;
        }

        let key = self.memo.index(offset, element, left - floor);
        match self.memo.cells[key] {
            Cell::Fits => return true,
            Cell::Fails => return false,
            Cell::Unknown => {}
        }

        let el = self.elements[element];
        let longest = match el.max {
            Some(max) => max.saturating_add(left).min(remaining),
            None => remaining,
        };

        let mut mismatches = 0;
        let mut found = false;
        for len in 0..=longest {
            if len > 0 && el.max.is_none_or(|max| len <= max) && !el.class.accepts(self.word[offset + len - 1]) {
                mismatches += 1;
            }
            let excess = el.max.map_or(0, |max| len.saturating_sub(max));
            let shortfall = el.min.saturating_sub(len);
            let cost = (mismatches + excess).saturating_add(shortfall);
            if cost > left {
                continue;
            }
            if self.fits(offset + len, element + 1, left - cost) {
                found = true;
                break;
            }
        }

        self.memo.cells[key] = if found { Cell::Fits } else { Cell::Fails };
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compiler::compile_pattern;

    fn matches(pattern: &str, word: &str, budget: usize) -> bool {
        let elements = compile_pattern(pattern).unwrap();
        Matcher::new().matches(word.as_bytes(), &elements, budget)
    }

    #[test]
    fn exact_patterns() {
        let cases: Vec<(&str, &str, bool)> = vec![
            ("CAS*", "CASA", true),
            ("CAS*", "CASO", true),
            ("CAS*", "CAS", false),
            ("CAS*", "CASAS", false),
            (".CION", "CANCION", true),
            (".CION", "CION", true),
            ("(1,2,C)A.", "CASA", true),
            ("(1,2,C)A.", "TRAMPA", true),
            ("(1,2,C)A.", "ASA", false),
            ("(1,2,C)A.", "STRA", false),
            ("(2,,V)", "AEIOU", true),
            ("(2,,V)", "A", false),
            (".", "", true),
            ("", "", true),
            ("", "A", false),
        ];
        for (pattern, word, expected) in cases {
            assert_eq!(matches(pattern, word, 0), expected, "{pattern} ~ {word}");
        }
    }

    #[test]
    fn tolerance_admits_nearby_words() {
        for word in ["BOLA", "OLA", "HOLAS", "HOLA"] {
            assert!(matches("HOLA", word, 1), "{word}");
        }
        for word in ["BOLA", "OLA", "HOLAS"] {
            assert!(!matches("HOLA", word, 0), "{word}");
        }
        assert!(!matches("HOLA", "BOLAS", 1));
        assert!(matches("HOLA", "BOLAS", 2));
    }

    #[test]
    fn cost_components() {
        // Shortfall: (3,,V) wants at least three vowels.
        assert!(!matches("(3,,V)", "AE", 0));
        assert!(matches("(3,,V)", "AE", 1));
        // Excess: (0,1) caps the run at one letter.
        assert!(matches("(0,1)", "AB", 1));
        assert!(!matches("(0,1)", "AB", 0));
        // Leftover letters after the pattern.
        assert!(matches("CA", "CASA", 2));
        assert!(!matches("CA", "CASA", 1));
    }

    #[test]
    fn larger_budgets_never_lose_matches() {
        let pattern = compile_pattern("(1,2,C)A.N").unwrap();
        let mut matcher = Matcher::new();
        for word in ["CAN", "TRAMPAN", "SIN", "AAN", "XYZ", "", "CANCION"] {
            let mut previous = false;
            for budget in 0..6 {
                let now = matcher.matches(word.as_bytes(), &pattern, budget);
                assert!(now || !previous, "{word} lost its match at budget {budget}");
                previous = now;
            }
        }
    }

    #[test]
    fn extreme_bounds_stay_exact() {
        let cases: Vec<(&str, &str, usize, bool)> = vec![
            ("(0,18446744073709551615)", "CASA", 1, true),
            ("(0,18446744073709551615)", "CASA", usize::MAX, true),
            ("(18446744073709551615)(5)", "CASA", 1, false),
            ("(18446744073709551615)(5)", "CASA", usize::MAX, false),
            ("(18446744073709551615)", "CASA", usize::MAX, true),
            ("(100000000)", "CASA", 100_000_000, true),
            ("(100000000)", "CASA", 99_999_995, false),
            ("(100000000)", "CASA", 99_999_996, true),
            ("(100000000)(1,,V)", "CASA", 99_999_997, true),
            ("(100000000)(1,,V)", "CASA", 99_999_996, false),
        ];
        for (pattern, word, budget, expected) in cases {
            assert_eq!(matches(pattern, word, budget), expected, "{pattern} ~ {word} within {budget}");
        }
    }

    #[test]
    fn memo_size_ignores_bounds() {
        let pattern = compile_pattern("(100000000)").unwrap();
        let mut matcher = Matcher::new();
        assert!(matcher.matches(b"CASA", &pattern, 99_999_996));
        assert_eq!(matcher.memo.budget_span, 9);
        assert!(matcher.memo.cells.len() <= 5 * 2 * 9);
    }

    #[test]
    fn memo_does_not_leak_between_words() {
        let pattern = compile_pattern("C.A").unwrap();
        let mut matcher = Matcher::new();
        assert!(matcher.matches(b"CASA", &pattern, 0));
        assert!(!matcher.matches(b"CASO", &pattern, 0));
        assert!(matcher.matches(b"CA", &pattern, 0));
        assert!(!matcher.matches(b"PERRO", &pattern, 1));
    }
}
