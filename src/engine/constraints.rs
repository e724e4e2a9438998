//! Constraint evaluation.
//!
//! A `ConstraintSet` knows up front which word features its items need, so a
//! scan only pays for syllabification when a `S*` or `T*` target is present.

use crate::engine::phonology::{stress_index, syllable_bounds};
use crate::text::{is_consonant, is_vowel};
use crate::{Constraint, Target};
use bitflags::bitflags;

bitflags! {
    /// Word features a constraint list depends on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FeatureMask: u8 {
        const CLASS_COUNTS = 1 << 0;
        const SYLLABLES    = 1 << 1;
        const STRESS       = 1 << 2;
    }
}

impl FeatureMask {
    fn of(target: &Target) -> FeatureMask {
        match target {
            Target::Vowels | Target::Consonants => FeatureMask::CLASS_COUNTS,
            Target::Syllables => FeatureMask::SYLLABLES,
            Target::Stress => FeatureMask::STRESS,
            Target::Length | Target::Letter(_) | Target::Substring(_) => FeatureMask::empty(),
        }
    }
}

/// An ordered list of constraints plus the features they need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    items: Vec<Constraint>,
    needs: FeatureMask,
}

impl ConstraintSet {
    pub fn new(items: Vec<Constraint>) -> Self {
        let needs = items.iter().fold(FeatureMask::empty(), |acc, c| acc | FeatureMask::of(&c.target));
        ConstraintSet { items, needs }
    }

    pub fn items(&self) -> &[Constraint] {
        &self.items
    }

    pub fn needs(&self) -> FeatureMask {
        self.needs
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of per-constraint deficits for a word given in normalized and
    /// display form. Zero means every constraint holds.
    pub fn deficit(&self, word: &str, display: &str) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        let features = Features::measure(word.as_bytes(), display, self.needs);
        self.items.iter().map(|c| c.comparison.deficit(features.value(word, &c.target), c.threshold)).sum()
    }

    pub fn holds(&self, word: &str, display: &str) -> bool {
        self.deficit(word, display) == 0
    }
}

#[derive(Debug, Default)]
struct Features {
    vowels: usize,
    consonants: usize,
    syllables: usize,
    stress: usize,
}

impl Features {
    fn measure(word: &[u8], display: &str, needs: FeatureMask) -> Self {
        let mut features = Features::default();
        if needs.contains(FeatureMask::CLASS_COUNTS) {
            features.vowels = word.iter().filter(|&&c| is_vowel(c)).count();
            features.consonants = word.iter().filter(|&&c| is_consonant(c)).count();
        }
        if needs.contains(FeatureMask::SYLLABLES) {
            features.syllables = syllable_bounds(word).len();
        }
        if needs.contains(FeatureMask::STRESS) {
            features.stress = stress_index(display);
        }
        features
    }

    fn value(&self, word: &str, target: &Target) -> usize {
        match target {
            Target::Length => word.len(),
            Target::Vowels => self.vowels,
            Target::Consonants => self.consonants,
            Target::Syllables => self.syllables,
            Target::Stress => self.stress,
            Target::Letter(letter) => word.bytes().filter(|c| c == letter).count(),
            Target::Substring(needle) => count_overlapping(word, needle),
        }
    }
}

/// Occurrences of `needle` in `word`, overlapping ones included.
fn count_overlapping(word: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    let mut count = 0;
    let mut cursor = 0;
    while let Some(found) = word[cursor..].find(needle) {
        count += 1;
        cursor += found + 1;
    }
    count
}
