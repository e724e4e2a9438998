//! Orthographic syllabification, stress position and rhyme suffix.
//!
//! The rules work on the normalized form and are deliberately orthographic:
//! nuclei are maximal vowel runs split between adjacent strong vowels, and
//! consonant clusters between nuclei are cut by the valid-onset table.

use crate::text::{is_strong_vowel, is_vowel, normalize, normalize_with_accent};
use std::ops::Range;

/// Two-letter clusters that may open a syllable.
const ONSETS: [[u8; 2]; 15] = [
    *b"CH", *b"LL", *b"RR", *b"PR", *b"BR", *b"TR", *b"DR", *b"CR", *b"GR", *b"FR", *b"PL", *b"BL", *b"CL", *b"GL",
    *b"FL",
];

#[inline]
fn is_onset(first: u8, second: u8) -> bool {
    ONSETS.contains(&[first, second])
}

/// Vowel nuclei of a normalized word, as byte ranges.
fn nuclei(word: &[u8]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < word.len() {
        if !is_vowel(word[i]) {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < word.len() && is_vowel(word[i]) && !(is_strong_vowel(word[i - 1]) && is_strong_vowel(word[i])) {
            i += 1;
        }
        out.push(start..i);
    }
    out
}

/// Syllable boundaries of a normalized word.
///
/// A word without vowels (or the empty word) is a single syllable.
pub fn syllable_bounds(word: &[u8]) -> Vec<Range<usize>> {
    let nuclei = nuclei(word);
    if nuclei.is_empty() {
        return vec![0..word.len()];
    }

    let mut cuts = Vec::with_capacity(nuclei.len() + 1);
    cuts.push(0);
    for pair in nuclei.windows(2) {
        let (start, end) = (pair[0].end, pair[1].start);
        let cut = match end - start {
            0 | 1 => start,
            2 if is_onset(word[start], word[start + 1]) => start,
            2 => start + 1,
            3 if is_onset(word[start + 1], word[start + 2]) => start + 1,
            _ => start + 2,
        };
        cuts.push(cut);
    }
    cuts.push(word.len());
    cuts.windows(2).map(|w| w[0]..w[1]).collect()
}

/// Syllables of a normalized word (`"TRANSPORTE"` -> `["TRANS", "POR", "TE"]`).
pub fn syllables(word: &str) -> Vec<&str> {
    syllable_bounds(word.as_bytes()).into_iter().map(|r| &word[r]).collect()
}

/// Stressed syllable counted from the end (1 = last), from the display form.
///
/// An acute accent decides; otherwise words ending in a vowel, `N` or `S`
/// stress the second-to-last syllable and the rest the last one, monosyllables
/// included. The empty word reports 2.
pub fn stress_index(display: &str) -> usize {
    let (word, accent) = normalize_with_accent(display);
    let Some(&last) = word.as_bytes().last() else {
        return 2;
    };
    let bounds = syllable_bounds(word.as_bytes());
    let count = bounds.len();

    if let Some(index) = accent.and_then(|offset| bounds.iter().position(|r| r.contains(&offset))) {
        return count - index;
    }

    if is_vowel(last) || last == b'N' || last == b'S' { 2 } else { 1 }
}

/// Rhyme of a display form: the normalized text from the first vowel of the
/// stressed syllable to the end. Empty when the word has no letters.
pub fn rhyme_suffix(display: &str) -> String {
    let word = normalize(display);
    if word.is_empty() {
        return String::new();
    }
    let bounds = syllable_bounds(word.as_bytes());
    let index = bounds.len().saturating_sub(stress_index(display));
    let tail = &word[bounds[index].start..];
    match tail.bytes().position(is_vowel) {
        Some(p) => tail[p..].to_string(),
        None => tail.to_string(),
    }
}
