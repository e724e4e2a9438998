//! Spelling normalization and letter classes.
//!
//! Every structural comparison in the crate happens on the *normalized* form
//! of a word: ASCII uppercase letters, accents folded to the base vowel, and
//! `Ñ` replaced by a single marker byte so the form stays one byte per letter.
//! The *display* form (the spelling as it appears in the dictionary file) is
//! kept alongside because the orthographic accent decides stress.

/// Marker byte standing in for `Ñ` in normalized words.
pub const ENYE: u8 = b'~';

/// Fold one character to its normalized letter.
///
/// Returns the folded letter and whether the character carried an acute
/// accent. Characters that are not letters of the Spanish alphabet fold to
/// `None` and are dropped from the normalized form.
pub fn fold_char(c: char) -> Option<(u8, bool)> {
    match c {
        'a'..='z' | 'A'..='Z' => Some((c.to_ascii_uppercase() as u8, false)),
        '~' => Some((ENYE, false)),
        'á' | 'Á' => Some((b'A', true)),
        'é' | 'É' => Some((b'E', true)),
        'í' | 'Í' => Some((b'I', true)),
        'ó' | 'Ó' => Some((b'O', true)),
        'ú' | 'Ú' => Some((b'U', true)),
        'ü' | 'Ü' => Some((b'U', false)),
        'ñ' | 'Ñ' => Some((ENYE, false)),
        _ => None,
    }
}

/// Normalize a display form (`"Canción"` -> `"CANCION"`, `"año"` -> `"A~O"`).
pub fn normalize(display: &str) -> String {
    normalize_with_accent(display).0
}

/// Normalize a display form and report the normalized offset of the last
/// acute-accented vowel, if any.
pub fn normalize_with_accent(display: &str) -> (String, Option<usize>) {
    let mut out = String::with_capacity(display.len());
    let mut accent = None;
    for c in display.chars() {
        if let Some((letter, accented)) = fold_char(c) {
            if accented {
                accent = Some(out.len());
            }
            out.push(letter as char);
        }
    }
    (out, accent)
}

#[inline]
pub fn is_vowel(c: u8) -> bool {
    matches!(c, b'A' | b'E' | b'I' | b'O' | b'U')
}

/// Strong (open) vowels; two adjacent strong vowels never share a nucleus.
#[inline]
pub fn is_strong_vowel(c: u8) -> bool {
    matches!(c, b'A' | b'E' | b'O')
}

#[inline]
pub fn is_consonant(c: u8) -> bool {
    c == ENYE || (c.is_ascii_uppercase() && !is_vowel(c))
}
