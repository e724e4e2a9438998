//! Word lists.
//!
//! A dictionary file is plain text with one word per line, stored as
//! `<dir>/<name>.txt`. Entries keep their display spelling next to the
//! normalized form, and file order is the order every result is reported in.

use crate::error::{Error, Result};
use crate::text::normalize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub display: String,
    pub normalized: String,
}

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    name: String,
    entries: Vec<Entry>,
    /// First position of each normalized spelling.
    positions: HashMap<String, usize>,
    /// First positions of distinct spellings, grouped by normalized length.
    by_length: BTreeMap<usize, Vec<usize>>,
}

impl Dictionary {
    /// Build a dictionary from display spellings. Blank lines and lines with
    /// no letters are skipped; duplicates are kept but only the first one is
    /// reachable by spelling.
    pub fn from_words<I, S>(name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Dictionary { name: name.to_string(), ..Dictionary::default() };
        for word in words {
            let display = word.as_ref().trim();
            let normalized = normalize(display);
            if normalized.is_empty() {
                continue;
            }
            let position = dictionary.entries.len();
            if !dictionary.positions.contains_key(&normalized) {
                dictionary.positions.insert(normalized.clone(), position);
                dictionary.by_length.entry(normalized.len()).or_default().push(position);
            }
            dictionary.entries.push(Entry { display: display.to_string(), normalized });
        }
        dictionary
    }

    /// Load `<dir>/<name>.txt`.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{name}.txt"));
        if !path.is_file() {
            return Err(Error::DictionaryNotFound { name: name.to_string(), path: path.display().to_string() });
        }
        let bytes = fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        let dictionary = Dictionary::from_words(name, text.lines());
        debug!(name, entries = dictionary.len(), path = %path.display(), "dictionary loaded");
        Ok(dictionary)
    }

    /// Names of the `.txt` files in `dir`, sorted.
    pub fn available(dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for item in fs::read_dir(dir)? {
            let path = item?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First position of a normalized spelling.
    pub fn position(&self, normalized: &str) -> Option<usize> {
        self.positions.get(normalized).copied()
    }

    pub fn lookup(&self, normalized: &str) -> Option<&Entry> {
        self.position(normalized).map(|p| &self.entries[p])
    }

    /// Distinct spellings of a given normalized length.
    pub fn bucket(&self, length: usize) -> &[usize] {
        self.by_length.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty length buckets within `lengths`, shortest first.
    pub fn buckets(&self, lengths: RangeInclusive<usize>) -> impl Iterator<Item = &[usize]> + '_ {
        self.by_length.range(lengths).map(|(_, bucket)| bucket.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_resolve_to_first_entry() {
        let d = Dictionary::from_words("t", ["Casa", "perro", "casa", "  ", "123", "sol\r"]);
        assert_eq!(d.len(), 4);
        assert_eq!(d.position("CASA"), Some(0));
        assert_eq!(d.lookup("CASA").map(|e| e.display.as_str()), Some("Casa"));
        assert_eq!(d.bucket(4), &[0]);
        assert_eq!(d.bucket(5), &[1]);
        assert_eq!(d.lookup("SOL").map(|e| e.display.as_str()), Some("sol"));
        assert!(d.bucket(9).is_empty());
        let lengths: Vec<&[usize]> = d.buckets(0..=usize::MAX).collect();
        assert_eq!(lengths, vec![&[3][..], &[0][..], &[1][..]]);
    }

    #[test]
    fn load_and_list_from_directory() {
        let dir = std::env::temp_dir().join(format!("wordsieve-dict-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mini.txt"), "canción\nárbol\n\nniño\n").unwrap();
        fs::write(dir.join("notes.md"), "not a dictionary").unwrap();

        let d = Dictionary::load(&dir, "mini").unwrap();
        assert_eq!(d.name(), "mini");
        assert_eq!(d.entries()[2], Entry { display: "niño".into(), normalized: "NI~O".into() });
        assert_eq!(Dictionary::available(&dir).unwrap(), vec!["mini"]);

        match Dictionary::load(&dir, "missing") {
            Err(Error::DictionaryNotFound { name, .. }) => assert_eq!(name, "missing"),
            other => panic!("expected DictionaryNotFound, got {other:?}"),
        }
        fs::remove_dir_all(&dir).unwrap();
    }
}
