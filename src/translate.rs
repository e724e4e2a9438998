//! Word command translation.
//!
//! Most word commands are sugar over leaf searches: they turn their word into
//! one or more leaf lines whose union is the command's result. `/cal` and
//! `/wp` are driven by the session and only borrow the argument parsing.

use crate::command::WordCommand;
use crate::engine::{parse_tolerance, rhyme_suffix, syllables};
use crate::error::{CompileError, Error, Result};
use crate::text::{is_consonant, is_vowel, normalize};
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::trace;

const VOWELS: [u8; 5] = *b"AEIOU";

/// A word command argument: `WORD [CONSTRAINTS] TOLERANCE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordArgs {
    /// Word as typed, with inner spaces removed.
    pub word: String,
    /// Constraint text without brackets.
    pub constraints: String,
    /// Tolerance token as typed (`""`, `"2"`, `"1*"`).
    pub tolerance: String,
}

impl WordArgs {
    pub fn parse(arg: &str) -> std::result::Result<WordArgs, CompileError> {
        let arg = arg.trim();
        let (word, constraints, tolerance) = match arg.find('[') {
            Some(open) => {
                let close = arg[open..].find(']').map(|c| open + c).ok_or(CompileError::UnclosedBracket)?;
                (&arg[..open], &arg[open + 1..close], arg[close + 1..].trim())
            }
            None => match arg.rsplit_once(char::is_whitespace) {
                Some((head, tail)) if parse_tolerance(tail).is_some() => (head, "", tail),
                _ => (arg, "", ""),
            },
        };
        Ok(WordArgs {
            word: word.chars().filter(|c| !c.is_whitespace()).collect(),
            constraints: constraints.trim().to_string(),
            tolerance: tolerance.to_string(),
        })
    }

    pub fn normalized(&self) -> String {
        normalize(&self.word)
    }

    /// Tolerance number, ignoring any `*`; zero when absent.
    pub fn tolerance_value(&self) -> usize {
        parse_tolerance(&self.tolerance).map_or(0, |b| b.tolerance)
    }

    /// First tolerance tried by `/wp`: the given one, or 1.
    pub fn wordplay_start(&self) -> usize {
        parse_tolerance(&self.tolerance).map_or(1, |b| b.tolerance)
    }

    pub fn is_total(&self) -> bool {
        self.tolerance.trim_end().ends_with('*')
    }

    /// ` [C]` when constraints were given.
    fn constraint_suffix(&self, extra: &str) -> String {
        match (self.constraints.is_empty(), extra.is_empty()) {
            (true, true) => String::new(),
            (true, false) => format!(" [{extra}]"),
            (false, true) => format!(" [{}]", self.constraints),
            (false, false) => format!(" [{extra},{}]", self.constraints),
        }
    }

    fn tolerance_suffix(&self) -> String {
        if self.tolerance.is_empty() { String::new() } else { format!(" {}", self.tolerance) }
    }

    /// `pattern [extra,C] n`.
    fn line(&self, pattern: &str, extra: &str) -> String {
        format!("{pattern}{}{}", self.constraint_suffix(extra), self.tolerance_suffix())
    }
}

/// Leaf lines whose union answers a word command. An empty list means the
/// command has no results for this word.
pub fn leaf_lines(kind: WordCommand, args: &WordArgs) -> Result<Vec<String>> {
    let word = args.normalized();
    if word.is_empty() {
        return Err(Error::MissingWord(kind.name()));
    }

    let lines = match kind {
        WordCommand::Anagram => vec![anagram(&word, args)],
        WordCommand::Paronomasia => vec![paronomasia(&word, args)],
        WordCommand::Anasyllabic => anasyllabic(&word, args),
        WordCommand::Anaphora => vec![args.line(&format!("{word}."), "")],
        WordCommand::Epiphora => vec![args.line(&format!(".{word}"), "")],
        WordCommand::Multisyllabic => vec![multisyllabic(&word, args)],
        WordCommand::Univocalism => univocalism(&word, args).into_iter().collect(),
        WordCommand::Assonant => vec![assonant(args)?],
        WordCommand::Consonant => vec![consonant(args)?],
        WordCommand::Wordplay => vec![wordplay(args, args.wordplay_start(), args.is_total())],
        WordCommand::Calembour => return Err(Error::UnknownCommand(kind.name().to_string())),
    };
    trace!(command = kind.name(), ?lines, "translated");
    Ok(lines)
}

/// `. [<count><letter>,...,<len>(,C)] n*`: same multiset of letters, with
/// the tolerance always spent in shared mode.
fn anagram(word: &str, args: &WordArgs) -> String {
    let counts: BTreeMap<u8, usize> = word.bytes().fold(BTreeMap::new(), |mut acc, b| {
        *acc.entry(b).or_default() += 1;
        acc
    });
    let letters = counts.iter().map(|(&letter, count)| format!("{count}{}", letter as char)).join(",");
    let extra = format!("{letters},{}", word.len());
    let tolerance = match parse_tolerance(&args.tolerance) {
        Some(budget) => format!(" {}*", budget.tolerance),
        None => String::new(),
    };
    format!(".{}{tolerance}", args.constraint_suffix(&extra))
}

/// Consonant skeleton with `*` in place of every vowel.
fn paronomasia(word: &str, args: &WordArgs) -> String {
    let pattern: String = word.chars().map(|c| if is_vowel(c as u8) { '*' } else { c }).collect();
    let vowels = word.bytes().filter(|&b| is_vowel(b)).count();
    args.line(&pattern, &format!("{vowels}V*"))
}

/// Every distinct reordering of the word's syllables.
fn anasyllabic(word: &str, args: &WordArgs) -> Vec<String> {
    let parts = syllables(word);
    parts
        .iter()
        .permutations(parts.len())
        .map(|p| p.into_iter().copied().collect::<String>())
        .unique()
        .map(|pattern| args.line(&pattern, ""))
        .collect()
}

/// The word's vowels in order, anything around them.
fn multisyllabic(word: &str, args: &WordArgs) -> String {
    let vowels: Vec<u8> = word.bytes().filter(|&b| is_vowel(b)).collect();
    let mut pattern = String::from(".");
    for &v in &vowels {
        pattern.push(v as char);
        pattern.push('.');
    }
    args.line(&pattern, &format!("{}V*", vowels.len()))
}

/// Words using the first vowel of the word and no other.
fn univocalism(word: &str, args: &WordArgs) -> Option<String> {
    let vowel = word.bytes().find(|&b| is_vowel(b))?;
    let others = VOWELS.iter().filter(|&&v| v != vowel).map(|&v| format!("0{}", v as char)).join(",");
    Some(args.line(".", &format!("{},{others}", vowel as char)))
}

fn rhyme(args: &WordArgs) -> Result<String> {
    let rhyme = rhyme_suffix(&args.word);
    if rhyme.is_empty() {
        return Err(Error::NoRhyme(args.word.clone()));
    }
    Ok(rhyme)
}

/// Same vowels from the stressed one on, any consonants between them.
fn assonant(args: &WordArgs) -> Result<String> {
    let rhyme = rhyme(args)?;
    let mut pattern = String::from(".(0,,C)");
    for b in rhyme.bytes().filter(|&b| !is_consonant(b)) {
        pattern.push(b as char);
        pattern.push_str("(0,,C)");
    }
    Ok(args.line(&pattern, ""))
}

fn consonant(args: &WordArgs) -> Result<String> {
    let rhyme = rhyme(args)?;
    Ok(args.line(&format!(".{rhyme}"), ""))
}

/// `WORD [C] n` or `WORD [C] n*` for one step of `/wp`.
pub fn wordplay(args: &WordArgs, tolerance: usize, total: bool) -> String {
    let star = if total { "*" } else { "" };
    format!("{}{} {tolerance}{star}", normalize(&args.word), args.constraint_suffix(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(kind: WordCommand, arg: &str) -> Vec<String> {
        leaf_lines(kind, &WordArgs::parse(arg).unwrap()).unwrap()
    }

    #[test]
    fn argument_extraction() {
        let cases: Vec<(&str, WordArgs)> = vec![
            ("CASA", WordArgs { word: "CASA".into(), ..WordArgs::default() }),
            ("CASA 2", WordArgs { word: "CASA".into(), tolerance: "2".into(), ..WordArgs::default() }),
            ("CASA 2*", WordArgs { word: "CASA".into(), tolerance: "2*".into(), ..WordArgs::default() }),
            ("BUEN DIA", WordArgs { word: "BUENDIA".into(), ..WordArgs::default() }),
            ("SOL [2S*] 1", WordArgs { word: "SOL".into(), constraints: "2S*".into(), tolerance: "1".into() }),
            ("SOL [E]", WordArgs { word: "SOL".into(), constraints: "E".into(), ..WordArgs::default() }),
        ];
        for (arg, expected) in cases {
            assert_eq!(WordArgs::parse(arg).unwrap(), expected, "{arg:?}");
        }
        assert_eq!(WordArgs::parse("SOL [2S*"), Err(CompileError::UnclosedBracket));
    }

    #[test]
    fn translations() {
        let cases: Vec<(WordCommand, &str, Vec<&str>)> = vec![
            (WordCommand::Anagram, "ROSA", vec![". [1A,1O,1R,1S,4]"]),
            (WordCommand::Anagram, "ROSA 1", vec![". [1A,1O,1R,1S,4] 1*"]),
            (WordCommand::Anagram, "año [2S*] 2*", vec![". [1A,1O,1~,3,2S*] 2*"]),
            (WordCommand::Paronomasia, "COCHE", vec!["C*CH* [2V*]"]),
            (WordCommand::Paronomasia, "COCHE [E] 1", vec!["C*CH* [2V*,E] 1"]),
            (WordCommand::Anasyllabic, "CASA", vec!["CASA", "SACA"]),
            (WordCommand::Anasyllabic, "PAPA", vec!["PAPA"]),
            (WordCommand::Anasyllabic, "CAMINO", vec!["CAMINO", "CANOMI", "MICANO", "MINOCA", "NOCAMI", "NOMICA"]),
            (WordCommand::Anaphora, "CAS 1", vec!["CAS. 1"]),
            (WordCommand::Epiphora, "ción", vec![".CION"]),
            (WordCommand::Multisyllabic, "CAMINO", vec![".A.I.O. [3V*]"]),
            (WordCommand::Univocalism, "CASA", vec![". [A,0E,0I,0O,0U]"]),
            (WordCommand::Univocalism, "PSST", vec![]),
            (WordCommand::Assonant, "corazón", vec![".(0,,C)O(0,,C)"]),
            (WordCommand::Assonant, "CAMINO [3S*]", vec![".(0,,C)I(0,,C)O(0,,C) [3S*]"]),
            (WordCommand::Consonant, "CAMINO", vec![".INO"]),
            (WordCommand::Wordplay, "CASA", vec!["CASA 1"]),
            (WordCommand::Wordplay, "CASA [E] 3*", vec!["CASA [E] 3*"]),
        ];
        for (kind, arg, expected) in cases {
            assert_eq!(lines(kind, arg), expected, "{} {arg}", kind.name());
        }
    }

    #[test]
    fn translation_errors() {
        let missing = leaf_lines(WordCommand::Anagram, &WordArgs::parse("").unwrap());
        assert!(matches!(missing, Err(Error::MissingWord("/anagram"))));

        let missing = leaf_lines(WordCommand::Assonant, &WordArgs::parse("[3S*] 1").unwrap());
        assert!(matches!(missing, Err(Error::MissingWord("/assonant"))));
    }
}
