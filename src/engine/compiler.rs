//! Leaf-line compiler.
//!
//! A leaf line has the shape `PATTERN [CONSTRAINTS] TOLERANCE`, where both
//! trailing parts are optional:
//!
//! - `PATTERN`: literal letters, `*` (one letter), `.` (any run) and ranges
//!   `(min,max,V|C)`. Whitespace inside a pattern is ignored.
//! - `CONSTRAINTS`: comma-separated `[op][number]target` items.
//! - `TOLERANCE`: `n` (pattern-only budget) or `n*` (shared budget). Without
//!   brackets, the last whitespace-separated token is a tolerance only when it
//!   has that shape.

use crate::engine::constraints::ConstraintSet;
use crate::error::CompileError;
use crate::text::{fold_char, normalize};
use crate::{Budget, BudgetMode, Comparison, Constraint, ElementClass, PatternElement, Target};

/// A compiled leaf line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafQuery {
    pub elements: Vec<PatternElement>,
    pub constraints: ConstraintSet,
    pub budget: Budget,
}

impl LeafQuery {
    pub fn parse(line: &str) -> Result<LeafQuery, CompileError> {
        let line = line.trim();
        let (pattern, constraints, tolerance) = match line.find('[') {
            Some(open) => {
                let close = line[open..].find(']').map(|c| open + c).ok_or(CompileError::UnclosedBracket)?;
                (&line[..open], &line[open + 1..close], line[close + 1..].trim())
            }
            None => match line.rsplit_once(char::is_whitespace) {
                Some((head, tail)) if parse_tolerance(tail).is_some() => (head, "", tail),
                _ => (line, "", ""),
            },
        };

        Ok(LeafQuery {
            elements: compile_pattern(pattern)?,
            constraints: parse_constraints(constraints)?,
            budget: parse_tolerance(tolerance).unwrap_or_default(),
        })
    }

    /// Budget left for the pattern match once the constraint deficit of the
    /// word is accounted for; `None` rejects the word without matching.
    pub fn residual_budget(&self, word: &str, display: &str) -> Option<usize> {
        let deficit = self.constraints.deficit(word, display);
        match self.budget.mode {
            BudgetMode::Partial => (deficit == 0).then_some(self.budget.tolerance),
            BudgetMode::Total => self.budget.tolerance.checked_sub(deficit),
        }
    }
}

/// Parse a tolerance token (`2`, `3*`). Numbers too large to represent fall
/// back to zero.
pub fn parse_tolerance(token: &str) -> Option<Budget> {
    let caps = regex!(r"^(\d+)(\*?)$").captures(token.trim())?;
    let tolerance = caps[1].parse().unwrap_or(0);
    let mode = if caps[2].is_empty() { BudgetMode::Partial } else { BudgetMode::Total };
    Some(Budget { tolerance, mode })
}

/// Whether the text between a pair of parentheses is a range specifier.
pub fn is_range_token(inner: &str) -> bool {
    range_regex().is_match(inner)
}

fn range_regex() -> &'static regex::Regex {
    regex!(r"^\s*(\d*)\s*(?:,\s*(\d*)\s*(?:,\s*([VvCc]?)\s*)?)?$")
}

pub fn compile_pattern(pattern: &str) -> Result<Vec<PatternElement>, CompileError> {
    let mut elements = Vec::new();
    let mut chars = pattern.char_indices();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '*' => elements.push(PatternElement::any_one()),
            '.' => elements.push(PatternElement::any_run()),
            '(' => {
                let close = pattern[pos..].find(')').map(|c| pos + c).ok_or(CompileError::UnclosedRange(pos))?;
                elements.push(compile_range(&pattern[pos + 1..close])?);
                for (p, _) in chars.by_ref() {
                    if p == close {
                        break;
                    }
                }
            }
            ')' => return Err(CompileError::StrayCloseParen(pos)),
            // Whitespace, hyphens and other non-letters are skipped.
            c => {
                if let Some((letter, _)) = fold_char(c) {
                    elements.push(PatternElement::exact(letter));
                }
            }
        }
    }
    Ok(elements)
}

fn compile_range(inner: &str) -> Result<PatternElement, CompileError> {
    let invalid = || CompileError::InvalidRange(inner.to_string());
    let caps = range_regex().captures(inner).ok_or_else(invalid)?;

    let min = match caps.get(1).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        Some(digits) => digits.parse().map_err(|_| invalid())?,
        None => 0,
    };
    let max = match caps.get(2).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        Some(digits) => Some(digits.parse().map_err(|_| invalid())?),
        None => None,
    };
    let class = match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("V") => ElementClass::Vowel,
        Some("C") => ElementClass::Consonant,
        _ => ElementClass::Any,
    };

    if let Some(max) = max.filter(|&max| min > max) {
        return Err(CompileError::InvertedRange { min, max });
    }
    Ok(PatternElement::run(class, min, max))
}

/// Parse the text between `[` and `]`.
///
/// Item defaults: no operator and no number means `>=1`; a number without an
/// operator means `==`; an operator without a number compares against 1.
pub fn parse_constraints(text: &str) -> Result<ConstraintSet, CompileError> {
    let mut items = Vec::new();
    for raw in text.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let Some(caps) = regex!(r"^([<>=]*)\s*(\d*)\s*(.*?)\s*$").captures(raw) else {
            continue;
        };
        let (op, digits, target) = (&caps[1], &caps[2], &caps[3]);

        let comparison = match op {
            "" if digits.is_empty() => Comparison::Ge,
            "" | "=" | "==" => Comparison::Eq,
            ">=" => Comparison::Ge,
            "<=" => Comparison::Le,
            ">" => Comparison::Gt,
            "<" => Comparison::Lt,
            other => return Err(CompileError::InvalidComparison(other.to_string())),
        };
        let threshold = if digits.is_empty() { 1 } else { digits.parse().unwrap_or(0) };

        items.push(Constraint { comparison, threshold, target: parse_target(target) });
    }
    Ok(ConstraintSet::new(items))
}

fn parse_target(raw: &str) -> Target {
    match raw.to_uppercase().as_str() {
        "" => Target::Length,
        "V*" => Target::Vowels,
        "C*" => Target::Consonants,
        "S*" => Target::Syllables,
        "T*" => Target::Stress,
        _ => {
            let letters = normalize(raw);
            match letters.as_bytes() {
                [letter] => Target::Letter(*letter),
                // With no letters left the count is always zero.
                _ => Target::Substring(letters),
            }
        }
    }
}
