use crate::engine::is_range_token;
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    Not,
    And,
    Or,
    Difference,
    /// Text between a top-level pair of parentheses.
    Group(String),
}

impl Token {
    pub(super) fn symbol(&self) -> &'static str {
        match self {
            Token::Not => "!",
            Token::And => "&&",
            Token::Or => "||",
            Token::Difference => "-",
            Token::Group(_) => "(..)",
        }
    }
}

/// Byte offset of the `)` closing the `(` at `open`, ignoring parentheses
/// inside `[..]`.
pub(super) fn group_end(text: &str, open: usize) -> Option<usize> {
    let mut parens = 0usize;
    let mut brackets = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'[' => brackets += 1,
            b']' if brackets > 0 => brackets -= 1,
            b'(' if brackets == 0 => parens += 1,
            b')' if brackets == 0 => {
                parens = parens.checked_sub(1)?;
                if parens == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Whether `text` holds a boolean operator outside every `(..)` and `[..]`.
pub fn has_operators(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut parens = 0usize;
    let mut brackets = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'[' => brackets += 1,
            b']' => brackets = brackets.saturating_sub(1),
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            _ if parens > 0 || brackets > 0 => {}
            b'!' => return true,
            b'&' | b'|' if bytes.get(i + 1) == Some(&b) => return true,
            b'-' if i > 0 && bytes[i - 1] == b' ' && bytes.get(i + 1) == Some(&b' ') => return true,
            _ => {}
        }
    }
    false
}

/// Whether `text` is exactly one parenthesized group that is not a range.
pub(super) fn is_single_group(text: &str) -> bool {
    let text = text.trim();
    if !text.starts_with('(') {
        return false;
    }
    match group_end(text, 0) {
        Some(end) => end == text.len() - 1 && !is_range_token(&text[1..end]),
        None => false,
    }
}

/// Whether a whole input line should go through the boolean parser.
pub fn is_expression(text: &str) -> bool {
    has_operators(text) || is_single_group(text)
}

pub(super) fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match bytes[i] {
            b if b.is_ascii_whitespace() => i += 1,
            b'!' => {
                tokens.push(Token::Not);
                i += 1;
            }
            b'&' if next == Some(b'&') => {
                tokens.push(Token::And);
                i += 2;
            }
            b'|' if next == Some(b'|') => {
                tokens.push(Token::Or);
                i += 2;
            }
            b'-' if i > 0 && bytes[i - 1] == b' ' && next == Some(b' ') => {
                tokens.push(Token::Difference);
                i += 1;
            }
            b'(' => {
                let end = group_end(text, i).ok_or(ParseError::Unbalanced)?;
                tokens.push(Token::Group(text[i + 1..end].replace('\\', "/")));
                i = end + 1;
            }
            b')' => return Err(ParseError::Unbalanced),
            _ => {
                let stray = text[i..].split(|c: char| c.is_whitespace() || c == '(').next().unwrap_or_default();
                return Err(ParseError::UnexpectedText(stray.to_string()));
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(text: &str) -> Token {
        Token::Group(text.to_string())
    }

    #[test]
    fn operator_detection() {
        let cases: Vec<(&str, bool)> = vec![
            ("(A) && (B)", true),
            ("(A) || (B)", true),
            ("(A) - (B)", true),
            ("!(A)", true),
            ("CAS*", false),
            ("bien-estar", false),
            ("(A && B)", false),
            (". [a - b]", false),
            ("/aso ((/cal SOL) || (/cal LUNA))", false),
            ("A & B", false),
        ];
        for (text, expected) in cases {
            assert_eq!(has_operators(text), expected, "{text}");
        }
    }

    #[test]
    fn single_groups() {
        assert!(is_single_group("(CASA)"));
        assert!(is_single_group(" ((A) || (B)) "));
        assert!(!is_single_group("(1,2)"));
        assert!(!is_single_group("(1,2,C)A."));
        assert!(!is_single_group("(A) (B)"));
        assert!(!is_single_group("CASA"));
    }

    #[test]
    fn tokens() {
        let tokens = tokenize("(CAS*) && !(\\aso SOL) - ([3S*]) || (. [(x)])").unwrap();
        assert_eq!(tokens, vec![
            group("CAS*"),
            Token::And,
            Token::Not,
            group("/aso SOL"),
            Token::Difference,
            group("[3S*]"),
            Token::Or,
            group(". [(x)]"),
        ]);
    }

    #[test]
    fn tokenizer_errors() {
        assert_eq!(tokenize("(A) && (B"), Err(ParseError::Unbalanced));
        assert_eq!(tokenize("(A))"), Err(ParseError::Unbalanced));
        assert_eq!(tokenize("(A) && CASA"), Err(ParseError::UnexpectedText("CASA".into())));
    }

    #[test]
    fn group_end_skips_brackets() {
        assert_eq!(group_end("(a[)]b)", 0), Some(6));
        assert_eq!(group_end("((a)b)", 0), Some(5));
        assert_eq!(group_end("(a", 0), None);
    }
}
