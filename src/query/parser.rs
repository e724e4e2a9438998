use super::lexer::{Token, has_operators, is_single_group, tokenize};
use crate::error::ParseError;

/// Parsed boolean query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Text of a group that holds no further operators.
    Leaf(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Difference(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

pub fn parse_expression(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.or("")?;
    match parser.tokens.get(parser.pos) {
        None => Ok(expr),
        Some(Token::Group(text)) => Err(ParseError::UnexpectedText(format!("({text})"))),
        Some(token) => Err(ParseError::UnexpectedText(token.symbol().to_string())),
    }
}

/// A group's text becomes a sub-expression when it has operators of its own
/// or is itself a single non-range group; otherwise it is a leaf.
fn group(text: String) -> Result<Expr, ParseError> {
    if has_operators(&text) || is_single_group(&text) {
        parse_expression(&text)
    } else {
        Ok(Expr::Leaf(text.trim().to_string()))
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.get(self.pos) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn or(&mut self, after: &'static str) -> Result<Expr, ParseError> {
        let mut left = self.difference(after)?;
        while self.eat(&Token::Or) {
            let right = self.difference("||")?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn difference(&mut self, after: &'static str) -> Result<Expr, ParseError> {
        let mut left = self.and(after)?;
        while self.eat(&Token::Difference) {
            let right = self.and("-")?;
            left = Expr::Difference(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self, after: &'static str) -> Result<Expr, ParseError> {
        let mut left = self.unary(after)?;
        while self.eat(&Token::And) {
            let right = self.unary("&&")?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self, after: &'static str) -> Result<Expr, ParseError> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.unary("!")?)));
        }
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Group(text)) => {
                self.pos += 1;
                group(text)
            }
            Some(token) => Err(ParseError::MissingOperand(token.symbol())),
            None => Err(ParseError::MissingOperand(after)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(text: &str) -> Box<Expr> {
        Box::new(Expr::Leaf(text.to_string()))
    }

    #[test]
    fn precedence() {
        let expr = parse_expression("(A) || (B) && !(C) - (D)").unwrap();
        assert_eq!(
            expr,
            Expr::Or(leaf("A"), Box::new(Expr::Difference(Box::new(Expr::And(leaf("B"), Box::new(Expr::Not(leaf("C"))))), leaf("D"))))
        );
    }

    #[test]
    fn left_associative() {
        let expr = parse_expression("(A) - (B) - (C)").unwrap();
        assert_eq!(expr, Expr::Difference(Box::new(Expr::Difference(leaf("A"), leaf("B"))), leaf("C")));
    }

    #[test]
    fn nested_groups_recurse() {
        let expr = parse_expression("((A) || (B)) && (C)").unwrap();
        assert_eq!(expr, Expr::And(Box::new(Expr::Or(leaf("A"), leaf("B"))), leaf("C")));

        assert_eq!(parse_expression("((CASA))").unwrap(), Expr::Leaf("CASA".into()));
        assert_eq!(parse_expression("((1,2)A)").unwrap(), Expr::Leaf("(1,2)A".into()));
        assert_eq!(parse_expression("(!(A))").unwrap(), Expr::Not(leaf("A")));
    }

    #[test]
    fn leaves_keep_commands() {
        let expr = parse_expression("(/aso SOL) && ([3S*])").unwrap();
        assert_eq!(expr, Expr::And(leaf("/aso SOL"), leaf("[3S*]")));
    }

    #[test]
    fn parse_errors() {
        let cases: Vec<(&str, ParseError)> = vec![
            ("(A) &&", ParseError::MissingOperand("&&")),
            ("(A) || && (B)", ParseError::MissingOperand("&&")),
            ("!", ParseError::MissingOperand("!")),
            ("&& (A)", ParseError::MissingOperand("&&")),
            ("(A) (B)", ParseError::UnexpectedText("(B)".into())),
            ("(A) !(B)", ParseError::UnexpectedText("!".into())),
            ("((A)", ParseError::Unbalanced),
            ("   ", ParseError::Empty),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_expression(text), Err(expected), "{text}");
        }
    }
}
