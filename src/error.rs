use thiserror::Error;

/// Canonical result for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("{0} needs a word")]
    MissingWord(&'static str),

    #[error("could not determine the rhyme of '{0}'")]
    NoRhyme(String),

    #[error("'{word}' is too long to decompose ({len} letters, at most {max})")]
    WordTooLong { word: String, len: usize, max: usize },

    #[error("'{0}' does not produce words and cannot be used as a query")]
    NotAQuery(String),

    #[error("the nested query returned no words")]
    EmptyNested,

    #[error("dictionary '{name}' not found ({path})")]
    DictionaryNotFound { name: String, path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A leaf line that cannot be compiled. The search is aborted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unclosed '(' at position {0}")]
    UnclosedRange(usize),

    #[error("unexpected ')' at position {0}")]
    StrayCloseParen(usize),

    #[error("invalid range '({0})'")]
    InvalidRange(String),

    #[error("range ({min},{max}) has its minimum above its maximum")]
    InvertedRange { min: usize, max: usize },

    #[error("unclosed '[' in constraint list")]
    UnclosedBracket,

    #[error("unknown comparison '{0}'")]
    InvalidComparison(String),
}

/// A boolean expression or nested group that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unbalanced parentheses")]
    Unbalanced,

    #[error("operator '{0}' is missing an operand")]
    MissingOperand(&'static str),

    #[error("unexpected '{0}' outside of a parenthesized query")]
    UnexpectedText(String),

    #[error("empty expression")]
    Empty,
}
