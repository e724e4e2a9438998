use super::lexer::group_end;
use crate::engine::is_range_token;
use crate::error::ParseError;

/// Word-command argument whose word comes from another query:
/// `/aso (/cal SOL) [2S*]` has `inner = "/cal SOL"` and `rest = "[2S*]"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedArg {
    pub inner: String,
    pub rest: String,
}

impl NestedArg {
    /// Argument line for one word produced by the inner query.
    pub fn with_word(&self, word: &str) -> String {
        if self.rest.is_empty() { word.to_string() } else { format!("{word} {}", self.rest) }
    }
}

/// Split an argument that opens with a non-range group. Returns `None` when
/// the argument is an ordinary word.
pub fn split_nested(arg: &str) -> Result<Option<NestedArg>, ParseError> {
    let arg = arg.trim();
    if !arg.starts_with('(') {
        return Ok(None);
    }
    let end = group_end(arg, 0).ok_or(ParseError::Unbalanced)?;
    let inner = &arg[1..end];
    if is_range_token(inner) {
        return Ok(None);
    }
    Ok(Some(NestedArg { inner: inner.trim().replace('\\', "/"), rest: arg[end + 1..].trim().to_string() }))
}
