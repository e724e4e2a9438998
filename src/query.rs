//! Boolean query algebra and nested arguments.
//!
//! Operands are parenthesized groups; each group holds either a leaf query
//! (a search line or a word command) or another expression. Operators bind
//! tightest first: `!`, `&&`, ` - `, `||`, all left-associative.
//!
//! ```text
//! (CAS*) || (/aso SOL) && !([3S*])
//!   └ Or(Leaf, And(Leaf, Not(Leaf)))
//! ```
//!
//! Operators are only recognized outside `(..)` and `[..]`; a difference
//! needs a space on both sides so that `-` may appear in other text.

#[path = "query/eval.rs"]
mod eval;
#[path = "query/lexer.rs"]
mod lexer;
#[path = "query/nested.rs"]
mod nested;
#[path = "query/parser.rs"]
mod parser;

pub use eval::LeafEvaluator;
pub use lexer::is_expression;
pub use nested::{NestedArg, split_nested};
pub use parser::{Expr, parse_expression};
