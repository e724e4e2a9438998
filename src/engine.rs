//! Search engine.
//!
//! This module is the entry point for everything that turns one *leaf line*
//! (a pattern, an optional constraint list and an optional tolerance) into a
//! set of dictionary positions, plus the segmentation search behind `/cal`.
//! It is split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! leaf line ── LeafQuery::parse ──────────────── (compiler.rs)
//!               - pattern  -> Vec<PatternElement>
//!               - [..]     -> ConstraintSet     (constraints.rs)
//!               - n / n*   -> Budget
//!                               │
//! dictionary entries ───────────┤ run_leaf (search.rs)
//!                               │  - constraint deficit decides the residual
//!                               │    budget (or rejects the word outright)
//!                               │  - Matcher::matches on the residual
//!                               v                (matcher.rs)
//!                            MatchSet
//! ```
//!
//! Segmentation (`segment.rs`) reuses the constraint evaluator and the
//! phonology helpers but has its own interval search over the length buckets
//! of the dictionary.
//!
//! ## Responsibilities by module
//!
//! - `compiler.rs`: leaf-line grammar, range and constraint parsing.
//! - `constraints.rs`: feature measurement and deficit sums.
//! - `phonology.rs`: syllables, stress position and rhyme suffix.
//! - `matcher.rs`: memoized budgeted pattern match on one word.
//! - `segment.rs`: bounded edit distance and word decomposition.
//! - `search.rs`: dictionary scan for one compiled leaf.
//! - `metrics.rs`: counters and timings for one scan.
//!
//! ## Debugging
//!
//! Every leaf scan emits a `tracing` debug event with its metrics; run the
//! binary with `--verbose` or set `WORDSIEVE_DEBUG=1` to see them.

#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/constraints.rs"]
mod constraints;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/phonology.rs"]
mod phonology;
#[path = "engine/search.rs"]
mod search;
#[path = "engine/segment.rs"]
mod segment;

pub use compiler::{LeafQuery, compile_pattern, is_range_token, parse_constraints, parse_tolerance};
pub use constraints::{ConstraintSet, FeatureMask};
pub use matcher::Matcher;
pub use metrics::{LeafMetrics, LeafRun};
pub use phonology::{rhyme_suffix, stress_index, syllables};
pub use search::{run_leaf, run_leaf_with_metrics};
pub use segment::{Partition, Segment, bounded_distance, decompose};
