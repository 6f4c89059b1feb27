//! Boards, candidate lines, and the line-to-matrix reduction.
//!
//! Purpose
//! - Hold validated marker positions (`Board`, 0-indexed `Point`s).
//! - Enumerate the `2n + 2` target lines and turn each into a weight matrix
//!   whose maximum-weight matching is the negated minimum move count.
//!
//! Code cross-refs: `matching::{Matcher, WeightMatrix}`, `solver::AlignmentSolver`.

mod lines;
mod types;

pub use lines::{Line, LineWeightBuilder};
pub use types::{manhattan, Board, BoardError, Point};
