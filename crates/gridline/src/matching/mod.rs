//! Maximum-weight perfect matching on dense square weight matrices.
//!
//! Purpose
//! - Solve the assignment problem behind every candidate line: `n` sources,
//!   `n` targets, every pair weighted.
//! - Keep one reusable `Matcher` per board size; `run` resets its own state.
//!
//! Numerics
//! - Weights live within `±WEIGHT_LIMIT`; slack is evaluated in `i128` and
//!   potential shifts are checked, so overflow surfaces as `MatchError::Overflow`.
//!
//! Code cross-refs: `board::LineWeightBuilder`, `solver::AlignmentSolver`.

mod matcher;
mod weights;

pub use matcher::Matcher;
pub use weights::{WeightMatrix, WEIGHT_LIMIT};

use std::fmt;

/// Errors raised by the matcher and weight-matrix constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// Rows of different length passed to `WeightMatrix::from_rows`.
    NotSquare { rows: usize, row: usize, len: usize },
    /// Matrix size differs from the size the matcher was resized to.
    SizeMismatch { expected: usize, found: usize },
    /// Entry outside `±WEIGHT_LIMIT`.
    WeightOutOfRange { row: usize, col: usize, value: i64 },
    /// No slack pair while relabeling: potentials are no longer feasible.
    NoSlack { left: usize },
    /// Potential or total left the `i64` range.
    Overflow,
    /// A board without candidate lines was passed to the solver.
    NoCandidates,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSquare { rows, row, len } => {
                write!(f, "weight matrix not square: {rows} rows, row {row} has {len} entries")
            }
            Self::SizeMismatch { expected, found } => {
                write!(f, "matcher sized for {expected}, got a {found}x{found} matrix")
            }
            Self::WeightOutOfRange { row, col, value } => {
                write!(f, "weight {value} at ({row}, {col}) exceeds the admissible range")
            }
            Self::NoSlack { left } => {
                write!(f, "no slack pair while augmenting from source {left}")
            }
            Self::Overflow => write!(f, "potential overflow"),
            Self::NoCandidates => write!(f, "no candidate lines to evaluate"),
        }
    }
}

impl std::error::Error for MatchError {}
