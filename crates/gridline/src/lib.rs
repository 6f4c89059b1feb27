//! Minimum-move line alignment of markers on a square board.
//!
//! `n` markers sit on distinct cells of an `n × n` board. Moving them, one per
//! cell, onto a full row, column, or diagonal costs the sum of Manhattan
//! distances; this crate finds the cheapest such line.
//!
//! Layout
//! - `matching`: Kuhn–Munkres matcher over dense weight matrices.
//! - `board`: points, boards, candidate lines, line-to-matrix reduction.
//! - `solver`: sweep over all `2n + 2` lines with one reusable matcher.
//! - `stream`: input text reader and report formatting.
//! - `random`: reproducible random boards and matrices.

pub mod board;
pub mod matching;
pub mod random;
pub mod solver;
pub mod stream;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use board::{Board, BoardError, Line, LineWeightBuilder, Point};
pub use matching::{MatchError, Matcher, WeightMatrix, WEIGHT_LIMIT};
pub use solver::{min_moves, Alignment, AlignmentSolver};
pub use stream::{format_report, Cases, StreamError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::board::{manhattan, Board, Line, LineWeightBuilder, Point};
    pub use crate::matching::{Matcher, WeightMatrix};
    pub use crate::random::{draw_board, draw_weights, BoardCfg, ReplayToken, SizeDist};
    pub use crate::solver::{Alignment, AlignmentSolver};
}
