//! Minimum-move alignment over all candidate lines.
//!
//! For each of the `2n + 2` lines the board is reduced to an assignment
//! problem (`LineWeightBuilder`) and solved by one shared `Matcher`; the line
//! with the largest total weight (smallest total distance) wins. Ties keep the
//! first line in `Line::candidates` order.

use crate::board::{Board, Line, LineWeightBuilder, Point};
use crate::matching::{MatchError, Matcher, WeightMatrix};

/// Best line for a board and where each marker goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment {
    pub line: Line,
    /// Total Manhattan distance moved.
    pub moves: i64,
    /// `targets[u]` is the cell marker `u` moves to.
    pub targets: Vec<Point>,
}

/// Reusable matcher plus weight buffer; sized on demand per board.
#[derive(Clone, Debug, Default)]
pub struct AlignmentSolver {
    matcher: Matcher,
    weights: WeightMatrix,
}

impl AlignmentSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn prepare(&mut self, n: usize) {
        if self.matcher.size() != n {
            self.matcher.resize(n);
        }
    }

    /// Minimum total moves to bring every marker onto `line`.
    pub fn evaluate(&mut self, board: &Board, line: Line) -> Result<i64, MatchError> {
        self.prepare(board.size());
        LineWeightBuilder::new(board.points()).fill(line, &mut self.weights);
        let weight = self.matcher.run(&self.weights)?;
        tracing::trace!(%line, moves = -weight, "line evaluated");
        Ok(-weight)
    }

    /// Best line over all `2n + 2` candidates.
    pub fn solve(&mut self, board: &Board) -> Result<Alignment, MatchError> {
        let n = board.size();
        let mut best: Option<Alignment> = None;
        for line in Line::candidates(n) {
            let moves = self.evaluate(board, line)?;
            if best.as_ref().map_or(true, |b| moves < b.moves) {
                best = Some(self.current_alignment(line, moves, n));
            }
        }
        let best = best.ok_or(MatchError::NoCandidates)?;
        tracing::debug!(n, line = %best.line, moves = best.moves, "board aligned");
        Ok(best)
    }

    /// Alignment read back from the matcher's last matching on `line`.
    fn current_alignment(&self, line: Line, moves: i64, n: usize) -> Alignment {
        let mut targets = vec![Point::zeros(); n];
        for (v, u) in self.matcher.matches().iter().enumerate() {
            if let Some(u) = *u {
                targets[u] = line.target_cell(v, n);
            }
        }
        Alignment {
            line,
            moves,
            targets,
        }
    }
}

/// Convenience: minimum total moves for `board` with a fresh solver.
pub fn min_moves(board: &Board) -> Result<i64, MatchError> {
    AlignmentSolver::new().solve(board).map(|a| a.moves)
}
