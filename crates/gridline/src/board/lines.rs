//! Candidate target lines and their weight matrices.

use std::fmt;

use super::types::{manhattan, Point};
use crate::matching::WeightMatrix;

/// A full straight line of an `n × n` board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    /// Cells `(i, v)` for `v` in `[0, n)`.
    Row(usize),
    /// Cells `(v, i)` for `v` in `[0, n)`.
    Column(usize),
    /// Cells `(v, v)`.
    MainDiagonal,
    /// Cells `(v, n - 1 - v)`.
    AntiDiagonal,
}

impl Line {
    /// The `v`-th cell of this line on an `n × n` board.
    #[inline]
    pub fn target_cell(self, v: usize, n: usize) -> Point {
        let k = v as i64;
        match self {
            Line::Row(i) => Point::new(i as i64, k),
            Line::Column(i) => Point::new(k, i as i64),
            Line::MainDiagonal => Point::new(k, k),
            Line::AntiDiagonal => Point::new(k, (n - 1 - v) as i64),
        }
    }

    pub fn cells(self, n: usize) -> Vec<Point> {
        (0..n).map(|v| self.target_cell(v, n)).collect()
    }

    /// All `2n + 2` lines: rows, columns, main diagonal, anti-diagonal.
    pub fn candidates(n: usize) -> impl Iterator<Item = Line> {
        (0..n)
            .map(Line::Row)
            .chain((0..n).map(Line::Column))
            .chain([Line::MainDiagonal, Line::AntiDiagonal])
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(i) => write!(f, "row {i}"),
            Line::Column(i) => write!(f, "column {i}"),
            Line::MainDiagonal => write!(f, "main diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

/// Reduces "move every marker onto `line`" to an assignment problem:
/// `W[u][v] = -manhattan(points[u], line.target_cell(v))`.
#[derive(Clone, Copy, Debug)]
pub struct LineWeightBuilder<'a> {
    points: &'a [Point],
}

impl<'a> LineWeightBuilder<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        Self { points }
    }

    /// Fresh `n × n` matrix for `line`, `n = points.len()`.
    pub fn build(&self, line: Line) -> WeightMatrix {
        let mut w = WeightMatrix::zeros(self.points.len());
        self.fill(line, &mut w);
        w
    }

    /// Overwrite every cell of the reusable buffer `w` for `line`.
    pub fn fill(&self, line: Line, w: &mut WeightMatrix) {
        let n = self.points.len();
        w.reshape(n);
        for (u, p) in self.points.iter().enumerate() {
            for v in 0..n {
                w.set(u, v, -manhattan(p, &line.target_cell(v, n)));
            }
        }
    }
}
