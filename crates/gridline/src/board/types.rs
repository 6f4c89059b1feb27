//! Marker positions and validated boards.
//!
//! - `Point`: 0-indexed `(x, y)` cell, `x` and `y` in `[0, n)`.
//! - `Board`: `n` markers on distinct cells of an `n × n` grid.

use std::collections::HashSet;
use std::fmt;

use nalgebra::Vector2;

/// Board cell `(x, y)`, 0-indexed.
pub type Point = Vector2<i64>;

/// `|x1 - x2| + |y1 - y2|`.
#[inline]
pub fn manhattan(a: &Point, b: &Point) -> i64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    Empty,
    OutOfRange { index: usize, x: i64, y: i64, n: usize },
    DuplicateCell { first: usize, second: usize, x: i64, y: i64 },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "board has no markers"),
            Self::OutOfRange { index, x, y, n } => {
                write!(f, "marker {index} at ({x}, {y}) lies outside the {n}x{n} board")
            }
            Self::DuplicateCell {
                first,
                second,
                x,
                y,
            } => write!(f, "markers {first} and {second} share cell ({x}, {y})"),
        }
    }
}

impl std::error::Error for BoardError {}

/// `n` markers on distinct cells of an `n × n` board.
///
/// Invariants:
/// - `points.len() == n >= 1`.
/// - every coordinate lies in `[0, n)`; no two markers share a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    points: Vec<Point>,
}

impl Board {
    /// Validate 0-indexed marker positions; the board size is the marker count.
    pub fn new(points: Vec<Point>) -> Result<Self, BoardError> {
        let n = points.len();
        if n == 0 {
            return Err(BoardError::Empty);
        }
        let side = n as i64;
        let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(n);
        for (index, p) in points.iter().enumerate() {
            if !(0..side).contains(&p.x) || !(0..side).contains(&p.y) {
                return Err(BoardError::OutOfRange {
                    index,
                    x: p.x,
                    y: p.y,
                    n,
                });
            }
            if !seen.insert((p.x, p.y)) {
                let first = points
                    .iter()
                    .position(|q| q == p)
                    .unwrap_or(index);
                return Err(BoardError::DuplicateCell {
                    first,
                    second: index,
                    x: p.x,
                    y: p.y,
                });
            }
        }
        Ok(Self { points })
    }

    /// Skip validation for cells that are in range and distinct by construction.
    pub(crate) fn from_distinct_cells(points: Vec<Point>) -> Self {
        debug_assert!(Self::new(points.clone()).is_ok());
        Self { points }
    }

    /// Build from 1-indexed `(x, y)` pairs as they appear in the input stream.
    pub fn from_one_indexed(pairs: &[(i64, i64)]) -> Result<Self, BoardError> {
        // `i64::MIN` saturates in place and is still rejected as out of range.
        Self::new(
            pairs
                .iter()
                .map(|&(x, y)| Point::new(x.saturating_sub(1), y.saturating_sub(1)))
                .collect(),
        )
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}
