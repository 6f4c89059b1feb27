//! Dense square weight matrix fed to the matcher.
//!
//! - Entry `(u, v)` is the score of assigning source `u` to target `v`.
//! - Values are bounded by `WEIGHT_LIMIT` in absolute value so that a sum of
//!   a weight and two potentials of the same magnitude cannot overflow `i64`.

use nalgebra::DMatrix;

use super::MatchError;

/// Largest admissible weight magnitude (quarter of the `i64` range).
pub const WEIGHT_LIMIT: i64 = i64::MAX / 4;

/// Square `n × n` integer weight matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightMatrix {
    m: DMatrix<i64>,
}

impl WeightMatrix {
    /// All-zero matrix of size `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            m: DMatrix::zeros(n, n),
        }
    }

    /// Build from a closure `f(u, v)`.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        Self {
            m: DMatrix::from_fn(n, n, |u, v| f(u, v)),
        }
    }

    /// Build from row vectors; every row must have as many entries as there are rows.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, MatchError> {
        let n = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(MatchError::NotSquare {
                rows: n,
                row,
                len: r.len(),
            });
        }
        Ok(Self::from_fn(n, |u, v| rows[u][v]))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.m.nrows()
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> i64 {
        self.m[(u, v)]
    }

    #[inline]
    pub fn set(&mut self, u: usize, v: usize, w: i64) {
        self.m[(u, v)] = w;
    }

    /// Reallocate to `n × n` when the size differs. Contents are unspecified
    /// afterwards; callers overwrite every cell.
    pub fn reshape(&mut self, n: usize) {
        if self.size() != n {
            self.m = DMatrix::zeros(n, n);
        }
    }

    /// Maximum entry of row `u` (`None` for an empty matrix).
    pub fn row_max(&self, u: usize) -> Option<i64> {
        self.m.row(u).iter().copied().max()
    }

    /// First entry whose magnitude exceeds `WEIGHT_LIMIT`, as `(u, v, w)`.
    pub fn first_out_of_range(&self) -> Option<(usize, usize, i64)> {
        let n = self.size();
        (0..n)
            .flat_map(|u| (0..n).map(move |v| (u, v)))
            .map(|(u, v)| (u, v, self.get(u, v)))
            .find(|&(_, _, w)| !(-WEIGHT_LIMIT..=WEIGHT_LIMIT).contains(&w))
    }

    /// Sum of `W[u][targets[u]]`, checked against overflow.
    pub fn assignment_weight(&self, targets: &[usize]) -> Option<i64> {
        targets
            .iter()
            .enumerate()
            .try_fold(0i64, |acc, (u, &v)| acc.checked_add(self.get(u, v)))
    }

    /// Copy with rows reordered so that row `k` of the result is row `order[k]` of `self`.
    pub fn permute_rows(&self, order: &[usize]) -> Self {
        Self::from_fn(self.size(), |u, v| self.get(order[u], v))
    }
}

impl Default for WeightMatrix {
    fn default() -> Self {
        Self::zeros(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = WeightMatrix::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(
            err,
            MatchError::NotSquare {
                rows: 2,
                row: 1,
                len: 1
            }
        ));
    }

    #[test]
    fn row_max_and_range_check() {
        let mut w = WeightMatrix::from_rows(&[vec![-7, -3, -5], vec![0, 2, 1], vec![4, 4, 4]])
            .unwrap();
        assert_eq!(w.row_max(0), Some(-3));
        assert_eq!(w.row_max(1), Some(2));
        assert!(w.first_out_of_range().is_none());
        w.set(2, 1, WEIGHT_LIMIT + 1);
        assert_eq!(w.first_out_of_range(), Some((2, 1, WEIGHT_LIMIT + 1)));
    }

    #[test]
    fn reshape_only_reallocates_on_size_change() {
        let mut w = WeightMatrix::from_fn(2, |u, v| (u * 2 + v) as i64);
        w.reshape(2);
        assert_eq!(w.get(1, 1), 3);
        w.reshape(3);
        assert_eq!(w.size(), 3);
    }
}
