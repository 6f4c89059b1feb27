//! Kuhn–Munkres matcher with vertex potentials.
//!
//! Potentials start at `left[u] = max_v W[u][v]`, `right[v] = 0`. Each left
//! vertex is inserted in index order by an alternating depth-first search on
//! the equality subgraph; when it fails, potentials are shifted by the minimal
//! slack between visited-left and unvisited-right vertices and the search is
//! retried from scratch.

use super::{MatchError, WeightMatrix};

/// One level of the alternating-path search: left vertex and scan cursor.
#[derive(Clone, Copy, Debug)]
struct Frame {
    left: usize,
    /// Next right vertex to examine.
    cursor: usize,
    /// Right vertex currently being extended through.
    via: Option<usize>,
}

/// Maximum-weight perfect matching on a complete `n × n` bipartite graph.
///
/// Buffers are sized by `resize` and fully reinitialized at the top of every
/// `run`, so one instance can be reused across many matrices of that size.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    n: usize,
    left_label: Vec<i64>,
    right_label: Vec<i64>,
    match_of_right: Vec<Option<usize>>,
    visited_left: Vec<bool>,
    visited_right: Vec<bool>,
    stack: Vec<Frame>,
}

impl Matcher {
    pub fn new(n: usize) -> Self {
        let mut m = Self::default();
        m.resize(n);
        m
    }

    /// Allocate all buffers for size `n`.
    pub fn resize(&mut self, n: usize) {
        self.n = n;
        self.left_label = vec![0; n];
        self.right_label = vec![0; n];
        self.match_of_right = vec![None; n];
        self.visited_left = vec![false; n];
        self.visited_right = vec![false; n];
        self.stack = Vec::with_capacity(n);
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn left_labels(&self) -> &[i64] {
        &self.left_label
    }

    pub fn right_labels(&self) -> &[i64] {
        &self.right_label
    }

    /// Source matched to each target after the last `run`.
    pub fn matches(&self) -> &[Option<usize>] {
        &self.match_of_right
    }

    /// Left-to-right view of the last matching: `assignment()[u]` is the
    /// target of source `u`. `None` before the first successful `run`.
    pub fn assignment(&self) -> Option<Vec<usize>> {
        let mut targets = vec![usize::MAX; self.n];
        for (v, u) in self.match_of_right.iter().enumerate() {
            targets[(*u)?] = v;
        }
        Some(targets)
    }

    /// Total weight of a maximum-weight perfect matching of `w`.
    pub fn run(&mut self, w: &WeightMatrix) -> Result<i64, MatchError> {
        let n = self.n;
        if w.size() != n {
            return Err(MatchError::SizeMismatch {
                expected: n,
                found: w.size(),
            });
        }
        if let Some((row, col, value)) = w.first_out_of_range() {
            return Err(MatchError::WeightOutOfRange { row, col, value });
        }

        self.match_of_right.fill(None);
        self.right_label.fill(0);
        for u in 0..n {
            // n > 0 here, so every row has a maximum.
            self.left_label[u] = w.row_max(u).unwrap_or(0);
        }

        for u in 0..n {
            loop {
                self.visited_left.fill(false);
                self.visited_right.fill(false);
                if self.augment(w, u) {
                    break;
                }
                let d = self.min_slack(w).ok_or(MatchError::NoSlack { left: u })?;
                self.relabel(d)?;
            }
        }

        let mut total = 0i64;
        for (v, u) in self.match_of_right.iter().enumerate() {
            if let Some(u) = *u {
                total = total.checked_add(w.get(u, v)).ok_or(MatchError::Overflow)?;
            }
        }
        Ok(total)
    }

    /// `left[u] + right[v] - W[u][v]`, widened so no operand combination overflows.
    #[inline]
    fn slack(&self, w: &WeightMatrix, u: usize, v: usize) -> i128 {
        self.left_label[u] as i128 + self.right_label[v] as i128 - w.get(u, v) as i128
    }

    /// First unvisited right vertex `>= from` joined to `u` by a tight edge.
    fn next_tight(&self, w: &WeightMatrix, u: usize, from: usize) -> Option<usize> {
        (from..self.n).find(|&v| !self.visited_right[v] && self.slack(w, u, v) == 0)
    }

    /// Alternating DFS from `root` over tight edges, right vertices in
    /// ascending order. On success the path is flipped into the matching.
    fn augment(&mut self, w: &WeightMatrix, root: usize) -> bool {
        self.stack.clear();
        self.visited_left[root] = true;
        self.stack.push(Frame {
            left: root,
            cursor: 0,
            via: None,
        });

        while let Some(&Frame { left, cursor, .. }) = self.stack.last() {
            let Some(v) = self.next_tight(w, left, cursor) else {
                self.stack.pop();
                continue;
            };
            self.visited_right[v] = true;
            if let Some(top) = self.stack.last_mut() {
                top.cursor = v + 1;
                top.via = Some(v);
            }
            match self.match_of_right[v] {
                None => {
                    for frame in self.stack.drain(..) {
                        if let Some(via) = frame.via {
                            self.match_of_right[via] = Some(frame.left);
                        }
                    }
                    return true;
                }
                Some(next) => {
                    self.visited_left[next] = true;
                    self.stack.push(Frame {
                        left: next,
                        cursor: 0,
                        via: None,
                    });
                }
            }
        }
        false
    }

    /// Minimal slack over visited-left × unvisited-right pairs.
    fn min_slack(&self, w: &WeightMatrix) -> Option<i128> {
        let mut best: Option<i128> = None;
        for u in (0..self.n).filter(|&u| self.visited_left[u]) {
            for v in (0..self.n).filter(|&v| !self.visited_right[v]) {
                let s = self.slack(w, u, v);
                best = Some(best.map_or(s, |b| b.min(s)));
            }
        }
        best
    }

    fn relabel(&mut self, d: i128) -> Result<(), MatchError> {
        let d = i64::try_from(d).map_err(|_| MatchError::Overflow)?;
        for (label, _) in self
            .left_label
            .iter_mut()
            .zip(&self.visited_left)
            .filter(|(_, seen)| **seen)
        {
            *label = label.checked_sub(d).ok_or(MatchError::Overflow)?;
        }
        for (label, _) in self
            .right_label
            .iter_mut()
            .zip(&self.visited_right)
            .filter(|(_, seen)| **seen)
        {
            *label = label.checked_add(d).ok_or(MatchError::Overflow)?;
        }
        Ok(())
    }
}
