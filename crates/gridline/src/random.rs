//! Reproducible random boards and weight matrices.
//!
//! Purpose
//! - Feed benchmarks, randomized tests, and `gridline gen` with instances that
//!   can be replayed from a `(seed, index)` token.
//!
//! Model
//! - A board of size `n` picks `n` distinct cells uniformly from the `n × n`
//!   grid. A weight matrix draws every entry uniformly from a closed range.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Point};
use crate::matching::WeightMatrix;

/// Board size distribution.
#[derive(Clone, Copy, Debug)]
pub enum SizeDist {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl SizeDist {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            SizeDist::Fixed(n) => n.max(1),
            SizeDist::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Random board configuration.
#[derive(Clone, Copy, Debug)]
pub struct BoardCfg {
    pub size: SizeDist,
}

impl Default for BoardCfg {
    fn default() -> Self {
        Self {
            size: SizeDist::Uniform { min: 1, max: 8 },
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `n` markers on distinct cells of an `n × n` board.
pub fn draw_board(cfg: BoardCfg, tok: ReplayToken) -> Board {
    let mut rng = tok.to_std_rng();
    let n = cfg.size.sample(&mut rng);
    let points: Vec<Point> = index::sample(&mut rng, n * n, n)
        .into_iter()
        .map(|cell| Point::new((cell / n) as i64, (cell % n) as i64))
        .collect();
    Board::from_distinct_cells(points)
}

/// Dense `n × n` matrix with entries drawn uniformly from `range`.
pub fn draw_weights(n: usize, range: RangeInclusive<i64>, tok: ReplayToken) -> WeightMatrix {
    let mut rng = tok.to_std_rng();
    WeightMatrix::from_fn(n, |_, _| rng.gen_range(range.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boards_replay_from_token() {
        let cfg = BoardCfg::default();
        let tok = ReplayToken { seed: 3, index: 17 };
        assert_eq!(draw_board(cfg, tok), draw_board(cfg, tok));
        let other = ReplayToken { seed: 3, index: 18 };
        let sizes: Vec<usize> = (0..32)
            .map(|index| draw_board(cfg, ReplayToken { index, ..other }).size())
            .collect();
        assert!(sizes.iter().all(|&n| (1..=8).contains(&n)));
        assert!(sizes.iter().any(|&n| n != sizes[0]));
    }

    #[test]
    fn fixed_size_is_honoured() {
        let cfg = BoardCfg {
            size: SizeDist::Fixed(5),
        };
        let b = draw_board(cfg, ReplayToken { seed: 1, index: 0 });
        assert_eq!(b.size(), 5);
        assert!(b
            .points()
            .iter()
            .all(|p| (0..5).contains(&p.x) && (0..5).contains(&p.y)));
    }

    #[test]
    fn zero_size_draws_a_single_cell() {
        let cfg = BoardCfg {
            size: SizeDist::Fixed(0),
        };
        let b = draw_board(cfg, ReplayToken { seed: 1, index: 0 });
        assert_eq!(b.size(), 1);
        let n = b.size();
        assert!(b
            .points()
            .iter()
            .all(|p| (p.x as usize) < n && (p.y as usize) < n));
    }

    #[test]
    fn consecutive_indices_draw_different_boards() {
        let cfg = BoardCfg {
            size: SizeDist::Fixed(15),
        };
        let boards: Vec<Board> = (1..=4)
            .map(|index| draw_board(cfg, ReplayToken { seed: 7, index }))
            .collect();
        for (i, a) in boards.iter().enumerate() {
            for b in &boards[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn weights_stay_in_range() {
        let w = draw_weights(6, -9..=4, ReplayToken { seed: 5, index: 2 });
        assert_eq!(w.size(), 6);
        for u in 0..6 {
            for v in 0..6 {
                assert!((-9..=4).contains(&w.get(u, v)));
            }
        }
        assert_eq!(w, draw_weights(6, -9..=4, ReplayToken { seed: 5, index: 2 }));
    }
}
