//! Per-line cost table for one random board.
//!
//! Prints the board, the minimum moves onto every candidate line, and the
//! winning alignment with each marker's destination.
//!
//! Run: `cargo run -p gridline --example line_sweep -- [seed] [n]`

use gridline::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(6);

    let board = draw_board(
        BoardCfg {
            size: SizeDist::Fixed(n),
        },
        ReplayToken { seed, index: 0 },
    );
    // Sizes below one are clamped when sampling.
    let n = board.size();
    let mut grid = vec![vec!['.'; n]; n];
    for p in board.points() {
        grid[p.x as usize][p.y as usize] = '#';
    }
    for row in &grid {
        println!("{}", row.iter().collect::<String>());
    }

    let mut solver = AlignmentSolver::new();
    for line in Line::candidates(n) {
        let moves = solver.evaluate(&board, line).expect("matcher succeeds");
        println!("{line:>14}: {moves}");
    }
    let best = solver.solve(&board).expect("matcher succeeds");
    println!("best={} moves={}", best.line, best.moves);
    for (p, t) in board.points().iter().zip(&best.targets) {
        println!("  ({}, {}) -> ({}, {})", p.x, p.y, t.x, t.y);
    }
}
