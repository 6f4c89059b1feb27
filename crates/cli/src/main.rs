use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gridline::random::{draw_board, BoardCfg, ReplayToken, SizeDist};
use gridline::stream::{format_report, write_cases, Cases};
use gridline::{Alignment, AlignmentSolver, Board};
use serde::Serialize;
use serde_json::json;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod provenance;

#[derive(Parser)]
#[command(name = "gridline")]
#[command(about = "Minimum moves to line up markers on a square board")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve every board of an input stream
    Solve {
        /// Input file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output file; stdout when omitted. Writes a provenance sidecar next to it.
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write random boards in the input format
    Gen {
        #[arg(long, default_value_t = 10)]
        count: u64,
        #[arg(long, default_value_t = 1)]
        min_size: usize,
        #[arg(long, default_value_t = 8)]
        max_size: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `Board <k>: <moves> moves required.`
    Text,
    /// One JSON object per board
    Json,
}

/// JSON line emitted per board by `solve --format json`.
#[derive(Debug, Serialize)]
struct BoardRecord {
    case: usize,
    n: usize,
    moves: i64,
    line: String,
    /// 1-indexed destination of each marker, in input order.
    targets: Vec<(i64, i64)>,
}

impl BoardRecord {
    fn new(case: usize, board: &Board, alignment: &Alignment) -> Self {
        Self {
            case,
            n: board.size(),
            moves: alignment.moves,
            line: alignment.line.to_string(),
            targets: alignment
                .targets
                .iter()
                .map(|t| (t.x + 1, t.y + 1))
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve { input, out, format } => solve(input, out, format),
        Action::Gen {
            count,
            min_size,
            max_size,
            seed,
            out,
        } => generate(count, min_size, max_size, seed, out),
        Action::Report => report(),
    }
}

fn solve(input: Option<PathBuf>, out: Option<PathBuf>, format: Format) -> Result<()> {
    tracing::info!(input = ?input, out = ?out, format = ?format, "solve");
    let text = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let (rendered, boards) = solve_text(&text, format)?;

    match &out {
        Some(path) => {
            write_output(path, &rendered)?;
            let params = json!({
                "input": input.as_ref().map(|p| p.to_string_lossy().into_owned()),
                "format": format!("{format:?}").to_lowercase(),
                "boards": boards,
            });
            let prov = provenance::write_sidecar(path, provenance::Payload::new(params))?;
            tracing::info!(boards, provenance = %prov.display(), "wrote results");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Solve every board in `text`; returns the rendered output and the board count.
///
/// A malformed stream stops reading: boards before the fault are still reported.
fn solve_text(text: &str, format: Format) -> Result<(String, usize)> {
    let mut solver = AlignmentSolver::new();
    let mut rendered = String::new();
    let mut count = 0usize;
    for (idx, case) in Cases::new(text).enumerate() {
        let board = match case {
            Ok(board) => board,
            Err(err) => {
                tracing::warn!(%err, "stopping at malformed input");
                break;
            }
        };
        let case = idx + 1;
        let alignment = solver
            .solve(&board)
            .with_context(|| format!("solving board {case}"))?;
        tracing::debug!(case, n = board.size(), line = %alignment.line, moves = alignment.moves, "solved");
        match format {
            Format::Text => rendered.push_str(&format_report(case, alignment.moves)),
            Format::Json => {
                rendered.push_str(&serde_json::to_string(&BoardRecord::new(
                    case, &board, &alignment,
                ))?);
                rendered.push('\n');
            }
        }
        count += 1;
    }
    Ok((rendered, count))
}

fn generate(
    count: u64,
    min_size: usize,
    max_size: usize,
    seed: u64,
    out: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(count, min_size, max_size, seed, "gen");
    let cfg = BoardCfg {
        size: SizeDist::Uniform {
            min: min_size,
            max: max_size,
        },
    };
    let boards: Vec<Board> = (0..count)
        .map(|index| draw_board(cfg, ReplayToken { seed, index }))
        .collect();
    let text = write_cases(&boards);
    match &out {
        Some(path) => {
            write_output(path, &text)?;
            let params = json!({
                "count": count,
                "min_size": min_size,
                "max_size": max_size,
                "seed": seed,
            });
            provenance::write_sidecar(path, provenance::Payload::new(params))?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": gridline::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = "2\n1 1\n2 2\n2\n1 1\n1 2\n3\n1 2\n2 1\n3 2\n0\n";

    #[test]
    fn text_output_matches_report_format() {
        let (out, boards) = solve_text(SAMPLE, Format::Text).unwrap();
        assert_eq!(boards, 3);
        assert_eq!(
            out,
            "Board 1: 0 moves required.\n\n\
             Board 2: 0 moves required.\n\n\
             Board 3: 1 moves required.\n\n"
        );
    }

    #[test]
    fn json_output_has_one_record_per_board() {
        let (out, _) = solve_text(SAMPLE, Format::Json).unwrap();
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1]["line"], "row 0");
        assert_eq!(records[1]["targets"], json!([[1, 1], [1, 2]]));
        assert_eq!(records[2]["moves"], 1);
        assert_eq!(records[2]["n"], 3);
    }

    #[test]
    fn malformed_tail_keeps_earlier_boards() {
        let (out, boards) = solve_text("1 1 1\n2 1 1 oops\n", Format::Text).unwrap();
        assert_eq!(boards, 1);
        assert_eq!(out, "Board 1: 0 moves required.\n\n");
    }

    #[test]
    fn solve_writes_output_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("boards.txt");
        std::fs::write(&input, SAMPLE).unwrap();
        let out = dir.path().join("out").join("results.txt");
        solve(Some(input), Some(out.clone()), Format::Text).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("Board 1: 0 moves required."));
        let sidecar = dir.path().join("out").join("results.provenance.json");
        let parsed: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(parsed["params"]["boards"], 3);
        assert_eq!(parsed["params"]["format"], "text");
    }

    #[test]
    fn generated_stream_round_trips_through_solve() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gen.txt");
        generate(5, 2, 4, 9, Some(path.clone())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("0\n"));
        let (out, boards) = solve_text(&text, Format::Text).unwrap();
        assert_eq!(boards, 5);
        assert_eq!(out.matches("moves required.").count(), 5);
    }
}
