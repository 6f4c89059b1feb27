//! Text stream of boards and the per-board report line.
//!
//! Input: whitespace-separated integers. Each case starts with `n`; `n = 0` (or
//! end of input before a new case) terminates. Otherwise `n` pairs `x y` in
//! `[1, n]` follow.
//!
//! Output per case: `Board <case>: <moves> moves required.` and a blank line.

use std::fmt::{self, Write as _};
use std::str::SplitWhitespace;

use crate::board::{Board, BoardError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamError {
    InvalidToken { token: String },
    UnexpectedEof { case: usize, expected: usize },
    Board { case: usize, source: BoardError },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { token } => write!(f, "invalid token {token:?}"),
            Self::UnexpectedEof { case, expected } => write!(
                f,
                "input ended inside case {case}: expected {expected} more integers"
            ),
            Self::Board { case, source } => write!(f, "case {case}: {source}"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Iterator over the boards of an input text. Stops after the terminator,
/// at end of input, or after yielding the first error.
#[derive(Clone, Debug)]
pub struct Cases<'a> {
    tokens: SplitWhitespace<'a>,
    case: usize,
    done: bool,
}

impl<'a> Cases<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_whitespace(),
            case: 0,
            done: false,
        }
    }

    fn next_int(&mut self) -> Result<Option<i64>, StreamError> {
        match self.tokens.next() {
            None => Ok(None),
            Some(tok) => tok
                .parse::<i64>()
                .map(Some)
                .map_err(|_| StreamError::InvalidToken {
                    token: tok.to_string(),
                }),
        }
    }

    fn read_case(&mut self) -> Result<Option<Board>, StreamError> {
        let n = match self.next_int()? {
            None | Some(0) => return Ok(None),
            Some(n) => usize::try_from(n).map_err(|_| StreamError::InvalidToken {
                token: n.to_string(),
            })?,
        };
        self.case += 1;
        let case = self.case;
        // `n` is untrusted; grow with the tokens actually present.
        let mut pairs = Vec::new();
        for i in 0..n {
            let x = self.next_int()?.ok_or(StreamError::UnexpectedEof {
                case,
                expected: 2 * (n - i),
            })?;
            let y = self.next_int()?.ok_or(StreamError::UnexpectedEof {
                case,
                expected: 2 * (n - i) - 1,
            })?;
            pairs.push((x, y));
        }
        Board::from_one_indexed(&pairs)
            .map(Some)
            .map_err(|source| StreamError::Board { case, source })
    }
}

impl Iterator for Cases<'_> {
    type Item = Result<Board, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_case() {
            Ok(Some(board)) => Some(Ok(board)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// `Board <case>: <moves> moves required.` followed by a blank line.
pub fn format_report(case: usize, moves: i64) -> String {
    format!("Board {case}: {moves} moves required.\n\n")
}

/// Render boards in the input format (1-indexed), terminated by `0`.
pub fn write_cases<'b>(boards: impl IntoIterator<Item = &'b Board>) -> String {
    let mut out = String::new();
    for board in boards {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", board.size());
        for p in board.points() {
            let _ = writeln!(out, "{} {}", p.x + 1, p.y + 1);
        }
    }
    out.push_str("0\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;

    #[test]
    fn reads_cases_until_terminator() {
        let input = "2\n1 1\n2 2\n3 1 2 2 1 3 2\n0\n1\n1 1\n";
        let boards: Vec<Board> = Cases::new(input).collect::<Result<_, _>>().unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].points(), &[Point::new(0, 0), Point::new(1, 1)]);
        assert_eq!(boards[1].size(), 3);
    }

    #[test]
    fn end_of_input_terminates_like_zero() {
        let boards: Vec<_> = Cases::new("1 1 1").collect();
        assert_eq!(boards.len(), 1);
        assert!(Cases::new("").next().is_none());
        assert!(Cases::new("  \n").next().is_none());
    }

    #[test]
    fn malformed_input_yields_one_error_then_stops() {
        let mut it = Cases::new("1 1 1\n2 1 x 2 2\n1 1 1\n");
        assert!(it.next().unwrap().is_ok());
        assert_eq!(
            it.next().unwrap(),
            Err(StreamError::InvalidToken { token: "x".into() })
        );
        assert!(it.next().is_none());

        let mut it = Cases::new("2 1 1 2");
        assert_eq!(
            it.next().unwrap(),
            Err(StreamError::UnexpectedEof {
                case: 1,
                expected: 1
            })
        );
        assert!(matches!(
            Cases::new("-3").next(),
            Some(Err(StreamError::InvalidToken { .. }))
        ));
    }

    #[test]
    fn extreme_coordinates_are_rejected_as_out_of_range() {
        assert_eq!(
            Cases::new("1 -9223372036854775808 1").next(),
            Some(Err(StreamError::Board {
                case: 1,
                source: BoardError::OutOfRange {
                    index: 0,
                    x: i64::MIN,
                    y: 0,
                    n: 1
                }
            }))
        );
        assert!(matches!(
            Cases::new("2 1 1 9223372036854775807 -9223372036854775808").next(),
            Some(Err(StreamError::Board {
                case: 1,
                source: BoardError::OutOfRange { index: 1, .. }
            }))
        ));
    }

    #[test]
    fn huge_size_with_few_tokens_is_truncated_case() {
        let mut it = Cases::new("99999999999999999 1 1");
        assert_eq!(
            it.next(),
            Some(Err(StreamError::UnexpectedEof {
                case: 1,
                expected: 2 * (99_999_999_999_999_999 - 1)
            }))
        );
        assert!(it.next().is_none());
    }

    #[test]
    fn invalid_board_reports_case_number() {
        let err = Cases::new("1 1 1\n2 1 1 1 1\n").nth(1).unwrap().unwrap_err();
        assert!(matches!(
            err,
            StreamError::Board {
                case: 2,
                source: BoardError::DuplicateCell { .. }
            }
        ));
        assert_eq!(err.to_string(), "case 2: markers 0 and 1 share cell (0, 0)");
    }

    #[test]
    fn report_line_format() {
        assert_eq!(format_report(1, 0), "Board 1: 0 moves required.\n\n");
        assert_eq!(format_report(12, 7), "Board 12: 7 moves required.\n\n");
    }

    #[test]
    fn written_cases_parse_back() {
        let boards = vec![
            Board::from_one_indexed(&[(1, 2), (2, 1), (3, 2)]).unwrap(),
            Board::from_one_indexed(&[(1, 1)]).unwrap(),
        ];
        let text = write_cases(&boards);
        assert_eq!(text, "3\n1 2\n2 1\n3 2\n1\n1 1\n0\n");
        let parsed: Vec<Board> = Cases::new(&text).collect::<Result<_, _>>().unwrap();
        assert_eq!(parsed, boards);
    }
}
