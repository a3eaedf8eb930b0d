//! Problem file parsing.
//!
//! A problem file holds any number of puzzles. Each starts with a header
//! line `problem <number> <level>` followed by five board rows. A row is
//! any line whose first five characters are all board characters; every
//! other line is ignored, so titles and comments can sit between problems.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::board::{Board, BoardError, Piece, EMPTY, SIZE};

/// A single puzzle read from a problem file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub number: u32,
    pub level: String,
    pub start: Board,
}

impl Problem {
    pub fn new(number: u32, level: impl Into<String>, start: Board) -> Self {
        Self {
            number,
            level: level.into(),
            start,
        }
    }

    /// Name used for output files and graph ids, e.g. `problem_07`.
    pub fn name(&self) -> String {
        format!("problem_{:02}", self.number)
    }
}

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: malformed header {text:?}, expected `problem <number> <level>`")]
    MalformedHeader { line: usize, text: String },
    #[error("line {line}: new problem starts before problem {number} has all 5 rows")]
    UnexpectedHeader { line: usize, number: u32 },
    #[error("line {line}: board row before any problem header")]
    RowWithoutHeader { line: usize },
    #[error("problem {number} ends after {rows} of 5 rows")]
    Incomplete { number: u32, rows: usize },
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn is_board_char(c: char) -> bool {
    c == EMPTY || Piece::new(c).is_some()
}

/// The row part of a line, if the line starts with five board characters.
fn board_row(line: &str) -> Option<&str> {
    let row = line.get(..SIZE)?;
    row.chars().all(is_board_char).then_some(row)
}

fn parse_header(line_no: usize, line: &str) -> Result<(u32, String), ProblemError> {
    let malformed = || ProblemError::MalformedHeader {
        line: line_no,
        text: line.to_string(),
    };

    let parts: Vec<&str> = line.split_whitespace().collect();
    let [_, number, level] = parts.as_slice() else {
        return Err(malformed());
    };
    let number = number.parse().map_err(|_| malformed())?;
    Ok((number, level.to_string()))
}

/// Parse every problem in `text`, in file order.
pub fn parse_problems(text: &str) -> Result<Vec<Problem>, ProblemError> {
    let mut problems = Vec::new();
    let mut header: Option<(u32, String)> = None;
    let mut rows: Vec<&str> = Vec::with_capacity(SIZE);

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();

        if line.starts_with("problem") {
            if let (false, Some((number, _))) = (rows.is_empty(), &header) {
                return Err(ProblemError::UnexpectedHeader {
                    line: line_no,
                    number: *number,
                });
            }
            header = Some(parse_header(line_no, line)?);
            continue;
        }

        let Some(row) = board_row(line) else {
            continue;
        };
        if header.is_none() {
            return Err(ProblemError::RowWithoutHeader { line: line_no });
        }
        rows.push(row);

        if rows.len() == SIZE {
            let start = Board::from_rows(&rows)?;
            rows.clear();
            if let Some((number, level)) = header.take() {
                problems.push(Problem {
                    number,
                    level,
                    start,
                });
            }
        }
    }

    if let Some((number, _)) = header {
        if !rows.is_empty() {
            return Err(ProblemError::Incomplete {
                number,
                rows: rows.len(),
            });
        }
    }

    Ok(problems)
}

/// Read and parse a problem file.
pub fn read_problems(path: &Path) -> Result<Vec<Problem>, ProblemError> {
    let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_problems(&text)
}
