//! Board representation for the 5x5 Lunar Lockout grid.
//!
//! A [`Board`] is a plain value: 25 cells in row-major order, each either
//! empty or holding a [`Piece`]. Boards are `Copy` and hash structurally so
//! they can be used directly as map keys while exploring the state graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Width and height of the grid.
pub const SIZE: usize = 5;

/// Number of cells on the grid.
pub const CELLS: usize = SIZE * SIZE;

/// Index of the center cell (row 2, column 2).
pub const CENTER: usize = 12;

/// Character used for an empty cell in the textual form.
pub const EMPTY: char = '.';

/// Inline capacity for the successor list of a single board.
const INLINE_MOVES: usize = 16;

/// Errors raised when a board or piece is built from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have {expected} cells, found {found}")]
    WrongLength { expected: usize, found: usize },
    #[error("invalid cell {found:?} at index {index}")]
    InvalidCell { index: usize, found: char },
    #[error("invalid piece {0:?}, expected one of a-h or x")]
    InvalidPiece(char),
}

/// A labeled piece: one of `a`..=`h`, or the goal piece `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Piece(u8);

impl Piece {
    /// The piece that has to reach the center.
    pub const GOAL: Piece = Piece(b'x');

    /// Label shared by the interchangeable blockers of generated boards.
    pub const BLOCKER: Piece = Piece(b'a');

    pub fn new(c: char) -> Option<Piece> {
        match c {
            'a'..='h' | 'x' => Some(Piece(c as u8)),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    pub fn is_goal(self) -> bool {
        self == Piece::GOAL
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> char {
        piece.as_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = BoardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Piece::new(c).ok_or(BoardError::InvalidPiece(c))
    }
}

/// Slide direction, in the order moves are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Column and row offset of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
        }
    }

    /// One-letter tag used in move descriptions.
    pub fn tag(self) -> char {
        match self {
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Left => 'L',
            Direction::Down => 'D',
        }
    }
}

/// A legal move: which piece slides, and where to.
///
/// Displays as the compact description used on graph edges, e.g. `xR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slide {
    pub piece: Piece,
    pub direction: Direction,
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece, self.direction.tag())
    }
}

/// Successors of a board, paired with the slide that produces each.
pub type Successors = SmallVec<[(Slide, Board); INLINE_MOVES]>;

/// A complete grid configuration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Board {
    cells: [Option<Piece>; CELLS],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    /// Build a board from five rows of five characters each.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let text: String = rows.concat();
        text.parse()
    }

    /// Place a piece, replacing whatever occupied the cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below [`SIZE`].
    pub fn with_piece(mut self, row: usize, col: usize, piece: Piece) -> Self {
        assert!(
            row < SIZE && col < SIZE,
            "cell ({}, {}) is outside the {}x{} grid",
            row,
            col,
            SIZE,
            SIZE
        );
        self.cells[row * SIZE + col] = Some(piece);
        self
    }

    /// Cell contents by row-major index.
    pub fn get(&self, index: usize) -> Option<Piece> {
        self.cells.get(index).copied().flatten()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Piece> {
        if row >= SIZE || col >= SIZE {
            return None;
        }
        self.cells[row * SIZE + col]
    }

    /// Solved once the goal piece sits on the center cell.
    pub fn is_solved(&self) -> bool {
        self.cells[CENTER] == Some(Piece::GOAL)
    }

    /// Occupied cells with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (index, piece)))
    }

    /// One row of the textual form.
    pub fn row(&self, row: usize) -> String {
        self.cells[row * SIZE..(row + 1) * SIZE]
            .iter()
            .map(|cell| cell.map_or(EMPTY, Piece::as_char))
            .collect()
    }

    /// Slide the piece at `index` in `direction`.
    ///
    /// The piece travels until the next cell is occupied and stops just
    /// before it. Returns `None` when the cell is empty, when the piece would
    /// leave the grid, or when the neighbouring cell is already occupied.
    pub fn slide(&self, index: usize, direction: Direction) -> Option<Board> {
        let piece = self.get(index)?;
        let (dx, dy) = direction.delta();
        let x = (index % SIZE) as i32;
        let y = (index / SIZE) as i32;

        let mut q = 1;
        loop {
            let xx = x + q * dx;
            let yy = y + q * dy;
            if !in_bounds(xx, yy) {
                return None;
            }
            if self.cells[to_index(xx, yy)].is_some() {
                if q == 1 {
                    return None;
                }
                let mut next = *self;
                next.cells[index] = None;
                next.cells[to_index(x + (q - 1) * dx, y + (q - 1) * dy)] = Some(piece);
                return Some(next);
            }
            q += 1;
        }
    }

    /// Every legal move from this board, by cell then by direction.
    pub fn moves(&self) -> Successors {
        let mut moves = Successors::new();
        for (index, piece) in self.pieces() {
            for direction in Direction::ALL {
                if let Some(next) = self.slide(index, direction) {
                    moves.push((Slide { piece, direction }, next));
                }
            }
        }
        moves
    }
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..SIZE as i32).contains(&x) && (0..SIZE as i32).contains(&y)
}

fn to_index(x: i32, y: i32) -> usize {
    y as usize * SIZE + x as usize
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != CELLS {
            return Err(BoardError::WrongLength {
                expected: CELLS,
                found,
            });
        }

        let mut board = Board::empty();
        for (index, c) in s.chars().enumerate() {
            if c == EMPTY {
                continue;
            }
            let piece = Piece::new(c).ok_or(BoardError::InvalidCell { index, found: c })?;
            board.cells[index] = Some(piece);
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            f.write_str(&self.row(row))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> String {
        board.to_string()
    }
}

impl TryFrom<String> for Board {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
