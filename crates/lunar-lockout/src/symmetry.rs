//! Rotations and reflections of the grid.
//!
//! Slides commute with the eight symmetries of the square, and the center
//! cell is fixed by all of them, so every image of a board is exactly as far
//! from a solution as the board itself.

use crate::board::{Board, SIZE};

impl Board {
    /// Quarter turn: the piece at `(row, col)` moves to `(SIZE - 1 - col, row)`.
    pub fn rotate(&self) -> Board {
        self.remap(|row, col| (SIZE - 1 - col, row))
    }

    /// Flip top to bottom.
    pub fn mirror(&self) -> Board {
        self.remap(|row, col| (SIZE - 1 - row, col))
    }

    /// The eight images of this board: four rotations, then four rotations
    /// of the mirror image. The first entry is the board itself.
    pub fn symmetries(&self) -> [Board; 8] {
        let mut images = [*self; 8];
        for i in 1..4 {
            images[i] = images[i - 1].rotate();
        }
        images[4] = self.mirror();
        for i in 5..8 {
            images[i] = images[i - 1].rotate();
        }
        images
    }

    /// Smallest of the eight images. Equal for every board in the same orbit.
    pub fn canonical(&self) -> Board {
        self.symmetries()
            .into_iter()
            .fold(*self, |best, image| best.min(image))
    }

    fn remap(&self, to: impl Fn(usize, usize) -> (usize, usize)) -> Board {
        self.pieces()
            .fold(Board::empty(), |board, (index, piece)| {
                let (row, col) = to(index / SIZE, index % SIZE);
                board.with_piece(row, col, piece)
            })
    }
}
