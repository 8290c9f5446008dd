//! Board representation and coordinate tables.
//!
//! Squares are indexed file-major: index `i` maps to file `i / 8` and
//! rank `i % 8`, so the traversal a1, a2, ..., a8, b1, ..., h8 is simply
//! index order. This is also the order in which the bit-prefix code
//! visits squares, and the index space used by the mirroring tables.

mod bits;
mod codes;
mod mirror;

pub use codes::decode_board;
pub(crate) use mirror::{mirror_board, MirroredBoard};

use shakmaty::{File, Piece, Rank, Square};

/// Horizontal mirror, as a file index remap (a <-> h, b <-> g, ...)
pub(crate) const MIRROR_FILE: [usize; 8] = [7, 6, 5, 4, 3, 2, 1, 0];

/// Column flip for the 3-bit en-passant file value of mirrored records
pub(crate) const FLIP_EP_COLUMN: [u8; 8] = [7, 6, 5, 4, 3, 2, 1, 0];

/// A 64-square board in file-major index order
pub type BoardMap = [BoardSquare; 64];

/// One square together with its occupant (or `None` for empty)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSquare {
    pub square: Square,
    pub piece: Option<Piece>,
}

/// The square at a file-major board index
pub(crate) fn square_at(index: usize) -> Square {
    Square::from_coords(File::new(index as u32 / 8), Rank::new(index as u32 % 8))
}

/// Point reflection through the board center: rank and file both invert
pub(crate) const fn flipped_index(index: usize) -> usize {
    63 - index
}

/// An all-empty board map with correct square labels
pub(crate) fn empty_board() -> BoardMap {
    let mut board = [BoardSquare {
        square: Square::A1,
        piece: None,
    }; 64];
    for (index, entry) in board.iter_mut().enumerate() {
        entry.square = square_at(index);
    }
    board
}
