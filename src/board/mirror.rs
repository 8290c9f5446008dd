//! Black-perspective derivation of a decoded board.
//!
//! CTG stores every position white-to-move; the black-to-move
//! counterpart is derived, never stored. Derivation is a point
//! reflection (rank and file invert) with each piece changing color.
//!
//! One ambiguity needs a second pass: when the position carries no
//! castling byte, the reflection lands the black king on files a-d
//! (a king on its home file e reflects onto d). Such records are
//! additionally mirrored horizontally so the king geometry matches the
//! statistics recorded for the position, and the black record is
//! flagged `is_mirrored` so en-passant data gets the same column flip.

use shakmaty::{Color, Piece, Role};

use super::{empty_board, flipped_index, square_at, BoardMap, BoardSquare, MIRROR_FILE};

/// Result of the symmetry transform
pub(crate) struct MirroredBoard {
    pub squares: BoardMap,
    pub is_mirrored: bool,
}

/// Derive the black-perspective board from the white-perspective one.
pub(crate) fn mirror_board(white: &BoardMap, has_castling: bool) -> MirroredBoard {
    let mut squares = empty_board();
    let mut is_mirrored = false;

    for (index, source) in white.iter().enumerate() {
        let flipped = flipped_index(index);
        if let Some(piece) = source.piece {
            // The reflected black king on files a-d with no castling
            // rights marks an ambiguous record.
            if piece.color == Color::Black
                && piece.role == Role::King
                && flipped / 8 <= 3
                && !has_castling
            {
                is_mirrored = true;
            }
            squares[flipped].piece = Some(Piece {
                color: !piece.color,
                role: piece.role,
            });
        }
    }

    if is_mirrored {
        let mut remirrored = empty_board();
        for entry in squares.iter() {
            let file = MIRROR_FILE[entry.square.file() as usize];
            let rank = entry.square.rank() as usize;
            let index = file * 8 + rank;
            remirrored[index] = BoardSquare {
                square: square_at(index),
                piece: entry.piece,
            };
        }
        squares = remirrored;
    }

    MirroredBoard {
        squares,
        is_mirrored,
    }
}
