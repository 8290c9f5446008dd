//! The bit-prefix code for packed board positions.
//!
//! Each of the 64 squares is stored as a variable-length code, one to
//! six bits, MSB-first, with an explicit one-bit code for an empty
//! square. The code is prefix-free, so scanning candidate lengths in
//! increasing order and taking the first table hit is unambiguous.
//!
//! ```text
//! Bits     Occupant          Bits     Occupant
//! 0        empty             10101    black rook
//! 111      white pawn        10100    black bishop
//! 110      black pawn        10001    black knight
//! 10111    white rook        100101   white queen
//! 10110    white bishop      100100   white king
//! 10011    white knight      100001   black queen
//!                            100000   black king
//! ```

use shakmaty::{Color, Piece, Role};

use super::bits::BitReader;
use super::{empty_board, square_at, BoardMap, BoardSquare};
use crate::error::{BookError, Result};

/// Longest code length in bits
const MAX_CODE_BITS: u8 = 6;

struct PieceCode {
    bits: u8,
    len: u8,
    piece: Option<Piece>,
}

const fn code(bits: u8, len: u8, color: Color, role: Role) -> PieceCode {
    PieceCode {
        bits,
        len,
        piece: Some(Piece { color, role }),
    }
}

const PIECE_CODES: [PieceCode; 13] = [
    PieceCode {
        bits: 0b0,
        len: 1,
        piece: None,
    },
    code(0b111, 3, Color::White, Role::Pawn),
    code(0b110, 3, Color::Black, Role::Pawn),
    code(0b10111, 5, Color::White, Role::Rook),
    code(0b10110, 5, Color::White, Role::Bishop),
    code(0b10011, 5, Color::White, Role::Knight),
    code(0b10101, 5, Color::Black, Role::Rook),
    code(0b10100, 5, Color::Black, Role::Bishop),
    code(0b10001, 5, Color::Black, Role::Knight),
    code(0b100101, 6, Color::White, Role::Queen),
    code(0b100100, 6, Color::White, Role::King),
    code(0b100001, 6, Color::Black, Role::Queen),
    code(0b100000, 6, Color::Black, Role::King),
];

/// Decode `position_length` packed board bytes into 64 square
/// assignments, white-to-move perspective.
///
/// The byte slice is rendered as one big-endian bit string. For each
/// square the decoder tries candidate lengths 1 through 6 in increasing
/// order and consumes the first code that matches. Decoding stops after
/// the 64th square even if unread bits remain — the slice handed in by
/// the record decoder can extend past the board bits.
///
/// # Errors
/// [`BookError::MalformedBoardEncoding`] when no candidate length
/// matches at some square, including running out of bits early.
pub fn decode_board(bytes: &[u8]) -> Result<BoardMap> {
    let mut reader = BitReader::new(bytes);
    let mut board = empty_board();

    for index in 0..64 {
        let mut matched = false;
        'lengths: for len in 1..=MAX_CODE_BITS {
            let Some(value) = reader.peek(len) else {
                // Fewer than `len` bits left; longer codes cannot match either
                break;
            };
            for entry in &PIECE_CODES {
                if entry.len == len && entry.bits == value {
                    reader.consume(len);
                    board[index] = BoardSquare {
                        square: square_at(index),
                        piece: entry.piece,
                    };
                    matched = true;
                    break 'lengths;
                }
            }
        }
        if !matched {
            return Err(BookError::MalformedBoardEncoding { square: index });
        }
    }

    Ok(board)
}
