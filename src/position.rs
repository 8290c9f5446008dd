//! Rules-engine boundary.
//!
//! The decoder treats board content purely as data; turning piece
//! placements into a standard position string is delegated to the
//! external rules engine (shakmaty). Every call builds a fresh setup —
//! no engine state survives between records or between the two
//! per-record invocations (one per color).

use shakmaty::fen::Fen;
use shakmaty::{Board, Color, Setup};

use crate::board::BoardMap;

/// Serialize the given placements to a FEN string with `turn` to move.
///
/// Only occupied squares are fed to the engine; castling and en-passant
/// FEN fields stay empty (that data is carried separately on the entry)
/// and the move counters are `0 1`.
pub(crate) fn board_fen(squares: &BoardMap, turn: Color) -> String {
    let mut board = Board::empty();
    for entry in squares {
        if let Some(piece) = entry.piece {
            board.set_piece_at(entry.square, piece);
        }
    }
    Fen::try_from_setup(Setup {
        board,
        turn,
        ..Setup::empty()
    })
    .unwrap()
    .to_string()
}
