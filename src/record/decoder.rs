//! Position-record field decoder.
//!
//! A record is laid out as:
//!
//! ```text
//! Offset                Size  Description
//! 0                     1     Header byte: bits 0-4 position_length,
//!                             bit 5 en-passant flag, bit 6 castling flag
//! 1                     ...   Packed board bits
//! position_length - 1   1     En-passant/castling byte, present only if
//!                             either header flag is set (counted by
//!                             position_length)
//! position_length       1     book_moves_size (odd; move count is
//!                             (book_moves_size - 1) / 2)
//! +1                    2*n   (move code, annotation) byte pairs
//! ...                   33    Statistics block
//! ```
//!
//! The statistics block: 24-bit big-endian total games, white wins,
//! black wins and draws; a 32-bit unknown; two rating buckets of
//! (24-bit games, 32-bit rating total); then recommendation, unknown
//! and commentary bytes.
//!
//! Whether the record stays inside the page's declared content length
//! is a precondition of the format and is not checked here; reads on a
//! truncated page panic at the out-of-range index.

use std::sync::Arc;

use shakmaty::Color;

use crate::board::{decode_board, mirror_board, FLIP_EP_COLUMN};
use crate::error::{BookError, Result};
use crate::moves::{BookMove, MoveDecoder};
use crate::page::Page;
use crate::position::board_fen;
use crate::record::{Entry, RatingBucket};

/// Header byte layout
const POSITION_LENGTH_MASK: u8 = 0x1f;
const EN_PASSANT_FLAG: u8 = 0x20;
const CASTLING_FLAG: u8 = 0x40;

/// En-passant/castling byte layout
const EP_MASK: u8 = 0xe0;
const CASTLE_MASK: u8 = 0x1e;

/// Fixed byte length of the statistics block
const STATISTICS_SIZE: usize = 33;

fn read_u24(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([0, data[offset], data[offset + 1], data[offset + 2]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_bucket(data: &[u8], offset: usize) -> RatingBucket {
    let games = read_u24(data, offset);
    let total = read_u32(data, offset + 3);
    RatingBucket {
        games,
        total,
        // Non-finite when games == 0; documented, not corrected
        average: f64::from(total) / f64::from(games),
    }
}

/// Decode the record starting at `record_start` within `page`.
///
/// Returns the white entry, its black counterpart and the byte offset
/// of the next record.
///
/// # Errors
/// - [`BookError::InvalidHeaderByte`] when the header byte is zero
///   (wrong file type or corruption).
/// - [`BookError::MalformedBoardEncoding`] from the board decoder.
pub fn decode_record(
    page: &Page<'_>,
    pos: usize,
    record_start: usize,
    moves: &dyn MoveDecoder,
) -> Result<(Entry, Entry, usize)> {
    let data = page.data;

    let header = data[record_start];
    if header == 0 {
        return Err(BookError::InvalidHeaderByte {
            page: page.number,
            offset: record_start,
        });
    }
    let position_length = (header & POSITION_LENGTH_MASK) as usize;
    let has_en_passant = header & EN_PASSANT_FLAG != 0;
    let has_castling = header & CASTLING_FLAG != 0;

    // position_length counts the header and the optional en-passant
    // byte, so this slice can extend one byte past the board bits; the
    // board decoder stops at the 64th square regardless.
    let board_start = record_start + 1;
    let board_end = (board_start + position_length).min(data.len());
    let white_board = decode_board(&data[board_start..board_end])?;
    let black = mirror_board(&white_board, has_castling);

    let mut cursor = record_start + position_length;

    let mut en_passant_data = None;
    let mut black_en_passant = None;
    let mut castling_data = None;
    let mut black_castling = None;
    if has_en_passant || has_castling {
        let ep_castle = data[cursor - 1];
        let ep_value = (ep_castle & EP_MASK) >> 5;
        en_passant_data = Some(ep_value);
        black_en_passant = Some(if black.is_mirrored {
            FLIP_EP_COLUMN[ep_value as usize]
        } else {
            ep_value
        });
        let castle_value = (ep_castle & CASTLE_MASK) >> 1;
        castling_data = Some(castle_value);
        black_castling = Some(if black.is_mirrored { 0 } else { castle_value });
    }

    let fen = board_fen(&white_board, Color::White);
    let black_fen = board_fen(&black.squares, Color::Black);

    let book_moves_size = data[cursor] as usize;
    let number_book_moves = book_moves_size.saturating_sub(1) / 2;
    let move_start = cursor + 1;
    let mut book_moves = Vec::new();
    let mut black_book_moves = Vec::new();
    for m in 0..number_book_moves {
        let code = data[move_start + m * 2];
        let annotation = data[move_start + m * 2 + 1];
        push_move(
            &mut book_moves,
            moves.decode_move(code, annotation, &white_board, Color::White, false),
        );
        push_move(
            &mut black_book_moves,
            moves.decode_move(code, annotation, &black.squares, Color::Black, black.is_mirrored),
        );
    }
    cursor += book_moves_size;

    let total_games = read_u24(data, cursor);
    let white_wins = read_u24(data, cursor + 3);
    let black_wins = read_u24(data, cursor + 6);
    let draws = read_u24(data, cursor + 9);
    let unknown1 = read_u32(data, cursor + 12);
    let ratings = Arc::new([read_bucket(data, cursor + 16), read_bucket(data, cursor + 23)]);
    let recommendation = moves.decode_analysis(data[cursor + 30]);
    let unknown2 = data[cursor + 31];
    let commentary = moves.decode_analysis(data[cursor + 32]);
    cursor += STATISTICS_SIZE;

    let record_len = position_length + book_moves_size + STATISTICS_SIZE;

    let entry = Entry {
        to_move: Color::White,
        page: page.number,
        pos,
        record_start,
        record_len,
        position_length,
        has_en_passant,
        has_castling,
        is_mirrored: false,
        en_passant_data,
        castling_data,
        fen,
        book_moves,
        total_games,
        white_wins,
        black_wins,
        draws,
        unknown1,
        unknown2,
        ratings: Arc::clone(&ratings),
        recommendation,
        commentary: commentary.clone(),
    };

    let entry_black = Entry {
        to_move: Color::Black,
        page: page.number,
        pos,
        record_start,
        record_len,
        position_length,
        has_en_passant,
        // A mirrored record has its castling rights cleared
        has_castling: has_castling && !black.is_mirrored,
        is_mirrored: black.is_mirrored,
        en_passant_data: black_en_passant,
        castling_data: black_castling,
        fen: black_fen,
        book_moves: black_book_moves,
        total_games,
        white_wins: black_wins,
        black_wins: white_wins,
        draws,
        unknown1,
        unknown2,
        ratings,
        // Never decoded for the derived perspective
        recommendation: None,
        commentary,
    };

    Ok((entry, entry_black, cursor))
}

fn push_move(list: &mut Vec<BookMove>, decoded: Option<BookMove>) {
    if let Some(book_move) = decoded {
        list.push(book_move);
    }
}
