//! Decoded position records.
//!
//! Every physical record yields exactly one pair of entries: the
//! white-to-move [`Entry`] as stored in the file, and its black-to-move
//! counterpart derived by the symmetry transform. The pair shares total
//! games, draws, commentary and the ratings allocation, while win
//! attribution is inverted and the board/move geometry may be mirrored.

mod decoder;

pub use decoder::decode_record;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::moves::BookMove;

/// One rating bucket of the statistics block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBucket {
    /// Number of rated games in this bucket
    pub games: u32,
    /// Sum of ratings over those games
    pub total: u32,
    /// `total / games`. Non-finite when `games` is zero; only
    /// meaningful when `games > 0`.
    pub average: f64,
}

/// A decoded book position with its moves and aggregate statistics
///
/// Two of these are emitted per physical record: one with
/// `to_move == White` (the stored perspective) and one with
/// `to_move == Black` (the derived, possibly mirrored perspective).
/// The `ratings` allocation is shared between the two; it is immutable
/// after emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Which side this perspective is for
    #[serde(with = "side_to_move")]
    pub to_move: Color,
    /// Source page index within the file
    pub page: usize,
    /// Record index within the page
    pub pos: usize,
    /// Byte offset of the record header within the page
    pub record_start: usize,
    /// Total byte span of the record
    pub record_len: usize,
    /// Header length field: header + board bytes (+ en-passant byte)
    pub position_length: usize,
    pub has_en_passant: bool,
    pub has_castling: bool,
    /// True on a black entry whose board was horizontally re-mirrored
    pub is_mirrored: bool,
    /// En-passant file (0-7), present only if the record carried the
    /// en-passant/castling byte
    pub en_passant_data: Option<u8>,
    /// Castling rights bits, present under the same condition
    pub castling_data: Option<u8>,
    /// Position string from the rules engine
    pub fen: String,
    pub book_moves: Vec<BookMove>,
    pub total_games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    /// Undocumented 32-bit statistics field, preserved as-is
    pub unknown1: u32,
    /// Undocumented byte between recommendation and commentary
    pub unknown2: u8,
    /// The two rating buckets, shared with the paired entry
    pub ratings: Arc<[RatingBucket; 2]>,
    pub recommendation: Option<String>,
    pub commentary: Option<String>,
}

mod side_to_move {
    use serde::{Deserialize, Deserializer, Serializer};
    use shakmaty::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(color.char())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let c = char::deserialize(deserializer)?;
        Color::from_char(c).ok_or_else(|| serde::de::Error::custom("expected 'w' or 'b'"))
    }
}
