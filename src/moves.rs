//! Move-decoding service boundary.
//!
//! Book moves are stored as compact (move code, annotation) byte pairs
//! whose interpretation is the job of an external service. The record
//! decoder invokes that service once per side for every pair; the black
//! invocation additionally receives the mirror flag and the mirrored
//! board, since a mirrored record changes the geometry of the move.
//!
//! The same service interprets the one-byte recommendation and
//! commentary codes of the statistics block.

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::board::BoardMap;

/// A book move as produced by the external move decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMove {
    /// Human-meaningful move description
    pub notation: String,
    /// Decoded annotation, if the annotation byte carried one
    pub annotation: Option<String>,
}

/// Decodes compact move codes and analysis codes.
///
/// Returning `None` from either method drops the move (or leaves the
/// analysis field unset) without failing the record.
pub trait MoveDecoder: Send + Sync {
    /// Decode one (move code, annotation) pair against the given board.
    fn decode_move(
        &self,
        code: u8,
        annotation: u8,
        board: &BoardMap,
        to_move: Color,
        mirrored: bool,
    ) -> Option<BookMove>;

    /// Decode a recommendation or commentary code.
    fn decode_analysis(&self, code: u8) -> Option<String>;
}

/// A decoder that discards every move and analysis code.
///
/// Used when the caller only cares about positions and statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMoveDecoder;

impl MoveDecoder for NullMoveDecoder {
    fn decode_move(
        &self,
        _code: u8,
        _annotation: u8,
        _board: &BoardMap,
        _to_move: Color,
        _mirrored: bool,
    ) -> Option<BookMove> {
        None
    }

    fn decode_analysis(&self, _code: u8) -> Option<String> {
        None
    }
}
