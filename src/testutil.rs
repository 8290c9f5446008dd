//! Synthetic CTG fixtures for tests: bit-packs board positions and
//! assembles records, pages and whole files by hand.

use crate::page::{PAGE_SIZE, RECORDS_START};

/// MSB-first bit accumulator, zero-padded to a whole byte on finish
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn push_code(&mut self, bits: u8, len: u8) {
        for shift in (0..len).rev() {
            self.bits.push((bits >> shift) & 1 == 1);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (index, bit) in self.bits.iter().enumerate() {
            if *bit {
                bytes[index / 8] |= 1 << (7 - index % 8);
            }
        }
        bytes
    }
}

/// The square code for a piece letter (FEN-style, space = empty)
fn code_for(piece: char) -> (u8, u8) {
    match piece {
        ' ' => (0b0, 1),
        'P' => (0b111, 3),
        'p' => (0b110, 3),
        'R' => (0b10111, 5),
        'B' => (0b10110, 5),
        'N' => (0b10011, 5),
        'r' => (0b10101, 5),
        'b' => (0b10100, 5),
        'n' => (0b10001, 5),
        'Q' => (0b100101, 6),
        'K' => (0b100100, 6),
        'q' => (0b100001, 6),
        'k' => (0b100000, 6),
        other => panic!("no code for {other:?}"),
    }
}

/// The standard starting position, packed in file-major square order
pub fn start_position_board_bits() -> Vec<u8> {
    const RANK_1: &[u8; 8] = b"RNBQKBNR";
    const RANK_8: &[u8; 8] = b"rnbqkbnr";

    let mut bits = BitString::new();
    for file in 0..8 {
        for rank in 0..8 {
            let piece = match rank {
                0 => RANK_1[file] as char,
                1 => 'P',
                6 => 'p',
                7 => RANK_8[file] as char,
                _ => ' ',
            };
            let (code, len) = code_for(piece);
            bits.push_code(code, len);
        }
    }
    bits.into_bytes()
}

/// Statistics block values for a synthetic record
pub struct Stats {
    pub total_games: u32,
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
    pub unknown1: u32,
    /// (games, rating total)
    pub rating1: (u32, u32),
    pub rating2: (u32, u32),
    pub recommendation: u8,
    pub unknown2: u8,
    pub commentary: u8,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_games: 10,
            white_wins: 4,
            black_wins: 3,
            draws: 3,
            unknown1: 0,
            rating1: (2, 5000),
            rating2: (1, 2600),
            recommendation: 0,
            unknown2: 0,
            commentary: 0,
        }
    }
}

fn push_u24(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes()[1..]);
}

/// Encode one complete position record.
///
/// `en_passant` is the 3-bit file value, `castling` the 4-bit rights
/// value; either being `Some` sets the matching header flag and appends
/// the shared en-passant/castling byte (counted by `position_length`).
pub fn encode_record(
    board_bits: &[u8],
    en_passant: Option<u8>,
    castling: Option<u8>,
    moves: &[(u8, u8)],
    stats: &Stats,
) -> Vec<u8> {
    let extra_byte = en_passant.is_some() || castling.is_some();
    let position_length = 1 + board_bits.len() + usize::from(extra_byte);
    assert!(position_length < 32, "position_length must fit 5 bits");

    let mut header = position_length as u8;
    if en_passant.is_some() {
        header |= 0x20;
    }
    if castling.is_some() {
        header |= 0x40;
    }

    let mut out = vec![header];
    out.extend_from_slice(board_bits);
    if extra_byte {
        out.push((en_passant.unwrap_or(0) << 5) | (castling.unwrap_or(0) << 1));
    }

    out.push((moves.len() * 2 + 1) as u8);
    for (code, annotation) in moves {
        out.push(*code);
        out.push(*annotation);
    }

    push_u24(&mut out, stats.total_games);
    push_u24(&mut out, stats.white_wins);
    push_u24(&mut out, stats.black_wins);
    push_u24(&mut out, stats.draws);
    out.extend_from_slice(&stats.unknown1.to_be_bytes());
    push_u24(&mut out, stats.rating1.0);
    out.extend_from_slice(&stats.rating1.1.to_be_bytes());
    push_u24(&mut out, stats.rating2.0);
    out.extend_from_slice(&stats.rating2.1.to_be_bytes());
    out.push(stats.recommendation);
    out.push(stats.unknown2);
    out.push(stats.commentary);
    out
}

/// Assemble encoded records into one 4096-byte page.
pub fn build_page(records: &[Vec<u8>]) -> Vec<u8> {
    let mut page = vec![0u8; PAGE_SIZE];
    let mut cursor = RECORDS_START;
    for record in records {
        page[cursor..cursor + record.len()].copy_from_slice(record);
        cursor += record.len();
    }
    page[0..2].copy_from_slice(&(records.len() as u16).to_be_bytes());
    page[2..4].copy_from_slice(&(cursor as u16).to_be_bytes());
    page
}

/// A whole file of `number_pages` pages: one zeroed metadata page
/// followed by identical content pages holding `records`.
pub fn build_file(number_pages: usize, records: &[Vec<u8>]) -> Vec<u8> {
    assert!(number_pages >= 1);
    let page = build_page(records);
    let mut file = vec![0u8; PAGE_SIZE];
    for _ in 1..number_pages {
        file.extend_from_slice(&page);
    }
    file
}
