//! MSB-first bit reader over a byte slice.
//!
//! The board decoder repeatedly peeks a candidate code at the current
//! position and only consumes it on a match, so the reader separates
//! `peek` from `consume` instead of offering a single destructive read.

/// Reads bits MSB-first from a byte buffer without copying it.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of the first byte)
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of unread bits left in the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Look at the next `count` bits (1-8) without consuming them.
    ///
    /// Returns `None` when fewer than `count` bits remain.
    pub fn peek(&self, count: u8) -> Option<u8> {
        let count = count as usize;
        debug_assert!(count >= 1 && count <= 8);
        if count > self.remaining() {
            return None;
        }

        let mut value = 0u8;
        for offset in 0..count {
            let bit_index = self.position + offset;
            let byte = self.data[bit_index / 8];
            let bit = (byte >> (7 - bit_index % 8)) & 1;
            value = (value << 1) | bit;
        }
        Some(value)
    }

    /// Consume `count` bits previously inspected with [`peek`](Self::peek).
    pub fn consume(&mut self, count: u8) {
        debug_assert!(count as usize <= self.remaining());
        self.position += count as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_advance() {
        let data = [0b1011_0011];
        let reader = BitReader::new(&data);
        assert_eq!(reader.peek(3), Some(0b101));
        assert_eq!(reader.peek(3), Some(0b101));
        assert_eq!(reader.peek(8), Some(0b1011_0011));
    }

    #[test]
    fn consume_advances_across_bytes() {
        let data = [0b1011_0011, 0b1100_0000];
        let mut reader = BitReader::new(&data);
        reader.consume(3);
        assert_eq!(reader.peek(5), Some(0b10011));
        reader.consume(5);
        assert_eq!(reader.peek(2), Some(0b11));
        assert_eq!(reader.remaining(), 8);
    }

    #[test]
    fn peek_past_end() {
        let data = [0xff];
        let mut reader = BitReader::new(&data);
        reader.consume(6);
        assert_eq!(reader.peek(2), Some(0b11));
        assert_eq!(reader.peek(3), None);
    }
}
