//! Page framing for CTG files.
//!
//! A CTG file is a sequence of fixed 4096-byte pages. Page 0 holds file
//! metadata only and is never decoded. Every other page has the layout:
//!
//! ```text
//! Offset  Size  Description
//! 0       2     Number of position records on this page (big-endian)
//! 2       2     Number of content bytes in this page (big-endian)
//! 4       ...   Sequential position records
//! ```
//!
//! Records are variable-length, so a byte cursor is threaded through the
//! record decoder explicitly: each decode call receives the cursor and
//! returns where the next record starts. The cursor resets to
//! [`RECORDS_START`] at the beginning of every page and advances
//! monotonically within it.

/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Byte offset of the first position record within a page
pub const RECORDS_START: usize = 4;

/// One framed page of a CTG file
///
/// Borrows its content slice from the file buffer; no record data is
/// copied during framing.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// Zero-based page index within the file (page 0 is metadata)
    pub number: usize,
    /// Number of position records declared by the page header
    pub position_count: usize,
    /// Page content, bounded by the declared content length
    pub data: &'a [u8],
}

impl<'a> Page<'a> {
    /// Frame the page at the given index.
    ///
    /// The content slice spans the declared `content_length` bytes,
    /// clamped to the end of the buffer. Whether every record actually
    /// stays inside that span is a precondition of the encoded format
    /// and is deliberately not checked here.
    pub fn read(buffer: &'a [u8], number: usize) -> Self {
        let start = number * PAGE_SIZE;
        let position_count = u16::from_be_bytes([buffer[start], buffer[start + 1]]) as usize;
        let content_length = u16::from_be_bytes([buffer[start + 2], buffer[start + 3]]) as usize;
        let end = (start + content_length).min(buffer.len());
        Self {
            number,
            position_count,
            data: &buffer[start..end],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_header_fields() {
        let mut buffer = vec![0u8; PAGE_SIZE * 2];
        let start = PAGE_SIZE;
        buffer[start..start + 2].copy_from_slice(&3u16.to_be_bytes());
        buffer[start + 2..start + 4].copy_from_slice(&100u16.to_be_bytes());

        let page = Page::read(&buffer, 1);
        assert_eq!(page.number, 1);
        assert_eq!(page.position_count, 3);
        assert_eq!(page.data.len(), 100);
    }

    #[test]
    fn content_length_clamped_to_buffer() {
        let mut buffer = vec![0u8; PAGE_SIZE * 2];
        let start = PAGE_SIZE;
        // Declared length larger than the remaining buffer
        buffer[start + 2..start + 4].copy_from_slice(&u16::MAX.to_be_bytes());

        let page = Page::read(&buffer, 1);
        assert_eq!(page.data.len(), PAGE_SIZE);
    }
}
