//! Error types for the book decoder.

use thiserror::Error;

use crate::page::PAGE_SIZE;

/// Result type alias for decoding operations
pub type Result<T> = std::result::Result<T, BookError>;

/// Errors that can occur while decoding a CTG book
///
/// All variants are fatal for the parse that raised them: nothing is
/// retried internally, and a caller that wants to retry must re-invoke
/// the parse from the start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// Buffer length is not a positive multiple of the page size
    #[error("invalid CTG file: {len} bytes is not a positive multiple of {PAGE_SIZE}")]
    InvalidFileSize { len: usize },

    /// A record's header byte was zero (wrong file type or corruption)
    #[error("invalid header byte at page {page}, offset {offset}")]
    InvalidHeaderByte { page: usize, offset: usize },

    /// The packed board bits had no matching prefix code for some square
    #[error("malformed board encoding: no prefix code matches at square index {square}")]
    MalformedBoardEncoding { square: usize },
}
