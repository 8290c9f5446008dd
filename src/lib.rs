//! # CTG Book Decoder
//!
//! A streaming decoder for the paginated binary CTG chess opening-book
//! format. It turns an in-memory book buffer into batches of structured
//! position records, each carried in two perspectives: the stored
//! white-to-move entry and its derived black-to-move counterpart.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **Board Layer** (`board`): bit-prefix decoding of packed board
//!   bytes and the symmetry transform to the black perspective
//! - **Record Layer** (`record`): header flags, en-passant/castling
//!   byte, book moves and the fixed statistics block
//! - **Page Layer** (`page`): 4096-byte page framing with an explicit
//!   record cursor
//! - **Scheduler** (`parser`): page iteration, adaptive batching with
//!   backpressure pauses, progress reporting and cooperative
//!   cancellation
//!
//! Two collaborators sit outside the decoder proper: the chess rules
//! engine (shakmaty, which serializes placements to FEN) and the
//! move-decoding service behind the [`MoveDecoder`] trait.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ctg_book::{CancelToken, ParseEvent, Parser};
//! use tokio::sync::mpsc;
//!
//! let parser = Parser::new();
//! let (tx, mut rx) = mpsc::channel(64);
//! let cancel = CancelToken::new();
//!
//! tokio::spawn(async move {
//!     while let Some(event) = rx.recv().await {
//!         match event {
//!             ParseEvent::Batch(entries) => store(entries),
//!             ParseEvent::Progress(fraction) => show(fraction),
//!             ParseEvent::Done => {}
//!         }
//!     }
//! });
//!
//! parser.parse(&buffer, tx, &cancel).await?;
//! ```

pub mod board;
pub mod error;
pub mod moves;
pub mod page;
pub mod parser;
pub mod record;

mod position;

#[cfg(test)]
mod testutil;

pub use board::{decode_board, BoardMap, BoardSquare};
pub use error::{BookError, Result};
pub use moves::{BookMove, MoveDecoder, NullMoveDecoder};
pub use page::{Page, PAGE_SIZE};
pub use parser::{CancelToken, ParseEvent, Parser};
pub use record::{decode_record, Entry, RatingBucket};
