//! Batch scheduler: drives the page reader over a whole book buffer.
//!
//! Decoding is synchronous per page; the scheduler suspends only at
//! batch boundaries, after emitting a full batch and its progress
//! fraction, so a consumer can drain the channel and a host event loop
//! is never starved. Pages are strictly ordered and never decoded
//! concurrently; one parse call exclusively owns its cursor and batch
//! accumulator, so concurrent parse calls on independent buffers are
//! safe.
//!
//! Cancellation is cooperative and checked once per page. A cancelled
//! parse drops whatever partial batch it had accumulated and does not
//! emit [`ParseEvent::Done`]; it is a clean termination, not an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{BookError, Result};
use crate::moves::{MoveDecoder, NullMoveDecoder};
use crate::page::{Page, PAGE_SIZE, RECORDS_START};
use crate::record::{decode_record, Entry};

/// Events emitted over the parse channel
#[derive(Debug, Clone)]
pub enum ParseEvent {
    /// Decoded entry pairs, interleaved (white, black, white, black, ...)
    /// in position order
    Batch(Vec<Entry>),
    /// Fraction of pages processed, in (0, 1]
    Progress(f64),
    /// Normal completion, after the final (possibly partial) batch
    Done,
}

/// Cooperative cancellation handle.
///
/// Clones share the same flag. The scheduler checks it once per page;
/// it never interrupts a page or record mid-decode.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation at the next page boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Batch size and inter-batch pause (milliseconds) scaled to file size
fn batch_plan(number_pages: usize) -> (usize, u64) {
    if number_pages > 10_000 {
        (10_000, 500)
    } else if number_pages > 1000 {
        (5000, 200)
    } else {
        (1000, 100)
    }
}

/// Streaming CTG book parser
///
/// Holds the external move-decoding service; all per-parse state lives
/// on the stack of [`parse`](Self::parse).
pub struct Parser {
    moves: Arc<dyn MoveDecoder>,
    pause_between_batches: bool,
}

impl Parser {
    /// Parser that discards move and analysis codes.
    pub fn new() -> Self {
        Self::with_move_decoder(Arc::new(NullMoveDecoder))
    }

    /// Parser backed by the given move-decoding service.
    pub fn with_move_decoder(moves: Arc<dyn MoveDecoder>) -> Self {
        Self {
            moves,
            pause_between_batches: true,
        }
    }

    /// Toggle the inter-batch pause (on by default). Turning it off
    /// removes the backpressure suspension but keeps batch boundaries.
    pub fn pause_between_batches(mut self, enabled: bool) -> Self {
        self.pause_between_batches = enabled;
        self
    }

    /// Decode `buffer` and emit [`ParseEvent`]s over `events`.
    ///
    /// Pages are processed in file order, skipping the metadata page 0.
    /// Entry pairs accumulate until a page boundary finds the batch at
    /// or above the planned size; the batch is then emitted, followed
    /// by a progress fraction and the scaled pause. On completion a
    /// non-empty leftover batch is emitted without a progress event,
    /// then [`ParseEvent::Done`].
    ///
    /// # Errors
    /// [`BookError::InvalidFileSize`] before any page is touched, or
    /// any fatal record error, which aborts the parse immediately.
    pub async fn parse(
        &self,
        buffer: &[u8],
        events: mpsc::Sender<ParseEvent>,
        cancel: &CancelToken,
    ) -> Result<()> {
        if buffer.is_empty() || buffer.len() % PAGE_SIZE != 0 {
            return Err(BookError::InvalidFileSize { len: buffer.len() });
        }

        let number_pages = buffer.len() / PAGE_SIZE;
        let (batch_size, pause_ms) = batch_plan(number_pages);
        info!(number_pages, batch_size, pause_ms, "parsing CTG book");

        let mut batch: Vec<Entry> = Vec::new();
        for page_number in 1..number_pages {
            if cancel.is_cancelled() {
                debug!(page_number, dropped = batch.len(), "parse cancelled");
                return Ok(());
            }

            let page = Page::read(buffer, page_number);
            let mut cursor = RECORDS_START;
            for pos in 0..page.position_count {
                let (entry, entry_black, next) =
                    decode_record(&page, pos, cursor, self.moves.as_ref())?;
                cursor = next;
                batch.push(entry);
                batch.push(entry_black);
            }

            if batch.len() >= batch_size {
                debug!(entries = batch.len(), page_number, "emitting batch");
                emit(&events, ParseEvent::Batch(std::mem::take(&mut batch))).await;
                emit(
                    &events,
                    ParseEvent::Progress(page_number as f64 / number_pages as f64),
                )
                .await;
                if self.pause_between_batches {
                    tokio::time::sleep(Duration::from_millis(pause_ms)).await;
                }
            }
        }

        if !batch.is_empty() {
            debug!(entries = batch.len(), "emitting final batch");
            emit(&events, ParseEvent::Batch(batch)).await;
        }
        emit(&events, ParseEvent::Done).await;
        Ok(())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

async fn emit(events: &mpsc::Sender<ParseEvent>, event: ParseEvent) {
    // A dropped receiver is not fatal; decoding carries on so the
    // parse result still reflects the file's validity.
    if events.send(event).await.is_err() {
        warn!("parse event receiver dropped");
    }
}
