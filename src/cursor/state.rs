//! Cursor state machine
//!
//! ```text
//!   Created ──first fetch──▶ Open ──close()──────────────▶ Closed
//!                             │
//!                             └──no row / limit reached──▶ Consumed
//! ```
//!
//! `Closed` and `Consumed` are terminal. Both mean the source has been
//! released; `Consumed` additionally means the logical row sequence ended.

use super::iter::CursorIterator;
use super::producer::{RowProducer, SourceHandle};
use super::slot::RowSlot;
use super::window::Window;
use crate::error::{CursorError, Result};
use std::fmt;
use tracing::{debug, warn};

/// Lifecycle status of a [`Cursor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStatus {
    /// No row has been read yet
    Created,
    /// At least one read attempt has been made against the source
    Open,
    /// Source released, possibly before the rows ran out
    Closed,
    /// Source released and every row in the window was read
    Consumed,
}

impl CursorStatus {
    /// Source already released
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Consumed)
    }
}

/// Lazy, single-pass cursor over the rows of a [`RowProducer`]
///
/// Rows are pulled one at a time through the single [`CursorIterator`]
/// handed out by [`Cursor::iterator`]. The source is released exactly once:
/// when the rows run out, when the window's limit is reached, on an explicit
/// [`Cursor::close`], when a fetch fails, or when the cursor is dropped.
///
/// Not thread safe; all calls must be strictly sequential.
pub struct Cursor<P: RowProducer> {
    producer: P,
    source: P::Source,
    shape: P::Shape,
    window: Window,
    slot: RowSlot<P::Row>,
    status: CursorStatus,
    /// Every row drawn from the producer, skipped ones included
    rows_read_from_source: usize,
    /// Rows handed to the consumer
    yielded_count: usize,
    iterator_issued: bool,
}

impl<P: RowProducer> Cursor<P> {
    pub fn new(producer: P, shape: P::Shape, source: P::Source, window: Window) -> Self {
        Self {
            producer,
            source,
            shape,
            window,
            slot: RowSlot::new(),
            status: CursorStatus::Created,
            rows_read_from_source: 0,
            yielded_count: 0,
            iterator_issued: false,
        }
    }

    pub fn status(&self) -> CursorStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == CursorStatus::Open
    }

    pub fn is_consumed(&self) -> bool {
        self.status == CursorStatus::Consumed
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn shape(&self) -> &P::Shape {
        &self.shape
    }

    pub fn rows_read_from_source(&self) -> usize {
        self.rows_read_from_source
    }

    pub fn rows_yielded(&self) -> usize {
        self.yielded_count
    }

    /// Position of the last yielded row in the full source sequence
    ///
    /// `None` until the first row has been yielded.
    pub fn current_index(&self) -> Option<usize> {
        self.yielded_count
            .checked_sub(1)
            .map(|yielded_index| self.window.offset() + yielded_index)
    }

    /// Hand out the one iteration handle of this cursor
    ///
    /// Fails with [`CursorError::IllegalReuse`] on every call after the
    /// first, whatever the cursor's state.
    pub fn iterator(&mut self) -> Result<CursorIterator<'_, P>> {
        if self.iterator_issued {
            return Err(CursorError::IllegalReuse);
        }
        self.iterator_issued = true;
        Ok(CursorIterator::new(self))
    }

    /// Release the source; no-op once released
    pub fn close(&mut self) {
        if self.release_source() {
            self.status = CursorStatus::Closed;
            debug!(
                rows_read = self.rows_read_from_source,
                rows_yielded = self.yielded_count,
                "cursor closed"
            );
        }
    }

    /// Next row at or past the window's offset
    pub(crate) fn fetch_next_respecting_window(&mut self) -> Result<Option<P::Row>> {
        if self.is_closed() {
            return Ok(None);
        }

        let mut row = self.fetch_one_from_source()?;
        while row.is_some() && self.rows_read_from_source <= self.window.offset() {
            row = self.fetch_one_from_source()?;
        }
        Ok(row)
    }

    pub(crate) fn record_yield(&mut self) {
        self.yielded_count += 1;
    }

    fn fetch_one_from_source(&mut self) -> Result<Option<P::Row>> {
        if self.is_closed() {
            return Ok(None);
        }

        if self.status == CursorStatus::Created {
            debug!(
                offset = self.window.offset(),
                limit = ?self.window.limit(),
                "cursor opened"
            );
        }
        self.status = CursorStatus::Open;

        if self.window.limit() == Some(0) {
            self.on_exhaustion_or_limit();
            return Ok(None);
        }

        if let Err(err) = self
            .producer
            .advance_one(&mut self.source, &self.shape, &mut self.slot)
        {
            warn!(
                rows_read = self.rows_read_from_source,
                error = %err,
                "row fetch failed, releasing source"
            );
            self.slot.take();
            self.close();
            return Err(err.into());
        }

        let next = self.slot.take();
        if next.is_some() {
            self.rows_read_from_source += 1;
        }

        let limit_reached = self.window.end() == Some(self.rows_read_from_source);
        if next.is_none() || limit_reached {
            self.on_exhaustion_or_limit();
        }
        Ok(next)
    }

    /// Release the source and mark the cursor consumed in one step
    fn on_exhaustion_or_limit(&mut self) {
        self.release_source();
        self.status = CursorStatus::Consumed;
        debug!(
            rows_read = self.rows_read_from_source,
            rows_yielded = self.yielded_count,
            "cursor consumed"
        );
    }

    /// Returns `true` if this call released the source
    fn release_source(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        if let Err(err) = self.source.release() {
            warn!(error = %err, "failed to release cursor source");
        }
        true
    }
}

impl<P: RowProducer> Drop for Cursor<P> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<P: RowProducer> fmt::Debug for Cursor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("status", &self.status)
            .field("window", &self.window)
            .field("rows_read_from_source", &self.rows_read_from_source)
            .field("yielded_count", &self.yielded_count)
            .field("iterator_issued", &self.iterator_issued)
            .finish_non_exhaustive()
    }
}
