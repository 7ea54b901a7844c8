//! The single iteration handle of a cursor

use super::producer::RowProducer;
use super::state::{Cursor, CursorStatus};
use crate::error::{CursorError, Result};
use std::iter::FusedIterator;

/// Lookahead pull iterator bound to one [`Cursor`]
///
/// Holds the only mutable borrow of the cursor, so nothing else can drive
/// fetches while it is alive. `has_next` may fetch a row ahead of time and
/// keeps it until `next_row` hands it out.
///
/// Also usable as a plain [`Iterator`] yielding `Result` items; after an
/// error or the end of the rows it keeps returning `None`.
pub struct CursorIterator<'c, P: RowProducer> {
    cursor: &'c mut Cursor<P>,
    lookahead: Option<P::Row>,
}

impl<'c, P: RowProducer> CursorIterator<'c, P> {
    pub(crate) fn new(cursor: &'c mut Cursor<P>) -> Self {
        Self {
            cursor,
            lookahead: None,
        }
    }

    /// Whether another row is available, fetching it if needed
    pub fn has_next(&mut self) -> Result<bool> {
        if self.lookahead.is_none() {
            self.lookahead = self.cursor.fetch_next_respecting_window()?;
        }
        Ok(self.lookahead.is_some())
    }

    /// Next row, or [`CursorError::Exhausted`] if there is none
    pub fn next_row(&mut self) -> Result<P::Row> {
        let next = match self.lookahead.take() {
            Some(row) => Some(row),
            None => self.cursor.fetch_next_respecting_window()?,
        };

        match next {
            Some(row) => {
                self.cursor.record_yield();
                Ok(row)
            }
            None => Err(CursorError::Exhausted),
        }
    }

    /// Rows cannot be removed through a cursor
    pub fn remove(&mut self) -> Result<()> {
        Err(CursorError::Unsupported("Cannot remove element from cursor"))
    }

    /// Abandon iteration and release the source
    ///
    /// A row fetched ahead by `has_next` is discarded.
    pub fn close(&mut self) {
        self.lookahead = None;
        self.cursor.close();
    }

    pub fn cursor(&self) -> &Cursor<P> {
        &*self.cursor
    }

    pub fn status(&self) -> CursorStatus {
        self.cursor.status()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.current_index()
    }
}

impl<P: RowProducer> Iterator for CursorIterator<'_, P> {
    type Item = Result<P::Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_row()),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<P: RowProducer> FusedIterator for CursorIterator<'_, P> {}

impl<P: RowProducer> std::fmt::Debug for CursorIterator<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorIterator")
            .field("cursor", &self.cursor)
            .field("has_lookahead", &self.lookahead.is_some())
            .finish()
    }
}
