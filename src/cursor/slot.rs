//! Single-row hand-off buffer between a producer and the cursor

/// Holds at most one materialized row
///
/// The producer writes into the slot during a fetch; the cursor takes the
/// row out right after, so the slot is always empty between fetches.
#[derive(Debug)]
pub struct RowSlot<R> {
    result: Option<R>,
}

impl<R> Default for RowSlot<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RowSlot<R> {
    pub fn new() -> Self {
        Self { result: None }
    }

    /// Store a row, returning `false` if the slot was already filled
    ///
    /// A filled slot is left untouched.
    pub fn put(&mut self, row: R) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(row);
        true
    }

    pub fn is_filled(&self) -> bool {
        self.result.is_some()
    }

    /// Read and clear
    pub fn take(&mut self) -> Option<R> {
        self.result.take()
    }
}
