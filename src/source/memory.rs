//! In-memory result set
//!
//! Streams rows out of a `Vec<Row>` the way a database result set streams
//! them out of a server buffer: a position that only moves forward, and a
//! handle that has to be released. Faults can be injected for testing the
//! cursor's error paths.

use crate::cursor::{PushSource, RowProducer, RowSlot, SourceHandle};
use crate::error::SourceError;
use crate::types::{Row, RowShape};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counters shared between a result set and whoever created it
///
/// The cursor takes ownership of the result set, so tests and callers keep
/// a clone of this handle to observe it afterwards.
#[derive(Debug, Default)]
pub struct ResultSetStats {
    rows_fetched: AtomicUsize,
    fetch_calls: AtomicUsize,
    releases: AtomicUsize,
}

impl ResultSetStats {
    /// Rows handed out by the result set
    pub fn rows_fetched(&self) -> usize {
        self.rows_fetched.load(Ordering::Relaxed)
    }

    /// Fetch attempts, including ones that found no row
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Relaxed)
    }

    /// `release()` calls, failed ones included
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::Relaxed)
    }
}

/// Forward-only result set over rows held in memory
#[derive(Debug)]
pub struct MemoryResultSet {
    columns: Vec<String>,
    rows: Vec<Row>,
    position: usize,
    released: bool,
    /// Fetching the row at this position fails
    fail_at: Option<usize>,
    fail_release: bool,
    stats: Arc<ResultSetStats>,
}

impl MemoryResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            position: 0,
            released: false,
            fail_at: None,
            fail_release: false,
            stats: Arc::new(ResultSetStats::default()),
        }
    }

    /// Result set without column names
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let columns = (0..width).map(|i| format!("c{}", i)).collect();
        Self::new(columns, rows)
    }

    /// Make the fetch of the row at `position` fail
    pub fn fail_at(mut self, position: usize) -> Self {
        self.fail_at = Some(position);
        self
    }

    /// Make `release()` report an error
    pub fn fail_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn stats(&self) -> Arc<ResultSetStats> {
        Arc::clone(&self.stats)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Advance by one row; `Ok(None)` once past the last row
    pub fn next_row(&mut self) -> Result<Option<&Row>, SourceError> {
        if self.released {
            return Err(SourceError::new("result set is already released"));
        }
        self.stats.fetch_calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_at == Some(self.position) {
            return Err(SourceError::with_cause(
                format!("failed to fetch row {}", self.position),
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }

        match self.rows.get(self.position) {
            Some(row) => {
                self.position += 1;
                self.stats.rows_fetched.fetch_add(1, Ordering::Relaxed);
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }
}

impl SourceHandle for MemoryResultSet {
    fn release(&mut self) -> Result<(), SourceError> {
        self.stats.releases.fetch_add(1, Ordering::Relaxed);
        self.released = true;
        self.rows = Vec::new();
        if self.fail_release {
            return Err(SourceError::new("result set release failed"));
        }
        Ok(())
    }
}

impl PushSource for MemoryResultSet {
    type Shape = RowShape;
    type Row = Row;

    fn visit(
        &mut self,
        shape: &RowShape,
        visitor: &mut dyn FnMut(Row) -> ControlFlow<()>,
    ) -> Result<(), SourceError> {
        while let Some(row) = self.next_row()? {
            if visitor(shape.project(row)).is_break() {
                break;
            }
        }
        Ok(())
    }
}

/// Pulls one projected row per call from a [`MemoryResultSet`]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectingProducer;

impl RowProducer for ProjectingProducer {
    type Source = MemoryResultSet;
    type Shape = RowShape;
    type Row = Row;

    fn advance_one(
        &mut self,
        source: &mut MemoryResultSet,
        shape: &RowShape,
        slot: &mut RowSlot<Row>,
    ) -> Result<(), SourceError> {
        if let Some(row) = source.next_row()? {
            slot.put(shape.project(row));
        }
        Ok(())
    }
}
