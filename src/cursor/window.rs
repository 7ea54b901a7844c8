//! Offset/limit window over the logical row sequence

use serde::{Deserialize, Serialize};

/// Immutable offset/limit pair
///
/// `limit == None` means unbounded. A window is fixed for the whole lifetime
/// of the cursor it was handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    offset: usize,
    limit: Option<usize>,
}

impl Default for Window {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Window {
    /// Everything, from the first row
    pub const UNBOUNDED: Window = Window {
        offset: 0,
        limit: None,
    };

    pub const fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }

    /// Skip `offset` rows, no limit
    pub const fn from_offset(offset: usize) -> Self {
        Self {
            offset,
            limit: None,
        }
    }

    /// First `limit` rows
    pub const fn first(limit: usize) -> Self {
        Self::new(0, limit)
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub const fn is_unbounded(&self) -> bool {
        self.limit.is_none()
    }

    /// Number of source rows after which the window is satisfied
    ///
    /// `None` when the limit is unbounded or `offset + limit` overflows.
    pub fn end(&self) -> Option<usize> {
        self.limit.and_then(|limit| self.offset.checked_add(limit))
    }

    /// Same offset, limit capped at `max_rows`
    pub fn capped(self, max_rows: usize) -> Self {
        let limit = match self.limit {
            Some(limit) => limit.min(max_rows),
            None => max_rows,
        };
        Self {
            offset: self.offset,
            limit: Some(limit),
        }
    }

    /// How many rows a source of `total` rows exposes through this window
    pub fn visible_len(&self, total: usize) -> usize {
        let available = total.saturating_sub(self.offset);
        match self.limit {
            Some(limit) => available.min(limit),
            None => available,
        }
    }
}
