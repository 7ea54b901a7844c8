//! Lazy streaming cursor
//!
//! A [`Cursor`] turns a [`RowProducer`] (one row per call, position kept
//! between calls) into a single-pass, offset/limit-windowed row stream.
//! Rows are only pulled from the source when the consumer asks for them,
//! and the source is released exactly once however iteration ends.
//!
//! ```ignore
//! let mut cursor = Cursor::new(ProjectingProducer, RowShape::All, result_set, Window::new(3, 4));
//! for row in cursor.iterator()? {
//!     let row = row?;
//!     // only rows 3..=6 of the result set get here
//! }
//! assert!(cursor.is_consumed());
//! ```

mod iter;
mod producer;
mod slot;
mod state;
mod window;


pub use iter::CursorIterator;
pub use producer::{PushAdapter, PushSource, RowProducer, SourceHandle};
pub use slot::RowSlot;
pub use state::{Cursor, CursorStatus};
pub use window::Window;
