//! Lazy streaming cursor
//!
//! 面向流式查询结果的惰性单遍游标
//!
//! ## 核心特性
//! - Pull-based: rows are fetched from the source only when asked for
//! - Offset/limit windowing applied while streaming
//! - Single iterator per cursor
//! - The source is released exactly once: on exhaustion, limit, close,
//!   fetch failure or drop
//!
//! ## 架构
//! - 游标层: `Cursor` state machine + `CursorIterator` lookahead handle
//! - 生产者层: `RowProducer` (pull one) / `PushSource` + `PushAdapter` (push many)
//! - 数据源: in-memory `MemoryResultSet`
//! - 查询层: `ExecutionEngine` opens one cursor per streaming result

pub mod config;
pub mod cursor;
pub mod query;
pub mod source;
pub mod types;

mod error;

pub use config::CursorConfig;
pub use cursor::{
    Cursor, CursorIterator, CursorStatus, PushAdapter, PushSource, RowProducer, RowSlot,
    SourceHandle, Window,
};
pub use error::{BoxedCause, CursorError, Result, SourceError};
pub use query::ExecutionEngine;
pub use source::{MemoryResultSet, ProjectingProducer, ResultSetStats};
pub use types::{Row, RowShape, Value};
