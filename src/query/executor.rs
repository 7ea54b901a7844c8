//! Query execution engine

use crate::config::CursorConfig;
use crate::cursor::{Cursor, RowProducer, Window};
use crate::source::{MemoryResultSet, ProjectingProducer};
use crate::types::RowShape;
use tracing::debug;

/// Opens one cursor per streaming query result
///
/// The application gets the [`Cursor`], not its iterator, and decides when
/// to iterate or close it.
#[derive(Debug, Clone, Default)]
pub struct ExecutionEngine {
    config: CursorConfig,
}

impl ExecutionEngine {
    /// Create a new execution engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom cursor configuration
    pub fn with_config(config: CursorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// Window used for queries that do not ask for one
    pub fn default_window(&self) -> Window {
        self.config.effective_window(None)
    }

    /// Wrap a producer/source pair in a cursor
    ///
    /// `window == None` uses the configured default. The configured row cap
    /// applies either way.
    pub fn open_cursor<P: RowProducer>(
        &self,
        producer: P,
        shape: P::Shape,
        source: P::Source,
        window: Option<Window>,
    ) -> Cursor<P> {
        let window = self.config.effective_window(window);
        debug!(
            offset = window.offset(),
            limit = ?window.limit(),
            "opening streaming cursor"
        );
        Cursor::new(producer, shape, source, window)
    }

    /// Stream an in-memory result set
    pub fn scan(
        &self,
        result_set: MemoryResultSet,
        shape: RowShape,
        window: Option<Window>,
    ) -> Cursor<ProjectingProducer> {
        self.open_cursor(ProjectingProducer, shape, result_set, window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::PushAdapter;
    use crate::error::CursorError;
    use crate::types::{Row, Value};

    fn users(n: i64) -> MemoryResultSet {
        MemoryResultSet::new(
            vec!["id".into(), "name".into(), "active".into()],
            (0..n)
                .map(|i| {
                    vec![
                        Value::Integer(i),
                        Value::Text(format!("user{}", i)),
                        Value::Bool(i % 2 == 0),
                    ]
                })
                .collect(),
        )
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter()
            .map(|row| match row[0] {
                Value::Integer(id) => id,
                _ => panic!("unexpected value {:?}", row[0]),
            })
            .collect()
    }

    #[test]
    fn test_scan_with_window() {
        let engine = ExecutionEngine::new();
        let rs = users(10);
        let stats = rs.stats();
        let mut cursor = engine.scan(rs, RowShape::columns([0, 1]), Some(Window::new(3, 4)));

        let rows: Vec<Row> = cursor
            .iterator()
            .unwrap()
            .collect::<Result<_, CursorError>>()
            .unwrap();
        assert_eq!(ids(&rows), vec![3, 4, 5, 6]);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(cursor.current_index(), Some(6));
        assert!(cursor.is_consumed());
        assert_eq!(stats.rows_fetched(), 7);
        assert_eq!(stats.releases(), 1);
    }

    #[test]
    fn test_row_cap_applies() {
        let engine = ExecutionEngine::with_config(CursorConfig {
            max_rows: Some(2),
            ..Default::default()
        });
        let mut cursor = engine.scan(users(10), RowShape::All, None);
        assert_eq!(cursor.window(), Window::first(2));

        let rows: Vec<Row> = cursor
            .iterator()
            .unwrap()
            .collect::<Result<_, CursorError>>()
            .unwrap();
        assert_eq!(ids(&rows), vec![0, 1]);
    }

    #[test]
    fn test_paging_default_window() {
        let engine = ExecutionEngine::with_config(CursorConfig::for_paging(3));
        assert_eq!(engine.default_window(), Window::first(3));
        let mut cursor = engine.scan(users(10), RowShape::All, None);
        assert_eq!(cursor.iterator().unwrap().count(), 3);
    }

    #[test]
    fn test_open_cursor_with_push_adapter() {
        let engine = ExecutionEngine::new();
        let rs = users(4);
        let stats = rs.stats();
        let mut cursor = engine.open_cursor(
            PushAdapter::<MemoryResultSet>::new(),
            RowShape::columns([2]),
            rs,
            Some(Window::from_offset(2)),
        );

        let rows: Vec<Row> = cursor
            .iterator()
            .unwrap()
            .collect::<Result<_, CursorError>>()
            .unwrap();
        assert_eq!(rows, vec![vec![Value::Bool(true)], vec![Value::Bool(false)]]);
        assert_eq!(stats.fetch_calls(), 5);
        assert_eq!(stats.releases(), 1);
    }

    #[test]
    fn test_abandoned_scan_is_released() {
        let engine = ExecutionEngine::new();
        let rs = users(5);
        let stats = rs.stats();
        {
            let mut cursor = engine.scan(rs, RowShape::All, None);
            let mut it = cursor.iterator().unwrap();
            it.next_row().unwrap();
            assert!(it.cursor().is_open());
        }
        assert_eq!(stats.rows_fetched(), 1);
        assert_eq!(stats.releases(), 1);
    }

    #[test]
    fn test_source_failure_surfaces() {
        let engine = ExecutionEngine::new();
        let rs = users(5).fail_at(3);
        let stats = rs.stats();
        let mut cursor = engine.scan(rs, RowShape::All, None);

        let result: Result<Vec<Row>, CursorError> = cursor.iterator().unwrap().collect();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Source error: failed to fetch row 3");
        assert!(!cursor.is_open());
        assert!(!cursor.is_consumed());
        assert_eq!(stats.releases(), 1);
    }
}
