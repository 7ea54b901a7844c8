//! Row model used by the bundled sources and the query layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dynamically typed column value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// Text string
    Text(String),

    /// Null value
    Null,
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Null => f.write_str("NULL"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// A row is the list of its column values
pub type Row = Vec<Value>;

/// Which source columns a materialized row carries, and in what order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowShape {
    /// Every column, in source order
    #[default]
    All,
    /// Listed source column positions
    Columns(Vec<usize>),
}

impl RowShape {
    pub fn columns(positions: impl Into<Vec<usize>>) -> Self {
        RowShape::Columns(positions.into())
    }

    /// Number of columns in a projected row, given the source width
    pub fn width(&self, source_width: usize) -> usize {
        match self {
            RowShape::All => source_width,
            RowShape::Columns(positions) => positions.len(),
        }
    }

    /// Materialize `row` in this shape
    ///
    /// Positions past the end of the source row become `Value::Null`.
    pub fn project(&self, row: &[Value]) -> Row {
        match self {
            RowShape::All => row.to_vec(),
            RowShape::Columns(positions) => positions
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_columns() {
        let row: Row = vec![Value::Integer(1), "alice".into(), Value::Bool(true)];

        assert_eq!(RowShape::All.project(&row), row);
        assert_eq!(
            RowShape::columns([2, 0]).project(&row),
            vec![Value::Bool(true), Value::Integer(1)]
        );
        assert_eq!(
            RowShape::columns([1, 9]).project(&row),
            vec![Value::Text("alice".into()), Value::Null]
        );
        assert_eq!(RowShape::columns([1, 9]).width(3), 2);
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Integer(1) < Value::Float(1.5));
        assert!(Value::Text("a".into()) < Value::Text("b".into()));
        assert_eq!(Value::Null.partial_cmp(&Value::Integer(0)), None);
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
