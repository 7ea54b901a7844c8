//! Cursor configuration
//!
//! Default window and row cap applied by the execution engine to every
//! cursor it opens. Loadable from JSON.

use crate::cursor::Window;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 游标配置（Cursor configuration）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Window used when a query does not ask for one
    pub default_window: Window,

    /// Upper bound on the rows any single cursor may yield
    ///
    /// - None = no cap (default)
    /// - Some(n) = every window's limit is clamped to n
    pub max_rows: Option<usize>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            default_window: Window::UNBOUNDED,
            max_rows: None,
        }
    }
}

impl CursorConfig {
    /// 通用配置：不限行数
    pub fn for_general() -> Self {
        Self::default()
    }

    /// Page-sized reads: queries without a window get the first page
    pub fn for_paging(page_size: usize) -> Self {
        Self {
            default_window: Window::first(page_size),
            ..Default::default()
        }
    }

    /// 测试用配置：小上限，避免失控的扫描
    pub fn for_testing() -> Self {
        Self {
            max_rows: Some(1000),
            ..Default::default()
        }
    }

    /// Window a cursor actually gets for a requested one
    pub fn effective_window(&self, requested: Option<Window>) -> Window {
        let window = requested.unwrap_or(self.default_window);
        match self.max_rows {
            Some(max_rows) => window.capped(max_rows),
            None => window,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.max_rows.is_some()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
