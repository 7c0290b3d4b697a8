//! Structured logging utilities.
//!
//! Log lines are event-style (`NATIVE_CALL_FAILED error=...`) and carry the
//! SQL function name and, for per-row work, the row index.

use std::fmt;

/// Logging context for one scalar function invocation.
#[derive(Debug, Clone, Copy)]
pub struct LogContext {
    pub function: &'static str,
    pub row: Option<usize>,
}

impl LogContext {
    pub fn new(function: &'static str) -> Self {
        Self {
            function,
            row: None,
        }
    }

    pub fn with_row(&self, row: usize) -> Self {
        Self {
            function: self.function,
            row: Some(row),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "[fn={}] [row={}]", self.function, row),
            None => write!(f, "[fn={}]", self.function),
        }
    }
}
