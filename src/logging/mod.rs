//! Structured logging with call context.
//!
//! Provides a context type that prefixes every log line with the SQL
//! function (and row, where one applies) for easy correlation.

pub mod structured;

pub use structured::*;
