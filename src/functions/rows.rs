//! Row plumbing shared by the scalar functions.
//!
//! Columns are copied out of DuckDB vectors into owned strings, mapped row by
//! row, and written back. A NULL in any argument produces a NULL result
//! without calling the row function.

use duckdb::core::{DataChunkHandle, Inserter};
use duckdb::ffi::duckdb_string_t;
use duckdb::types::DuckString;
use duckdb::vtab::arrow::WritableVector;

use crate::error::Result;
use crate::logging::structured::LogContext;

pub type Column = Vec<Option<String>>;

/// Copy a VARCHAR column out of the input chunk.
pub fn read_varchar(input: &DataChunkHandle, column: usize) -> Column {
    let rows = input.len();
    let vector = input.flat_vector(column);
    let values = vector.as_slice_with_len::<duckdb_string_t>(rows);

    values
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            if vector.row_is_null(row as u64) {
                None
            } else {
                let mut raw = *raw;
                Some(DuckString::new(&mut raw).as_str().into_owned())
            }
        })
        .collect()
}

/// Write results into the output vector, marking `None` rows NULL.
pub fn write_varchar(output: &mut dyn WritableVector, rows: &[Option<String>]) {
    let mut vector = output.flat_vector();
    for (row, value) in rows.iter().enumerate() {
        match value {
            Some(text) => vector.insert(row, text.as_str()),
            None => vector.set_null(row),
        }
    }
}

/// Apply `f` to every row whose arguments are all non-NULL.
///
/// The first error aborts the whole chunk.
pub fn map_rows<F>(ctx: LogContext, columns: &[Column], rows: usize, mut f: F) -> Result<Column>
where
    F: FnMut(&[&str]) -> Result<String>,
{
    let mut out = Vec::with_capacity(rows);
    let mut args: Vec<&str> = Vec::with_capacity(columns.len());

    for row in 0..rows {
        args.clear();
        for column in columns {
            match column.get(row).and_then(|v| v.as_deref()) {
                Some(value) => args.push(value),
                None => break,
            }
        }

        if args.len() < columns.len() {
            out.push(None);
            continue;
        }

        match f(&args) {
            Ok(value) => out.push(Some(value)),
            Err(e) => {
                log::warn!("{} ROW_FAILED error={}", ctx.with_row(row), e);
                return Err(e);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CirceError;

    fn column(values: &[Option<&str>]) -> Column {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_null_in_any_argument_yields_null() {
        let columns = [
            column(&[Some("a"), None, Some("c")]),
            column(&[Some("1"), Some("2"), None]),
        ];
        let mut calls = 0;
        let out = map_rows(LogContext::new("test"), &columns, 3, |args| {
            calls += 1;
            Ok(args.join("+"))
        })
        .unwrap();

        assert_eq!(out, vec![Some("a+1".to_string()), None, None]);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_columns_call_every_row() {
        let out = map_rows(LogContext::new("test"), &[], 2, |args| {
            assert!(args.is_empty());
            Ok("x".to_string())
        })
        .unwrap();
        assert_eq!(out, vec![Some("x".to_string()), Some("x".to_string())]);
    }

    #[test]
    fn test_first_error_aborts() {
        let columns = [column(&[Some("ok"), Some("bad"), Some("ok")])];
        let mut seen = Vec::new();
        let err = map_rows(LogContext::new("test"), &columns, 3, |args| {
            seen.push(args[0].to_string());
            if args[0] == "bad" {
                Err(CirceError::NullResult { function: "test" })
            } else {
                Ok(args[0].to_string())
            }
        })
        .unwrap_err();

        assert!(matches!(err, CirceError::NullResult { .. }));
        assert_eq!(seen, vec!["ok", "bad"]);
    }
}
