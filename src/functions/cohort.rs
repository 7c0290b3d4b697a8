//! `circe_json_to_sql(expr_b64, options_json)`.
//!
//! The cohort expression arrives base64-encoded; options JSON is passed
//! through untouched.

use std::error::Error;

use duckdb::core::{DataChunkHandle, LogicalTypeId};
use duckdb::vscalar::{ScalarFunctionSignature, VScalar};
use duckdb::vtab::arrow::WritableVector;

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::marshal::decode_payload;
use crate::runtime::{ensure_loaded, NativeRuntime};

use super::rows::{map_rows, read_varchar, write_varchar};

pub struct CirceJsonToSql;

impl CirceJsonToSql {
    pub const NAME: &'static str = "circe_json_to_sql";
}

/// Decode one cohort expression and convert it to SQL.
pub fn json_to_sql(runtime: &NativeRuntime, expr_b64: &str, options_json: &str) -> Result<String> {
    let expr_json = decode_payload(CirceJsonToSql::NAME, expr_b64)?;
    runtime.build_cohort_sql(&expr_json, options_json)
}

impl VScalar for CirceJsonToSql {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> std::result::Result<(), Box<dyn Error>> {
        let runtime = ensure_loaded()?;
        let columns = [read_varchar(input, 0), read_varchar(input, 1)];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            json_to_sql(&runtime, args[0], args[1])
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        vec![ScalarFunctionSignature::exact(
            vec![LogicalTypeId::Varchar.into(), LogicalTypeId::Varchar.into()],
            LogicalTypeId::Varchar.into(),
        )]
    }
}
