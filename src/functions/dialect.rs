//! SQL rendering and dialect translation forwarders.

use std::error::Error;

use duckdb::core::{DataChunkHandle, LogicalTypeId};
use duckdb::vscalar::{ScalarFunctionSignature, VScalar};
use duckdb::vtab::arrow::WritableVector;

use crate::logging::structured::LogContext;
use crate::runtime::ensure_loaded;

use super::rows::{map_rows, read_varchar, write_varchar};

fn varchar_signature(arity: usize) -> Vec<ScalarFunctionSignature> {
    vec![ScalarFunctionSignature::exact(
        (0..arity).map(|_| LogicalTypeId::Varchar.into()).collect(),
        LogicalTypeId::Varchar.into(),
    )]
}

/// `circe_sql_render(sql_template, parameters_json)`.
pub struct CirceSqlRender;

impl CirceSqlRender {
    pub const NAME: &'static str = "circe_sql_render";
}

impl VScalar for CirceSqlRender {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let runtime = ensure_loaded()?;
        let columns = [read_varchar(input, 0), read_varchar(input, 1)];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            runtime.sql_render(args[0], args[1])
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        varchar_signature(2)
    }
}

/// `circe_sql_translate(sql, target_dialect)`.
pub struct CirceSqlTranslate;

impl CirceSqlTranslate {
    pub const NAME: &'static str = "circe_sql_translate";
}

impl VScalar for CirceSqlTranslate {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let runtime = ensure_loaded()?;
        let columns = [read_varchar(input, 0), read_varchar(input, 1)];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            runtime.sql_translate(args[0], args[1])
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        varchar_signature(2)
    }
}

/// `circe_sql_render_translate(sql_template, target_dialect, parameters_json)`.
pub struct CirceSqlRenderTranslate;

impl CirceSqlRenderTranslate {
    pub const NAME: &'static str = "circe_sql_render_translate";
}

impl VScalar for CirceSqlRenderTranslate {
    type State = ();

    unsafe fn invoke(
        _: &Self::State,
        input: &mut DataChunkHandle,
        output: &mut dyn WritableVector,
    ) -> Result<(), Box<dyn Error>> {
        let runtime = ensure_loaded()?;
        let columns = [
            read_varchar(input, 0),
            read_varchar(input, 1),
            read_varchar(input, 2),
        ];
        let rows = map_rows(LogContext::new(Self::NAME), &columns, input.len(), |args| {
            runtime.sql_render_translate(args[0], args[1], args[2])
        })?;
        write_varchar(output, &rows);
        Ok(())
    }

    fn signatures() -> Vec<ScalarFunctionSignature> {
        varchar_signature(3)
    }
}
